use crate::mood::{trimmed_len, Mood};

#[derive(uniffi::Record, Clone, Debug, PartialEq)]
pub struct AppState {
    pub rev: u64,
    /// Raw text of the name field, exactly as typed.
    pub name_input: String,
    /// Trimmed length of `name_input`; this is what the screen displays.
    pub char_count: u32,
    pub mood: Mood,
    pub emoji: String,
    pub status_message: String,
    pub counter: u64,
    /// Ordered, unique, trimmed, non-empty names.
    pub names: Vec<String>,
    pub image: Option<ImageState>,
    pub prompt: Option<PendingPrompt>,
    pub alert: Option<Alert>,
    pub busy: BusyState,
}

impl AppState {
    pub fn empty() -> Self {
        Self {
            rev: 0,
            name_input: String::new(),
            char_count: 0,
            mood: Mood::Neutral,
            emoji: Mood::Neutral.emoji().to_string(),
            status_message: String::new(),
            counter: 0,
            names: vec![],
            image: None,
            prompt: None,
            alert: None,
            busy: BusyState::idle(),
        }
    }

    /// Replace the name field and recompute everything derived from it.
    pub(crate) fn set_name_input(&mut self, value: String) {
        self.char_count = trimmed_len(&value);
        self.mood = Mood::for_len(self.char_count);
        self.emoji = self.mood.emoji().to_string();
        self.name_input = value;
    }
}

#[derive(uniffi::Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Library,
}

#[derive(uniffi::Record, Clone, Debug, PartialEq, Eq)]
pub struct ImageState {
    /// Opaque handle returned by the platform; only ever replaced, never edited.
    pub uri: String,
    pub source: ImageSource,
}

/// "In flight" flags for capability calls that suspend the screen's handler.
///
/// While a flag is set the matching actions are ignored so a handler never
/// re-enters itself; unrelated actions keep flowing.
#[derive(uniffi::Record, Clone, Debug, PartialEq, Eq)]
pub struct BusyState {
    pub capturing_image: bool,
    pub saving_image: bool,
}

impl BusyState {
    pub fn idle() -> Self {
        Self {
            capturing_image: false,
            saving_image: false,
        }
    }

    pub fn any(&self) -> bool {
        self.capturing_image || self.saving_image
    }
}

#[derive(uniffi::Enum, Clone, Debug, PartialEq, Eq)]
pub enum PromptKind {
    DeleteName { name: String },
    SaveImage { uri: String },
}

/// A confirm/cancel question waiting on the user. Shells answer it with
/// `AppAction::RespondToPrompt` quoting `id`.
#[derive(uniffi::Record, Clone, Debug, PartialEq, Eq)]
pub struct PendingPrompt {
    pub id: String,
    pub kind: PromptKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
    pub destructive: bool,
}

impl PendingPrompt {
    pub(crate) fn delete_name(name: &str) -> Self {
        Self {
            id: new_prompt_id(),
            kind: PromptKind::DeleteName {
                name: name.to_string(),
            },
            title: "Delete name".to_string(),
            message: format!("Are you sure you want to delete \"{name}\"?"),
            confirm_label: "Delete".to_string(),
            cancel_label: "Cancel".to_string(),
            destructive: true,
        }
    }

    pub(crate) fn save_image(uri: &str) -> Self {
        Self {
            id: new_prompt_id(),
            kind: PromptKind::SaveImage {
                uri: uri.to_string(),
            },
            title: "Save image".to_string(),
            message: "Do you want to save this photo to your library?".to_string(),
            confirm_label: "Save".to_string(),
            cancel_label: "Cancel".to_string(),
            destructive: false,
        }
    }
}

fn new_prompt_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// One-shot message surfaced by the media flows. Stays in state until the UI
/// clears it, so a resync from `state()` still shows it.
#[derive(uniffi::Record, Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub(crate) fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}
