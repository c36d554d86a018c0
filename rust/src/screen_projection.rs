use crate::{Alert, AppState, PendingPrompt};

const NAMES_HEADER: &str = "Names added:";

#[derive(Clone, Debug, PartialEq)]
pub struct NameRow {
    /// Stable list key. Names are unique, so the value itself is the key.
    pub key: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScreenModal {
    None,
    Confirm(PendingPrompt),
    Alert(Alert),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScreenProjection {
    pub char_count_label: String,
    pub emoji: String,
    pub status_message: Option<String>,
    pub counter_label: String,
    pub list_header: Option<String>,
    pub rows: Vec<NameRow>,
    pub image_uri: Option<String>,
    pub image_tappable: bool,
    pub capture_enabled: bool,
    pub modal: ScreenModal,
}

/// Projects core state into what every shell draws. A pending prompt wins
/// over an alert; the alert shows once the prompt is answered.
pub fn project_screen(state: &AppState) -> ScreenProjection {
    let rows = state
        .names
        .iter()
        .map(|name| NameRow {
            key: name.clone(),
            label: name.clone(),
        })
        .collect::<Vec<_>>();

    let modal = if let Some(prompt) = &state.prompt {
        ScreenModal::Confirm(prompt.clone())
    } else if let Some(alert) = &state.alert {
        ScreenModal::Alert(alert.clone())
    } else {
        ScreenModal::None
    };

    ScreenProjection {
        char_count_label: format!("Characters: {}", state.char_count),
        emoji: state.emoji.clone(),
        status_message: Some(state.status_message.clone()).filter(|m| !m.is_empty()),
        counter_label: state.counter.to_string(),
        list_header: (!rows.is_empty()).then(|| NAMES_HEADER.to_string()),
        rows,
        image_uri: state.image.as_ref().map(|i| i.uri.clone()),
        image_tappable: state.image.is_some() && !state.busy.saving_image,
        capture_enabled: !state.busy.capturing_image,
        modal,
    }
}
