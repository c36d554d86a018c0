#[derive(uniffi::Enum, Debug, Clone, PartialEq)]
pub enum AppAction {
    // Name field
    SetNameInput {
        value: String,
    },
    ShowGreeting,

    // Names list
    AddName,
    RequestDeleteName {
        name: String,
    },

    // Counter
    IncrementCounter,

    // Screen
    ClearAll,

    // Image
    CaptureFromCamera,
    PickFromLibrary,
    RequestSaveImage,

    // Dialogs
    RespondToPrompt {
        prompt_id: String,
        confirmed: bool,
    },
    ClearAlert,
}

impl AppAction {
    /// Log-safe action tag (never includes what the user typed).
    pub fn tag(&self) -> &'static str {
        match self {
            // Name field
            AppAction::SetNameInput { .. } => "SetNameInput",
            AppAction::ShowGreeting => "ShowGreeting",

            // Names list
            AppAction::AddName => "AddName",
            AppAction::RequestDeleteName { .. } => "RequestDeleteName",

            // Counter
            AppAction::IncrementCounter => "IncrementCounter",

            // Screen
            AppAction::ClearAll => "ClearAll",

            // Image
            AppAction::CaptureFromCamera => "CaptureFromCamera",
            AppAction::PickFromLibrary => "PickFromLibrary",
            AppAction::RequestSaveImage => "RequestSaveImage",

            // Dialogs
            AppAction::RespondToPrompt { .. } => "RespondToPrompt",
            AppAction::ClearAlert => "ClearAlert",
        }
    }
}
