use crate::media::MediaError;
use crate::state::{AppState, ImageSource};
use crate::AppAction;

#[derive(uniffi::Enum, Clone, Debug)]
pub enum AppUpdate {
    FullState(AppState),
}

impl AppUpdate {
    pub fn rev(&self) -> u64 {
        match self {
            AppUpdate::FullState(s) => s.rev,
        }
    }
}

#[derive(Debug)]
pub enum CoreMsg {
    Action(AppAction),
    Internal(Box<InternalEvent>),
}

#[derive(Debug)]
pub enum InternalEvent {
    // Async media results. `Ok(None)` means the user dismissed the native picker.
    ImageFlowFinished {
        source: ImageSource,
        result: Result<Option<String>, MediaError>,
    },
    SaveFlowFinished {
        uri: String,
        result: Result<(), MediaError>,
    },
}
