use super::AppCore;
use crate::mood::trim_name;
use crate::state::PendingPrompt;

const GREETING_NEEDS_NAME: &str = "Please enter your name before continuing.";

/// Why a name could not be added. The display text is the status message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum NameRejection {
    #[error("Enter a name to add it to the list.")]
    Empty,
    #[error("'{0}' is already in the list.")]
    Duplicate(String),
}

/// Validate `input` against `names`; order matters (empty before duplicate).
/// Returns the trimmed value to append.
pub(crate) fn validate_new_name(names: &[String], input: &str) -> Result<String, NameRejection> {
    let trimmed = trim_name(input);
    if trimmed.is_empty() {
        return Err(NameRejection::Empty);
    }
    if names.iter().any(|n| n == trimmed) {
        return Err(NameRejection::Duplicate(trimmed.to_string()));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn greeting_for(input: &str) -> String {
    let name = trim_name(input);
    if name.is_empty() {
        GREETING_NEEDS_NAME.to_string()
    } else {
        format!("Hello, {name}!")
    }
}

impl AppCore {
    pub(super) fn set_name_input(&mut self, value: String) {
        if self.state.name_input == value {
            return;
        }
        self.state.set_name_input(value);
        self.emit_state();
    }

    pub(super) fn show_greeting(&mut self) {
        self.state.status_message = greeting_for(&self.state.name_input);
        self.emit_state();
    }

    pub(super) fn add_name(&mut self) {
        match validate_new_name(&self.state.names, &self.state.name_input) {
            Ok(name) => {
                self.state.status_message = format!("'{name}' was added to the list.");
                self.state.names.push(name);
                self.state.set_name_input(String::new());
            }
            Err(rejection) => {
                tracing::debug!(?rejection, "name rejected");
                self.state.status_message = rejection.to_string();
            }
        }
        self.emit_state();
    }

    pub(super) fn request_delete_name(&mut self, name: String) {
        if !self.state.names.contains(&name) {
            tracing::debug!("delete requested for a name that is not listed");
            return;
        }
        if self.state.prompt.is_some() {
            tracing::debug!("replacing pending prompt");
        }
        self.state.prompt = Some(PendingPrompt::delete_name(&name));
        self.emit_state();
    }

    pub(super) fn delete_name(&mut self, name: &str) {
        self.state.names.retain(|n| n != name);
        self.state.status_message = format!("'{name}' was removed from the list.");
        self.emit_state();
    }
}
