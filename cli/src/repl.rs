use std::fmt::Write as _;
use std::path::PathBuf;

use hola_core::{project_screen, AppState, ScreenModal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Type(String),
    Greet,
    Add,
    Delete(String),
    Answer(bool),
    Count,
    Clear,
    Camera,
    Gallery(Option<PathBuf>),
    Save,
    DismissAlert,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command `{0}` (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
commands:
  type <text>      replace the name field (everything after `type `, spaces kept)
  greet            show the greeting
  add              add the typed name to the list
  delete <name>    ask to delete a listed name
  yes | no         answer the pending question
  count            increment the counter
  clear            reset the whole screen
  camera           take a photo (the --photo file)
  gallery [path]   pick a photo from disk; without a path the picker is dismissed
  save             ask to save the current photo to the library
  ok               dismiss the current alert
  show             print the screen
  quit             exit";

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ReplCommand>, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        // `type` keeps surrounding spaces: trimming is the core's job.
        "type" => ReplCommand::Type(rest.to_string()),
        "greet" | "show-greeting" => ReplCommand::Greet,
        "add" => ReplCommand::Add,
        "delete" | "del" => {
            let name = rest.trim();
            if name.is_empty() {
                return Err(ParseError::MissingArgument("delete"));
            }
            ReplCommand::Delete(name.to_string())
        }
        "yes" | "y" => ReplCommand::Answer(true),
        "no" | "n" => ReplCommand::Answer(false),
        "count" => ReplCommand::Count,
        "clear" => ReplCommand::Clear,
        "camera" => ReplCommand::Camera,
        "gallery" => {
            let path = rest.trim();
            ReplCommand::Gallery((!path.is_empty()).then(|| PathBuf::from(path)))
        }
        "save" => ReplCommand::Save,
        "ok" => ReplCommand::DismissAlert,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(cmd))
}

/// Text rendering of the screen, top to bottom in the same order as the app.
pub fn render(state: &AppState) -> String {
    let p = project_screen(state);
    let mut out = String::new();

    let _ = writeln!(out, "name: [{}]", state.name_input);
    let _ = writeln!(out, "{}  {}", p.char_count_label, p.emoji);
    if let Some(status) = &p.status_message {
        let _ = writeln!(out, "status: {status}");
    }
    let _ = writeln!(out, "counter: {}", p.counter_label);

    match (&p.image_uri, &state.image) {
        (Some(uri), Some(image)) => {
            let _ = writeln!(out, "image: {uri} ({:?})", image.source);
        }
        _ => {
            let _ = writeln!(out, "image: none");
        }
    }
    if state.busy.capturing_image {
        let _ = writeln!(out, "(waiting for camera/library…)");
    }
    if state.busy.saving_image {
        let _ = writeln!(out, "(saving…)");
    }

    if let Some(header) = &p.list_header {
        let _ = writeln!(out, "{header}");
        for row in &p.rows {
            let _ = writeln!(out, "  - {}", row.label);
        }
    }

    match &p.modal {
        ScreenModal::None => {}
        ScreenModal::Confirm(prompt) => {
            let _ = writeln!(
                out,
                "[? {}] {} ({} = yes, {} = no)",
                prompt.title, prompt.message, prompt.confirm_label, prompt.cancel_label
            );
        }
        ScreenModal::Alert(alert) => {
            let _ = writeln!(out, "[! {}] {} (ok to dismiss)", alert.title, alert.message);
        }
    }
    out
}
