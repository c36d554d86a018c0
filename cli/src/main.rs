mod fs_bridge;
mod repl;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flume::{Receiver, Sender};
use hola_core::{AppAction, AppReconciler, AppState, AppUpdate, FfiApp};

use fs_bridge::{DeniedPermission, FsMediaBridge};
use repl::{ReplCommand, parse_command, render};

// How long the screen must stay quiet before we print it.
const QUIET_PERIOD: Duration = Duration::from_millis(150);
// Upper bound for a single capability call (file copies, mostly).
const MEDIA_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Parser)]
#[command(name = "hola-cli")]
#[command(about = "Drive the Hola screen from a terminal")]
struct Cli {
    /// Data directory (config and captured photos live here)
    #[arg(long, env = "HOLA_CLI_DATA_DIR", default_value = ".hola-cli")]
    data_dir: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Read screen commands from stdin and print the screen after each one
    Run {
        /// Photo file the camera returns
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Directory standing in for the photo library (default: <data-dir>/library)
        #[arg(long)]
        library_dir: Option<PathBuf>,

        /// Permission to refuse; repeat for several
        #[arg(long, value_enum)]
        deny: Vec<DeniedPermission>,
    },

    /// Print the default hola_config.json
    Config,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.cmd {
        Command::Run {
            photo,
            library_dir,
            deny,
        } => cmd_run(&cli, photo.clone(), library_dir.clone(), deny.clone()),
        Command::Config => {
            println!("{}", hola_core::default_config_json());
            Ok(())
        }
    }
}

struct ChannelReconciler {
    tx: Sender<AppUpdate>,
}

impl AppReconciler for ChannelReconciler {
    fn reconcile(&self, update: AppUpdate) {
        let _ = self.tx.send(update);
    }
}

fn cmd_run(
    cli: &Cli,
    photo: Option<PathBuf>,
    library_dir: Option<PathBuf>,
    deny: Vec<DeniedPermission>,
) -> anyhow::Result<()> {
    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("create data dir {}", cli.data_dir.display()))?;
    if let Some(photo) = &photo {
        anyhow::ensure!(photo.is_file(), "--photo {} is not a file", photo.display());
    }

    let library_dir = library_dir.unwrap_or_else(|| cli.data_dir.join("library"));
    let bridge = FsMediaBridge::new(cli.data_dir.join("captures"), library_dir, photo, deny);
    let (app, updates) = start_app(&cli.data_dir, &bridge);

    let stdout = std::io::stdout();
    run_repl(&app, &bridge, &updates, std::io::stdin().lock(), &mut stdout.lock())
}

fn start_app(data_dir: &Path, bridge: &FsMediaBridge) -> (Arc<FfiApp>, Receiver<AppUpdate>) {
    let app = FfiApp::new(data_dir.to_string_lossy().to_string());
    app.set_media_bridge(Box::new(bridge.clone()));
    let (update_tx, update_rx) = flume::unbounded::<AppUpdate>();
    app.listen_for_updates(Box::new(ChannelReconciler { tx: update_tx }));
    (app, update_rx)
}

/// One command per input line; the screen is printed once up front and again
/// after every command, separated by `---`.
fn run_repl(
    app: &FfiApp,
    bridge: &FsMediaBridge,
    updates: &Receiver<AppUpdate>,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut state = app.state();
    write!(out, "{}", render(&state))?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("read input")?;
        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        let action = match cmd {
            ReplCommand::Quit => break,
            ReplCommand::Help => {
                writeln!(out, "{}", repl::HELP)?;
                continue;
            }
            ReplCommand::Show => None,
            ReplCommand::Type(value) => Some(AppAction::SetNameInput { value }),
            ReplCommand::Greet => Some(AppAction::ShowGreeting),
            ReplCommand::Add => Some(AppAction::AddName),
            ReplCommand::Delete(name) => Some(AppAction::RequestDeleteName { name }),
            ReplCommand::Answer(confirmed) => match &state.prompt {
                Some(prompt) => Some(AppAction::RespondToPrompt {
                    prompt_id: prompt.id.clone(),
                    confirmed,
                }),
                None => {
                    writeln!(out, "nothing to answer")?;
                    continue;
                }
            },
            ReplCommand::Count => Some(AppAction::IncrementCounter),
            ReplCommand::Clear => Some(AppAction::ClearAll),
            ReplCommand::Camera => Some(AppAction::CaptureFromCamera),
            ReplCommand::Gallery(path) => {
                bridge.queue_pick(path);
                Some(AppAction::PickFromLibrary)
            }
            ReplCommand::Save => Some(AppAction::RequestSaveImage),
            ReplCommand::DismissAlert => Some(AppAction::ClearAlert),
        };

        if let Some(action) = action {
            app.dispatch(action);
            state = await_settled(updates, state);
        }
        writeln!(out, "---")?;
        write!(out, "{}", render(&state))?;
        out.flush()?;
    }
    Ok(())
}

/// Collect updates until the core goes quiet with nothing in flight. Actions
/// that change nothing emit no update, so an empty quiet period is normal.
fn await_settled(updates: &Receiver<AppUpdate>, mut latest: AppState) -> AppState {
    let mut wait = QUIET_PERIOD;
    while let Ok(AppUpdate::FullState(state)) = updates.recv_timeout(wait) {
        wait = if state.busy.any() {
            MEDIA_TIMEOUT
        } else {
            QUIET_PERIOD
        };
        if state.rev > latest.rev {
            latest = state;
        }
    }
    latest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(dir: &Path, photo: Option<PathBuf>, script: &str) -> String {
        std::fs::write(
            dir.join("hola_config.json"),
            r#"{"disable_media": false}"#,
        )
        .unwrap();
        let bridge = FsMediaBridge::new(dir.join("captures"), dir.join("library"), photo, vec![]);
        let (app, updates) = start_app(dir, &bridge);

        let mut out = Vec::new();
        run_repl(&app, &bridge, &updates, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn screens(output: &str) -> Vec<&str> {
        output.split("---\n").collect()
    }

    #[test]
    fn camera_then_confirmed_save_lands_in_library() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("me.jpg");
        std::fs::write(&photo, b"jpeg bytes").unwrap();

        let output = session(dir.path(), Some(photo), "camera\nsave\nyes\nok\nquit\n");
        let screens = screens(&output);
        assert_eq!(screens.len(), 5, "{output}");

        assert!(screens[0].contains("image: none"));
        assert!(screens[1].contains("(Camera)"), "{}", screens[1]);
        assert!(screens[1].contains("[! Success] Photo taken."));
        assert!(screens[2].contains("[? Save image]"));
        assert!(screens[3].contains("[! Saved]"), "{}", screens[3]);
        assert!(!screens[4].contains("[!"));

        let saved: Vec<_> = std::fs::read_dir(dir.path().join("library"))
            .unwrap()
            .collect();
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn answers_go_to_the_pending_prompt_only() {
        let dir = tempfile::tempdir().unwrap();
        let output = session(
            dir.path(),
            None,
            "yes\ntype  Ana \nadd\ndelete Ana\nno\ndelete Ana\nyes\n",
        );

        assert!(output.contains("nothing to answer"));
        let screens = screens(&output);
        let last = screens.last().unwrap();
        assert!(last.contains("status: 'Ana' was removed from the list."), "{last}");
        assert!(!last.contains("Names added:"));
        assert!(screens[4].contains("  - Ana"), "cancelled delete keeps the name");
    }

    #[test]
    fn unknown_commands_do_not_reprint_the_screen() {
        let dir = tempfile::tempdir().unwrap();
        let output = session(dir.path(), None, "dance\n\n# note\ncount\n");
        assert!(output.contains("error: unknown command `dance`"));
        let screens = screens(&output);
        assert_eq!(screens.len(), 2);
        assert!(screens[1].contains("counter:"));
    }

    fn state_at(rev: u64, busy: bool) -> AppState {
        let mut state = AppState::empty();
        state.rev = rev;
        state.busy.capturing_image = busy;
        state
    }

    #[test]
    fn settling_keeps_the_newest_revision() {
        let (tx, rx) = flume::unbounded();
        for (rev, busy) in [(1, true), (3, false), (2, false)] {
            tx.send(AppUpdate::FullState(state_at(rev, busy))).unwrap();
        }
        let settled = await_settled(&rx, state_at(0, false));
        assert_eq!(settled.rev, 3);
    }

    #[test]
    fn settling_waits_out_an_in_flight_capture() {
        let (tx, rx) = flume::unbounded();
        tx.send(AppUpdate::FullState(state_at(1, true))).unwrap();
        let sender = std::thread::spawn(move || {
            std::thread::sleep(QUIET_PERIOD * 3);
            tx.send(AppUpdate::FullState(state_at(2, false))).unwrap();
        });

        let settled = await_settled(&rx, state_at(0, false));
        sender.join().unwrap();
        assert_eq!(settled.rev, 2);
        assert!(!settled.busy.any());
    }
}
