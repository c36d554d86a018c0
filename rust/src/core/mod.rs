mod config;
mod media_flow;
mod names;

use std::sync::{Arc, RwLock};

use flume::Sender;

use crate::actions::AppAction;
use crate::media::SharedMediaBridge;
use crate::state::AppState;
use crate::updates::{AppUpdate, CoreMsg, InternalEvent};

pub(crate) use config::default_app_config_json;

/// Single-threaded owner of the screen state. Every user gesture arrives as a
/// `CoreMsg::Action` and is handled to completion before the next one.
pub struct AppCore {
    pub state: AppState,
    rev: u64,

    update_sender: Sender<AppUpdate>,
    core_sender: Sender<CoreMsg>,
    shared_state: Arc<RwLock<AppState>>,

    config: config::AppConfig,
    runtime: tokio::runtime::Runtime,
    media_bridge: SharedMediaBridge,
}

impl AppCore {
    pub fn new(
        update_sender: Sender<AppUpdate>,
        core_sender: Sender<CoreMsg>,
        data_dir: String,
        shared_state: Arc<RwLock<AppState>>,
        media_bridge: SharedMediaBridge,
    ) -> Self {
        let config = config::load_app_config(&data_dir);
        tracing::debug!(?config, "app config loaded");

        // Capability calls block on native dialogs; they run here, never on the actor.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("hola-media")
            .build()
            .expect("tokio runtime");

        let this = Self {
            state: AppState::empty(),
            rev: 0,
            update_sender,
            core_sender,
            shared_state,
            config,
            runtime,
            media_bridge,
        };

        // Ensure FfiApp.state() has an immediately-available snapshot.
        let snapshot = this.state.clone();
        this.commit_state_snapshot(&snapshot);
        this
    }

    fn next_rev(&mut self) -> u64 {
        self.rev += 1;
        self.state.rev = self.rev;
        self.rev
    }

    fn commit_state_snapshot(&self, snapshot: &AppState) {
        match self.shared_state.write() {
            Ok(mut g) => *g = snapshot.clone(),
            Err(poison) => *poison.into_inner() = snapshot.clone(),
        }
    }

    fn emit_state(&mut self) {
        self.next_rev();
        let snapshot = self.state.clone();
        self.commit_state_snapshot(&snapshot);
        let _ = self.update_sender.send(AppUpdate::FullState(snapshot));
    }

    pub fn handle_message(&mut self, msg: CoreMsg) {
        match msg {
            CoreMsg::Action(action) => {
                // Never log `?action` directly: it carries whatever the user typed.
                tracing::info!(action = action.tag(), "dispatch");
                self.handle_action(action);
            }
            CoreMsg::Internal(internal) => self.handle_internal(*internal),
        }
    }

    fn handle_internal(&mut self, internal: InternalEvent) {
        match internal {
            InternalEvent::ImageFlowFinished { source, result } => {
                self.finish_image_flow(source, result);
            }
            InternalEvent::SaveFlowFinished { uri, result } => {
                self.finish_save(&uri, result);
            }
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            // Name field
            AppAction::SetNameInput { value } => self.set_name_input(value),
            AppAction::ShowGreeting => self.show_greeting(),

            // Names list
            AppAction::AddName => self.add_name(),
            AppAction::RequestDeleteName { name } => self.request_delete_name(name),

            // Counter
            AppAction::IncrementCounter => {
                self.state.counter = self.state.counter.saturating_add(1);
                self.emit_state();
            }

            // Screen
            AppAction::ClearAll => self.clear_all(),

            // Image
            AppAction::CaptureFromCamera => {
                self.start_image_flow(crate::state::ImageSource::Camera);
            }
            AppAction::PickFromLibrary => {
                self.start_image_flow(crate::state::ImageSource::Library);
            }
            AppAction::RequestSaveImage => self.request_save_image(),

            // Dialogs
            AppAction::RespondToPrompt {
                prompt_id,
                confirmed,
            } => self.respond_to_prompt(&prompt_id, confirmed),
            AppAction::ClearAlert => {
                if self.state.alert.is_some() {
                    self.state.alert = None;
                    self.emit_state();
                }
            }
        }
    }

    fn respond_to_prompt(&mut self, prompt_id: &str, confirmed: bool) {
        // Ignore answers to prompts that were replaced or dismissed meanwhile.
        if self.state.prompt.as_ref().map(|p| p.id.as_str()) != Some(prompt_id) {
            tracing::debug!(prompt_id, "stale prompt response");
            return;
        }
        let Some(prompt) = self.state.prompt.take() else {
            return;
        };
        if !confirmed {
            self.emit_state();
            return;
        }
        match prompt.kind {
            crate::state::PromptKind::DeleteName { name } => self.delete_name(&name),
            crate::state::PromptKind::SaveImage { uri } => self.start_save(uri),
        }
    }

    fn clear_all(&mut self) {
        // In-flight capability calls keep running; only their busy flags survive.
        let busy = self.state.busy.clone();
        self.state = AppState {
            busy,
            ..AppState::empty()
        };
        self.emit_state();
    }
}
