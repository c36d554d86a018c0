mod app_manager;
mod media_bridge;
mod theme;
mod views;

use app_manager::AppManager;
use iced::widget::{column, container, text};
use iced::{Element, Fill, Size, Subscription, Task, Theme};
use hola_core::{project_screen, AppAction, AppState, ScreenModal};

pub fn main() -> iced::Result {
    iced::application(HolaDesktop::new, HolaDesktop::update, HolaDesktop::view)
        .title("Hola")
        .subscription(HolaDesktop::subscription)
        .theme(light_theme)
        .window_size(Size::new(440.0, 780.0))
        .run()
}

fn light_theme(_state: &HolaDesktop) -> Theme {
    Theme::Light
}

fn manager_update_stream(manager: &AppManager) -> impl iced::futures::Stream<Item = ()> {
    let rx = manager.subscribe_updates();
    iced::futures::stream::unfold(rx, |rx| async move {
        match rx.recv_async().await {
            Ok(()) => Some(((), rx)),
            Err(_) => None,
        }
    })
}

struct HolaDesktop {
    manager: Option<AppManager>,
    boot_error: Option<String>,
    state: AppState,
    // Owned by the shell; the core's copy trails behind while typing.
    name_input: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    CoreUpdated,
    NameChanged(String),
    ShowGreeting,
    AddName,
    DeleteName(String),
    IncrementCounter,
    ClearAll,
    OpenCamera,
    OpenGallery,
    SaveImage,
    AnswerPrompt { prompt_id: String, confirmed: bool },
    DismissAlert,
}

impl HolaDesktop {
    fn new() -> (Self, Task<Message>) {
        let (manager, boot_error, state) = match AppManager::new() {
            Ok(manager) => {
                let state = manager.state();
                (Some(manager), None, state)
            }
            Err(error) => (
                None,
                Some(format!("failed to start: {error}")),
                AppState::empty(),
            ),
        };
        (
            Self {
                manager,
                boot_error,
                name_input: state.name_input.clone(),
                state,
            },
            Task::none(),
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        match &self.manager {
            Some(manager) => Subscription::run_with(manager.clone(), manager_update_stream)
                .map(|_| Message::CoreUpdated),
            None => Subscription::none(),
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let action = match message {
            Message::CoreUpdated => {
                self.sync_from_manager();
                return Task::none();
            }
            Message::NameChanged(value) => {
                self.name_input = value.clone();
                AppAction::SetNameInput { value }
            }
            Message::ShowGreeting => AppAction::ShowGreeting,
            Message::AddName => AppAction::AddName,
            Message::DeleteName(name) => AppAction::RequestDeleteName { name },
            Message::IncrementCounter => AppAction::IncrementCounter,
            Message::ClearAll => {
                self.name_input.clear();
                AppAction::ClearAll
            }
            Message::OpenCamera => AppAction::CaptureFromCamera,
            Message::OpenGallery => AppAction::PickFromLibrary,
            Message::SaveImage => AppAction::RequestSaveImage,
            Message::AnswerPrompt {
                prompt_id,
                confirmed,
            } => AppAction::RespondToPrompt {
                prompt_id,
                confirmed,
            },
            Message::DismissAlert => AppAction::ClearAlert,
        };
        if let Some(manager) = &self.manager {
            manager.dispatch(action);
        }
        Task::none()
    }

    fn sync_from_manager(&mut self) {
        if let Some(manager) = &self.manager {
            let latest = manager.state();
            self.apply_snapshot(latest);
        }
    }

    fn apply_snapshot(&mut self, latest: AppState) {
        if latest.rev < self.state.rev {
            return;
        }
        if name_was_added_from(&self.name_input, &self.state, &latest) {
            self.name_input.clear();
        }
        self.state = latest;
    }

    /// Core state with the name field and its derived count and emoji taken
    /// from what is on screen right now.
    fn displayed_state(&self) -> AppState {
        let mut shown = self.state.clone();
        shown.char_count = hola_core::trimmed_len(&self.name_input);
        shown.mood = hola_core::mood_for_input(&self.name_input);
        shown.emoji = hola_core::emoji_for_input(&self.name_input);
        shown.name_input = self.name_input.clone();
        shown
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(error) = &self.boot_error {
            return container(
                column![
                    text("Hola").size(24).color(theme::TEXT_PRIMARY),
                    text(error).color(theme::DANGER),
                ]
                .spacing(12),
            )
            .center_x(Fill)
            .center_y(Fill)
            .style(theme::surface_style)
            .into();
        }

        let mut projection = project_screen(&self.displayed_state());
        let modal = std::mem::replace(&mut projection.modal, ScreenModal::None);
        let screen = views::screen::screen_view(&self.name_input, &self.state.busy, projection);
        views::modal::with_modal(screen, modal)
    }
}

/// The core clears its name field only after a successful add. Mirror that
/// clear unless the user has typed past the added name since.
fn name_was_added_from(local: &str, previous: &AppState, latest: &AppState) -> bool {
    latest.name_input.is_empty()
        && latest.names.len() > previous.names.len()
        && latest.names.last().map(String::as_str) == Some(hola_core::trim_name(local))
}
