use iced::widget::{button, center, column, container, opaque, row, stack, text};
use iced::{Background, Color, Element, Fill, Theme};

use hola_core::ScreenModal;

use crate::theme;
use crate::Message;

const CARD_WIDTH: f32 = 340.0;

/// Layers the confirm or alert card over `base`, blocking input beneath it.
pub fn with_modal<'a>(
    base: Element<'a, Message, Theme>,
    modal: ScreenModal,
) -> Element<'a, Message, Theme> {
    let content = match modal {
        ScreenModal::None => return base,
        ScreenModal::Confirm(prompt) => {
            let confirm_color = if prompt.destructive {
                theme::DANGER
            } else {
                theme::SHOW
            };
            let no = Message::AnswerPrompt {
                prompt_id: prompt.id.clone(),
                confirmed: false,
            };
            let yes = Message::AnswerPrompt {
                prompt_id: prompt.id,
                confirmed: true,
            };
            card(
                prompt.title,
                prompt.message,
                row![
                    button(text(prompt.cancel_label).center().width(Fill))
                        .on_press(no)
                        .padding([8, 12])
                        .width(Fill)
                        .style(theme::plain_button_style),
                    button(text(prompt.confirm_label).center().width(Fill))
                        .on_press(yes)
                        .padding([8, 12])
                        .width(Fill)
                        .style(theme::action_button(confirm_color)),
                ]
                .spacing(8)
                .into(),
            )
        }
        ScreenModal::Alert(alert) => card(
            alert.title,
            alert.message,
            button(text("OK").center().width(Fill))
                .on_press(Message::DismissAlert)
                .padding([8, 12])
                .width(Fill)
                .style(theme::action_button(theme::SHOW))
                .into(),
        ),
    };

    let backdrop = center(opaque(content)).style(|_theme: &Theme| container::Style {
        background: Some(Background::Color(Color {
            a: 0.45,
            ..Color::BLACK
        })),
        ..Default::default()
    });

    stack![base, opaque(backdrop)].into()
}

fn card<'a>(
    title: String,
    message: String,
    buttons: Element<'a, Message, Theme>,
) -> Element<'a, Message, Theme> {
    container(
        column![
            text(title).size(18).color(theme::TEXT_PRIMARY),
            text(message).size(15).color(theme::TEXT_SECONDARY),
            buttons,
        ]
        .spacing(14),
    )
    .padding(20)
    .width(CARD_WIDTH)
    .style(theme::card_style)
    .into()
}
