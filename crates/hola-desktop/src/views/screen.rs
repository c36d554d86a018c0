use iced::widget::{button, column, container, image, row, scrollable, text, text_input, Space};
use iced::{Alignment, Color, Element, Fill, Theme};

use hola_core::{BusyState, ScreenProjection};

use crate::theme;
use crate::views::name_list;
use crate::Message;

const IMAGE_PREVIEW_HEIGHT: f32 = 220.0;

/// The whole Hola screen, top to bottom.
pub fn screen_view<'a>(
    name_input: &'a str,
    busy: &BusyState,
    p: ScreenProjection,
) -> Element<'a, Message, Theme> {
    let input = text_input("Enter your name", name_input)
        .on_input(Message::NameChanged)
        .on_submit(Message::AddName)
        .padding(12)
        .size(18);

    let mood = row![
        text(p.char_count_label)
            .size(14)
            .color(theme::TEXT_SECONDARY),
        Space::new().width(Fill),
        text(p.emoji).size(44),
    ]
    .align_y(Alignment::Center);

    let name_actions = row![
        action("Show", theme::SHOW, Some(Message::ShowGreeting)),
        action("Add", theme::ADD, Some(Message::AddName)),
        action("Clear", theme::CLEAR, Some(Message::ClearAll)),
    ]
    .spacing(8);

    let mut content = column![input, mood, name_actions].spacing(14);

    if let Some(status) = p.status_message {
        content = content.push(text(status).size(16).color(theme::STATUS));
    }

    content = content.push(action(
        &p.counter_label,
        theme::COUNTER,
        Some(Message::IncrementCounter),
    ));

    let capture = p.capture_enabled;
    content = content.push(
        row![
            action("Camera", theme::MEDIA, capture.then_some(Message::OpenCamera)),
            action("Gallery", theme::MEDIA, capture.then_some(Message::OpenGallery)),
        ]
        .spacing(8),
    );

    if busy.capturing_image {
        content = content.push(text("Waiting for photo…").size(13).color(theme::TEXT_SECONDARY));
    }

    if let Some(uri) = p.image_uri {
        content = content.push(image_preview(uri, p.image_tappable));
        if busy.saving_image {
            content = content.push(text("Saving…").size(13).color(theme::TEXT_SECONDARY));
        }
    }

    if let Some(header) = p.list_header {
        content = content.push(name_list::name_list(header, p.rows));
    }

    container(scrollable(content.padding(20)).height(Fill))
        .width(Fill)
        .height(Fill)
        .style(theme::surface_style)
        .into()
}

fn action<'a>(label: &str, color: Color, on_press: Option<Message>) -> Element<'a, Message, Theme> {
    button(text(label.to_string()).size(15).center().width(Fill))
        .on_press_maybe(on_press)
        .padding([10, 12])
        .width(Fill)
        .style(theme::action_button(color))
        .into()
}

fn image_preview<'a>(uri: String, tappable: bool) -> Element<'a, Message, Theme> {
    let picture = container(
        image(image::Handle::from_path(uri))
            .width(Fill)
            .height(IMAGE_PREVIEW_HEIGHT),
    )
    .padding(4)
    .style(theme::image_frame_style);

    let hint = if tappable {
        "Tap the photo to save it"
    } else {
        ""
    };

    column![
        button(picture)
            .on_press_maybe(tappable.then_some(Message::SaveImage))
            .padding(0)
            .style(theme::plain_button_style),
        text(hint).size(12).color(theme::TEXT_SECONDARY),
    ]
    .spacing(4)
    .into()
}
