use std::hash::{DefaultHasher, Hash, Hasher};

use iced::widget::{button, column, container, keyed_column, text};
use iced::{Element, Fill, Theme};

use hola_core::NameRow;

use crate::theme;
use crate::Message;

/// Names are unique, so a hash of the name keeps each row's widget state
/// attached to that name when others are removed.
fn row_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

pub fn name_list<'a>(header: String, rows: Vec<NameRow>) -> Element<'a, Message, Theme> {
    let items = keyed_column(rows.into_iter().map(|row| {
        let item: Element<'a, Message, Theme> = button(text(row.label).size(16).width(Fill))
            .on_press(Message::DeleteName(row.key.clone()))
            .padding([10, 14])
            .width(Fill)
            .style(theme::plain_button_style)
            .into();
        (row_key(&row.key), item)
    }))
    .spacing(2);

    container(
        column![
            text(header).size(15).color(theme::TEXT_SECONDARY),
            items,
        ]
        .spacing(8),
    )
    .padding(12)
    .width(Fill)
    .style(theme::card_style)
    .into()
}
