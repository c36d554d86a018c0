use iced::border::{self, Border};
use iced::widget::{button, container};
use iced::{Background, Color, Theme};

pub const BACKGROUND: Color = Color::from_rgb(0.96, 0.96, 0.97);
pub const CARD: Color = Color::WHITE;
pub const DIVIDER: Color = Color::from_rgb(0.86, 0.86, 0.89);
pub const TEXT_PRIMARY: Color = Color::from_rgb(0.11, 0.11, 0.13);
pub const TEXT_SECONDARY: Color = Color::from_rgb(0.42, 0.42, 0.47);
pub const STATUS: Color = Color::from_rgb(0.0, 0.48, 1.0);
pub const DANGER: Color = Color::from_rgb(1.0, 0.23, 0.19);

// Action button colors.
pub const SHOW: Color = Color::from_rgb(0.0, 0.48, 1.0);
pub const ADD: Color = Color::from_rgb(0.20, 0.78, 0.35);
pub const CLEAR: Color = DANGER;
pub const COUNTER: Color = Color::from_rgb(0.35, 0.34, 0.84);
pub const MEDIA: Color = Color::from_rgb(1.0, 0.58, 0.0);

const RADIUS: f32 = 10.0;

fn shade(color: Color, by: f32) -> Color {
    Color::from_rgb(
        (color.r * by).min(1.0),
        (color.g * by).min(1.0),
        (color.b * by).min(1.0),
    )
}

/// Filled button in `color`; disabled buttons fade.
pub fn action_button(color: Color) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let bg = match status {
            button::Status::Hovered => shade(color, 0.9),
            button::Status::Pressed => shade(color, 0.8),
            button::Status::Disabled => color.scale_alpha(0.4),
            button::Status::Active => color,
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: Color::WHITE,
            border: border::rounded(RADIUS),
            ..Default::default()
        }
    }
}

pub fn plain_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Hovered | button::Status::Pressed => DIVIDER,
        _ => Color::TRANSPARENT,
    };
    button::Style {
        background: Some(Background::Color(bg)),
        text_color: TEXT_PRIMARY,
        border: border::rounded(RADIUS),
        ..Default::default()
    }
}

pub fn surface_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BACKGROUND)),
        text_color: Some(TEXT_PRIMARY),
        ..Default::default()
    }
}

pub fn card_style(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(TEXT_PRIMARY),
        background: Some(Background::Color(CARD)),
        border: Border {
            color: DIVIDER,
            width: 1.0,
            radius: border::radius(RADIUS),
        },
        ..Default::default()
    }
}

pub fn image_frame_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(DIVIDER)),
        border: border::rounded(RADIUS),
        ..Default::default()
    }
}
