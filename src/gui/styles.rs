/// Colors and custom widget styles for the metadata view.
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Field name color in the metadata pane.
pub const KEY_COLOR: Color = Color::from_rgb(
    0x9C as f32 / 255.0,
    0xDB as f32 / 255.0,
    0xFE as f32 / 255.0,
);

/// Field value color in the metadata pane.
pub const VALUE_COLOR: Color = Color::from_rgb(
    0xDB as f32 / 255.0,
    0xDB as f32 / 255.0,
    0xA9 as f32 / 255.0,
);

/// Dark rounded box for the "Copied" toast.
pub struct ToastStyle;

impl container::StyleSheet for ToastStyle {
    type Style = Theme;

    fn appearance(&self, _theme: &Theme) -> container::Appearance {
        container::Appearance {
            text_color: Some(Color::WHITE),
            background: Some(Background::Color(Color::from_rgba8(0, 0, 0, 0.6))),
            border: Border::with_radius(10.0),
            ..container::Appearance::default()
        }
    }
}

pub fn toast() -> iced::theme::Container {
    iced::theme::Container::Custom(Box::new(ToastStyle))
}
