// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    palette::{self, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Theme};

/// Primary action button (submit, download).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_600,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: Border {
                color: palette::PRIMARY_500,
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => disabled_style(),
    }
}

/// Secondary button (clear, refresh, pick file).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let palette_ext = theme.extended_palette();
    let base = palette_ext.background.weak.color;
    let background = match status {
        button::Status::Hovered => palette_ext.background.strong.color,
        _ => base,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: palette_ext.background.base.text,
        border: Border {
            color: palette_ext.background.strong.color,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Grayed-out non-interactive button, used while a request is in flight.
pub fn disabled(_theme: &Theme, _status: button::Status) -> button::Style {
    disabled_style()
}

fn disabled_style() -> button::Style {
    button::Style {
        background: Some(Background::Color(palette::GRAY_200)),
        text_color: palette::GRAY_400,
        border: Border {
            color: palette::GRAY_400,
            width: 1.0,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Borderless text-like button for navbar tabs and menu entries.
/// The active tab gets the brand color.
pub fn tab(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let palette_ext = theme.extended_palette();
        let text_color = if active {
            palette_ext.primary.strong.color
        } else {
            palette_ext.background.base.text
        };
        let background = match status {
            button::Status::Hovered => Some(Background::Color(palette_ext.background.weak.color)),
            _ => None,
        };
        button::Style {
            background,
            text_color,
            border: Border {
                radius: radius::SM.into(),
                ..Border::default()
            },
            shadow: shadow::NONE,
            snap: true,
        }
    }
}
