// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Generic panel surface used for the form and settings sections.
///
/// The color is derived from the active Iced `Theme` background, with a
/// slight opacity, so panels stay readable in both light and dark modes
/// without hard-coding colors.
pub fn panel(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();
    let base = palette_ext.background.base.color;

    container::Style {
        background: Some(Background::Color(Color::from_rgba(
            base.r,
            base.g,
            base.b,
            opacity::SURFACE,
        ))),
        border: Border {
            radius: radius::LG.into(),
            ..Border::default()
        },
        ..Default::default()
    }
}

/// Card surface for result and gallery entries.
pub fn card(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette_ext.background.weak.color)),
        border: Border {
            color: palette_ext.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Drop zone for the upload preview. The border flips to the brand color
/// while a file hovers over the window.
pub fn drop_zone(drag_active: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let palette_ext = theme.extended_palette();
        let (color, width) = if drag_active {
            (palette_ext.primary.strong.color, border::WIDTH_MD)
        } else {
            (palette_ext.background.strong.color, border::WIDTH_SM)
        };
        container::Style {
            background: Some(Background::Color(palette_ext.background.weak.color)),
            border: Border {
                color,
                width,
                radius: radius::MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Inline error block rendered inside the results or gallery area.
pub fn error_block(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: 0.12,
            ..palette::ERROR_500
        })),
        border: Border {
            color: palette::ERROR_500,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}

/// Dimmed full-window backdrop behind the modal viewer.
pub fn modal_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::BLACK
        })),
        ..Default::default()
    }
}

/// The modal card itself, floating above the backdrop.
pub fn modal_card(theme: &Theme) -> container::Style {
    let palette_ext = theme.extended_palette();

    container::Style {
        background: Some(Background::Color(palette_ext.background.base.color)),
        border: Border {
            color: palette_ext.background.strong.color,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        ..Default::default()
    }
}
