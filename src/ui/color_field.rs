// SPDX-License-Identifier: MPL-2.0
//! Paired color swatch + hex text field.
//!
//! The native stand-in for the web form's color picker: a row of preset
//! swatches next to an editable hex field. Picking a swatch writes its
//! uppercase hex value into the field; edits to the field update the
//! preview square as soon as they parse. Input is normalized to uppercase
//! on every edit. Invalid text leaves the preview at the last valid color.

use crate::ui::design_tokens::{border, radius, sizing, spacing, typography};
use iced::widget::{button, text_input, Container, Row, Text};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};

/// Preset swatches offered next to each color field.
pub const PRESETS: [&str; 6] = [
    "#FF6B35", "#F7B801", "#2EC4B6", "#3A86FF", "#8338EC", "#1A1A2E",
];

#[derive(Debug, Clone)]
pub struct State {
    hex: String,
    last_valid: Color,
}

#[derive(Debug, Clone)]
pub enum Message {
    SwatchPicked(&'static str),
    HexEdited(String),
}

impl State {
    /// Creates a field holding the given hex value, which must be valid.
    pub fn new(initial: &str) -> Self {
        let normalized = normalize_hex(initial);
        let last_valid = parse_hex(&normalized).unwrap_or(Color::BLACK);
        Self {
            hex: normalized,
            last_valid,
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::SwatchPicked(hex) => {
                self.hex = normalize_hex(hex);
                if let Some(color) = parse_hex(&self.hex) {
                    self.last_valid = color;
                }
            }
            Message::HexEdited(value) => {
                self.hex = normalize_hex(&value);
                if let Some(color) = parse_hex(&self.hex) {
                    self.last_valid = color;
                }
            }
        }
    }

    /// The current text value, always uppercase.
    pub fn value(&self) -> &str {
        &self.hex
    }

    /// The color shown in the preview square.
    pub fn preview_color(&self) -> Color {
        self.last_valid
    }

    pub fn view<'a>(&'a self, label: String) -> Element<'a, Message> {
        let preview = Container::new(Text::new(""))
            .width(Length::Fixed(sizing::COLOR_SWATCH))
            .height(Length::Fixed(sizing::COLOR_SWATCH))
            .style({
                let color = self.last_valid;
                move |theme: &Theme| swatch_style(theme, color, false)
            });

        let mut swatches = Row::new().spacing(spacing::XXS);
        for hex in PRESETS {
            let selected = hex == self.hex;
            let color = parse_hex(hex).unwrap_or(Color::BLACK);
            swatches = swatches.push(
                button(Text::new(""))
                    .width(Length::Fixed(sizing::COLOR_SWATCH))
                    .height(Length::Fixed(sizing::COLOR_SWATCH))
                    .padding(0)
                    .on_press(Message::SwatchPicked(hex))
                    .style(move |theme: &Theme, _status| swatch_button_style(theme, color, selected)),
            );
        }

        let input = text_input("#RRGGBB", &self.hex)
            .on_input(Message::HexEdited)
            .padding(spacing::XS)
            .size(typography::BODY)
            .width(Length::Fixed(110.0));

        Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(label)
                    .size(typography::BODY)
                    .width(Length::Fixed(130.0)),
            )
            .push(preview)
            .push(swatches)
            .push(input)
            .into()
    }
}

fn swatch_style(theme: &Theme, color: Color, selected: bool) -> iced::widget::container::Style {
    let palette_ext = theme.extended_palette();
    iced::widget::container::Style {
        background: Some(Background::Color(color)),
        border: Border {
            color: if selected {
                palette_ext.primary.strong.color
            } else {
                palette_ext.background.strong.color
            },
            width: if selected {
                border::WIDTH_MD
            } else {
                border::WIDTH_SM
            },
            radius: radius::SM.into(),
        },
        ..Default::default()
    }
}

fn swatch_button_style(theme: &Theme, color: Color, selected: bool) -> iced::widget::button::Style {
    let container = swatch_style(theme, color, selected);
    iced::widget::button::Style {
        background: container.background,
        text_color: Color::TRANSPARENT,
        border: container.border,
        shadow: iced::Shadow::default(),
        snap: true,
    }
}

/// Uppercases a hex string, preserving the user's text otherwise.
pub fn normalize_hex(input: &str) -> String {
    input.trim().to_uppercase()
}

/// Parses `#RRGGBB` into a color. Returns `None` for anything else.
pub fn parse_hex(input: &str) -> Option<Color> {
    let digits = input.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(Color::from_rgb8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uppercases_input() {
        assert_eq!(normalize_hex("#ff6b35"), "#FF6B35");
        assert_eq!(normalize_hex("  #abcdef "), "#ABCDEF");
    }

    #[test]
    fn parse_accepts_full_hex_only() {
        assert!(parse_hex("#FF6B35").is_some());
        assert!(parse_hex("FF6B35").is_none());
        assert!(parse_hex("#FFF").is_none());
        assert!(parse_hex("#GGGGGG").is_none());
    }

    #[test]
    fn edits_are_normalized_on_every_input() {
        let mut field = State::new("#FF6B35");
        field.update(Message::HexEdited("#2ec4b6".to_string()));
        assert_eq!(field.value(), "#2EC4B6");
    }

    #[test]
    fn invalid_edit_keeps_last_valid_preview() {
        let mut field = State::new("#FF6B35");
        let before = field.preview_color();
        field.update(Message::HexEdited("#2EC".to_string()));
        assert_eq!(field.value(), "#2EC");
        assert_eq!(field.preview_color(), before);
    }

    #[test]
    fn swatch_pick_overwrites_field_text() {
        let mut field = State::new("#FF6B35");
        field.update(Message::SwatchPicked("#1A1A2E"));
        assert_eq!(field.value(), "#1A1A2E");
        assert_eq!(field.preview_color(), parse_hex("#1A1A2E").unwrap());
    }
}
