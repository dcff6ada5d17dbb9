// SPDX-License-Identifier: MPL-2.0
//! Navigation bar with screen tabs and an overflow menu.
//!
//! Tabs switch between the studio (form + results) and the gallery; the
//! menu reaches the settings and about screens.

use crate::app::Screen;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Contextual data needed to render the navbar.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub active: Screen,
    pub menu_open: bool,
}

/// Messages emitted by the navbar.
#[derive(Debug, Clone)]
pub enum Message {
    ToggleMenu,
    OpenStudio,
    OpenGallery,
    OpenSettings,
    OpenAbout,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    Navigate(Screen),
}

/// Process a navbar message and return the corresponding event.
pub fn update(message: Message, menu_open: &mut bool) -> Event {
    match message {
        Message::ToggleMenu => {
            *menu_open = !*menu_open;
            Event::None
        }
        Message::OpenStudio => {
            *menu_open = false;
            Event::Navigate(Screen::Studio)
        }
        Message::OpenGallery => {
            *menu_open = false;
            Event::Navigate(Screen::Gallery)
        }
        Message::OpenSettings => {
            *menu_open = false;
            Event::Navigate(Screen::Settings)
        }
        Message::OpenAbout => {
            *menu_open = false;
            Event::Navigate(Screen::About)
        }
    }
}

/// Render the navigation bar.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let i18n = ctx.i18n;

    let tab = |label: String, target: Screen, message: Message| {
        button(Text::new(label).size(typography::BODY_LG))
            .padding([spacing::XS, spacing::MD])
            .on_press(message)
            .style(styles::button::tab(ctx.active == target))
    };

    let top_bar = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(i18n.tr("app-title"))
                .size(typography::TITLE_MD)
                .width(Length::Shrink),
        )
        .push(Container::new(Text::new("")).width(Length::Fixed(spacing::LG)))
        .push(tab(
            i18n.tr("navbar-studio"),
            Screen::Studio,
            Message::OpenStudio,
        ))
        .push(tab(
            i18n.tr("navbar-gallery"),
            Screen::Gallery,
            Message::OpenGallery,
        ))
        .push(Container::new(Text::new("")).width(Length::Fill))
        .push(
            button(Text::new("☰").size(typography::BODY_LG))
                .padding([spacing::XS, spacing::SM])
                .on_press(Message::ToggleMenu)
                .style(styles::button::tab(ctx.menu_open)),
        );

    let mut content = Column::new().width(Length::Fill).push(
        Container::new(top_bar)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::NAVBAR_HEIGHT))
            .padding([0.0, spacing::MD])
            .align_y(alignment::Vertical::Center),
    );

    if ctx.menu_open {
        let dropdown = Column::new()
            .spacing(spacing::XXS)
            .push(
                button(Text::new(i18n.tr("navbar-settings")).size(typography::BODY))
                    .padding([spacing::XXS, spacing::MD])
                    .on_press(Message::OpenSettings)
                    .style(styles::button::tab(ctx.active == Screen::Settings)),
            )
            .push(
                button(Text::new(i18n.tr("navbar-about")).size(typography::BODY))
                    .padding([spacing::XXS, spacing::MD])
                    .on_press(Message::OpenAbout)
                    .style(styles::button::tab(ctx.active == Screen::About)),
            );

        content = content.push(
            Container::new(dropdown)
                .width(Length::Fill)
                .padding([spacing::XXS, spacing::MD])
                .align_x(alignment::Horizontal::Right),
        );
    }

    content.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_menu_state() {
        let mut menu_open = false;
        assert!(matches!(update(Message::ToggleMenu, &mut menu_open), Event::None));
        assert!(menu_open);
    }

    #[test]
    fn navigation_closes_menu() {
        let mut menu_open = true;
        match update(Message::OpenSettings, &mut menu_open) {
            Event::Navigate(Screen::Settings) => {}
            other => panic!("expected settings navigation, got {:?}", other),
        }
        assert!(!menu_open);
    }
}
