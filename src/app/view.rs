// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Renders the current screen under the navbar, then layers the modal
//! viewer and the toast overlay on top. Every layer is rebuilt from typed
//! state on each pass; no markup strings anywhere.

use super::{App, Message, Screen};
use crate::ui::about;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::form;
use crate::ui::navbar;
use crate::ui::notifications::Toast;
use crate::ui::settings;
use iced::widget::{scrollable, Column, Container, Stack, Text};
use iced::{Element, Length};

/// Renders the current application view based on the active screen.
pub fn view(app: &App) -> Element<'_, Message> {
    let screen_content: Element<'_, Message> = match app.screen {
        Screen::Studio => view_studio(app),
        Screen::Gallery => scrollable(
            Container::new(
                app.gallery
                    .view(&app.i18n, app.spinner_rotation)
                    .map(Message::Gallery),
            )
            .padding(spacing::LG),
        )
        .into(),
        Screen::Settings => scrollable(
            Container::new(
                app.settings
                    .view(settings::ViewContext {
                        i18n: &app.i18n,
                        config: &app.config,
                        theme_mode: app.theme_mode,
                    })
                    .map(Message::Settings),
            )
            .padding(spacing::LG),
        )
        .into(),
        Screen::About => Container::new(about::view(&app.i18n))
            .padding(spacing::LG)
            .into(),
    };

    let navbar_view = navbar::view(navbar::ViewContext {
        i18n: &app.i18n,
        active: app.screen,
        menu_open: app.menu_open,
    })
    .map(Message::Navbar);

    let base = Column::new()
        .push(navbar_view)
        .push(
            Container::new(screen_content)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    let mut stack = Stack::new().push(base);

    if app.modal.is_visible() {
        stack = stack.push(app.modal.view(&app.i18n).map(Message::Modal));
    }

    stack = stack.push(Toast::view_overlay(&app.notifications, &app.i18n).map(Message::Notification));

    stack.into()
}

fn view_studio(app: &App) -> Element<'_, Message> {
    let form_view = app
        .form
        .view(form::ViewContext {
            i18n: &app.i18n,
            in_flight: app.in_flight,
            spinner_rotation: app.spinner_rotation,
        })
        .map(Message::Form);

    let results_view = app
        .results
        .view(&app.i18n, app.spinner_rotation)
        .map(Message::Results);

    let content = Column::new()
        .spacing(spacing::LG)
        .push(form_view)
        .push(Text::new(app.i18n.tr("results-title")).size(typography::TITLE_SM))
        .push(results_view);

    scrollable(Container::new(content).padding(spacing::LG)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_renders_every_screen_without_panicking() {
        let mut app = App::default();
        for screen in [Screen::Studio, Screen::Gallery, Screen::Settings, Screen::About] {
            app.screen = screen;
            let _element = view(&app);
        }
    }

    #[test]
    fn modal_layer_is_present_when_visible() {
        let mut app = App::default();
        app.modal.open(
            None,
            "caption".to_string(),
            "http://localhost:5000/img/1.png".to_string(),
            "1.png".to_string(),
        );
        let _element = view(&app);
    }
}
