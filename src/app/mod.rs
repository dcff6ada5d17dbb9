// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the studio, gallery,
//! settings, and the modal viewer.
//!
//! The `App` struct wires together the HTTP client, localization, and the
//! UI components, and translates messages into side effects like network
//! requests or config persistence. Policy decisions (the in-flight guard,
//! modal ownership, gallery refresh timing) stay close to the main update
//! loop so user-facing behavior is easy to audit.

mod message;
pub mod paths;
pub mod persisted_state;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::api;
use crate::config::{self, Config};
use crate::i18n::fluent::I18n;
use crate::ui::form;
use crate::ui::gallery;
use crate::ui::modal;
use crate::ui::notifications;
use crate::ui::results;
use crate::ui::settings;
use crate::ui::theming::ThemeMode;
use iced::{window, Element, Subscription, Task};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1000;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 760;
pub const MIN_WINDOW_WIDTH: u32 = 800;
pub const MIN_WINDOW_HEIGHT: u32 = 600;

/// Root Iced application state.
///
/// The modal viewer and the in-flight submit guard are deliberately single
/// fields here: one modal instance for the whole process, one generation
/// request at a time.
pub struct App {
    pub i18n: I18n,
    screen: Screen,
    config: Config,
    client: api::Client,
    form: form::State,
    results: results::State,
    gallery: gallery::State,
    modal: modal::State,
    settings: settings::State,
    notifications: notifications::Manager,
    theme_mode: ThemeMode,
    app_state: persisted_state::AppState,
    /// Whether the navbar overflow menu is open.
    menu_open: bool,
    /// True exactly while a generation request is between dispatch and
    /// settlement; the submit control is disabled for that interval.
    in_flight: bool,
    /// Spinner angle, advanced by the tick subscription.
    spinner_rotation: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("in_flight", &self.in_flight)
            .field("modal_visible", &self.modal.is_visible())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        let config = Config::default();
        let client = api::Client::new(config.server.base_url(), config.server.timeout_secs())
            .expect("HTTP client construction failed");
        Self {
            i18n: I18n::default(),
            screen: Screen::Studio,
            form: form::State::new(&config.generation),
            settings: settings::State::new(&config),
            config,
            client,
            results: results::State::default(),
            gallery: gallery::State::default(),
            modal: modal::State::default(),
            notifications: notifications::Manager::new(),
            theme_mode: ThemeMode::default(),
            app_state: persisted_state::AppState::default(),
            menu_open: false,
            in_flight: false,
            spinner_rotation: 0.0,
        }
    }
}

impl App {
    /// Initializes application state from CLI flags and persisted
    /// configuration.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir);

        let (mut config, config_warning) = config::load();

        // A --server override applies for this run only; it is not written
        // back to the config file.
        if let Some(server) = flags.server {
            config.server.base_url = Some(server);
        }

        let i18n = I18n::new(flags.lang, flags.i18n_dir, &config);
        let client = api::Client::new(config.server.base_url(), config.server.timeout_secs())
            .expect("HTTP client construction failed");

        let theme_mode = config.general.theme_mode;
        let form = form::State::new(&config.generation);
        let settings = settings::State::new(&config);

        let (app_state, state_warning) = persisted_state::AppState::load();

        let mut app = App {
            i18n,
            config,
            client,
            form,
            settings,
            theme_mode,
            app_state,
            ..Self::default()
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }
        if let Some(key) = state_warning {
            app.notifications
                .push(notifications::Notification::warning(&key));
        }

        (app, Task::none())
    }

    fn title(&self) -> String {
        self.i18n.tr("app-title")
    }

    fn theme(&self) -> iced::Theme {
        self.theme_mode.iced_theme()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn subscription(&self) -> Subscription<Message> {
        let busy = self.in_flight
            || (self.screen == Screen::Gallery && self.gallery.is_loading())
            || self.notifications.has_notifications();
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(busy),
        ])
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}
