// SPDX-License-Identifier: MPL-2.0
//! Settings screen: language, theme, server connection, request shape.
//!
//! Changes apply immediately and are persisted by the parent; the server
//! URL is committed explicitly (Enter or the apply button) so half-typed
//! addresses never reach the client.

use crate::config::{CaptionSource, Config, RequestShape};
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use crate::ui::theming::ThemeMode;
use iced::widget::{button, pick_list, text_input, toggler, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use unic_langid::LanguageIdentifier;

/// Result of the last connection test, rendered inline.
#[derive(Debug, Clone, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Checking,
    Online {
        api_key_configured: bool,
    },
    Offline {
        message: String,
    },
}

#[derive(Debug)]
pub struct State {
    base_url_input: String,
    health: HealthStatus,
}

#[derive(Debug, Clone)]
pub enum Message {
    LanguagePicked(LanguageIdentifier),
    ThemeModePicked(ThemeMode),
    RequestShapePicked(RequestShape),
    CaptionSourcePicked(CaptionSource),
    RequireProductImageToggled(bool),
    BaseUrlEdited(String),
    BaseUrlCommitted,
    TestConnectionPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    LanguageSelected(LanguageIdentifier),
    ThemeModeSelected(ThemeMode),
    RequestShapeSelected(RequestShape),
    CaptionSourceSelected(CaptionSource),
    RequireProductImageToggled(bool),
    ServerUrlCommitted(String),
    TestConnection,
}

/// Context required to render the settings screen.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub config: &'a Config,
    pub theme_mode: ThemeMode,
}

impl State {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url_input: config.server.base_url().to_string(),
            health: HealthStatus::default(),
        }
    }

    pub fn set_health(&mut self, health: HealthStatus) {
        self.health = health;
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::LanguagePicked(locale) => Event::LanguageSelected(locale),
            Message::ThemeModePicked(mode) => Event::ThemeModeSelected(mode),
            Message::RequestShapePicked(shape) => Event::RequestShapeSelected(shape),
            Message::CaptionSourcePicked(source) => Event::CaptionSourceSelected(source),
            Message::RequireProductImageToggled(required) => {
                Event::RequireProductImageToggled(required)
            }
            Message::BaseUrlEdited(value) => {
                self.base_url_input = value;
                Event::None
            }
            Message::BaseUrlCommitted => {
                Event::ServerUrlCommitted(self.base_url_input.trim().to_string())
            }
            Message::TestConnectionPressed => {
                self.health = HealthStatus::Checking;
                Event::TestConnection
            }
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let language_row = labeled_row(
            i18n.tr("settings-language"),
            pick_list(
                i18n.available_locales.clone(),
                Some(i18n.current_locale().clone()),
                Message::LanguagePicked,
            )
            .padding(spacing::XS)
            .into(),
        );

        let theme_row = labeled_row(
            i18n.tr("settings-theme"),
            pick_list(
                &ThemeMode::ALL[..],
                Some(ctx.theme_mode),
                Message::ThemeModePicked,
            )
            .padding(spacing::XS)
            .into(),
        );

        let server_row = labeled_row(
            i18n.tr("settings-server-url"),
            Row::new()
                .spacing(spacing::XS)
                .push(
                    text_input("http://localhost:5000", &self.base_url_input)
                        .on_input(Message::BaseUrlEdited)
                        .on_submit(Message::BaseUrlCommitted)
                        .padding(spacing::XS)
                        .width(Length::Fixed(320.0)),
                )
                .push(
                    button(Text::new(i18n.tr("settings-server-apply")).size(typography::BODY_SM))
                        .padding([spacing::XXS, spacing::SM])
                        .on_press(Message::BaseUrlCommitted)
                        .style(styles::button::secondary),
                )
                .into(),
        );

        let health_row = labeled_row(
            i18n.tr("settings-health"),
            Row::new()
                .spacing(spacing::SM)
                .align_y(alignment::Vertical::Center)
                .push(
                    button(Text::new(i18n.tr("settings-health-test")).size(typography::BODY_SM))
                        .padding([spacing::XXS, spacing::SM])
                        .on_press(Message::TestConnectionPressed)
                        .style(styles::button::secondary),
                )
                .push(self.view_health(i18n))
                .into(),
        );

        let shape_row = labeled_row(
            i18n.tr("settings-request-shape"),
            pick_list(
                &RequestShape::ALL[..],
                Some(ctx.config.generation.request_shape),
                Message::RequestShapePicked,
            )
            .padding(spacing::XS)
            .into(),
        );

        let caption_row = labeled_row(
            i18n.tr("settings-caption-source"),
            pick_list(
                &CaptionSource::ALL[..],
                Some(ctx.config.generation.caption_source),
                Message::CaptionSourcePicked,
            )
            .padding(spacing::XS)
            .into(),
        );

        let require_image_row = labeled_row(
            i18n.tr("settings-require-product-image"),
            toggler(ctx.config.generation.require_product_image)
                .on_toggle(Message::RequireProductImageToggled)
                .into(),
        );

        let content = Column::new()
            .spacing(spacing::MD)
            .push(Text::new(i18n.tr("settings-title")).size(typography::TITLE_LG))
            .push(Text::new(i18n.tr("settings-section-general")).size(typography::TITLE_SM))
            .push(language_row)
            .push(theme_row)
            .push(Text::new(i18n.tr("settings-section-server")).size(typography::TITLE_SM))
            .push(server_row)
            .push(health_row)
            .push(Text::new(i18n.tr("settings-section-generation")).size(typography::TITLE_SM))
            .push(shape_row)
            .push(caption_row)
            .push(require_image_row);

        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::LG)
            .style(styles::container::panel)
            .into()
    }

    fn view_health<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        match &self.health {
            HealthStatus::Unknown => Text::new("").size(typography::BODY_SM).into(),
            HealthStatus::Checking => Text::new(i18n.tr("settings-health-checking"))
                .size(typography::BODY_SM)
                .into(),
            HealthStatus::Online { api_key_configured } => {
                let key = if *api_key_configured {
                    "settings-health-online"
                } else {
                    "settings-health-online-no-key"
                };
                Text::new(i18n.tr(key))
                    .size(typography::BODY_SM)
                    .color(palette::SUCCESS_500)
                    .into()
            }
            HealthStatus::Offline { message } => {
                Text::new(
                    i18n.tr_with_args("settings-health-offline", &[("reason", message.as_str())]),
                )
                    .size(typography::BODY_SM)
                    .color(palette::ERROR_500)
                    .into()
            }
        }
    }
}

fn labeled_row<'a>(label: String, control: Element<'a, Message>) -> Element<'a, Message> {
    Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(label)
                .size(typography::BODY)
                .width(Length::Fixed(220.0)),
        )
        .push(control)
        .into()
}
