// SPDX-License-Identifier: MPL-2.0
//! The generation form.
//!
//! One parameterized form backs both deployments of the service: the
//! technical-sheet shape (multipart: sheet text, font, brand colors,
//! optional product image and template) and the prompt shape (JSON: free
//! text, image count, aspect ratio). The active shape comes from config
//! and can be switched in the settings screen.

use crate::api::models::{
    GenerationRequest, PromptRequest, TechnicalSheetRequest, UploadedFile,
};
use crate::config::{GenerationConfig, RequestShape, MAX_IMAGE_COUNT};
use crate::i18n::fluent::I18n;
use crate::ui::color_field;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::upload;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::{button, pick_list, text_editor, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use std::fmt;

/// Font families offered by the technical-sheet form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Roboto,
    Montserrat,
    OpenSans,
    Lato,
    Poppins,
}

impl FontFamily {
    pub const ALL: [FontFamily; 5] = [
        FontFamily::Roboto,
        FontFamily::Montserrat,
        FontFamily::OpenSans,
        FontFamily::Lato,
        FontFamily::Poppins,
    ];

    /// Name sent to the server in the `fonte` field.
    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Roboto => "Roboto",
            FontFamily::Montserrat => "Montserrat",
            FontFamily::OpenSans => "Open Sans",
            FontFamily::Lato => "Lato",
            FontFamily::Poppins => "Poppins",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aspect ratios accepted by the prompt shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Square,
    Wide,
    Tall,
    Classic,
    Portrait,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Wide,
        AspectRatio::Tall,
        AspectRatio::Classic,
        AspectRatio::Portrait,
    ];

    /// Wire value of the `aspect_ratio` field.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::Portrait => "3:4",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ratio| ratio.as_str() == value)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const IMAGE_COUNT_OPTIONS: [u8; MAX_IMAGE_COUNT as usize] = [1, 2, 3, 4];

/// A picked template file; no preview, only the name is shown.
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

pub struct State {
    shape: RequestShape,
    // Technical-sheet shape
    sheet: text_editor::Content,
    font: FontFamily,
    pub icon_color: color_field::State,
    pub font_color: color_field::State,
    pub accent_color: color_field::State,
    pub upload: upload::State,
    template: Option<TemplateFile>,
    // Prompt shape
    prompt: text_editor::Content,
    image_count: u8,
    aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone)]
pub enum Message {
    SheetAction(text_editor::Action),
    PromptAction(text_editor::Action),
    FontSelected(FontFamily),
    IconColor(color_field::Message),
    FontColor(color_field::Message),
    AccentColor(color_field::Message),
    ImageCountSelected(u8),
    AspectRatioSelected(AspectRatio),
    Upload(upload::Message),
    TemplatePickPressed,
    TemplateClearPressed,
    SubmitPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Validate and dispatch the generation request.
    Submit,
    /// Open the product image picker dialog.
    PickProductImage,
    /// Open the template picker dialog.
    PickTemplate,
}

/// Context required to render the form.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub in_flight: bool,
    pub spinner_rotation: f32,
}

impl State {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            shape: config.request_shape,
            sheet: text_editor::Content::new(),
            font: FontFamily::default(),
            icon_color: color_field::State::new("#FF6B35"),
            font_color: color_field::State::new("#1A1A2E"),
            accent_color: color_field::State::new("#F7B801"),
            upload: upload::State::default(),
            template: None,
            prompt: text_editor::Content::new(),
            image_count: config.image_count(),
            aspect_ratio: AspectRatio::from_wire(config.aspect_ratio())
                .unwrap_or_default(),
        }
    }

    pub fn shape(&self) -> RequestShape {
        self.shape
    }

    /// Applies a shape change from the settings screen. Field contents of
    /// the inactive shape are kept so switching back loses nothing.
    pub fn set_shape(&mut self, shape: RequestShape) {
        self.shape = shape;
    }

    pub fn set_template(&mut self, template: TemplateFile) {
        self.template = Some(template);
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::SheetAction(action) => {
                self.sheet.perform(action);
                Event::None
            }
            Message::PromptAction(action) => {
                self.prompt.perform(action);
                Event::None
            }
            Message::FontSelected(font) => {
                self.font = font;
                Event::None
            }
            Message::IconColor(msg) => {
                self.icon_color.update(msg);
                Event::None
            }
            Message::FontColor(msg) => {
                self.font_color.update(msg);
                Event::None
            }
            Message::AccentColor(msg) => {
                self.accent_color.update(msg);
                Event::None
            }
            Message::ImageCountSelected(count) => {
                self.image_count = count;
                Event::None
            }
            Message::AspectRatioSelected(ratio) => {
                self.aspect_ratio = ratio;
                Event::None
            }
            Message::Upload(msg) => match self.upload.update(msg) {
                upload::Event::PickRequested => Event::PickProductImage,
                upload::Event::None => Event::None,
            },
            Message::TemplatePickPressed => Event::PickTemplate,
            Message::TemplateClearPressed => {
                self.template = None;
                Event::None
            }
            Message::SubmitPressed => Event::Submit,
        }
    }

    /// Builds the wire request for the active shape. Validation happens
    /// separately, right before dispatch.
    pub fn build_request(&self) -> GenerationRequest {
        match self.shape {
            RequestShape::TechnicalSheet => {
                GenerationRequest::TechnicalSheet(TechnicalSheetRequest {
                    sheet: self.sheet.text(),
                    font: self.font.as_str().to_string(),
                    icon_color: self.icon_color.value().to_string(),
                    font_color: self.font_color.value().to_string(),
                    accent_color: self.accent_color.value().to_string(),
                    product_image: self.upload.preview().map(|preview| UploadedFile {
                        filename: preview.filename.clone(),
                        bytes: preview.bytes.clone(),
                        mime: preview.mime.clone(),
                    }),
                    template: self.template.as_ref().map(|template| UploadedFile {
                        filename: template.filename.clone(),
                        bytes: template.bytes.clone(),
                        mime: template.mime.clone(),
                    }),
                })
            }
            RequestShape::Prompt => GenerationRequest::Prompt(PromptRequest {
                prompt: self.prompt.text(),
                image_count: self.image_count,
                aspect_ratio: self.aspect_ratio.as_str().to_string(),
            }),
        }
    }

    pub fn view<'a>(&'a self, ctx: ViewContext<'a>) -> Element<'a, Message> {
        let i18n = ctx.i18n;

        let fields: Element<'a, Message> = match self.shape {
            RequestShape::TechnicalSheet => self.view_sheet_fields(i18n),
            RequestShape::Prompt => self.view_prompt_fields(i18n),
        };

        let submit: Element<'a, Message> = if ctx.in_flight {
            // Label swapped for the loading indicator; control disabled.
            let spinner = AnimatedSpinner::new(
                crate::ui::design_tokens::palette::PRIMARY_500,
                ctx.spinner_rotation,
            )
            .with_size(sizing::ICON_MD)
            .into_element();
            button(
                Row::new()
                    .spacing(spacing::XS)
                    .align_y(alignment::Vertical::Center)
                    .push(spinner)
                    .push(Text::new(i18n.tr("form-generating")).size(typography::BODY_LG)),
            )
            .padding([spacing::XS, spacing::LG])
            .style(styles::button::disabled)
            .into()
        } else {
            button(Text::new(i18n.tr("form-submit")).size(typography::BODY_LG))
                .padding([spacing::XS, spacing::LG])
                .on_press(Message::SubmitPressed)
                .style(styles::button::primary)
                .into()
        };

        let content = Column::new()
            .spacing(spacing::MD)
            .push(Text::new(i18n.tr("form-title")).size(typography::TITLE_SM))
            .push(fields)
            .push(
                Container::new(submit)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
            );

        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::LG)
            .style(styles::container::panel)
            .into()
    }

    fn view_sheet_fields<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let sheet_editor = text_editor(&self.sheet)
            .placeholder(i18n.tr("form-sheet-placeholder"))
            .height(Length::Fixed(sizing::SHEET_EDITOR_HEIGHT))
            .on_action(Message::SheetAction);

        let font_row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(i18n.tr("form-font"))
                    .size(typography::BODY)
                    .width(Length::Fixed(130.0)),
            )
            .push(
                pick_list(&FontFamily::ALL[..], Some(self.font), Message::FontSelected)
                    .padding(spacing::XS),
            );

        let template_row = self.view_template_row(i18n);

        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("form-sheet-label")).size(typography::BODY))
            .push(sheet_editor)
            .push(font_row)
            .push(
                self.icon_color
                    .view(i18n.tr("form-color-icons"))
                    .map(Message::IconColor),
            )
            .push(
                self.font_color
                    .view(i18n.tr("form-color-font"))
                    .map(Message::FontColor),
            )
            .push(
                self.accent_color
                    .view(i18n.tr("form-color-accent"))
                    .map(Message::AccentColor),
            )
            .push(Text::new(i18n.tr("form-product-image")).size(typography::BODY))
            .push(self.upload.view(i18n).map(Message::Upload))
            .push(template_row)
            .into()
    }

    fn view_template_row<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let mut row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(i18n.tr("form-template"))
                    .size(typography::BODY)
                    .width(Length::Fixed(130.0)),
            );

        match &self.template {
            Some(template) => {
                row = row
                    .push(Text::new(template.filename.clone()).size(typography::BODY_SM))
                    .push(
                        button(Text::new("✕").size(typography::BODY_SM))
                            .padding(spacing::XXS)
                            .on_press(Message::TemplateClearPressed)
                            .style(styles::button::secondary),
                    );
            }
            None => {
                row = row.push(
                    button(Text::new(i18n.tr("form-template-pick")).size(typography::BODY_SM))
                        .padding(spacing::XXS)
                        .on_press(Message::TemplatePickPressed)
                        .style(styles::button::secondary),
                );
            }
        }

        row.into()
    }

    fn view_prompt_fields<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let prompt_editor = text_editor(&self.prompt)
            .placeholder(i18n.tr("form-prompt-placeholder"))
            .height(Length::Fixed(sizing::SHEET_EDITOR_HEIGHT))
            .on_action(Message::PromptAction);

        let count_row = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(i18n.tr("form-image-count"))
                    .size(typography::BODY)
                    .width(Length::Fixed(130.0)),
            )
            .push(
                pick_list(
                    &IMAGE_COUNT_OPTIONS[..],
                    Some(self.image_count),
                    Message::ImageCountSelected,
                )
                .padding(spacing::XS),
            )
            .push(
                Text::new(i18n.tr("form-aspect-ratio"))
                    .size(typography::BODY)
                    .width(Length::Fixed(130.0)),
            )
            .push(
                pick_list(
                    &AspectRatio::ALL[..],
                    Some(self.aspect_ratio),
                    Message::AspectRatioSelected,
                )
                .padding(spacing::XS),
            );

        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("form-prompt-label")).size(typography::BODY))
            .push(prompt_editor)
            .push(count_row)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;

    fn prompt_config() -> GenerationConfig {
        GenerationConfig {
            request_shape: RequestShape::Prompt,
            image_count: Some(2),
            aspect_ratio: Some("16:9".to_string()),
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn new_state_honors_config_defaults() {
        let state = State::new(&prompt_config());
        assert_eq!(state.shape(), RequestShape::Prompt);
        assert_eq!(state.image_count, 2);
        assert_eq!(state.aspect_ratio, AspectRatio::Wide);
    }

    #[test]
    fn build_request_matches_active_shape() {
        let mut state = State::new(&prompt_config());
        match state.build_request() {
            GenerationRequest::Prompt(body) => {
                assert_eq!(body.image_count, 2);
                assert_eq!(body.aspect_ratio, "16:9");
            }
            other => panic!("expected prompt shape, got {:?}", other),
        }

        state.set_shape(RequestShape::TechnicalSheet);
        match state.build_request() {
            GenerationRequest::TechnicalSheet(form) => {
                assert_eq!(form.font, "Roboto");
                assert_eq!(form.icon_color, "#FF6B35");
                assert!(form.product_image.is_none());
            }
            other => panic!("expected sheet shape, got {:?}", other),
        }
    }

    #[test]
    fn aspect_ratio_round_trips_through_wire_value() {
        for ratio in AspectRatio::ALL {
            assert_eq!(AspectRatio::from_wire(ratio.as_str()), Some(ratio));
        }
        assert_eq!(AspectRatio::from_wire("2:1"), None);
    }

    #[test]
    fn submit_message_raises_submit_event() {
        let mut state = State::new(&GenerationConfig::default());
        assert!(matches!(state.update(Message::SubmitPressed), Event::Submit));
    }
}
