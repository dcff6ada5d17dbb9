// SPDX-License-Identifier: MPL-2.0
//! Rendering of generation results.
//!
//! Pure rendering over a typed card list: the area is rebuilt from state on
//! every view pass, cards keep the input order of the server's descriptor
//! list, and a failure here replaces only this area — the gallery and the
//! rest of the screen are untouched.

use crate::api::models::{decode_data_url, humanize_tipo, GenerateOutcome};
use crate::config::CaptionSource;
use crate::error::ApiError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, mouse_area, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length, Theme};

/// Cards per grid row.
const GRID_COLUMNS: usize = 3;

/// View model for one rendered result card.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub description: Option<String>,
    pub preview: Option<Handle>,
    pub url: String,
    pub filename: String,
}

/// The results area. `Ready` with an empty card list renders an empty grid,
/// not an error.
#[derive(Debug, Clone, Default)]
pub enum State {
    #[default]
    Idle,
    Generating,
    Ready(Vec<Card>),
    Failed {
        heading_key: &'static str,
        detail: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    DownloadPressed(usize),
    EnlargePressed(usize),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    Download { url: String, filename: String },
    /// Open the modal viewer for the card at this index.
    Enlarge(usize),
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        let State::Ready(cards) = self else {
            return Event::None;
        };
        match message {
            Message::DownloadPressed(index) => match cards.get(index) {
                Some(card) => Event::Download {
                    url: card.url.clone(),
                    filename: card.filename.clone(),
                },
                None => Event::None,
            },
            Message::EnlargePressed(index) => {
                if index < cards.len() {
                    Event::Enlarge(index)
                } else {
                    Event::None
                }
            }
        }
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        match self {
            State::Ready(cards) => cards.get(index),
            _ => None,
        }
    }

    pub fn failed(error: &ApiError) -> Self {
        State::Failed {
            heading_key: error.i18n_key(),
            detail: error.detail().map(str::to_string),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, spinner_rotation: f32) -> Element<'a, Message> {
        match self {
            State::Idle => Container::new(
                Text::new(i18n.tr("results-idle"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::LG)
            .into(),

            State::Generating => {
                let spinner =
                    AnimatedSpinner::new(palette::PRIMARY_500, spinner_rotation).into_element();
                Container::new(
                    Column::new()
                        .spacing(spacing::SM)
                        .align_x(alignment::Horizontal::Center)
                        .push(spinner)
                        .push(Text::new(i18n.tr("results-generating")).size(typography::BODY_LG))
                        .push(
                            Text::new(i18n.tr("results-wait-estimate"))
                                .size(typography::BODY_SM)
                                .color(palette::GRAY_400),
                        ),
                )
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .padding(spacing::XL)
                .into()
            }

            State::Failed {
                heading_key,
                detail,
            } => view_error_block(i18n, *heading_key, detail.as_deref()),

            State::Ready(cards) => view_grid(cards, i18n),
        }
    }
}

/// Builds the card list from a successful generation outcome.
/// Input order is preserved; index order is display order.
pub fn build_cards(outcome: &GenerateOutcome, caption_source: CaptionSource) -> Vec<Card> {
    outcome
        .images
        .iter()
        .map(|image| {
            let preview = image
                .inline
                .as_deref()
                .and_then(decode_data_url)
                .map(Handle::from_bytes);

            let (title, description) = match caption_source {
                CaptionSource::TypeDescription => (
                    image
                        .tipo
                        .as_deref()
                        .map(humanize_tipo)
                        .unwrap_or_else(|| image.filename.clone()),
                    image.descricao.clone(),
                ),
                CaptionSource::Prompt => (
                    outcome
                        .prompt
                        .clone()
                        .unwrap_or_else(|| image.filename.clone()),
                    None,
                ),
            };

            Card {
                title,
                description,
                preview,
                url: image.url.clone(),
                filename: image.filename.clone(),
            }
        })
        .collect()
}

fn view_grid<'a>(cards: &'a [Card], i18n: &'a I18n) -> Element<'a, Message> {
    let mut grid = Column::new().spacing(spacing::MD);

    for (row_index, chunk) in cards.chunks(GRID_COLUMNS).enumerate() {
        let mut row = Row::new().spacing(spacing::MD);
        for (col_index, card) in chunk.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            row = row.push(view_card(card, index, i18n));
        }
        grid = grid.push(row);
    }

    grid.into()
}

fn view_card<'a>(card: &'a Card, index: usize, i18n: &'a I18n) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match &card.preview {
        Some(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .content_fit(ContentFit::Contain)
            .into(),
        None => Container::new(Text::new("🖼").size(typography::TITLE_LG))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::CARD_IMAGE_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    // Clicking the preview opens the modal viewer.
    let clickable_preview = mouse_area(preview).on_press(Message::EnlargePressed(index));

    let mut content = Column::new()
        .spacing(spacing::XS)
        .push(clickable_preview)
        .push(Text::new(card.title.clone()).size(typography::BODY_LG));

    if let Some(description) = &card.description {
        content = content.push(
            Text::new(description.clone())
                .size(typography::BODY_SM)
                .color(palette::GRAY_400),
        );
    }

    content = content.push(
        button(Text::new(i18n.tr("results-download")).size(typography::BODY_SM))
            .padding([spacing::XXS, spacing::SM])
            .on_press(Message::DownloadPressed(index))
            .style(styles::button::primary),
    );

    Container::new(content)
        .width(Length::Fixed(sizing::CARD_WIDTH))
        .padding(spacing::SM)
        .style(styles::container::card)
        .into()
}

fn view_error_block<'a>(
    i18n: &'a I18n,
    heading_key: &'static str,
    detail: Option<&'a str>,
) -> Element<'a, Message> {
    let detail_text = match detail {
        Some(text) => text.to_string(),
        None => i18n.tr("error-application-fallback"),
    };

    let content = Column::new()
        .spacing(spacing::XS)
        .push(
            Text::new(i18n.tr("results-error-title"))
                .size(typography::TITLE_SM)
                .color(palette::ERROR_500),
        )
        .push(Text::new(i18n.tr(heading_key)).size(typography::BODY))
        .push(Text::new(detail_text).size(typography::BODY_SM))
        .push(
            Text::new(i18n.tr("results-error-hints"))
                .size(typography::CAPTION)
                .style(|theme: &Theme| iced::widget::text::Style {
                    color: Some(theme.palette().text),
                }),
        );

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::error_block)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::GeneratedImage;

    fn outcome() -> GenerateOutcome {
        GenerateOutcome {
            images: vec![
                GeneratedImage {
                    inline: Some("data:image/png;base64,aGk=".to_string()),
                    url: "/img/1.png".to_string(),
                    filename: "1.png".to_string(),
                    tipo: Some("product_shot".to_string()),
                    descricao: Some("Front view".to_string()),
                },
                GeneratedImage {
                    inline: None,
                    url: "/img/2.png".to_string(),
                    filename: "2.png".to_string(),
                    tipo: None,
                    descricao: None,
                },
            ],
            prompt: Some("Wireless mouse, black, USB-C".to_string()),
        }
    }

    #[test]
    fn cards_keep_input_order() {
        let cards = build_cards(&outcome(), CaptionSource::TypeDescription);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].filename, "1.png");
        assert_eq!(cards[1].filename, "2.png");
    }

    #[test]
    fn type_description_captions_humanize_tipo() {
        let cards = build_cards(&outcome(), CaptionSource::TypeDescription);
        assert_eq!(cards[0].title, "product shot");
        assert_eq!(cards[0].description.as_deref(), Some("Front view"));
        // Missing tipo falls back to the filename.
        assert_eq!(cards[1].title, "2.png");
    }

    #[test]
    fn prompt_captions_use_originating_prompt() {
        let cards = build_cards(&outcome(), CaptionSource::Prompt);
        assert_eq!(cards[0].title, "Wireless mouse, black, USB-C");
        assert_eq!(cards[1].title, "Wireless mouse, black, USB-C");
        assert_eq!(cards[0].description, None);
    }

    #[test]
    fn inline_payload_decodes_into_preview() {
        let cards = build_cards(&outcome(), CaptionSource::TypeDescription);
        assert!(cards[0].preview.is_some());
        assert!(cards[1].preview.is_none());
    }

    #[test]
    fn download_event_uses_url_and_filename_not_inline_payload() {
        let mut state = State::Ready(build_cards(&outcome(), CaptionSource::TypeDescription));
        match state.update(Message::DownloadPressed(0)) {
            Event::Download { url, filename } => {
                assert_eq!(url, "/img/1.png");
                assert_eq!(filename, "1.png");
            }
            other => panic!("expected Download event, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let mut state = State::Ready(build_cards(&outcome(), CaptionSource::TypeDescription));
        assert!(matches!(state.update(Message::EnlargePressed(9)), Event::None));
    }

    #[test]
    fn empty_outcome_renders_empty_grid_state() {
        let empty = GenerateOutcome {
            images: vec![],
            prompt: None,
        };
        let cards = build_cards(&empty, CaptionSource::TypeDescription);
        assert!(cards.is_empty());
        // Ready with zero cards is a valid, non-error state.
        let state = State::Ready(cards);
        assert!(matches!(state, State::Ready(ref c) if c.is_empty()));
    }
}
