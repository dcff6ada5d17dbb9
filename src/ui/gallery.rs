// SPDX-License-Identifier: MPL-2.0
//! Gallery of previously generated images.
//!
//! A refresh always goes through the loading placeholder first. Zero
//! entries render an explicit empty-state message, never a bare grid.
//! Failures replace only this grid with an inline error placeholder;
//! repeated refreshes are safe and a newer refresh simply replaces
//! whatever an older one rendered.

use crate::api::models::GalleryEntry;
use crate::error::ApiError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, mouse_area, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Thumbnails per grid row.
const GRID_COLUMNS: usize = 4;

/// A listed entry plus the state of its thumbnail fetch. The listing and
/// the thumbnail bytes arrive separately, like `<img src>` loading after
/// the page markup.
#[derive(Debug, Clone)]
pub struct Thumb {
    pub entry: GalleryEntry,
    pub image: ThumbImage,
}

#[derive(Debug, Clone)]
pub enum ThumbImage {
    Loading,
    Ready(Handle),
    Failed,
}

#[derive(Debug, Clone, Default)]
pub enum State {
    #[default]
    Loading,
    Empty,
    Ready(Vec<Thumb>),
    Failed {
        heading_key: &'static str,
        detail: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum Message {
    RefreshPressed,
    EnlargePressed(usize),
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    Refresh,
    /// Open the modal viewer for the thumbnail at this index.
    Enlarge(usize),
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::RefreshPressed => Event::Refresh,
            Message::EnlargePressed(index) => match self {
                State::Ready(thumbs) if index < thumbs.len() => Event::Enlarge(index),
                _ => Event::None,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, State::Loading)
    }

    pub fn thumb(&self, index: usize) -> Option<&Thumb> {
        match self {
            State::Ready(thumbs) => thumbs.get(index),
            _ => None,
        }
    }

    /// Applies a fresh listing. Zero entries become the explicit empty
    /// state; otherwise every thumbnail starts out pending.
    pub fn apply_listing(&mut self, entries: Vec<GalleryEntry>) {
        *self = if entries.is_empty() {
            State::Empty
        } else {
            State::Ready(
                entries
                    .into_iter()
                    .map(|entry| Thumb {
                        entry,
                        image: ThumbImage::Loading,
                    })
                    .collect(),
            )
        };
    }

    /// Applies the result of one thumbnail fetch, matched by URL. A result
    /// for an entry that a newer refresh dropped is silently ignored.
    pub fn apply_thumb(&mut self, url: &str, handle: Option<Handle>) {
        if let State::Ready(thumbs) = self {
            if let Some(thumb) = thumbs.iter_mut().find(|t| t.entry.url == url) {
                thumb.image = match handle {
                    Some(handle) => ThumbImage::Ready(handle),
                    None => ThumbImage::Failed,
                };
            }
        }
    }

    pub fn failed(error: &ApiError) -> Self {
        State::Failed {
            heading_key: error.i18n_key(),
            detail: error.detail().map(str::to_string),
        }
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n, spinner_rotation: f32) -> Element<'a, Message> {
        let header = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(i18n.tr("gallery-title"))
                    .size(typography::TITLE_SM)
                    .width(Length::Fill),
            )
            .push(
                button(Text::new(i18n.tr("gallery-refresh")).size(typography::BODY_SM))
                    .padding([spacing::XXS, spacing::SM])
                    .on_press(Message::RefreshPressed)
                    .style(styles::button::secondary),
            );

        let content: Element<'a, Message> = match self {
            State::Loading => {
                let spinner =
                    AnimatedSpinner::new(palette::PRIMARY_500, spinner_rotation).into_element();
                Container::new(
                    Column::new()
                        .spacing(spacing::SM)
                        .align_x(alignment::Horizontal::Center)
                        .push(spinner)
                        .push(Text::new(i18n.tr("gallery-loading")).size(typography::BODY)),
                )
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .padding(spacing::XL)
                .into()
            }

            State::Empty => Container::new(
                Text::new(i18n.tr("gallery-empty"))
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::XL)
            .into(),

            State::Failed {
                heading_key,
                detail,
            } => {
                let detail_text = match detail {
                    Some(text) => text.clone(),
                    None => i18n.tr("error-application-fallback"),
                };
                Container::new(
                    Column::new()
                        .spacing(spacing::XS)
                        .push(
                            Text::new(i18n.tr("gallery-error-title"))
                                .size(typography::BODY_LG)
                                .color(palette::ERROR_500),
                        )
                        .push(Text::new(i18n.tr(*heading_key)).size(typography::BODY))
                        .push(Text::new(detail_text).size(typography::BODY_SM)),
                )
                .width(Length::Fill)
                .padding(spacing::MD)
                .style(styles::container::error_block)
                .into()
            }

            State::Ready(thumbs) => view_grid(thumbs),
        };

        Column::new()
            .spacing(spacing::MD)
            .push(header)
            .push(content)
            .into()
    }
}

fn view_grid(thumbs: &[Thumb]) -> Element<'_, Message> {
    let mut grid = Column::new().spacing(spacing::SM);

    for (row_index, chunk) in thumbs.chunks(GRID_COLUMNS).enumerate() {
        let mut row = Row::new().spacing(spacing::SM);
        for (col_index, thumb) in chunk.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            row = row.push(view_thumb(thumb, index));
        }
        grid = grid.push(row);
    }

    grid.into()
}

fn view_thumb(thumb: &Thumb, index: usize) -> Element<'_, Message> {
    let inner: Element<'_, Message> = match &thumb.image {
        ThumbImage::Ready(handle) => Image::new(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::THUMBNAIL_SIZE - 32.0))
            .content_fit(ContentFit::Cover)
            .into(),
        ThumbImage::Loading => Container::new(Text::new("…").size(typography::TITLE_MD))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::THUMBNAIL_SIZE - 32.0))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
        ThumbImage::Failed => Container::new(Text::new("⚠").size(typography::TITLE_MD))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::THUMBNAIL_SIZE - 32.0))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let content = Column::new()
        .spacing(spacing::XXS)
        .push(mouse_area(inner).on_press(Message::EnlargePressed(index)))
        .push(Text::new(thumb.entry.filename.clone()).size(typography::CAPTION));

    Container::new(content)
        .width(Length::Fixed(sizing::THUMBNAIL_SIZE))
        .padding(spacing::XS)
        .style(styles::container::card)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<GalleryEntry> {
        vec![
            GalleryEntry {
                url: "/g/new.png".to_string(),
                filename: "new.png".to_string(),
            },
            GalleryEntry {
                url: "/g/old.png".to_string(),
                filename: "old.png".to_string(),
            },
        ]
    }

    #[test]
    fn zero_entries_become_explicit_empty_state() {
        let mut state = State::Loading;
        state.apply_listing(vec![]);
        assert!(matches!(state, State::Empty));
    }

    #[test]
    fn listing_starts_all_thumbnails_pending() {
        let mut state = State::Loading;
        state.apply_listing(entries());
        match &state {
            State::Ready(thumbs) => {
                assert_eq!(thumbs.len(), 2);
                assert!(thumbs
                    .iter()
                    .all(|t| matches!(t.image, ThumbImage::Loading)));
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn thumb_results_match_by_url() {
        let mut state = State::Loading;
        state.apply_listing(entries());
        state.apply_thumb("/g/old.png", Some(Handle::from_bytes(vec![0u8; 4])));
        state.apply_thumb("/g/gone.png", Some(Handle::from_bytes(vec![0u8; 4])));
        match &state {
            State::Ready(thumbs) => {
                assert!(matches!(thumbs[0].image, ThumbImage::Loading));
                assert!(matches!(thumbs[1].image, ThumbImage::Ready(_)));
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn failed_thumb_is_marked_not_dropped() {
        let mut state = State::Loading;
        state.apply_listing(entries());
        state.apply_thumb("/g/new.png", None);
        match &state {
            State::Ready(thumbs) => {
                assert!(matches!(thumbs[0].image, ThumbImage::Failed));
                assert_eq!(thumbs.len(), 2);
            }
            other => panic!("expected Ready, got {:?}", other),
        }
    }

    #[test]
    fn refresh_is_allowed_from_any_state() {
        let mut state = State::Failed {
            heading_key: "error-transport",
            detail: None,
        };
        assert!(matches!(state.update(Message::RefreshPressed), Event::Refresh));
    }
}
