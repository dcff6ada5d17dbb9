// SPDX-License-Identifier: MPL-2.0
//! Process-wide modal viewer.
//!
//! One modal instance lives on the `App` struct; `open` always overwrites
//! the tracked image and download target (single slot, last-write-wins, no
//! stacking). Hidden → Visible on `open`; Visible → Hidden on the close
//! button, a click on the backdrop itself (clicks inside the card are
//! swallowed by an inner mouse area), or Escape while visible. The download
//! action reads the last-opened image's target and is a no-op if nothing
//! has ever been opened — closing does not clear the slot.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, mouse_area, Column, Container, Row, Text};
use iced::{alignment, ContentFit, Element, Length};

#[derive(Debug, Clone, Default)]
pub struct State {
    visible: bool,
    image: Option<Handle>,
    caption: String,
    download_url: Option<String>,
    download_filename: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Message {
    ClosePressed,
    BackdropPressed,
    /// Click landed inside the card; swallowed so the backdrop underneath
    /// never sees it.
    ContentPressed,
    DownloadPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    Download { url: String, filename: String },
}

impl State {
    /// Opens the modal for an image, overwriting whatever was tracked.
    pub fn open(
        &mut self,
        image: Option<Handle>,
        caption: String,
        download_url: String,
        download_filename: String,
    ) {
        self.visible = true;
        self.image = image;
        self.caption = caption;
        self.download_url = Some(download_url);
        self.download_filename = Some(download_filename);
    }

    /// Hides the modal. The download slot deliberately survives.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ClosePressed | Message::BackdropPressed => {
                self.close();
                Event::None
            }
            Message::ContentPressed => Event::None,
            Message::DownloadPressed => {
                match (self.download_url.clone(), self.download_filename.clone()) {
                    (Some(url), Some(filename)) => Event::Download { url, filename },
                    _ => Event::None,
                }
            }
        }
    }

    /// Renders the overlay layer. Only called while visible.
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let image: Element<'a, Message> = match &self.image {
            Some(handle) => Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(sizing::MODAL_IMAGE_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into(),
            None => Container::new(Text::new("🖼").size(typography::TITLE_LG))
                .width(Length::Fill)
                .height(Length::Fixed(sizing::MODAL_IMAGE_HEIGHT))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into(),
        };

        let header = Row::new()
            .align_y(alignment::Vertical::Center)
            .push(
                Text::new(self.caption.clone())
                    .size(typography::TITLE_SM)
                    .width(Length::Fill),
            )
            .push(
                button(Text::new("✕").size(typography::BODY_LG))
                    .padding(spacing::XXS)
                    .on_press(Message::ClosePressed)
                    .style(styles::button::secondary),
            );

        let footer = Row::new().push(
            button(Text::new(i18n.tr("modal-download")).size(typography::BODY))
                .padding([spacing::XS, spacing::MD])
                .on_press(Message::DownloadPressed)
                .style(styles::button::primary),
        );

        let card = Container::new(
            Column::new()
                .spacing(spacing::SM)
                .push(header)
                .push(image)
                .push(footer),
        )
        .max_width(sizing::MODAL_MAX_WIDTH)
        .padding(spacing::MD)
        .style(styles::container::modal_card);

        // Inner mouse area keeps card clicks away from the backdrop.
        let card = mouse_area(card).on_press(Message::ContentPressed);

        let backdrop = Container::new(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .padding(spacing::XL)
            .style(styles::container::modal_backdrop);

        mouse_area(backdrop)
            .on_press(Message::BackdropPressed)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_with(state: &mut State, url: &str) {
        state.open(
            None,
            format!("caption for {url}"),
            url.to_string(),
            "file.png".to_string(),
        );
    }

    #[test]
    fn open_transitions_hidden_to_visible() {
        let mut state = State::default();
        assert!(!state.is_visible());
        open_with(&mut state, "/img/a.png");
        assert!(state.is_visible());
    }

    #[test]
    fn last_write_wins_on_download_target() {
        let mut state = State::default();
        open_with(&mut state, "/img/a.png");
        open_with(&mut state, "/img/b.png");
        assert_eq!(state.download_url(), Some("/img/b.png"));
    }

    #[test]
    fn backdrop_and_close_both_hide() {
        let mut state = State::default();
        open_with(&mut state, "/img/a.png");
        state.update(Message::BackdropPressed);
        assert!(!state.is_visible());

        open_with(&mut state, "/img/a.png");
        state.update(Message::ClosePressed);
        assert!(!state.is_visible());
    }

    #[test]
    fn content_clicks_do_not_hide() {
        let mut state = State::default();
        open_with(&mut state, "/img/a.png");
        state.update(Message::ContentPressed);
        assert!(state.is_visible());
    }

    #[test]
    fn download_is_noop_before_first_open() {
        let mut state = State::default();
        assert!(matches!(state.update(Message::DownloadPressed), Event::None));
    }

    #[test]
    fn download_target_survives_close() {
        let mut state = State::default();
        open_with(&mut state, "/img/a.png");
        state.close();
        match state.update(Message::DownloadPressed) {
            Event::Download { url, .. } => assert_eq!(url, "/img/a.png"),
            other => panic!("expected Download event, got {:?}", other),
        }
    }
}
