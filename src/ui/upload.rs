// SPDX-License-Identifier: MPL-2.0
//! Product image upload with preview.
//!
//! Files arrive through the picker dialog or by dropping them on the
//! window. Only image-typed files are accepted. While a drag hovers over
//! the window the drop zone border lights up; the highlight is transient
//! and leaves no state behind besides the currently previewed file.

use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, Column, Container, Text};
use iced::{alignment, ContentFit, Element, Length};
use std::path::{Path, PathBuf};

/// Extensions accepted from the picker and from drag-drop.
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

/// A decoded, displayable copy of the selected file. The raw bytes are kept
/// for the multipart upload; the handle feeds the preview widget.
#[derive(Debug, Clone)]
pub struct Preview {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: String,
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct State {
    preview: Option<Preview>,
    drag_active: bool,
}

#[derive(Debug, Clone)]
pub enum Message {
    PickPressed,
    ClearPressed,
}

/// Events propagated to the parent application.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// Open the file picker dialog.
    PickRequested,
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::PickPressed => Event::PickRequested,
            Message::ClearPressed => {
                self.preview = None;
                Event::None
            }
        }
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    pub fn set_preview(&mut self, preview: Preview) {
        self.preview = Some(preview);
        self.drag_active = false;
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let inner: Element<'a, Message> = match &self.preview {
            Some(preview) => {
                let caption = format!(
                    "{} ({}×{})",
                    preview.filename, preview.width, preview.height
                );
                Column::new()
                    .spacing(spacing::XS)
                    .align_x(alignment::Horizontal::Center)
                    .push(
                        Image::new(preview.handle.clone())
                            .height(Length::Fixed(sizing::UPLOAD_ZONE_HEIGHT - 48.0))
                            .content_fit(ContentFit::Contain),
                    )
                    .push(Text::new(caption).size(typography::CAPTION))
                    .push(
                        button(Text::new(i18n.tr("upload-clear")).size(typography::BODY_SM))
                            .padding(spacing::XXS)
                            .on_press(Message::ClearPressed)
                            .style(styles::button::secondary),
                    )
                    .into()
            }
            None => {
                // Placeholder graphic with a pick button
                Column::new()
                    .spacing(spacing::XS)
                    .align_x(alignment::Horizontal::Center)
                    .push(Text::new("🖼").size(typography::TITLE_LG))
                    .push(Text::new(i18n.tr("upload-placeholder")).size(typography::BODY_SM))
                    .push(
                        button(Text::new(i18n.tr("upload-pick")).size(typography::BODY_SM))
                            .padding(spacing::XS)
                            .on_press(Message::PickPressed)
                            .style(styles::button::secondary),
                    )
                    .into()
            }
        };

        Container::new(inner)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::UPLOAD_ZONE_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .padding(spacing::SM)
            .style(styles::container::drop_zone(self.drag_active))
            .into()
    }
}

/// Whether a dropped or picked path looks like an image file.
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let lower = ext.to_lowercase();
            IMAGE_EXTENSIONS.contains(&lower.as_str())
        })
        .unwrap_or(false)
}

/// MIME type for an accepted image extension.
pub fn mime_for_path(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "webp" => "image/webp".to_string(),
        "gif" => "image/gif".to_string(),
        _ => "image/png".to_string(),
    }
}

/// Reads and decodes a picked file into a [`Preview`].
///
/// Decoding doubles as validation: a file that is not a readable image is
/// rejected here instead of surprising the server.
pub async fn load_preview(path: PathBuf) -> Result<Preview, String> {
    let bytes = tokio::fs::read(&path).await.map_err(|e| e.to_string())?;

    let decoded = image_rs::load_from_memory(&bytes).map_err(|e| e.to_string())?;
    let (width, height) = (decoded.width(), decoded.height());

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.png")
        .to_string();
    let mime = mime_for_path(&path);
    let handle = Handle::from_bytes(bytes.clone());

    Ok(Preview {
        filename,
        bytes,
        mime,
        handle,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_image_extensions() {
        assert!(is_image_path(Path::new("photo.PNG")));
        assert!(is_image_path(Path::new("photo.jpeg")));
        assert!(!is_image_path(Path::new("notes.txt")));
        assert!(!is_image_path(Path::new("archive")));
    }

    #[test]
    fn mime_matches_extension() {
        assert_eq!(mime_for_path(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_for_path(Path::new("a.png")), "image/png");
    }

    #[test]
    fn clear_drops_preview() {
        let mut state = State::default();
        state.set_preview(Preview {
            filename: "a.png".to_string(),
            bytes: vec![1, 2, 3],
            mime: "image/png".to_string(),
            handle: Handle::from_bytes(vec![1, 2, 3]),
            width: 1,
            height: 1,
        });
        assert!(state.preview().is_some());
        let _ = state.update(Message::ClearPressed);
        assert!(state.preview().is_none());
    }

    #[tokio::test]
    async fn load_preview_rejects_non_image_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fake.png");
        tokio::fs::write(&path, b"definitely not an image")
            .await
            .expect("write");
        assert!(load_preview(path).await.is_err());
    }
}
