// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! The generation flow lives here: preflight validation (blocking alert,
//! no network call), dispatch with the submit control disabled, rendering
//! of the classified outcome, and the deferred gallery refresh. The
//! in-flight flag is cleared on every settlement path of the single
//! `GenerationCompleted` message, so the submit control always comes back.

use super::{App, Message, Screen};
use crate::api;
use crate::config::{self, GALLERY_REFRESH_DELAY_MS};
use crate::ui::form;
use crate::ui::gallery;
use crate::ui::modal;
use crate::ui::navbar;
use crate::ui::notifications::Notification;
use crate::ui::results;
use crate::ui::settings;
use crate::ui::upload;
use iced::widget::image::Handle;
use iced::Task;
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::time::Duration;

const IMAGE_FILTER_NAME: &str = "Images";
const IMAGE_FILTER_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "gif"];

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Navbar(msg) => match navbar::update(msg, &mut app.menu_open) {
            navbar::Event::None => Task::none(),
            navbar::Event::Navigate(screen) => {
                app.screen = screen;
                if screen == Screen::Gallery {
                    start_gallery_refresh(app)
                } else {
                    Task::none()
                }
            }
        },

        Message::Form(msg) => match app.form.update(msg) {
            form::Event::None => Task::none(),
            form::Event::Submit => handle_submit(app),
            form::Event::PickProductImage => {
                pick_image_dialog(Message::ProductImageDialogResult)
            }
            form::Event::PickTemplate => pick_image_dialog(Message::TemplateDialogResult),
        },

        Message::ValidationAlertDismissed => Task::none(),

        Message::GenerationCompleted(result) => handle_generation_completed(app, result),

        Message::GalleryRefreshDue => start_gallery_refresh(app),

        Message::GalleryListLoaded(result) => handle_gallery_listing(app, result),

        Message::GalleryThumbFetched { url, result } => {
            let handle = match result {
                Ok(bytes) => Some(Handle::from_bytes(bytes)),
                Err(err) => {
                    tracing::debug!(url = %url, error = %err, "thumbnail fetch failed");
                    None
                }
            };
            app.gallery.apply_thumb(&url, handle);
            Task::none()
        }

        Message::Results(msg) => match app.results.update(msg) {
            results::Event::None => Task::none(),
            results::Event::Download { url, filename } => start_download(app, url, filename),
            results::Event::Enlarge(index) => {
                open_modal_for_result(app, index);
                Task::none()
            }
        },

        Message::Gallery(msg) => match app.gallery.update(msg) {
            gallery::Event::None => Task::none(),
            gallery::Event::Refresh => start_gallery_refresh(app),
            gallery::Event::Enlarge(index) => {
                open_modal_for_gallery(app, index);
                Task::none()
            }
        },

        Message::Modal(msg) => match app.modal.update(msg) {
            modal::Event::None => Task::none(),
            modal::Event::Download { url, filename } => start_download(app, url, filename),
        },

        Message::ProductImageDialogResult(path) => match path {
            Some(path) => load_product_image(path),
            None => Task::none(),
        },

        Message::ProductImageLoaded(result) => {
            match result {
                Ok(preview) => app.form.upload.set_preview(preview),
                Err(err) => {
                    // The previous preview stays in place.
                    tracing::warn!(error = %err, "failed to load product image");
                    app.notifications
                        .push(Notification::warning("notification-upload-unreadable"));
                }
            }
            Task::none()
        }

        Message::TemplateDialogResult(path) => match path {
            Some(path) => Task::perform(
                async move {
                    upload::load_preview(path).await.map(|preview| form::TemplateFile {
                        filename: preview.filename,
                        bytes: preview.bytes,
                        mime: preview.mime,
                    })
                },
                Message::TemplateLoaded,
            ),
            None => Task::none(),
        },

        Message::TemplateLoaded(result) => {
            match result {
                Ok(template) => app.form.set_template(template),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to load template file");
                    app.notifications
                        .push(Notification::warning("notification-upload-unreadable"));
                }
            }
            Task::none()
        }

        Message::FileHovered(path) => {
            if drop_target_active(app) {
                app.form
                    .upload
                    .set_drag_active(upload::is_image_path(&path));
            }
            Task::none()
        }

        Message::FilesHoveredLeft => {
            app.form.upload.set_drag_active(false);
            Task::none()
        }

        Message::FileDropped(path) => {
            app.form.upload.set_drag_active(false);
            if !drop_target_active(app) {
                return Task::none();
            }
            if upload::is_image_path(&path) {
                load_product_image(path)
            } else {
                app.notifications
                    .push(Notification::warning("notification-upload-not-image"));
                Task::none()
            }
        }

        Message::DownloadFetched { filename, result } => match result {
            Ok(bytes) => prompt_save_location(app, filename, bytes),
            Err(err) => {
                tracing::warn!(error = %err, "download fetch failed");
                app.notifications
                    .push(Notification::error("notification-download-error"));
                Task::none()
            }
        },

        Message::DownloadSaveDialogResult { bytes, path } => match path {
            Some(path) => {
                remember_save_directory(app, &path);
                Task::perform(
                    async move {
                        let name = path
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("image")
                            .to_string();
                        tokio::fs::write(&path, &bytes)
                            .await
                            .map(|()| name)
                            .map_err(|e| e.to_string())
                    },
                    Message::DownloadWritten,
                )
            }
            None => Task::none(),
        },

        Message::DownloadWritten(result) => {
            match result {
                Ok(filename) => {
                    tracing::info!(filename = %filename, "image saved");
                    app.notifications.push(
                        Notification::success("notification-download-saved")
                            .with_arg("filename", filename),
                    );
                }
                Err(err) => {
                    tracing::warn!(error = %err, "image save failed");
                    app.notifications
                        .push(Notification::error("notification-download-error"));
                }
            }
            Task::none()
        }

        Message::Settings(msg) => {
            let event = app.settings.update(msg);
            handle_settings_event(app, event)
        }

        Message::HealthChecked(result) => {
            let status = match result {
                Ok(health) => {
                    tracing::info!(status = %health.status, "server reachable");
                    settings::HealthStatus::Online {
                        api_key_configured: health.api_key_configured,
                    }
                }
                Err(err) => settings::HealthStatus::Offline {
                    message: err.to_string(),
                },
            };
            app.settings.set_health(status);
            Task::none()
        }

        Message::Notification(msg) => {
            app.notifications.handle_message(&msg);
            Task::none()
        }

        Message::EscapePressed => {
            if app.modal.is_visible() {
                app.modal.close();
            } else {
                app.menu_open = false;
            }
            Task::none()
        }

        Message::Tick(_now) => {
            app.spinner_rotation = (app.spinner_rotation + 0.25) % TAU;
            app.notifications.tick();
            Task::none()
        }
    }
}

/// Whether dropped files currently feed the upload preview.
fn drop_target_active(app: &App) -> bool {
    app.screen == Screen::Studio
        && app.form.shape() == config::RequestShape::TechnicalSheet
}

/// Preflight validation, then exactly one POST. Validation failures show a
/// blocking alert and never touch the network.
fn handle_submit(app: &mut App) -> Task<Message> {
    let request = app.form.build_request();

    if let Err(validation) =
        api::validate(&request, app.config.generation.require_product_image)
    {
        tracing::warn!(error = %validation, "preflight validation failed");
        let title = app.i18n.tr("validation-alert-title");
        let description = app.i18n.tr(validation.i18n_key());
        return Task::perform(
            async move {
                rfd::AsyncMessageDialog::new()
                    .set_level(rfd::MessageLevel::Warning)
                    .set_title(&title)
                    .set_description(&description)
                    .show()
                    .await
            },
            |_| Message::ValidationAlertDismissed,
        );
    }

    app.in_flight = true;
    app.results = results::State::Generating;

    let client = app.client.clone();
    Task::perform(
        async move { api::submit_generation(&client, request).await },
        Message::GenerationCompleted,
    )
}

fn handle_generation_completed(
    app: &mut App,
    result: Result<crate::api::models::GenerateOutcome, crate::error::ApiError>,
) -> Task<Message> {
    // Re-enable the submit control before anything else; both arms below
    // leave it enabled no matter how the request ended.
    app.in_flight = false;

    match result {
        Ok(outcome) => {
            let cards = results::build_cards(&outcome, app.config.generation.caption_source);
            app.results = results::State::Ready(cards);

            // Results are on screen; the gallery catches up after a short
            // delay. Its failure cannot touch the cards just rendered.
            Task::perform(
                async {
                    tokio::time::sleep(Duration::from_millis(GALLERY_REFRESH_DELAY_MS)).await;
                },
                |()| Message::GalleryRefreshDue,
            )
        }
        Err(error) => {
            app.results = results::State::failed(&error);
            Task::none()
        }
    }
}

fn start_gallery_refresh(app: &mut App) -> Task<Message> {
    app.gallery = gallery::State::Loading;
    let client = app.client.clone();
    Task::perform(
        async move { api::fetch_gallery(&client).await },
        Message::GalleryListLoaded,
    )
}

fn handle_gallery_listing(
    app: &mut App,
    result: Result<Vec<crate::api::models::GalleryEntry>, crate::error::ApiError>,
) -> Task<Message> {
    match result {
        Ok(entries) => {
            app.gallery.apply_listing(entries.clone());

            let thumb_tasks: Vec<Task<Message>> = entries
                .into_iter()
                .map(|entry| {
                    let client = app.client.clone();
                    let fetch_url = entry.url.clone();
                    let message_url = entry.url;
                    Task::perform(
                        async move { client.fetch_image(&fetch_url).await },
                        move |result| Message::GalleryThumbFetched {
                            url: message_url.clone(),
                            result,
                        },
                    )
                })
                .collect();

            Task::batch(thumb_tasks)
        }
        Err(error) => {
            tracing::warn!(error = %error, "gallery refresh failed");
            app.gallery = gallery::State::failed(&error);
            Task::none()
        }
    }
}

fn open_modal_for_result(app: &mut App, index: usize) {
    let Some(card) = app.results.card(index) else {
        return;
    };
    let preview = card.preview.clone();
    let title = card.title.clone();
    let filename = card.filename.clone();
    let download_url = app.client.absolute_url(&card.url);
    app.modal.open(preview, title, download_url, filename);
}

fn open_modal_for_gallery(app: &mut App, index: usize) {
    let Some(thumb) = app.gallery.thumb(index) else {
        return;
    };
    let preview = match &thumb.image {
        gallery::ThumbImage::Ready(handle) => Some(handle.clone()),
        _ => None,
    };
    let caption = thumb.entry.filename.clone();
    let filename = thumb.entry.filename.clone();
    let download_url = app.client.absolute_url(&thumb.entry.url);
    app.modal.open(preview, caption, download_url, filename);
}

fn pick_image_dialog(to_message: fn(Option<PathBuf>) -> Message) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncFileDialog::new()
                .add_filter(IMAGE_FILTER_NAME, &IMAGE_FILTER_EXTENSIONS)
                .pick_file()
                .await
                .map(|handle| handle.path().to_path_buf())
        },
        to_message,
    )
}

fn load_product_image(path: PathBuf) -> Task<Message> {
    Task::perform(upload::load_preview(path), Message::ProductImageLoaded)
}

fn start_download(app: &App, url: String, filename: String) -> Task<Message> {
    let client = app.client.clone();
    let absolute = app.client.absolute_url(&url);
    tracing::info!(url = %absolute, "downloading image");
    Task::perform(
        async move { client.fetch_image(&absolute).await },
        move |result| Message::DownloadFetched {
            filename: filename.clone(),
            result,
        },
    )
}

fn prompt_save_location(app: &App, filename: String, bytes: Vec<u8>) -> Task<Message> {
    let last_dir = app.app_state.last_save_directory.clone();
    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().set_file_name(&filename);
            if let Some(dir) = last_dir {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }
            let path = dialog.save_file().await.map(|h| h.path().to_path_buf());
            (bytes, path)
        },
        |(bytes, path)| Message::DownloadSaveDialogResult { bytes, path },
    )
}

fn remember_save_directory(app: &mut App, path: &std::path::Path) {
    if let Some(parent) = path.parent() {
        app.app_state.last_save_directory = Some(parent.to_path_buf());
        if let Err(err) = app.app_state.save() {
            tracing::warn!(error = %err, "failed to persist app state");
            app.notifications
                .push(Notification::warning("notification-state-save-error"));
        }
    }
}

fn handle_settings_event(app: &mut App, event: settings::Event) -> Task<Message> {
    match event {
        settings::Event::None => Task::none(),

        settings::Event::LanguageSelected(locale) => {
            app.config.general.language = Some(locale.to_string());
            app.i18n.set_locale(locale);
            persist_config(app);
            Task::none()
        }

        settings::Event::ThemeModeSelected(mode) => {
            app.theme_mode = mode;
            app.config.general.theme_mode = mode;
            persist_config(app);
            Task::none()
        }

        settings::Event::RequestShapeSelected(shape) => {
            app.config.generation.request_shape = shape;
            app.form.set_shape(shape);
            persist_config(app);
            Task::none()
        }

        settings::Event::CaptionSourceSelected(source) => {
            app.config.generation.caption_source = source;
            persist_config(app);
            Task::none()
        }

        settings::Event::RequireProductImageToggled(required) => {
            app.config.generation.require_product_image = required;
            persist_config(app);
            Task::none()
        }

        settings::Event::ServerUrlCommitted(url) => {
            if url.is_empty() {
                return Task::none();
            }
            match api::Client::new(&url, app.config.server.timeout_secs()) {
                Ok(client) => {
                    app.client = client;
                    app.config.server.base_url = Some(url);
                    persist_config(app);
                    app.notifications
                        .push(Notification::success("notification-server-updated"));
                }
                Err(err) => {
                    tracing::error!(error = %err, "failed to rebuild HTTP client");
                    app.notifications
                        .push(Notification::error("notification-server-error"));
                }
            }
            Task::none()
        }

        settings::Event::TestConnection => {
            let client = app.client.clone();
            Task::perform(
                async move { client.health().await },
                Message::HealthChecked,
            )
        }
    }
}

fn persist_config(app: &mut App) {
    if let Err(err) = config::save(&app.config) {
        tracing::warn!(error = %err, "failed to save config");
        app.notifications
            .push(Notification::warning("notification-config-save-error"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::GenerateOutcome;
    use crate::error::ApiError;

    #[test]
    fn submit_with_empty_sheet_never_dispatches() {
        let mut app = App::default();
        let _task = update(&mut app, Message::Form(form::Message::SubmitPressed));

        // Validation failed before dispatch: no in-flight request, results
        // untouched.
        assert!(!app.in_flight);
        assert!(matches!(app.results, results::State::Idle));
    }

    #[test]
    fn generation_settlement_reenables_submit_on_failure() {
        let mut app = App::default();
        app.in_flight = true;
        app.results = results::State::Generating;

        let _ = update(
            &mut app,
            Message::GenerationCompleted(Err(ApiError::Transport("boom".to_string()))),
        );

        assert!(!app.in_flight);
        assert!(matches!(app.results, results::State::Failed { .. }));
    }

    #[test]
    fn generation_settlement_reenables_submit_on_success() {
        let mut app = App::default();
        app.in_flight = true;

        let outcome = GenerateOutcome {
            images: vec![],
            prompt: None,
        };
        let _ = update(&mut app, Message::GenerationCompleted(Ok(outcome)));

        assert!(!app.in_flight);
        assert!(matches!(app.results, results::State::Ready(ref cards) if cards.is_empty()));
    }

    #[test]
    fn gallery_failure_does_not_touch_results() {
        let mut app = App::default();
        app.results = results::State::Ready(vec![]);

        let _ = update(
            &mut app,
            Message::GalleryListLoaded(Err(ApiError::Transport("down".to_string()))),
        );

        assert!(matches!(app.results, results::State::Ready(_)));
        assert!(matches!(app.gallery, gallery::State::Failed { .. }));
    }

    #[test]
    fn escape_closes_modal_before_menu() {
        let mut app = App::default();
        app.modal.open(
            None,
            "caption".to_string(),
            "/img/a.png".to_string(),
            "a.png".to_string(),
        );
        app.menu_open = true;

        let _ = update(&mut app, Message::EscapePressed);
        assert!(!app.modal.is_visible());
        assert!(app.menu_open);

        let _ = update(&mut app, Message::EscapePressed);
        assert!(!app.menu_open);
    }

    #[test]
    fn dropped_non_image_file_is_rejected() {
        let mut app = App::default();
        let _ = update(&mut app, Message::FileDropped(PathBuf::from("notes.txt")));

        assert!(app.form.upload.preview().is_none());
        assert_eq!(app.notifications.visible_count(), 1);
    }
}
