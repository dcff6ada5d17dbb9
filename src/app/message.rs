// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::models::{GalleryEntry, GenerateOutcome, HealthResponse};
use crate::error::ApiError;
use crate::ui::form;
use crate::ui::gallery;
use crate::ui::modal;
use crate::ui::navbar;
use crate::ui::notifications;
use crate::ui::results;
use crate::ui::settings;
use crate::ui::upload;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Form(form::Message),
    Results(results::Message),
    Gallery(gallery::Message),
    Modal(modal::Message),
    Settings(settings::Message),
    Notification(notifications::NotificationMessage),

    /// The preflight validation alert was acknowledged.
    ValidationAlertDismissed,
    /// The generation request settled, one way or the other.
    GenerationCompleted(Result<GenerateOutcome, ApiError>),
    /// The post-generation gallery refresh delay elapsed.
    GalleryRefreshDue,
    /// The gallery listing request settled.
    GalleryListLoaded(Result<Vec<GalleryEntry>, ApiError>),
    /// One gallery thumbnail fetch settled.
    GalleryThumbFetched {
        url: String,
        result: Result<Vec<u8>, ApiError>,
    },

    /// Result from the product image picker dialog.
    ProductImageDialogResult(Option<PathBuf>),
    /// A picked or dropped product image finished loading and decoding.
    ProductImageLoaded(Result<upload::Preview, String>),
    /// Result from the template picker dialog.
    TemplateDialogResult(Option<PathBuf>),
    /// A picked template file finished loading.
    TemplateLoaded(Result<form::TemplateFile, String>),

    /// A file drag entered the window.
    FileHovered(PathBuf),
    /// All file drags left the window.
    FilesHoveredLeft,
    /// A file was dropped on the window.
    FileDropped(PathBuf),

    /// The download fetch settled; on success the save dialog follows.
    DownloadFetched {
        filename: String,
        result: Result<Vec<u8>, ApiError>,
    },
    /// Result from the save dialog, carrying the fetched bytes through.
    DownloadSaveDialogResult {
        bytes: Vec<u8>,
        path: Option<PathBuf>,
    },
    /// The disk write settled. `Ok` carries the saved file name.
    DownloadWritten(Result<String, String>),

    /// The connection test settled.
    HealthChecked(Result<HealthResponse, ApiError>),

    EscapePressed,
    /// Periodic tick for the spinner and notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `pt-BR`, `en-US`).
    pub lang: Option<String>,
    /// Optional server base URL override (not persisted).
    pub server: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over the `EASEL_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
}
