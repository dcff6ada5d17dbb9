// SPDX-License-Identifier: MPL-2.0
//! Application state persistence using CBOR format.
//!
//! Transient state that should survive restarts but is not user-configurable
//! (unlike preferences in `settings.toml`). Stored as CBOR to keep it
//! clearly separated from the user-editable TOML file.
//!
//! Generation results and gallery data are deliberately NOT persisted; they
//! are ephemeral and refetched from the server.

use super::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

/// Application state that persists across sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Last directory used for saving downloaded images.
    /// Used as the initial directory for the save dialog.
    #[serde(default)]
    pub last_save_directory: Option<PathBuf>,
}

impl AppState {
    /// Loads application state from the default location.
    ///
    /// Returns (state, optional warning key). A missing file is normal and
    /// produces the default state without a warning.
    pub fn load() -> (Self, Option<String>) {
        Self::load_from(None)
    }

    /// Loads application state from a custom directory (for tests).
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                match ciborium::from_reader(reader) {
                    Ok(state) => (state, None),
                    Err(err) => {
                        tracing::warn!(path = %path.display(), error = %err, "corrupt state file");
                        (
                            Self::default(),
                            Some("notification-state-load-error".to_string()),
                        )
                    }
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable state file");
                (
                    Self::default(),
                    Some("notification-state-load-error".to_string()),
                )
            }
        }
    }

    /// Saves application state to the default location.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(None)
    }

    /// Saves application state to a custom directory (for tests).
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> crate::error::Result<()> {
        let Some(path) = Self::state_file_path(base_dir) else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = fs::File::create(&path)?;
        let writer = BufWriter::new(file);
        ciborium::into_writer(self, writer)
            .map_err(|e| crate::error::Error::Io(e.to_string()))?;
        Ok(())
    }

    fn state_file_path(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_preserves_save_directory() {
        let dir = tempdir().expect("tempdir");
        let state = AppState {
            last_save_directory: Some(PathBuf::from("/home/user/Pictures")),
        };

        state
            .save_to(Some(dir.path().to_path_buf()))
            .expect("save succeeds");
        let (loaded, warning) = AppState::load_from(Some(dir.path().to_path_buf()));

        assert!(warning.is_none());
        assert_eq!(loaded, state);
    }

    #[test]
    fn missing_file_is_default_without_warning() {
        let dir = tempdir().expect("tempdir");
        let (state, warning) = AppState::load_from(Some(dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn corrupt_file_warns_and_falls_back() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join(STATE_FILE), b"not cbor at all").expect("write");

        let (state, warning) = AppState::load_from(Some(dir.path().to_path_buf()));
        assert_eq!(state, AppState::default());
        assert_eq!(warning.as_deref(), Some("notification-state-load-error"));
    }
}
