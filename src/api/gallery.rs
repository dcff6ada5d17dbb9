// SPDX-License-Identifier: MPL-2.0
//! Gallery listing. Thumbnail bytes are fetched separately through
//! [`Client::fetch_image`](super::Client::fetch_image).

use super::models::{GalleryEntry, GalleryResponse};
use super::{read_structured_body, Client};
use crate::error::ApiError;

/// Calls `GET /galeria` and returns the stored entries, newest first
/// (the server orders them).
pub async fn fetch_gallery(client: &Client) -> Result<Vec<GalleryEntry>, ApiError> {
    let url = client.endpoint("/galeria");
    tracing::debug!(url = %url, "refreshing gallery listing");

    let response = client
        .http()
        .get(&url)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let body = read_structured_body(response).await?;
    interpret_gallery_body(&body)
}

fn interpret_gallery_body(body: &str) -> Result<Vec<GalleryEntry>, ApiError> {
    let parsed: GalleryResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    if parsed.success {
        Ok(parsed.images)
    } else {
        Err(ApiError::Application(parsed.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listing_is_success_not_error() {
        let entries =
            interpret_gallery_body(r#"{"sucesso": true, "imagens": []}"#).expect("success");
        assert!(entries.is_empty());
    }

    #[test]
    fn listing_preserves_server_order() {
        let body = r#"{
            "sucesso": true,
            "imagens": [
                {"url": "/g/new.png", "filename": "new.png"},
                {"url": "/g/old.png", "filename": "old.png"}
            ]
        }"#;
        let entries = interpret_gallery_body(body).expect("success");
        assert_eq!(entries[0].filename, "new.png");
        assert_eq!(entries[1].filename, "old.png");
    }

    #[test]
    fn structured_failure_is_application_error() {
        match interpret_gallery_body(r#"{"sucesso": false, "erro": "Pasta ausente"}"#) {
            Err(ApiError::Application(Some(msg))) => assert_eq!(msg, "Pasta ausente"),
            other => panic!("expected Application error, got {:?}", other),
        }
    }
}
