// SPDX-License-Identifier: MPL-2.0
//! Wire types for the generation service.
//!
//! The service speaks the original Portuguese JSON schema (`sucesso`,
//! `imagens`, `erro`, ...); Rust field names stay English through serde
//! renames. Unknown fields (e.g. gallery `timestamp`) are ignored.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

/// One generated image descriptor as returned by `POST /gerar`.
///
/// `inline` carries a `data:image/png;base64,...` payload for immediate
/// preview; `url`/`filename` point at the stored copy used for downloads.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GeneratedImage {
    #[serde(rename = "base64", default)]
    pub inline: Option<String>,
    pub url: String,
    pub filename: String,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub descricao: Option<String>,
}

/// Response body of `POST /gerar`.
///
/// `sucesso` defaults to `false`: the server's preflight rejections answer
/// with an `erro`-only body that carries no flag at all.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "sucesso", default)]
    pub success: bool,
    #[serde(rename = "imagens", default)]
    pub images: Vec<GeneratedImage>,
    #[serde(rename = "erro", default)]
    pub error: Option<String>,
    /// Prompt echo, used by the `prompt` caption strategy.
    #[serde(default)]
    pub prompt: Option<String>,
}

/// One stored image as listed by `GET /galeria`. Entries arrive newest-first.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GalleryEntry {
    pub url: String,
    pub filename: String,
}

/// Response body of `GET /galeria`.
#[derive(Debug, Clone, Deserialize)]
pub struct GalleryResponse {
    #[serde(rename = "sucesso", default)]
    pub success: bool,
    #[serde(rename = "imagens", default)]
    pub images: Vec<GalleryEntry>,
    #[serde(rename = "erro", default)]
    pub error: Option<String>,
}

/// Response body of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "api_key_configurada", default)]
    pub api_key_configured: bool,
}

/// Successful outcome of a generation request.
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub images: Vec<GeneratedImage>,
    pub prompt: Option<String>,
}

/// A file attached to a multipart generation request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Multipart form fields of the technical-sheet request shape.
#[derive(Debug, Clone, Default)]
pub struct TechnicalSheetRequest {
    pub sheet: String,
    pub font: String,
    pub icon_color: String,
    pub font_color: String,
    pub accent_color: String,
    pub product_image: Option<UploadedFile>,
    pub template: Option<UploadedFile>,
}

/// JSON body of the prompt request shape.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub prompt: String,
    pub image_count: u8,
    pub aspect_ratio: String,
}

/// The two deployment shapes of the generation endpoint. Exactly one is
/// active per configuration; a single request never mixes them.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    TechnicalSheet(TechnicalSheetRequest),
    Prompt(PromptRequest),
}

/// Decodes a `data:<mime>;base64,<payload>` string (or a bare base64 string)
/// into raw bytes. Returns `None` when the payload is not valid base64.
pub fn decode_data_url(data: &str) -> Option<Vec<u8>> {
    let payload = match data.split_once("base64,") {
        Some((_, rest)) => rest,
        None => data,
    };
    STANDARD.decode(payload.trim()).ok()
}

/// Turns a `tipo` tag like `1_Foto_Principal` into display text
/// (`1 Foto Principal`). Every underscore becomes a space.
pub fn humanize_tipo(tipo: &str) -> String {
    tipo.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_response_parses_success_payload() {
        let body = r#"{
            "sucesso": true,
            "imagens": [
                {"base64": "data:image/png;base64,aGk=", "url": "/img/1.png",
                 "filename": "1.png", "tipo": "product_shot", "descricao": "Front view"},
                {"url": "/img/2.png", "filename": "2.png"}
            ],
            "prompt": "Wireless mouse, black, USB-C"
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).expect("valid payload");
        assert!(parsed.success);
        assert_eq!(parsed.images.len(), 2);
        assert_eq!(parsed.images[0].tipo.as_deref(), Some("product_shot"));
        assert_eq!(parsed.images[1].inline, None);
        assert_eq!(parsed.prompt.as_deref(), Some("Wireless mouse, black, USB-C"));
    }

    #[test]
    fn generate_response_success_defaults_to_false() {
        // The server's own validation errors answer with an erro-only body.
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"erro": "Prompt vazio"}"#).expect("valid payload");
        assert!(!parsed.success);
        assert!(parsed.images.is_empty());
        assert_eq!(parsed.error.as_deref(), Some("Prompt vazio"));
    }

    #[test]
    fn gallery_response_tolerates_extra_fields() {
        let body = r#"{
            "sucesso": true,
            "imagens": [{"url": "/static/imagens_geradas/a.png",
                         "filename": "a.png", "timestamp": 1712345678.0}]
        }"#;
        let parsed: GalleryResponse = serde_json::from_str(body).expect("valid payload");
        assert!(parsed.success);
        assert_eq!(parsed.images[0].filename, "a.png");
    }

    #[test]
    fn decode_data_url_strips_prefix() {
        let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").expect("decodes");
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn decode_data_url_accepts_bare_base64() {
        assert_eq!(decode_data_url("aGk=").expect("decodes"), b"hi");
    }

    #[test]
    fn decode_data_url_rejects_garbage() {
        assert_eq!(decode_data_url("data:image/png;base64,!!!"), None);
    }

    #[test]
    fn humanize_tipo_replaces_every_underscore() {
        assert_eq!(humanize_tipo("1_Foto_Principal"), "1 Foto Principal");
        assert_eq!(humanize_tipo("product_shot"), "product shot");
        assert_eq!(humanize_tipo("plain"), "plain");
    }
}
