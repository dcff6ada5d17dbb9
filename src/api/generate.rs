// SPDX-License-Identifier: MPL-2.0
//! The generation request itself: preflight validation, dispatch, and
//! classification of the response.

use super::models::{GenerateOutcome, GenerateResponse, GenerationRequest, UploadedFile};
use super::{read_structured_body, Client};
use crate::error::{ApiError, ValidationError};

/// Validates a request before dispatch. A failure here means no network
/// call happens at all.
pub fn validate(
    request: &GenerationRequest,
    product_image_required: bool,
) -> Result<(), ValidationError> {
    match request {
        GenerationRequest::TechnicalSheet(form) => {
            if form.sheet.trim().is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            if product_image_required && form.product_image.is_none() {
                return Err(ValidationError::MissingProductImage);
            }
            Ok(())
        }
        GenerationRequest::Prompt(body) => {
            if body.prompt.trim().is_empty() {
                return Err(ValidationError::EmptyInput);
            }
            if !(1..=4).contains(&body.image_count) {
                return Err(ValidationError::ImageCountOutOfRange);
            }
            Ok(())
        }
    }
}

/// Issues exactly one `POST /gerar` and classifies the response.
///
/// The caller is responsible for running [`validate`] first; this function
/// assumes the request is well-formed and deals only with the wire.
pub async fn submit_generation(
    client: &Client,
    request: GenerationRequest,
) -> Result<GenerateOutcome, ApiError> {
    let url = client.endpoint("/gerar");

    let builder = match request {
        GenerationRequest::TechnicalSheet(form) => {
            tracing::info!(url = %url, "submitting technical-sheet generation request");
            let mut multipart = reqwest::multipart::Form::new()
                .text("ficha_tecnica", form.sheet)
                .text("fonte", form.font)
                .text("cor_icones", form.icon_color)
                .text("cor_fonte", form.font_color)
                .text("cor_destaque", form.accent_color);
            if let Some(file) = form.product_image {
                multipart = multipart.part("produto", file_part(file)?);
            }
            if let Some(file) = form.template {
                multipart = multipart.part("template", file_part(file)?);
            }
            client.http().post(&url).multipart(multipart)
        }
        GenerationRequest::Prompt(body) => {
            tracing::info!(url = %url, count = body.image_count, "submitting prompt generation request");
            client.http().post(&url).json(&serde_json::json!({
                "prompt": body.prompt,
                "num_imagens": body.image_count,
                "aspect_ratio": body.aspect_ratio,
            }))
        }
    };

    let response = builder
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let body = read_structured_body(response).await?;
    let outcome = interpret_generate_body(&body);
    match &outcome {
        Ok(result) => tracing::info!(images = result.images.len(), "generation succeeded"),
        Err(err) => tracing::warn!(error = %err, "generation failed"),
    }
    outcome
}

/// Pure interpretation of a `/gerar` response body that already passed the
/// content-type gate.
fn interpret_generate_body(body: &str) -> Result<GenerateOutcome, ApiError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| ApiError::MalformedResponse(format!("invalid JSON: {}", e)))?;

    if parsed.success {
        Ok(GenerateOutcome {
            images: parsed.images,
            prompt: parsed.prompt,
        })
    } else {
        Err(ApiError::Application(parsed.error))
    }
}

fn file_part(file: UploadedFile) -> Result<reqwest::multipart::Part, ApiError> {
    reqwest::multipart::Part::bytes(file.bytes)
        .file_name(file.filename)
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Transport(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{PromptRequest, TechnicalSheetRequest};

    fn sheet_request(sheet: &str) -> GenerationRequest {
        GenerationRequest::TechnicalSheet(TechnicalSheetRequest {
            sheet: sheet.to_string(),
            font: "Roboto".to_string(),
            icon_color: "#FF6B35".to_string(),
            font_color: "#1A1A2E".to_string(),
            accent_color: "#F7B801".to_string(),
            product_image: None,
            template: None,
        })
    }

    fn prompt_request(prompt: &str, count: u8) -> GenerationRequest {
        GenerationRequest::Prompt(PromptRequest {
            prompt: prompt.to_string(),
            image_count: count,
            aspect_ratio: "1:1".to_string(),
        })
    }

    #[test]
    fn empty_sheet_fails_validation() {
        assert_eq!(
            validate(&sheet_request("   "), false),
            Err(ValidationError::EmptyInput)
        );
    }

    #[test]
    fn missing_product_image_fails_when_required() {
        let request = sheet_request("Wireless mouse, black, USB-C");
        assert_eq!(
            validate(&request, true),
            Err(ValidationError::MissingProductImage)
        );
        assert_eq!(validate(&request, false), Ok(()));
    }

    #[test]
    fn prompt_count_bounds_are_enforced() {
        assert_eq!(
            validate(&prompt_request("a desk lamp", 0), false),
            Err(ValidationError::ImageCountOutOfRange)
        );
        assert_eq!(
            validate(&prompt_request("a desk lamp", 5), false),
            Err(ValidationError::ImageCountOutOfRange)
        );
        assert_eq!(validate(&prompt_request("a desk lamp", 4), false), Ok(()));
    }

    #[test]
    fn interpret_success_body_yields_images_in_order() {
        let body = r#"{
            "sucesso": true,
            "imagens": [
                {"url": "/img/1.png", "filename": "1.png"},
                {"url": "/img/2.png", "filename": "2.png"},
                {"url": "/img/3.png", "filename": "3.png"}
            ]
        }"#;
        let outcome = interpret_generate_body(body).expect("success");
        let filenames: Vec<&str> = outcome
            .images
            .iter()
            .map(|img| img.filename.as_str())
            .collect();
        assert_eq!(filenames, ["1.png", "2.png", "3.png"]);
    }

    #[test]
    fn interpret_failure_body_carries_server_message() {
        let body = r#"{"sucesso": false, "erro": "Quota excedida"}"#;
        match interpret_generate_body(body) {
            Err(ApiError::Application(Some(msg))) => assert_eq!(msg, "Quota excedida"),
            other => panic!("expected Application error, got {:?}", other),
        }
    }

    #[test]
    fn interpret_failure_without_message_still_fails() {
        match interpret_generate_body(r#"{"sucesso": false}"#) {
            Err(ApiError::Application(None)) => {}
            other => panic!("expected Application error, got {:?}", other),
        }
    }

    #[test]
    fn interpret_non_json_body_is_malformed() {
        match interpret_generate_body("<html>Internal Error</html>") {
            Err(ApiError::MalformedResponse(msg)) => assert!(msg.contains("invalid JSON")),
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }
}
