// SPDX-License-Identifier: MPL-2.0
use iced_easel::api::models::{
    decode_data_url, humanize_tipo, GalleryResponse, GenerateResponse,
};
use iced_easel::config::{self, CaptionSource, Config, GeneralConfig, RequestShape};
use iced_easel::i18n::fluent::I18n;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let initial_config = Config {
        general: GeneralConfig {
            language: Some("en-US".to_string()),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&initial_config, &config_path)
        .expect("Failed to write initial config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to pt-BR
    let brazilian_config = Config {
        general: GeneralConfig {
            language: Some("pt-BR".to_string()),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&brazilian_config, &config_path)
        .expect("Failed to write pt-BR config file");

    let loaded = config::load_from_path(&config_path).expect("Failed to load pt-BR config");
    let i18n_pt = I18n::new(None, None, &loaded);
    assert_eq!(i18n_pt.current_locale().to_string(), "pt-BR");
}

#[test]
fn test_cli_language_overrides_config() {
    let config = Config {
        general: GeneralConfig {
            language: Some("pt-BR".to_string()),
            ..GeneralConfig::default()
        },
        ..Config::default()
    };
    let i18n = I18n::new(Some("en-US".to_string()), None, &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn test_both_locales_cover_the_same_keys() {
    let mut en = I18n::new(Some("en-US".to_string()), None, &Config::default());
    en.set_locale("en-US".parse().unwrap());
    let mut pt = I18n::new(Some("pt-BR".to_string()), None, &Config::default());
    pt.set_locale("pt-BR".parse().unwrap());

    for key in [
        "app-title",
        "form-submit",
        "form-generating",
        "results-generating",
        "gallery-empty",
        "modal-download",
        "error-malformed-response",
        "settings-title",
        "notification-download-saved",
    ] {
        assert!(
            !en.tr(key).starts_with("MISSING:"),
            "en-US is missing `{key}`"
        );
        assert!(
            !pt.tr(key).starts_with("MISSING:"),
            "pt-BR is missing `{key}`"
        );
    }
}

#[test]
fn test_generation_config_round_trip() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let config_path = dir.path().join("settings.toml");

    let config = Config {
        generation: config::GenerationConfig {
            request_shape: RequestShape::Prompt,
            caption_source: CaptionSource::Prompt,
            require_product_image: true,
            image_count: Some(4),
            aspect_ratio: Some("9:16".to_string()),
        },
        ..Config::default()
    };
    config::save_to_path(&config, &config_path).expect("Failed to save");
    let loaded = config::load_from_path(&config_path).expect("Failed to load");

    assert_eq!(loaded.generation.request_shape, RequestShape::Prompt);
    assert_eq!(loaded.generation.caption_source, CaptionSource::Prompt);
    assert!(loaded.generation.require_product_image);
    assert_eq!(loaded.generation.image_count(), 4);
    assert_eq!(loaded.generation.aspect_ratio(), "9:16");
}

#[test]
fn test_generate_response_example_payload() {
    // The documented service example: one product shot with inline preview.
    let body = r#"{
        "sucesso": true,
        "imagens": [{
            "base64": "data:image/png;base64,aVZCT1J3MEtHZ28=",
            "url": "/img/1.png",
            "filename": "1.png",
            "tipo": "product_shot",
            "descricao": "Front view"
        }],
        "prompt": "Wireless mouse, black, USB-C"
    }"#;

    let parsed: GenerateResponse = serde_json::from_str(body).expect("parses");
    assert!(parsed.success);
    assert_eq!(parsed.images.len(), 1);

    let image = &parsed.images[0];
    assert_eq!(humanize_tipo(image.tipo.as_deref().unwrap()), "product shot");
    assert_eq!(image.url, "/img/1.png");
    assert!(decode_data_url(image.inline.as_deref().unwrap()).is_some());
}

#[test]
fn test_gallery_response_with_and_without_entries() {
    let empty: GalleryResponse =
        serde_json::from_str(r#"{"sucesso": true, "imagens": []}"#).expect("parses");
    assert!(empty.success);
    assert!(empty.images.is_empty());

    let listing: GalleryResponse = serde_json::from_str(
        r#"{"sucesso": true,
            "imagens": [{"url": "/g/a.png", "filename": "a.png", "timestamp": 1.0}]}"#,
    )
    .expect("parses");
    assert_eq!(listing.images.len(), 1);
    assert_eq!(listing.images[0].filename, "a.png");
}
