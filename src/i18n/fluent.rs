// SPDX-License-Identifier: MPL-2.0
use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::path::Path;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

const FALLBACK_LOCALE: &str = "en-US";

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None, &Config::default())
    }
}

impl I18n {
    /// Builds the bundle set from embedded `.ftl` files, or from an
    /// override directory for custom builds, and resolves the active
    /// locale from CLI flag, config, and OS locale, in that order.
    pub fn new(cli_lang: Option<String>, i18n_dir: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        let sources = match i18n_dir.as_deref() {
            Some(dir) => load_dir_sources(Path::new(dir)),
            None => load_embedded_sources(),
        };

        for (locale, content) in sources {
            match FluentResource::try_new(content) {
                Ok(resource) => {
                    let mut bundle = FluentBundle::new(vec![locale.clone()]);
                    if bundle.add_resource(resource).is_ok() {
                        bundles.insert(locale.clone(), bundle);
                        available_locales.push(locale);
                    }
                }
                Err((_, errors)) => {
                    tracing::warn!(locale = %locale, ?errors, "failed to parse FTL resource");
                }
            }
        }

        available_locales.sort_by_key(|locale| locale.to_string());

        let default_locale: LanguageIdentifier = FALLBACK_LOCALE
            .parse()
            .expect("fallback locale is a valid identifier");
        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    /// Translates a message key in the current locale.
    pub fn tr(&self, key: &str) -> String {
        self.format(key, None)
    }

    /// Translates a message key with Fluent arguments.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args {
            fluent_args.set(*name, FluentValue::from(*value));
        }
        self.format(key, Some(&fluent_args))
    }

    fn format(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(message) = bundle.get_message(key) {
                if let Some(pattern) = message.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn load_embedded_sources() -> Vec<(LanguageIdentifier, String)> {
    let mut sources = Vec::new();
    for file in Asset::iter() {
        let filename = file.as_ref();
        if let Some(locale_str) = filename.strip_suffix(".ftl") {
            if let Ok(locale) = locale_str.parse::<LanguageIdentifier>() {
                if let Some(content) = Asset::get(filename) {
                    sources.push((
                        locale,
                        String::from_utf8_lossy(content.data.as_ref()).to_string(),
                    ));
                }
            }
        }
    }
    sources
}

fn load_dir_sources(dir: &Path) -> Vec<(LanguageIdentifier, String)> {
    let mut sources = Vec::new();
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "custom i18n directory is not readable");
        return sources;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if path.extension().and_then(|e| e.to_str()) != Some("ftl") {
            continue;
        }
        if let Ok(locale) = stem.parse::<LanguageIdentifier>() {
            if let Ok(content) = std::fs::read_to_string(&path) {
                sources.push((locale, content));
            }
        }
    }
    sources
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. CLI flag
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Config file
    if let Some(lang_str) = &config.general.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneralConfig;

    fn available() -> Vec<LanguageIdentifier> {
        vec!["en-US".parse().unwrap(), "pt-BR".parse().unwrap()]
    }

    #[test]
    fn cli_flag_beats_config() {
        let config = Config {
            general: GeneralConfig {
                language: Some("en-US".to_string()),
                ..GeneralConfig::default()
            },
            ..Config::default()
        };
        let lang = resolve_locale(Some("pt-BR".to_string()), &config, &available());
        assert_eq!(lang, Some("pt-BR".parse().unwrap()));
    }

    #[test]
    fn config_is_used_without_cli_flag() {
        let config = Config {
            general: GeneralConfig {
                language: Some("pt-BR".to_string()),
                ..GeneralConfig::default()
            },
            ..Config::default()
        };
        let lang = resolve_locale(None, &config, &available());
        assert_eq!(lang, Some("pt-BR".parse().unwrap()));
    }

    #[test]
    fn unknown_locale_falls_through() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                ..GeneralConfig::default()
            },
            ..Config::default()
        };
        // "fr" is not shipped; resolution falls through to the OS locale or
        // the caller's en-US fallback.
        let lang = resolve_locale(None, &config, &available());
        if let Some(l) = lang {
            assert!(available().contains(&l));
        }
    }

    #[test]
    fn embedded_bundles_translate_known_key() {
        let i18n = I18n::default();
        let title = i18n.tr("app-title");
        assert!(!title.starts_with("MISSING:"), "got: {}", title);
    }

    #[test]
    fn missing_key_is_marked() {
        let i18n = I18n::default();
        assert_eq!(
            i18n.tr("definitely-not-a-key"),
            "MISSING: definitely-not-a-key"
        );
    }

    #[test]
    fn set_locale_ignores_unknown() {
        let mut i18n = I18n::default();
        let before = i18n.current_locale().clone();
        i18n.set_locale("zz-ZZ".parse().unwrap());
        assert_eq!(i18n.current_locale(), &before);
    }
}
