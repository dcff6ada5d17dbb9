// SPDX-License-Identifier: MPL-2.0
//! Internationalization support via Fluent.
//!
//! Translations live in `assets/i18n/*.ftl`, one file per locale, embedded
//! into the binary at compile time. Locale resolution order: CLI flag,
//! config file, OS locale, then `en-US`.

pub mod fluent;

pub use fluent::I18n;
