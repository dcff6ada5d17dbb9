// SPDX-License-Identifier: MPL-2.0
//! `iced_easel` is a desktop client for a marketplace product-image
//! generation service, built with the Iced GUI framework.
//!
//! It submits generation requests (a technical sheet or a free-form
//! prompt) to the service, renders the returned images as downloadable
//! cards, browses the server-side gallery, and demonstrates
//! internationalization with Fluent and user preference management.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
