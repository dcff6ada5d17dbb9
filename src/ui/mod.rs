// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based
//! architecture with the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`form`] + [`results`] - The studio: generation form and result cards
//! - [`gallery`] - Grid of previously generated images
//! - [`settings`] - Application preferences and server connection
//! - [`about`] - Application version and credits
//!
//! # Shared Infrastructure
//!
//! - [`color_field`] - Paired swatch + hex field with uppercase sync
//! - [`upload`] - Product image upload with drag-drop preview
//! - [`modal`] - Process-wide modal image viewer
//! - [`navbar`] - Navigation bar with tabs and overflow menu
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom Iced widgets (animated spinner)
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod about;
pub mod color_field;
pub mod design_tokens;
pub mod form;
pub mod gallery;
pub mod modal;
pub mod navbar;
pub mod notifications;
pub mod results;
pub mod settings;
pub mod styles;
pub mod theming;
pub mod upload;
pub mod widgets;
