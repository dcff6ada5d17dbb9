// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Default generation server, matching the service's local development port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default request timeout. Generation can take a while server-side, so
/// this is deliberately generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

// ==========================================================================
// Generation Defaults
// ==========================================================================

/// Default number of images per prompt-shape request.
pub const DEFAULT_IMAGE_COUNT: u8 = 1;

/// Upper bound on images per request, mirroring the server's own limit.
pub const MAX_IMAGE_COUNT: u8 = 4;

/// Default aspect ratio for the prompt request shape.
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";

/// Delay between a successful generation and the follow-up gallery refresh,
/// giving the server time to finish writing the stored copies.
pub const GALLERY_REFRESH_DELAY_MS: u64 = 1200;
