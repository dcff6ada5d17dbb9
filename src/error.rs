// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Api(ApiError),
}

/// Failures of the generation and gallery requests.
///
/// The four variants keep the distinct user-facing paths apart: preflight
/// validation blocks the request before any network traffic, transport
/// failures never carry a server message, malformed responses point at a
/// misconfigured server, and application failures carry the message the
/// server itself reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request rejected client-side before dispatch.
    Validation(ValidationError),

    /// Network failure or a non-success HTTP status without a structured body.
    Transport(String),

    /// Response arrived but is not the expected JSON structure.
    MalformedResponse(String),

    /// Server answered with a structured failure flag.
    /// Carries the server-supplied message when one was present.
    Application(Option<String>),
}

/// Preflight validation failures. These never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The technical sheet or prompt text is empty.
    EmptyInput,

    /// The active request shape requires a product image and none was chosen.
    MissingProductImage,

    /// Requested image count is outside the service's 1-4 bound.
    ImageCountOutOfRange,
}

impl ValidationError {
    /// Returns the i18n message key for this validation failure.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "error-validation-empty-input",
            ValidationError::MissingProductImage => "error-validation-missing-product-image",
            ValidationError::ImageCountOutOfRange => "error-validation-image-count",
        }
    }
}

impl ApiError {
    /// Returns the i18n key for the heading shown above the failure detail.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => e.i18n_key(),
            ApiError::Transport(_) => "error-transport",
            ApiError::MalformedResponse(_) => "error-malformed-response",
            ApiError::Application(_) => "error-application",
        }
    }

    /// Detail text to show beneath the heading, if the error carries one.
    ///
    /// Application errors surface the server message verbatim; the caller
    /// falls back to a localized generic message when this returns `None`.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation(_) => None,
            ApiError::Transport(msg) | ApiError::MalformedResponse(msg) => Some(msg.as_str()),
            ApiError::Application(msg) => msg.as_deref(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyInput => write!(f, "required text field is empty"),
            ValidationError::MissingProductImage => write!(f, "product image is required"),
            ValidationError::ImageCountOutOfRange => {
                write!(f, "image count must be between 1 and 4")
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            ApiError::Application(Some(msg)) => write!(f, "Server error: {}", msg),
            ApiError::Application(None) => write!(f, "Server error"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Api(e) => write!(f, "{}", e),
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn application_error_detail_is_server_message() {
        let err = ApiError::Application(Some("Prompt vazio".to_string()));
        assert_eq!(err.detail(), Some("Prompt vazio"));
    }

    #[test]
    fn application_error_without_message_has_no_detail() {
        let err = ApiError::Application(None);
        assert_eq!(err.detail(), None);
        assert_eq!(err.i18n_key(), "error-application");
    }

    #[test]
    fn malformed_response_is_distinct_from_application() {
        let malformed = ApiError::MalformedResponse("text/html".to_string());
        let application = ApiError::Application(Some("text/html".to_string()));
        assert_ne!(malformed, application);
        assert_ne!(malformed.i18n_key(), application.i18n_key());
    }

    #[test]
    fn validation_keys_are_stable() {
        assert_eq!(
            ValidationError::EmptyInput.i18n_key(),
            "error-validation-empty-input"
        );
        assert_eq!(
            ValidationError::MissingProductImage.i18n_key(),
            "error-validation-missing-product-image"
        );
    }
}
