// ── Core error types ──
//
// The taxonomy views deal with: the request never got an answer
// (`Network`), the server answered with an error status (`Api`), or a
// client-side check failed before anything was sent (`Validation`).
// The `From<loandesk_api::Error>` impl translates transport-layer errors.

use thiserror::Error;

/// Message recorded when a failure carries no usable text at all.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Request errors ───────────────────────────────────────────────
    /// The request could not be completed (DNS, refused, reset, timeout).
    #[error("Cannot reach the API: {message}")]
    Network { message: String },

    /// The server responded with an error status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        /// Generic description of the failure.
        message: String,
        /// The `message` field of the server's error body, when present.
        server_message: Option<String>,
    },

    /// The server answered 2xx with a body we could not interpret.
    #[error("Unexpected response from API: {message}")]
    UnexpectedResponse { message: String },

    // ── Client-side errors ───────────────────────────────────────────
    /// A form check failed; no request was issued.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    /// The operation's scope was cancelled before it settled.
    #[error("Operation cancelled")]
    Cancelled,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The server-supplied message, if the failure carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { server_message, .. } => server_message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Api { status: 404, .. })
    }

    /// The text recorded as `last_error`: the server's message if present,
    /// else the failure's own message, else [`FALLBACK_ERROR_MESSAGE`].
    pub fn request_message(&self) -> String {
        if let Some(msg) = self.server_message() {
            return msg.to_owned();
        }
        let generic = match self {
            Self::Api { message, .. }
            | Self::Network { message }
            | Self::UnexpectedResponse { message } => message.clone(),
            other => other.to_string(),
        };
        if generic.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_owned()
        } else {
            generic
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<loandesk_api::Error> for CoreError {
    fn from(err: loandesk_api::Error) -> Self {
        match err {
            loandesk_api::Error::Network(ref e) => CoreError::Network {
                message: e.to_string(),
            },
            loandesk_api::Error::Transport {
                status,
                ref message,
                body: _,
            } => CoreError::Api {
                status,
                server_message: message.clone().filter(|m| !m.is_empty()),
                message: err.to_string(),
            },
            loandesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::UnexpectedResponse { message }
            }
            loandesk_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            loandesk_api::Error::ClientBuild(message) => CoreError::Config { message },
            loandesk_api::Error::InvalidPath(message) => CoreError::Validation {
                field: "id".into(),
                message,
            },
        }
    }
}
