//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use loandesk_config::ConfigError;
use loandesk_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PERMISSION: i32 = 5;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the loan-servicing API: {message}")]
    #[diagnostic(
        code(loandesk::connection_failed),
        help(
            "Check that the API is running and reachable.\n\
             Override the URL with --api-url or LOANDESK_API_URL,\n\
             or pick a deployment with: loandesk config set-env development"
        )
    )]
    ConnectionFailed { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(code(loandesk::api_error), help("The server answered HTTP {status}."))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from the API: {message}")]
    #[diagnostic(
        code(loandesk::unexpected_response),
        help("The API URL may point at something other than the loan-servicing API.")
    )]
    UnexpectedResponse { message: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(loandesk::not_found), help("{hint}"))]
    NotFound {
        resource_type: String,
        identifier: String,
        hint: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(loandesk::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(loandesk::config),
        help("Inspect the configuration with: loandesk config show")
    )]
    Config(#[from] ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(loandesk::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    #[error("Operation cancelled")]
    #[diagnostic(code(loandesk::cancelled))]
    Cancelled,

    // ── Internal ─────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    #[diagnostic(code(loandesk::internal))]
    Internal(String),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(loandesk::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),

    #[error("Could not render YAML output: {0}")]
    #[diagnostic(code(loandesk::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::ApiError { status, .. } => match status {
                401 => exit_code::AUTH,
                403 => exit_code::PERMISSION,
                404 => exit_code::NOT_FOUND,
                409 => exit_code::CONFLICT,
                _ => exit_code::GENERAL,
            },
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Cancelled => exit_code::INTERRUPTED,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { message } => CliError::ConnectionFailed { message },

            // `last_error` text: the server's message when it sent one.
            ref api @ CoreError::Api { status, .. } => CliError::ApiError {
                status,
                message: api.request_message(),
            },

            CoreError::UnexpectedResponse { message } => {
                CliError::UnexpectedResponse { message }
            }

            CoreError::Validation { field, message } => CliError::Validation {
                field,
                reason: message,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                let hint = if entity_type.eq_ignore_ascii_case("caller") {
                    "No customer profile matches this phone number.".to_owned()
                } else {
                    format!(
                        "Run: loandesk {}s list to see available records",
                        entity_type.to_lowercase()
                    )
                };
                CliError::NotFound {
                    resource_type: entity_type,
                    identifier,
                    hint,
                }
            }

            CoreError::Cancelled => CliError::Cancelled,

            CoreError::Config { message } => CliError::Config(ConfigError::Validation {
                field: "api_url".into(),
                reason: message,
            }),

            CoreError::Internal(message) => CliError::Internal(message),
        }
    }
}
