use thiserror::Error;

/// Top-level error type for the `loandesk-api` crate.
///
/// Separates failures where the server never answered (`Network`) from
/// failures where it answered with an error status (`Transport`).
/// `loandesk-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Network ─────────────────────────────────────────────────────
    /// The request never completed (DNS failure, refused connection,
    /// reset, timeout, truncated body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing or joining failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A path segment (usually a record id) cannot be addressed.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Transport ───────────────────────────────────────────────────
    /// The server answered with a non-2xx status. `message` is the
    /// server-supplied `message` field, when the body carried one.
    #[error(
        "Request failed with status code {status}{}",
        .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Transport {
        status: u16,
        message: Option<String>,
        body: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The message the server put in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Transport { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// HTTP status of the failed response, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the request never reached or never heard back from the server.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if retrying might succeed. Nothing in this crate
    /// retries on its own; callers decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Transport { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}
