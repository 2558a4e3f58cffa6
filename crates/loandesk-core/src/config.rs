// ── Runtime client configuration ──
//
// Describes *where* the API lives. Built once at startup by the front end
// (from `loandesk-config`) and handed to the `Coordinator`; core never
// reads config files or the environment.

use std::time::Duration;

use url::Url;

/// Configuration for talking to one API deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, e.g. `http://localhost:5000/api`.
    pub base_url: Url,
    /// Request timeout. `None` keeps the HTTP stack default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
        }
    }
}
