// HTTP client for the loan-servicing REST API.
//
// Wraps `reqwest::Client` with base-URL joining, JSON bodies, and error
// extraction. Endpoint groups (customers, loans, dashboard, calls) are
// implemented as inherent methods in sibling modules to keep this file
// focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client bound to one API base URL (e.g. `http://localhost:5000/api`).
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
/// Performs no retries and no caching. Every method maps to exactly one
/// HTTP request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` from a transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base path ends with `/` so relative joins stay under it.
    ///
    /// `http://host/api` + `customers` must yield `http://host/api/customers`,
    /// not `http://host/customers`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The normalized base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["customers", "7"]`) to the base URL.
    ///
    /// Each segment is percent-encoded, so a record id can never add
    /// segments, a query, or a fragment. A trailing `""` keeps a trailing
    /// slash.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(Error::InvalidPath(format!(
                "'{bad}' is not a valid path segment"
            )));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// DELETE ignores any response body on success.
    pub(crate) async fn delete(&self, path: &[&str]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|err| err.message);

        debug!(status = status.as_u16(), ?message, "request failed");

        Error::Transport {
            status: status.as_u16(),
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::from_reqwest(base, reqwest::Client::new()).expect("valid base url")
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        assert_eq!(
            client("http://localhost:5000/api").base_url().as_str(),
            "http://localhost:5000/api/"
        );
        assert_eq!(
            client("http://localhost:5000/api///").base_url().as_str(),
            "http://localhost:5000/api/"
        );
    }

    #[test]
    fn paths_join_under_api_prefix() {
        let c = client("https://crm.example.com/api");
        let url = c.url(&["customers", "7", "interactions"]).expect("join");
        assert_eq!(url.as_str(), "https://crm.example.com/api/customers/7/interactions");

        let url = c.url(&["post_call_outcomes", ""]).expect("join");
        assert_eq!(url.as_str(), "https://crm.example.com/api/post_call_outcomes/");
    }

    #[test]
    fn id_segments_are_encoded() {
        let c = client("https://crm.example.com/api");
        let url = c.url(&["customers", "a/b?c#d"]).expect("join");
        assert_eq!(url.path(), "/api/customers/a%2Fb%3Fc%23d");
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());
    }

    #[test]
    fn dot_segments_are_rejected() {
        let c = client("https://crm.example.com/api");
        for id in [".", ".."] {
            let err = c.url(&["customers", id]).expect_err("dot segment");
            assert!(matches!(err, Error::InvalidPath(_)), "{id}: {err:?}");
        }
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ApiClient::from_reqwest("not a url", reqwest::Client::new())
            .expect_err("base url should be rejected");
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
