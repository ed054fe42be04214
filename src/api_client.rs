//! Blocking HTTP client for the two remote APIs.

use crate::error::{Error, Result};
use std::time::Duration;

pub const BUILD_SHA: &str = env!("FLAVOURTOWN_GIT_SHA");

/// Bearer-authenticated JSON GET client bound to one API base URL.
pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issues one GET and parses the body as JSON.
    ///
    /// Network failures, timeouts and non-2xx statuses all surface as
    /// [`Error::Request`]; a body that is not JSON as [`Error::InvalidJson`].
    pub fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let mut request = self
            .agent
            .get(&url)
            .header("Authorization", &format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .header(
                "User-Agent",
                &format!(
                    "flavourtown-stats/{} ({})",
                    env!("CARGO_PKG_VERSION"),
                    BUILD_SHA
                ),
            );
        for (key, value) in query {
            request = request.query(*key, value);
        }

        let body = request
            .call()
            .map_err(|source| Error::Request {
                url: url.clone(),
                source,
            })?
            .body_mut()
            .read_to_string()
            .map_err(|source| Error::Request {
                url: url.clone(),
                source,
            })?;

        tracing::debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_str(&body).map_err(|source| Error::InvalidJson { url, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::CannedServer;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost/api/v1/", "k", Duration::from_secs(1));
        assert_eq!(client.url("/store"), "http://localhost/api/v1/store");
        assert_eq!(client.url("store"), "http://localhost/api/v1/store");
    }

    #[test]
    fn test_get_json_sends_bearer_and_query() {
        let server = CannedServer::respond(200, r#"{"ok": true}"#);
        let client = ApiClient::new(&server.base_url, "secret", Duration::from_secs(5));

        let value = client
            .get_json("/things", &[("start", "2025-12-15".to_string())])
            .unwrap();
        let head = server.request_head().to_lowercase();

        assert_eq!(value["ok"], serde_json::json!(true));
        assert!(head.starts_with("get /things?start=2025-12-15 "));
        assert!(head.contains("authorization: bearer secret"));
        assert!(head.contains("user-agent: flavourtown-stats/"));
    }

    #[test]
    fn test_get_json_http_error_is_remote() {
        let server = CannedServer::respond(401, r#"{"error": "unauthorized"}"#);
        let client = ApiClient::new(&server.base_url, "bad", Duration::from_secs(5));

        let err = client.get_json("/store", &[]).unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
        assert_eq!(err.kind(), ErrorKind::RemoteRequest);
    }

    #[test]
    fn test_get_json_rejects_non_json() {
        let server = CannedServer::respond(200, "<html>maintenance</html>");
        let client = ApiClient::new(&server.base_url, "k", Duration::from_secs(5));

        let err = client.get_json("/store", &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidJson { .. }));
    }

    #[test]
    fn test_get_json_times_out() {
        let server = CannedServer::silent(Duration::from_secs(3));
        let client = ApiClient::new(&server.base_url, "k", Duration::from_millis(300));

        let started = std::time::Instant::now();
        let err = client.get_json("/store", &[]).unwrap_err();
        assert!(matches!(err, Error::Request { .. }));
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
