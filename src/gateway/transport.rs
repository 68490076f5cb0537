//! HTTP transport for the REST gateway.
//!
//! # Responsibilities
//! - Build request URLs from the configured base URL, one encoded segment
//!   per path component
//! - Perform exactly one HTTP request per call (no retries)
//! - Map non-2xx statuses and undecodable bodies to `GatewayError`
//! - Record request metrics

use std::time::{Duration, Instant};

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::gateway::types::{ApiConfig, GatewayError, GatewayResult};
use crate::observability::metrics;

/// Query parameters as owned key/value pairs.
pub type Query = Vec<(&'static str, String)>;

/// JSON-over-HTTP transport bound to one gateway base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
}

impl HttpTransport {
    /// Create a transport for the configured gateway.
    pub fn new(config: &ApiConfig) -> GatewayResult<Self> {
        let base: Url = config.base_url.parse().map_err(|e| {
            GatewayError::InvalidUrl(format!("'{}': {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, base })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Append `segments` to the base path.
    ///
    /// Each segment is percent-encoded on its own, so `/`, `?` and `#`
    /// inside a value cannot change the route. Empty, `.` and `..`
    /// segments are rejected.
    pub fn url(&self, segments: &[&str]) -> GatewayResult<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(GatewayError::InvalidUrl(format!("invalid path segment '{}'", bad)));
        }

        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidUrl(format!("'{}' cannot be used as a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET the path built from `segments` with query parameters and decode
    /// the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        segments: &[&str],
        query: &Query,
    ) -> GatewayResult<T> {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let request = self.client.get(url).query(query);
        self.execute("GET", endpoint, &path, request).await
    }

    /// POST a JSON body to the path built from `segments` and decode the
    /// JSON response.
    pub async fn post<B, T>(&self, endpoint: &'static str, segments: &[&str], body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        let request = self.client.post(url).json(body);
        self.execute("POST", endpoint, &path, request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        endpoint: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> GatewayResult<T> {
        let start = Instant::now();
        tracing::debug!(method, path = %path, "Gateway request");

        let resp = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                metrics::record_request(method, endpoint, 0, start);
                tracing::warn!(method, path = %path, error = %e, "Gateway unreachable");
                return Err(GatewayError::Http(e));
            }
        };

        let status = resp.status();
        metrics::record_request(method, endpoint, status.as_u16(), start);

        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(
                method,
                path = %path,
                status = status.as_u16(),
                "Gateway returned error status"
            );
            return Err(GatewayError::Status {
                status_code: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        let parsed = serde_json::from_str(&text)?;
        Ok(parsed)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_config(base_url: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: 5,
        }
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new(&api_config("https://api.elrond.com/")).unwrap();
        assert_eq!(transport.base_url(), "https://api.elrond.com");
        assert_eq!(
            transport.url(&["network", "config"]).unwrap().as_str(),
            "https://api.elrond.com/network/config"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let transport = HttpTransport::new(&api_config("https://gateway.example/elrond/")).unwrap();
        assert_eq!(
            transport.url(&["transaction", "send"]).unwrap().path(),
            "/elrond/transaction/send"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let transport = HttpTransport::new(&api_config("https://api.elrond.com")).unwrap();

        let url = transport.url(&["transaction", "abc?x=1"]).unwrap();
        assert_eq!(url.path(), "/transaction/abc%3Fx=1");
        assert_eq!(url.query(), None);

        let url = transport.url(&["accounts", "../accounts/x"]).unwrap();
        assert_eq!(url.path(), "/accounts/..%2Faccounts%2Fx");

        let url = transport.url(&["transaction", "a#b"]).unwrap();
        assert_eq!(url.path(), "/transaction/a%23b");
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_dot_and_empty_segments_rejected() {
        let transport = HttpTransport::new(&api_config("https://api.elrond.com")).unwrap();
        for segment in ["", ".", ".."] {
            let result = transport.url(&["accounts", segment]);
            assert!(matches!(result, Err(GatewayError::InvalidUrl(_))), "{:?}", segment);
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::new(&api_config("not a url"));
        assert!(matches!(result, Err(GatewayError::InvalidUrl(_))));

        let result = HttpTransport::new(&api_config("mailto:ops@example.com"));
        assert!(matches!(result, Err(GatewayError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to accept connections
        let transport = HttpTransport::new(&api_config("http://127.0.0.1:9")).unwrap();
        let result: GatewayResult<serde_json::Value> =
            transport.get("network_config", &["network", "config"], &Vec::new()).await;

        let err = result.unwrap_err();
        assert!(err.is_transport());
    }
}
