//! HTTP client for city service requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the city service and decoding the JSON bodies it returns.

use super::error::CitiesError;
use log::*;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Makes requests to the city service and tries to conform response data to
/// the requested type.
///
pub struct Client {
    base_url: Url,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and request timeout.
    ///
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CitiesError> {
        let parsed = Url::parse(base_url).map_err(|e| CitiesError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CitiesError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if parsed.cannot_be_a_base() {
            return Err(CitiesError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Client {
            base_url: parsed,
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// Returns the URL for the given path segments below the base URL. Each
    /// segment is percent-encoded, `/` and `?` included.
    ///
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make request and decode the response body into `T`.
    ///
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> Result<T, CitiesError> {
        let response = self.call(method, segments, body).await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // The status code is not part of the contract, only the body is
        if !status.is_success() {
            warn!("City service answered {} for '{}'", status, segments.join("/"));
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            error!(
                "Failed to deserialize city service response: {}. Response body: {}",
                e,
                String::from_utf8_lossy(&bytes)
            );
            CitiesError::Deserialization(e)
        })
    }

    /// Make request with optional JSON body and return the raw response.
    ///
    pub async fn call(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&serde_json::Value>,
    ) -> Result<Response, CitiesError> {
        let request_url = self.endpoint(segments);
        debug!("{} {}", method, request_url);

        let mut request = self.http_client.request(method, request_url);
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::MockServer;
    use serde_json::json;

    #[test]
    fn new_rejects_relative_url() {
        let result = Client::new("localhost:8000/api", Duration::from_secs(1));
        assert!(matches!(result, Err(CitiesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn new_rejects_non_http_scheme() {
        let result = Client::new("ftp://localhost", Duration::from_secs(1));
        assert!(matches!(result, Err(CitiesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn endpoint_joins_below_base_path() {
        let client = Client::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(&["cities"]).as_str(),
            "http://localhost:8000/cities"
        );

        let client = Client::new("http://localhost:8000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.endpoint(&["cities", "7"]).as_str(),
            "http://localhost:8000/api/cities/7"
        );
        assert_eq!(
            client.endpoint(&["cities", ""]).as_str(),
            "http://localhost:8000/api/cities/"
        );
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = Client::new("http://localhost:8000", Duration::from_secs(1)).unwrap();
        let url = client.endpoint(&["cities", "a/b?x#y"]);
        assert_eq!(url.as_str(), "http://localhost:8000/cities/a%2Fb%3Fx%23y");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn fetch_decodes_body_regardless_of_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/things");
                then.status(500).json_body(json!([1, 2, 3]));
            })
            .await;

        let client = Client::new(&server.base_url(), Duration::from_secs(5)).unwrap();
        let data: Vec<u32> = client.fetch(Method::GET, &["things"], None).await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_fails_on_undecodable_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/things");
                then.status(200).body("<html>nope</html>");
            })
            .await;

        let client = Client::new(&server.base_url(), Duration::from_secs(5)).unwrap();
        let result = client.fetch::<Vec<u32>>(Method::GET, &["things"], None).await;
        assert!(matches!(result, Err(CitiesError::Deserialization(_))));
    }
}
