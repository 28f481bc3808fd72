//! Remote city service error types.

/// Errors that can occur while talking to the city service.
///
/// Status codes are never inspected, so every failure is either a transport
/// problem or a body that does not decode into the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum CitiesError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Failed to deserialize a response body
    #[error("Failed to deserialize city service response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Base address is not an absolute http(s) URL
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cities_error_display() {
        let error = CitiesError::InvalidBaseUrl {
            url: "ftp://example.com".to_string(),
            reason: "unsupported scheme".to_string(),
        };
        assert!(error.to_string().contains("Invalid base URL"));
        assert!(error.to_string().contains("ftp://example.com"));
        assert!(error.to_string().contains("unsupported scheme"));
    }

    #[test]
    fn test_cities_error_from_serde() {
        let serde_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: CitiesError = serde_error.into();
        assert!(matches!(error, CitiesError::Deserialization(_)));
        assert!(error.to_string().contains("Failed to deserialize"));
    }
}
