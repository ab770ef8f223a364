use thiserror::Error;

/// Failures talking to the issue tracker API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never got a response (connect error, timeout, ...)
    #[error("request to {endpoint} failed: {source}")]
    Network {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    #[error("not logged in ({endpoint} returned HTTP {status})")]
    Unauthorized { endpoint: String, status: u16 },

    #[error("unexpected response body from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    pub fn endpoint(&self) -> &str {
        match self {
            Self::Network { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Unauthorized { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    /// Map a non-success HTTP status to the matching variant.
    pub fn from_status(endpoint: impl Into<String>, status: u16) -> Self {
        let endpoint = endpoint.into();
        match status {
            401 | 403 => Self::Unauthorized { endpoint, status },
            _ => Self::Status { endpoint, status },
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_auth() {
        assert!(ApiError::from_status("/api/issues", 401).is_auth());
        assert!(ApiError::from_status("/api/issues", 403).is_auth());
        assert!(!ApiError::from_status("/api/issues", 500).is_auth());
    }

    #[test]
    fn test_display_names_endpoint() {
        let err = ApiError::from_status("/api/labels", 404);
        assert_eq!(err.to_string(), "/api/labels returned HTTP 404");
        assert_eq!(err.endpoint(), "/api/labels");
    }
}
