//! Client error types

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network, request setup or body decoding error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Server answered 401; the session has been cleared
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(error) => error.status().map(|status| status.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) => None,
        }
    }

    /// Whether the server rejected the credentials
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::AuthenticationFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn status_codes_map_to_variants() {
        let error = ClientError::from_status(StatusCode::UNAUTHORIZED, "expired".into());
        assert!(error.is_unauthorized());
        assert_eq!(error.status(), Some(401));

        let error = ClientError::from_status(StatusCode::FORBIDDEN, "no".into());
        assert!(matches!(error, ClientError::Forbidden(_)));
        assert!(!error.is_unauthorized());

        let error = ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into());
        assert_eq!(error.status(), Some(502));
        assert_eq!(error.to_string(), "Server error 502: upstream");
    }

    #[test]
    fn configuration_errors_have_no_status() {
        let error = ClientError::Configuration("base_url is required".into());
        assert_eq!(error.status(), None);
        assert!(!error.is_unauthorized());
    }
}
