//! Common error types shared across the timeline crates

/// Standard result type for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Failure while talking to the session store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store could not be reached at all (no window, storage disabled, ...)
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// The store rejected an operation on a specific key
    #[error("Session storage operation on '{key}' failed: {message}")]
    Operation { key: String, message: String },
}

impl StorageError {
    /// Create an operation error for a key
    pub fn operation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Operation {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// Core error types that can be shared across crates
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl CoreError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        Self::invalid_config(err.to_string())
    }
}
