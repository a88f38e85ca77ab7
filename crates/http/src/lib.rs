//! Timeline HTTP client
//!
//! [`ApiClient`] talks to the backend on behalf of the single-page app. It
//! reads the bearer token from the shared [`timeline_core::SessionContext`]
//! and signs the user out when the server answers `401 Unauthorized`.

pub mod client;

pub use client::error::ClientError;
pub use client::interceptor::{AuthInterceptor, SessionExpiredHandler};
pub use client::{ApiClient, ApiClientBuilder};

#[cfg(target_arch = "wasm32")]
pub use client::interceptor::HardRedirect;
