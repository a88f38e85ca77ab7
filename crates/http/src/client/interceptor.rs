//! Bearer token injection and 401 handling
//!
//! Every request sent through [`ApiClient`](super::ApiClient) passes
//! [`AuthInterceptor::on_request`] right before it goes out and
//! [`AuthInterceptor::on_response`] right after the server answers.

use super::error::ClientError;
use reqwest::header::{self, HeaderValue};
use reqwest::{Request, Response};
use std::fmt;
use std::sync::Arc;
use timeline_core::SessionContext;

/// Called after a 401 has cleared the session
pub trait SessionExpiredHandler: Send + Sync {
    fn session_expired(&self);
}

impl<F> SessionExpiredHandler for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self();
    }
}

/// Full page load to the login path, dropping all in-app state
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct HardRedirect {
    path: String,
}

#[cfg(target_arch = "wasm32")]
impl HardRedirect {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionExpiredHandler for HardRedirect {
    fn session_expired(&self) {
        timeline_core::browser::hard_redirect(&self.path);
    }
}

/// Attaches the session token and reacts to rejected credentials
#[derive(Clone)]
pub struct AuthInterceptor {
    session: SessionContext,
    on_expired: Option<Arc<dyn SessionExpiredHandler>>,
}

impl AuthInterceptor {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            on_expired: None,
        }
    }

    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn SessionExpiredHandler>) -> Self {
        self.on_expired = Some(handler);
        self
    }

    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Set `Authorization: Bearer <token>` when a token is stored, replacing
    /// any authorization header already on the request. Missing or unreadable
    /// tokens leave the request untouched.
    pub fn on_request(&self, mut request: Request) -> Request {
        let token = match self.session.access_token() {
            Ok(Some(token)) => token,
            Ok(None) => return request,
            Err(error) => {
                tracing::warn!(%error, "Could not read access token, sending request unauthenticated");
                return request;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(header::AUTHORIZATION, value);
            }
            Err(error) => {
                tracing::warn!(%error, "Stored access token is not a valid header value");
            }
        }
        request
    }

    /// Pass successes through; on a 401 clear the session and notify the
    /// handler. The error always reaches the caller unchanged.
    pub fn on_response(
        &self,
        result: Result<Response, ClientError>,
    ) -> Result<Response, ClientError> {
        result.map_err(|error| self.on_error(error))
    }

    /// Side effects for a failed request, returning the same error
    pub fn on_error(&self, error: ClientError) -> ClientError {
        if error.is_unauthorized() {
            self.session_expired();
        } else {
            tracing::debug!(status = error.status(), %error, "Request failed");
        }
        error
    }

    fn session_expired(&self) {
        tracing::info!("Server rejected credentials, clearing session");

        if let Err(error) = self.session.clear() {
            tracing::error!(%error, "Failed to clear session after 401");
        }

        match &self.on_expired {
            Some(handler) => handler.session_expired(),
            None => tracing::warn!("Session expired with no handler installed"),
        }
    }
}

impl fmt::Debug for AuthInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthInterceptor")
            .field("session", &self.session)
            .field("has_handler", &self.on_expired.is_some())
            .finish()
    }
}
