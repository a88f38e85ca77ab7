//! Router error types

use thiserror::Error;

/// Navigation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// Redirects kept bouncing without reaching a route
    #[error("Navigation to '{path}' exceeded {hops} redirects")]
    RedirectLoop { path: String, hops: usize },
}
