//! Timeline core: session storage, configuration and logging

#[cfg(target_arch = "wasm32")]
pub mod browser;
pub mod config;
pub mod error;
pub mod logging;
pub mod session;

pub use config::{AuthConfig, ClientConfig, StorageKeys};
pub use error::{CoreError, CoreResult, StorageError};
pub use session::{MemoryStore, SessionContext, SessionStore};

#[cfg(any(test, feature = "tests"))]
pub use session::MockSessionStore;
