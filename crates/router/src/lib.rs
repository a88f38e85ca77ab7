//! Timeline routing: the static route table and the authentication guard
//!
//! The guard reads the session through a [`timeline_core::SessionContext`]
//! and never modifies it.

pub mod error;
pub mod guard;
pub mod router;
pub mod routes;

pub use error::NavigationError;
pub use guard::{NavigationDecision, NavigationGuard};
pub use router::{MAX_REDIRECTS, Navigation, Router};
pub use routes::{RouteDescriptor, RouteTable, RouteTarget, View};
