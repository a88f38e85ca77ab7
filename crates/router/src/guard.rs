//! Authentication guard run before every navigation

use crate::routes::RouteDescriptor;
use serde::Serialize;
use timeline_core::{AuthConfig, SessionContext};

/// Outcome of the guard for one navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NavigationDecision {
    /// Continue to the requested route unchanged
    Proceed,
    /// Abort and navigate to this path instead
    Redirect(String),
}

/// Keeps signed-out users away from protected routes
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: SessionContext,
    login_path: String,
}

impl NavigationGuard {
    pub fn new(session: SessionContext) -> Self {
        Self::with_login_path(session, AuthConfig::LOGIN_PATH)
    }

    pub fn with_login_path(session: SessionContext, login_path: impl Into<String>) -> Self {
        Self {
            session,
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Decide whether navigating to `to` may go ahead.
    ///
    /// Only reads the session; an unreadable store counts as signed out.
    pub fn decide(
        &self,
        to: &RouteDescriptor,
        from: Option<&RouteDescriptor>,
    ) -> NavigationDecision {
        if to.requires_auth() && !self.session.is_authenticated() {
            tracing::debug!(
                to = to.path,
                from = from.map(|route| route.path),
                redirect = %self.login_path,
                "Protected route without session"
            );
            return NavigationDecision::Redirect(self.login_path.clone());
        }
        NavigationDecision::Proceed
    }

    /// Hook form of [`decide`](Self::decide): `next` receives the decision exactly once.
    pub fn before_each<F>(&self, to: &RouteDescriptor, from: Option<&RouteDescriptor>, next: F)
    where
        F: FnOnce(NavigationDecision),
    {
        next(self.decide(to, from));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{RouteTable, View};
    use timeline_core::{MockSessionStore, StorageError};

    fn protected() -> RouteDescriptor {
        *RouteTable::standard().resolve("/timeline").unwrap()
    }

    fn public() -> RouteDescriptor {
        *RouteTable::standard().resolve("/auth").unwrap()
    }

    #[test]
    fn protected_route_without_token_redirects_to_login() {
        let guard = NavigationGuard::new(SessionContext::in_memory());
        assert_eq!(
            guard.decide(&protected(), None),
            NavigationDecision::Redirect("/auth".into())
        );
    }

    #[test]
    fn protected_route_with_token_proceeds() {
        let session = SessionContext::in_memory();
        session.set_access_token("abc123").unwrap();
        let guard = NavigationGuard::new(session);
        assert_eq!(
            guard.decide(&protected(), Some(&public())),
            NavigationDecision::Proceed
        );
    }

    #[test]
    fn public_route_always_proceeds() {
        let guard = NavigationGuard::new(SessionContext::in_memory());
        assert_eq!(guard.decide(&public(), None), NavigationDecision::Proceed);
    }

    #[test]
    fn every_protected_route_is_gated() {
        let table = RouteTable::new(vec![
            RouteDescriptor::view("/timeline", "LiteratureTimeline", View::LiteratureTimeline, true),
            RouteDescriptor::view("/timeline/saved", "Saved", View::LiteratureTimeline, true),
        ]);
        let session = SessionContext::in_memory();
        let guard = NavigationGuard::new(session.clone());

        for route in table.iter() {
            assert_eq!(
                guard.decide(route, None),
                NavigationDecision::Redirect("/auth".into())
            );
        }

        session.set_access_token("t").unwrap();
        for route in table.iter() {
            assert_eq!(guard.decide(route, None), NavigationDecision::Proceed);
        }
    }

    #[test]
    fn before_each_invokes_continuation_once() {
        let guard = NavigationGuard::new(SessionContext::in_memory());
        let mut calls = Vec::new();
        guard.before_each(&protected(), None, |decision| calls.push(decision));
        assert_eq!(calls, vec![NavigationDecision::Redirect("/auth".into())]);
    }

    #[test]
    fn guard_never_touches_the_token() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(|_| Ok(Some("abc123".to_string())));
        store.expect_set().never();
        store.expect_remove().never();
        let guard = NavigationGuard::new(SessionContext::new(store));

        assert_eq!(guard.decide(&protected(), None), NavigationDecision::Proceed);
    }

    #[test]
    fn unreadable_storage_is_treated_as_signed_out() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(|_| Err(StorageError::Unavailable("private mode".into())));
        let guard = NavigationGuard::new(SessionContext::new(store));

        assert_eq!(
            guard.decide(&protected(), None),
            NavigationDecision::Redirect("/auth".into())
        );
        assert_eq!(guard.decide(&public(), None), NavigationDecision::Proceed);
    }

    #[test]
    fn custom_login_path() {
        let guard = NavigationGuard::with_login_path(SessionContext::in_memory(), "/login");
        assert_eq!(guard.login_path(), "/login");
        assert_eq!(
            guard.decide(&protected(), None),
            NavigationDecision::Redirect("/login".into())
        );
    }
}
