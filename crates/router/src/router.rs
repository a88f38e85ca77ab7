//! Full navigations: static redirects, then the auth guard

use crate::error::NavigationError;
use crate::guard::{NavigationDecision, NavigationGuard};
use crate::routes::{RouteDescriptor, RouteTable, RouteTarget, View, normalize_path};
use timeline_core::SessionContext;

/// Upper bound on redirects followed during one navigation
pub const MAX_REDIRECTS: usize = 8;

/// Terminal state of a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path the application ends up on
    pub path: String,
    /// Matched route, `None` when nothing in the table matches
    pub route: Option<RouteDescriptor>,
    /// Whether a static or guard redirect was followed
    pub redirected: bool,
}

impl Navigation {
    pub fn view(&self) -> Option<View> {
        self.route.and_then(|route| route.view_id())
    }

    pub const fn is_not_found(&self) -> bool {
        self.route.is_none()
    }
}

/// Route table plus guard
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    guard: NavigationGuard,
}

impl Router {
    /// Standard routes guarded by `session`
    pub fn new(session: SessionContext) -> Self {
        Self::with_table(RouteTable::standard(), NavigationGuard::new(session))
    }

    pub const fn with_table(table: RouteTable, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    pub const fn table(&self) -> &RouteTable {
        &self.table
    }

    pub const fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Navigate from `from` (the current location, if any) to `to`.
    ///
    /// Static redirects are applied before the guard. Unknown paths are
    /// not protected and end as [`Navigation::is_not_found`].
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::RedirectLoop`] when more than
    /// [`MAX_REDIRECTS`] redirects are needed
    pub fn navigate(&self, to: &str, from: Option<&str>) -> Result<Navigation, NavigationError> {
        let from_route = from.and_then(|location| self.table.resolve(location));
        let mut path = normalize_path(to).to_string();
        let mut redirected = false;

        for _ in 0..=MAX_REDIRECTS {
            let Some(route) = self.table.resolve(&path) else {
                tracing::debug!(%path, "No route matched");
                return Ok(Navigation {
                    path,
                    route: None,
                    redirected,
                });
            };

            let next = match route.target {
                RouteTarget::Redirect(target) => target.to_string(),
                RouteTarget::View { .. } => match self.guard.decide(route, from_route) {
                    NavigationDecision::Proceed => {
                        return Ok(Navigation {
                            path,
                            route: Some(*route),
                            redirected,
                        });
                    }
                    NavigationDecision::Redirect(target) => target,
                },
            };

            tracing::debug!(from = %path, redirect = %next, "Following redirect");
            path = normalize_path(&next).to_string();
            redirected = true;
        }

        tracing::warn!(to, "Redirect limit exceeded");
        Err(NavigationError::RedirectLoop {
            path: to.to_string(),
            hops: MAX_REDIRECTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> SessionContext {
        let session = SessionContext::in_memory();
        session.set_access_token("abc123").unwrap();
        session
    }

    #[test]
    fn root_always_lands_on_auth() {
        for session in [SessionContext::in_memory(), signed_in()] {
            let navigation = Router::new(session).navigate("/", None).unwrap();
            assert_eq!(navigation.path, "/auth");
            assert_eq!(navigation.view(), Some(View::Auth));
            assert!(navigation.redirected);
        }
    }

    #[test]
    fn timeline_without_token_lands_on_auth() {
        let router = Router::new(SessionContext::in_memory());
        let navigation = router.navigate("/timeline", Some("/auth")).unwrap();
        assert_eq!(navigation.path, "/auth");
        assert_eq!(navigation.view(), Some(View::Auth));
        assert!(navigation.redirected);
    }

    #[test]
    fn timeline_with_token_proceeds() {
        let router = Router::new(signed_in());
        let navigation = router.navigate("/timeline", None).unwrap();
        assert_eq!(navigation.path, "/timeline");
        assert_eq!(navigation.view(), Some(View::LiteratureTimeline));
        assert!(!navigation.redirected);
    }

    #[test]
    fn guard_sees_token_changes_between_navigations() {
        let session = signed_in();
        let router = Router::new(session.clone());
        assert_eq!(router.navigate("/timeline", None).unwrap().path, "/timeline");

        session.clear().unwrap();
        assert_eq!(router.navigate("/timeline", None).unwrap().path, "/auth");
    }

    #[test]
    fn unknown_path_is_not_found_and_not_guarded() {
        let router = Router::new(SessionContext::in_memory());
        let navigation = router.navigate("/nowhere?x=1", None).unwrap();
        assert_eq!(navigation.path, "/nowhere");
        assert!(navigation.is_not_found());
        assert!(!navigation.redirected);
    }

    #[test]
    fn redirect_cycles_are_reported() {
        let table = RouteTable::new(vec![
            RouteDescriptor::redirect("/a", "/b"),
            RouteDescriptor::redirect("/b", "/a"),
        ]);
        let router = Router::with_table(table, NavigationGuard::new(SessionContext::in_memory()));

        assert_eq!(
            router.navigate("/a", None),
            Err(NavigationError::RedirectLoop {
                path: "/a".into(),
                hops: MAX_REDIRECTS,
            })
        );
    }

    #[test]
    fn protected_login_page_is_a_loop() {
        let table = RouteTable::new(vec![RouteDescriptor::view(
            "/auth",
            "Auth",
            View::Auth,
            true,
        )]);
        let router = Router::with_table(table, NavigationGuard::new(SessionContext::in_memory()));
        assert!(matches!(
            router.navigate("/auth", None),
            Err(NavigationError::RedirectLoop { .. })
        ));
    }
}
