//! Static route table

use serde::Serialize;

/// Views the application can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum View {
    /// Login / registration page
    Auth,
    /// The literature timeline, only for signed-in users
    LiteratureTimeline,
}

/// What a matched path leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View {
        name: &'static str,
        view: View,
        requires_auth: bool,
    },
    /// Static redirect applied before any guard runs
    Redirect(&'static str),
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub target: RouteTarget,
}

impl RouteDescriptor {
    pub const fn view(
        path: &'static str,
        name: &'static str,
        view: View,
        requires_auth: bool,
    ) -> Self {
        Self {
            path,
            target: RouteTarget::View {
                name,
                view,
                requires_auth,
            },
        }
    }

    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        Self {
            path,
            target: RouteTarget::Redirect(to),
        }
    }

    /// Whether the route may only be entered with a session token.
    /// Redirect entries never require auth themselves.
    pub const fn requires_auth(&self) -> bool {
        matches!(
            self.target,
            RouteTarget::View {
                requires_auth: true,
                ..
            }
        )
    }

    pub const fn name(&self) -> Option<&'static str> {
        match self.target {
            RouteTarget::View { name, .. } => Some(name),
            RouteTarget::Redirect(_) => None,
        }
    }

    pub const fn view_id(&self) -> Option<View> {
        match self.target {
            RouteTarget::View { view, .. } => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }
}

const STANDARD_ROUTES: [RouteDescriptor; 3] = [
    RouteDescriptor::redirect("/", "/auth"),
    RouteDescriptor::view("/auth", "Auth", View::Auth, false),
    RouteDescriptor::view("/timeline", "LiteratureTimeline", View::LiteratureTimeline, true),
];

/// Immutable mapping from paths to routes
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: impl Into<Vec<RouteDescriptor>>) -> Self {
        Self {
            routes: routes.into(),
        }
    }

    /// The application's routes: `/` → `/auth`, public `/auth`, protected `/timeline`
    pub fn standard() -> Self {
        Self::new(STANDARD_ROUTES)
    }

    /// Find the route for a location. Query string, fragment and a trailing
    /// slash are ignored.
    pub fn resolve(&self, location: &str) -> Option<&RouteDescriptor> {
        let path = normalize_path(location);
        self.routes.iter().find(|route| route.path == path)
    }

    /// Find a view route by its name
    pub fn by_name(&self, name: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.name() == Some(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strip query and fragment, drop a trailing slash except on the root
pub fn normalize_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_expected_routes() {
        let table = RouteTable::standard();

        let root = table.resolve("/").unwrap();
        assert_eq!(root.target, RouteTarget::Redirect("/auth"));
        assert!(!root.requires_auth());

        let auth = table.resolve("/auth").unwrap();
        assert_eq!(auth.view_id(), Some(View::Auth));
        assert!(!auth.requires_auth());

        let timeline = table.resolve("/timeline").unwrap();
        assert_eq!(timeline.view_id(), Some(View::LiteratureTimeline));
        assert!(timeline.requires_auth());
    }

    #[test]
    fn resolve_ignores_query_fragment_and_trailing_slash() {
        let table = RouteTable::standard();
        for location in ["/timeline/", "/timeline?year=1850", "/timeline#top", "/timeline/?a=b#c"] {
            assert_eq!(table.resolve(location).unwrap().path, "/timeline", "{location}");
        }
        assert_eq!(table.resolve("").unwrap().path, "/");
        assert_eq!(table.resolve("/?next=/timeline").unwrap().path, "/");
    }

    #[test]
    fn unknown_paths_do_not_match() {
        let table = RouteTable::standard();
        assert!(table.resolve("/admin").is_none());
        assert!(table.resolve("/timeline/extra").is_none());
    }

    #[test]
    fn lookup_by_name() {
        let table = RouteTable::standard();
        assert_eq!(table.by_name("LiteratureTimeline").unwrap().path, "/timeline");
        assert_eq!(table.by_name("Auth").unwrap().path, "/auth");
        assert!(table.by_name("Missing").is_none());
    }
}
