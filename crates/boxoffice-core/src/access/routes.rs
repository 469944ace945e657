//! Static route table of the console.

use serde::Serialize;

use crate::SessionIdentity;

use super::guard::{self, Access};

/// Full back-office access.
pub const ADMIN: &str = "Admin";

/// Box-office staff: showtimes only.
pub const STAFF: &str = "Staff";

/// A navigable screen and the roles that may reach it.
///
/// An empty `required_roles` means the screen is public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub required_roles: &'static [&'static str],
}

impl RouteDescriptor {
    pub const fn new(path: &'static str, required_roles: &'static [&'static str]) -> Self {
        Self {
            path,
            required_roles,
        }
    }

    /// Returns true if no role is required.
    pub fn is_public(&self) -> bool {
        self.required_roles.is_empty()
    }
}

/// An immutable list of routes.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl RouteTable {
    pub const fn new(routes: &'static [RouteDescriptor]) -> Self {
        Self { routes }
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// Look up the route for `path`. A trailing slash is ignored.
    pub fn find(&self, path: &str) -> Option<&'static RouteDescriptor> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        self.routes.iter().find(|route| route.path == path)
    }

    /// Routes the identity may reach, for building navigation.
    pub fn visible(&self, identity: &SessionIdentity) -> Vec<&'static RouteDescriptor> {
        self.routes
            .iter()
            .filter(|route| guard::is_allowed(route, identity))
            .collect()
    }

    /// Guard outcome for `path`, or `None` if no such route exists.
    pub fn check(&self, path: &str, identity: &SessionIdentity) -> Option<Access> {
        self.find(path).map(|route| guard::check(route, identity))
    }
}

const ADMIN_ONLY: &[&str] = &[ADMIN];

const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new("/", &[]),
    RouteDescriptor::new("/login", &[]),
    RouteDescriptor::new("/clusters", ADMIN_ONLY),
    RouteDescriptor::new("/genres", ADMIN_ONLY),
    RouteDescriptor::new("/movies", ADMIN_ONLY),
    RouteDescriptor::new("/actors", ADMIN_ONLY),
    RouteDescriptor::new("/rates", ADMIN_ONLY),
    RouteDescriptor::new("/rooms", ADMIN_ONLY),
    RouteDescriptor::new("/screen-types", ADMIN_ONLY),
    RouteDescriptor::new("/showtimes", &[ADMIN, STAFF]),
    RouteDescriptor::new("/discounts", ADMIN_ONLY),
    RouteDescriptor::new("/report", ADMIN_ONLY),
    RouteDescriptor::new("/users", ADMIN_ONLY),
];

/// The screens of the back-office console.
pub const CONSOLE_ROUTES: RouteTable = RouteTable::new(ROUTES);

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(roles: &[&str]) -> SessionIdentity {
        SessionIdentity {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            username: "tester".to_string(),
            token: "a.b.c".into(),
        }
    }

    #[test]
    fn find_tolerates_trailing_slash() {
        assert_eq!(CONSOLE_ROUTES.find("/movies/").unwrap().path, "/movies");
        assert_eq!(CONSOLE_ROUTES.find("/").unwrap().path, "/");
        assert!(CONSOLE_ROUTES.find("/popcorn").is_none());
    }

    #[test]
    fn anonymous_sees_public_routes_only() {
        let paths: Vec<_> = CONSOLE_ROUTES
            .visible(&SessionIdentity::anonymous())
            .iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["/", "/login"]);
    }

    #[test]
    fn staff_sees_showtimes() {
        let paths: Vec<_> = CONSOLE_ROUTES
            .visible(&identity(&[STAFF]))
            .iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["/", "/login", "/showtimes"]);
    }

    #[test]
    fn admin_sees_everything() {
        let visible = CONSOLE_ROUTES.visible(&identity(&[ADMIN]));
        assert_eq!(visible.len(), CONSOLE_ROUTES.routes().len());
    }

    #[test]
    fn check_unknown_path() {
        assert!(CONSOLE_ROUTES.check("/nowhere", &identity(&[ADMIN])).is_none());
        assert_eq!(
            CONSOLE_ROUTES.check("/users", &identity(&[STAFF])),
            Some(Access::Forbidden)
        );
    }
}
