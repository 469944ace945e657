//! Role-gated access to console screens.
//!
//! Every screen declares the roles that may reach it; the guard answers
//! yes or no for a given identity. What to do on a "no" (redirect to the
//! login screen, show a forbidden notice) is up to the caller.

mod guard;
mod routes;

pub use guard::{Access, check, is_allowed};
pub use routes::{ADMIN, CONSOLE_ROUTES, RouteDescriptor, RouteTable, STAFF};
