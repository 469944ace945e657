//! boxoffice-core - Session and access-control primitives for the
//! cinema back-office console.
//!
//! All identity state flows through a single [`SessionContext`]. Screens
//! read the current [`SessionIdentity`] through a subscription handle and
//! ask the route guard whether they may be shown.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use boxoffice_core::access::{self, CONSOLE_ROUTES};
//! use boxoffice_core::{MemoryCredentialStore, SessionContext, SessionValidator};
//!
//! # async fn example(validator: Arc<dyn SessionValidator>) -> boxoffice_core::Result<()> {
//! let store = Arc::new(MemoryCredentialStore::new());
//! let session = SessionContext::new(store, validator);
//!
//! let identity = session.bootstrap().await;
//! let visible = CONSOLE_ROUTES.visible(&identity);
//! println!("{} screens reachable", visible.len());
//!
//! if let Some(route) = CONSOLE_ROUTES.find("/showtimes") {
//!     println!("showtimes allowed: {}", access::is_allowed(route, &identity));
//! }
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod claims;
pub mod error;
pub mod identity;
pub mod session;
pub mod store;
pub mod token;
pub mod traits;
pub mod types;

pub use access::{Access, RouteDescriptor, RouteTable};
pub use claims::Claims;
pub use error::Error;
pub use identity::SessionIdentity;
pub use session::SessionContext;
pub use store::MemoryCredentialStore;
pub use token::BearerToken;
pub use traits::{CredentialStore, SessionValidator};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
