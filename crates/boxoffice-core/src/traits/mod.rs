//! Seams between the session context and its collaborators.

mod store;
mod validator;

pub use store::CredentialStore;
pub use validator::SessionValidator;
