//! boxoffice-http - Back-office REST client.
//!
//! [`ApiClient`] carries at most one [`RequestAuthorizer`], which reads the
//! session identity when each request is built. Logging in again therefore
//! changes the header of the next request without registering anything new.

mod authorizer;
mod client;
mod config;
mod endpoints;
mod resources;
mod validator;

pub use authorizer::RequestAuthorizer;
pub use client::ApiClient;
pub use config::ClientConfig;
pub use resources::Resource;
pub use validator::HttpSessionValidator;
