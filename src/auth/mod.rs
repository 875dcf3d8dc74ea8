//! Authentication module
//!
//! Supports: API Key (header or query), Basic, Bearer, Custom Headers

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
