//! # OIDC Token Plugin Library
//!
//! Token acquisition for a client-go credential plugin: find a cached
//! token, assemble the trust pool, let an authenticator validate or renew
//! the token, persist new tokens and hand the result to client-go.
//!
//! Modules:
//! - `usecases` — the acquisition sequence (`GetToken`)
//! - `plugin` — entrypoint wiring the default collaborators
//! - `cache` — cache key derivation and token cache storage
//! - `trust` — trust pool assembly from CA file and inline CA data
//! - `auth` — authenticator capability and ID token claims
//! - `sinks` — credential output for client-go
//! - `config` — token request and environment settings

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod plugin;
pub mod sinks;
pub mod trust;
pub mod usecases;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::request::{GrantOptionSet, TokenRequest};
pub use crate::error::{AcquireError, Stage};
pub use crate::usecases::get_token::GetToken;
