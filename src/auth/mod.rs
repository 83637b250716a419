//! Authentication flows, seen from token acquisition
//!
//! Concrete grants (authorization code, device code, refresh) live behind
//! [`Authenticator`]. Token acquisition only hands over the request, the
//! trust pool and whatever token pair the cache had.

pub mod claims;

use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::auth::claims::IdTokenClaims;
use crate::config::request::GrantOptionSet;
use crate::trust::TrustPool;

#[derive(Debug)]
pub struct AuthInput {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub extra_scopes: Vec<String>,
    pub trust_pool: Box<dyn TrustPool>,
    pub skip_tls_verify: bool,
    /// cached hints, empty when nothing was cached
    pub id_token: String,
    pub refresh_token: String,
    pub grant_options: GrantOptionSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub id_token: String,
    pub refresh_token: String,
    pub id_token_claims: IdTokenClaims,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutput {
    /// the cached ID token was still valid and is returned unchanged
    pub already_has_valid_id_token: bool,
    pub token_set: TokenSet,
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Return the cached token if still valid, otherwise obtain a new pair.
    ///
    /// Implementations should stop network work once `cancel` fires.
    async fn authenticate(&self, input: AuthInput, cancel: CancellationToken) -> Result<AuthOutput>;
}
