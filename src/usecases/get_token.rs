//! Token acquisition for the client-go credential plugin
//!
//! Sequence, no branching back:
//! cache lookup -> trust assembly -> authenticate -> [cache save] -> deliver.
//! A failed cache lookup degrades to an empty entry; every other failure
//! aborts the remaining steps.

use std::sync::Arc;

use anyhow::anyhow;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::{AuthInput, AuthOutput, Authenticator};
use crate::cache::entry::CacheEntry;
use crate::cache::key::CacheKey;
use crate::cache::store::CacheStore;
use crate::config::request::TokenRequest;
use crate::error::{AcquireError, Result};
use crate::sinks::{OutputSink, TokenOutput};
use crate::trust::{self, TrustPoolFactory};

#[derive(Clone)]
pub struct GetToken {
    authenticator: Arc<dyn Authenticator>,
    cache_store: Arc<dyn CacheStore>,
    trust_pool_factory: Arc<dyn TrustPoolFactory>,
    output: Arc<dyn OutputSink>,
}

impl GetToken {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        cache_store: Arc<dyn CacheStore>,
        trust_pool_factory: Arc<dyn TrustPoolFactory>,
        output: Arc<dyn OutputSink>,
    ) -> Self {
        Self { authenticator, cache_store, trust_pool_factory, output }
    }

    /// Obtain a token for `request` and hand it to the client.
    pub async fn run(&self, request: &TokenRequest, cancel: CancellationToken) -> Result<()> {
        debug!("WARNING: log may contain your secrets such as token or password");
        let out = self.get_token_from_cache_or_provider(request, cancel).await?;

        debug!("writing the token to client-go");
        let token_set = out.token_set;
        let output = TokenOutput::new(token_set.id_token, token_set.id_token_claims.expiry);
        self.output.deliver(&output).map_err(AcquireError::Output)
    }

    async fn get_token_from_cache_or_provider(&self, request: &TokenRequest, cancel: CancellationToken) -> Result<AuthOutput> {
        debug!(dir = %request.token_cache_dir.display(), "finding a token from cache directory");
        let key = CacheKey::from(request);
        let cached = self
            .cache_store
            .find_by_key(&request.token_cache_dir, &key)
            .await
            .unwrap_or_else(|e| {
                debug!("could not find a token cache: {:#}", e);
                CacheEntry::default()
            });

        let trust_pool = trust::assemble(self.trust_pool_factory.as_ref(), request)?;

        let input = AuthInput {
            issuer_url: request.issuer_url.to_owned(),
            client_id: request.client_id.to_owned(),
            client_secret: request.client_secret.to_owned(),
            extra_scopes: request.extra_scopes.to_owned(),
            trust_pool,
            skip_tls_verify: request.skip_tls_verify,
            id_token: cached.id_token,
            refresh_token: cached.refresh_token,
            grant_options: request.grant_options.to_owned(),
        };
        let out = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(anyhow!("operation cancelled")),
            res = self.authenticator.authenticate(input, cancel.clone()) => res,
        }
        .map_err(AcquireError::Authentication)?;

        let claims = &out.token_set.id_token_claims;
        debug!("you got a token: {}", claims.pretty);
        if out.already_has_valid_id_token {
            debug!("you already have a valid token until {}", claims.expiry);
            return Ok(out);
        }

        debug!("you got a valid token until {}", claims.expiry);
        let entry = CacheEntry::new(out.token_set.id_token.to_owned(), out.token_set.refresh_token.to_owned());
        self.cache_store
            .save(&request.token_cache_dir, &key, &entry)
            .await
            .map_err(AcquireError::CacheWrite)?;
        Ok(out)
    }
}
