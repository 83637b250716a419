// src/tests/common/mod.rs
//
// Recording fakes for every collaborator of token acquisition. All fakes
// share one journal so tests can assert on the order of calls.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::auth::claims::IdTokenClaims;
use crate::auth::{AuthInput, AuthOutput, Authenticator, TokenSet};
use crate::cache::entry::CacheEntry;
use crate::cache::key::CacheKey;
use crate::cache::store::CacheStore;
use crate::config::request::GrantOptionSet;
use crate::sinks::{OutputSink, TokenOutput};
use crate::trust::{TrustPool, TrustPoolFactory};

/// Minimal unsigned JWT: {"sub": sub, "exp": exp}
pub fn sample_jwt(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"{}","exp":{}}}"#, sub, exp));
    format!("{}.{}.", header, payload)
}

pub fn token_set(sub: &str, ttl_seconds: i64, refresh_token: &str) -> TokenSet {
    let id_token = sample_jwt(sub, Utc::now().timestamp() + ttl_seconds);
    let id_token_claims = IdTokenClaims::decode_unverified(&id_token).expect("sample jwt must decode");
    TokenSet { id_token, refresh_token: refresh_token.to_owned(), id_token_claims }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrustCall {
    File(PathBuf),
    Base64(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    CacheLookup { dir: PathBuf, key: CacheKey },
    Trust(TrustCall),
    Authenticate { id_token: String, refresh_token: String, grant_options: GrantOptionSet },
    CacheSave { dir: PathBuf, key: CacheKey, entry: CacheEntry },
    Deliver(TokenOutput),
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn saves(&self) -> Vec<CacheEntry> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::CacheSave { entry, .. } => Some(entry),
                _ => None,
            })
            .collect()
    }

    pub fn deliveries(&self) -> Vec<TokenOutput> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Deliver(output) => Some(output),
                _ => None,
            })
            .collect()
    }

    pub fn authentications(&self) -> usize {
        self.events().iter().filter(|e| matches!(e, Event::Authenticate { .. })).count()
    }
}

// -------------------------------
// Trust pool
// -------------------------------

#[derive(Debug)]
pub struct RecordingTrustPool {
    journal: Journal,
    calls: Arc<Mutex<Vec<TrustCall>>>,
    fail_file: bool,
    fail_base64: bool,
}

impl TrustPool for RecordingTrustPool {
    fn add_file(&mut self, path: &Path) -> Result<()> {
        let call = TrustCall::File(path.to_path_buf());
        self.calls.lock().unwrap().push(call.clone());
        self.journal.push(Event::Trust(call));
        if self.fail_file {
            return Err(anyhow!("open {}: no such file or directory", path.display()));
        }
        Ok(())
    }

    fn add_base64(&mut self, data: &str) -> Result<()> {
        let call = TrustCall::Base64(data.to_owned());
        self.calls.lock().unwrap().push(call.clone());
        self.journal.push(Event::Trust(call));
        if self.fail_base64 {
            return Err(anyhow!("illegal base64 data"));
        }
        Ok(())
    }

    fn certificates(&self) -> Vec<reqwest::Certificate> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingTrustPoolFactory {
    journal: Journal,
    calls: Arc<Mutex<Vec<TrustCall>>>,
    fail_file: bool,
    fail_base64: bool,
}

impl RecordingTrustPoolFactory {
    pub fn with_journal(journal: Journal) -> Self {
        Self { journal, ..Default::default() }
    }

    pub fn failing_file() -> Self {
        Self { fail_file: true, ..Default::default() }
    }

    pub fn failing_base64() -> Self {
        Self { fail_base64: true, ..Default::default() }
    }

    pub fn fail_file(mut self) -> Self {
        self.fail_file = true;
        self
    }

    pub fn fail_base64(mut self) -> Self {
        self.fail_base64 = true;
        self
    }

    pub fn calls(&self) -> Vec<TrustCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TrustPoolFactory for RecordingTrustPoolFactory {
    fn new_pool(&self) -> Box<dyn TrustPool> {
        Box::new(RecordingTrustPool {
            journal: self.journal.clone(),
            calls: self.calls.clone(),
            fail_file: self.fail_file,
            fail_base64: self.fail_base64,
        })
    }
}

// -------------------------------
// Cache store
// -------------------------------

pub struct FakeCacheStore {
    journal: Journal,
    cached: Option<CacheEntry>,
    fail_save: bool,
}

impl FakeCacheStore {
    /// Every lookup fails, as with a missing cache file.
    pub fn empty(journal: Journal) -> Self {
        Self { journal, cached: None, fail_save: false }
    }

    pub fn with_entry(journal: Journal, entry: CacheEntry) -> Self {
        Self { journal, cached: Some(entry), fail_save: false }
    }

    pub fn fail_save(mut self) -> Self {
        self.fail_save = true;
        self
    }
}

#[async_trait]
impl CacheStore for FakeCacheStore {
    async fn find_by_key(&self, dir: &Path, key: &CacheKey) -> Result<CacheEntry> {
        self.journal.push(Event::CacheLookup { dir: dir.to_path_buf(), key: key.clone() });
        self.cached.clone().ok_or_else(|| anyhow!("no token cache"))
    }

    async fn save(&self, dir: &Path, key: &CacheKey, entry: &CacheEntry) -> Result<()> {
        self.journal.push(Event::CacheSave { dir: dir.to_path_buf(), key: key.clone(), entry: entry.clone() });
        if self.fail_save {
            return Err(anyhow!("permission denied"));
        }
        Ok(())
    }
}

// -------------------------------
// Authenticator
// -------------------------------

pub enum AuthBehavior {
    Respond(AuthOutput),
    Fail(String),
    /// never returns unless cancelled
    Hang,
}

pub struct FakeAuthenticator {
    journal: Journal,
    behavior: AuthBehavior,
}

impl FakeAuthenticator {
    pub fn new(journal: Journal, behavior: AuthBehavior) -> Self {
        Self { journal, behavior }
    }

    pub fn new_tokens(journal: Journal, token_set: TokenSet) -> Self {
        Self::new(journal, AuthBehavior::Respond(AuthOutput { already_has_valid_id_token: false, token_set }))
    }

    pub fn already_valid(journal: Journal, token_set: TokenSet) -> Self {
        Self::new(journal, AuthBehavior::Respond(AuthOutput { already_has_valid_id_token: true, token_set }))
    }
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self, input: AuthInput, cancel: CancellationToken) -> Result<AuthOutput> {
        self.journal.push(Event::Authenticate {
            id_token: input.id_token,
            refresh_token: input.refresh_token,
            grant_options: input.grant_options,
        });
        match &self.behavior {
            AuthBehavior::Respond(out) => Ok(out.clone()),
            AuthBehavior::Fail(message) => Err(anyhow!("{}", message)),
            AuthBehavior::Hang => {
                cancel.cancelled().await;
                std::future::pending::<Result<AuthOutput>>().await
            }
        }
    }
}

// -------------------------------
// Output
// -------------------------------

pub struct FakeOutput {
    journal: Journal,
    fail: bool,
}

impl FakeOutput {
    pub fn new(journal: Journal) -> Self {
        Self { journal, fail: false }
    }

    pub fn failing(journal: Journal) -> Self {
        Self { journal, fail: true }
    }
}

impl OutputSink for FakeOutput {
    fn deliver(&self, output: &TokenOutput) -> Result<()> {
        self.journal.push(Event::Deliver(output.clone()));
        if self.fail {
            return Err(anyhow!("broken pipe"));
        }
        Ok(())
    }
}
