use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// ================================
/// Token request, built once per plugin invocation
/// ================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRequest {
    pub issuer_url: String,
    pub client_id: String,
    /// empty for public clients
    pub client_secret: String,
    /// order is preserved and part of the cache identity
    pub extra_scopes: Vec<String>,
    pub ca_cert_filename: Option<PathBuf>,
    /// base64 encoded PEM
    pub ca_cert_data: Option<String>,
    pub skip_tls_verify: bool,
    pub token_cache_dir: PathBuf,
    /// passed through to the authenticator, never part of the cache key
    pub grant_options: GrantOptionSet,
}

impl TokenRequest {
    pub fn new(issuer_url: impl Into<String>, client_id: impl Into<String>, token_cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            issuer_url: issuer_url.into(),
            client_id: client_id.into(),
            token_cache_dir: token_cache_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = client_secret.into();
        self
    }

    pub fn with_extra_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ca_cert_filename(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_filename = Some(path.into());
        self
    }

    pub fn with_ca_cert_data(mut self, data: impl Into<String>) -> Self {
        self.ca_cert_data = Some(data.into());
        self
    }

    pub fn with_skip_tls_verify(mut self, skip: bool) -> Self {
        self.skip_tls_verify = skip;
        self
    }

    pub fn with_grant_options(mut self, grant_options: GrantOptionSet) -> Self {
        self.grant_options = grant_options;
        self
    }

    /// CA filename, treating an empty path as absent
    pub fn ca_cert_filename(&self) -> Option<&PathBuf> {
        self.ca_cert_filename.as_ref().filter(|p| !p.as_os_str().is_empty())
    }

    /// CA data, treating an empty string as absent
    pub fn ca_cert_data(&self) -> Option<&str> {
        self.ca_cert_data.as_deref().filter(|d| !d.is_empty())
    }
}

/// ================================
/// Grant selection, opaque to token acquisition
/// ================================
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "grant", rename_all = "snake_case")]
pub enum GrantOptionSet {
    AuthCode {
        /// local addresses tried in order for the redirect listener
        #[serde(default = "default_bind_addresses")]
        bind_addresses: Vec<String>,
        #[serde(default)]
        skip_open_browser: bool,
    },
    DeviceCode,
    Password {
        username: String,
        /// prompted for when absent
        #[serde(default)]
        password: Option<String>,
    },
}

impl Default for GrantOptionSet {
    fn default() -> Self {
        GrantOptionSet::AuthCode {
            bind_addresses: default_bind_addresses(),
            skip_open_browser: false,
        }
    }
}

fn default_bind_addresses() -> Vec<String> {
    vec!["127.0.0.1:8000".to_owned(), "127.0.0.1:18000".to_owned()]
}
