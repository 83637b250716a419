//! Cache identity of a token request
//!
//! Only fields that change which token the issuer hands out take part in the
//! key. The cache directory and the grant options change how a token is
//! obtained, not which one, and are left out.

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::config::request::TokenRequest;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub extra_scopes: Vec<String>,
    pub ca_cert_filename: Option<PathBuf>,
    pub ca_cert_data: Option<String>,
    pub skip_tls_verify: bool,
}

impl CacheKey {
    /// Length-prefixed encoding of every field, stable across processes.
    ///
    /// Scope order is kept as given.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256);
        put_field(&mut buf, self.issuer_url.as_bytes());
        put_field(&mut buf, self.client_id.as_bytes());
        put_field(&mut buf, self.client_secret.as_bytes());

        buf.extend_from_slice(&(self.extra_scopes.len() as u64).to_be_bytes());
        for scope in &self.extra_scopes {
            put_field(&mut buf, scope.as_bytes());
        }

        put_optional(&mut buf, self.ca_cert_filename.as_ref().map(|p| p.as_os_str().as_encoded_bytes()));
        put_optional(&mut buf, self.ca_cert_data.as_ref().map(|d| d.as_bytes()));
        buf.push(u8::from(self.skip_tls_verify));
        buf
    }

    /// Hex SHA-256 of the canonical encoding, safe to use as a file name
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.canonical_bytes()))
    }
}

impl From<&TokenRequest> for CacheKey {
    fn from(request: &TokenRequest) -> Self {
        Self {
            issuer_url: request.issuer_url.to_owned(),
            client_id: request.client_id.to_owned(),
            client_secret: request.client_secret.to_owned(),
            extra_scopes: request.extra_scopes.to_owned(),
            ca_cert_filename: request.ca_cert_filename().cloned(),
            ca_cert_data: request.ca_cert_data().map(str::to_owned),
            skip_tls_verify: request.skip_tls_verify,
        }
    }
}

fn put_field(buf: &mut Vec<u8>, value: &[u8]) {
    buf.extend_from_slice(&(value.len() as u64).to_be_bytes());
    buf.extend_from_slice(value);
}

fn put_optional(buf: &mut Vec<u8>, value: Option<&[u8]>) {
    match value {
        Some(value) => {
            buf.push(1);
            put_field(buf, value);
        }
        None => buf.push(0),
    }
}
