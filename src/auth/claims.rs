use anyhow::{anyhow, Context, Result};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Claims of an ID token, decoded without signature verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenClaims {
    pub subject: Option<String>,
    pub expiry: DateTime<Utc>,
    /// pretty printed payload, for logs
    pub pretty: String,
}

impl IdTokenClaims {
    /// Decode the payload of a compact JWT.
    ///
    /// The signature is not checked; this is for reading `exp` of a token
    /// the authenticator already trusts.
    pub fn decode_unverified(id_token: &str) -> Result<Self> {
        let parts: Vec<&str> = id_token.split('.').collect();
        if parts.len() != 3 {
            return Err(anyhow!("invalid JWT format"));
        }

        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| anyhow!("base64 decode error: {}", e))?;
        let payload: Value = serde_json::from_slice(&decoded).map_err(|e| anyhow!("invalid JWT payload: {}", e))?;

        let exp = payload["exp"]
            .as_i64()
            .or_else(|| payload["exp"].as_f64().map(|exp| exp as i64))
            .ok_or_else(|| anyhow!("exp claim not found or not a number"))?;
        let expiry = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| anyhow!("exp claim out of range: {}", exp))?;

        Ok(Self {
            subject: payload["sub"].as_str().map(str::to_owned),
            expiry,
            pretty: serde_json::to_string_pretty(&payload).context("could not format JWT payload")?,
        })
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}
