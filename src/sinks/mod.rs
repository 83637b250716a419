pub mod exec_credential;

use anyhow::Result;
use chrono::{DateTime, Utc};

/// The only data handed to the calling client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutput {
    pub token: String,
    pub expiry: DateTime<Utc>,
}

impl TokenOutput {
    pub fn new(token: String, expiry: DateTime<Utc>) -> Self {
        Self { token, expiry }
    }
}

pub trait OutputSink: Send + Sync {
    fn deliver(&self, output: &TokenOutput) -> Result<()>;
}
