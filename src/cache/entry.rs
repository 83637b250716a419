use serde::{Deserialize, Serialize};

/// Token pair persisted between plugin invocations.
///
/// An empty string stands for "no cached token".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl CacheEntry {
    pub fn new(id_token: String, refresh_token: String) -> Self {
        Self { id_token, refresh_token }
    }
}
