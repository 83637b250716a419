//! Shared constants and invariants

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_TOKEN_CACHE_DIR: &str = "TOKEN_CACHE_DIR";

/// relative to the user's home directory
pub const TOKEN_CACHE_DIR_SUFFIX: &str = ".kube/cache/oidc-login";

// Credential handed to client-go
pub const EXEC_CREDENTIAL_API_VERSION: &str = "client.authentication.k8s.io/v1beta1";
pub const EXEC_CREDENTIAL_KIND: &str = "ExecCredential";
