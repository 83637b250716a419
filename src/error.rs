//! Error types for token acquisition
//!
//! Cache lookup is the only recoverable failure and never shows up here.
//! Every other stage wraps the collaborator's cause so callers can walk the
//! chain with [`std::error::Error::source`].

use thiserror::Error;

/// Result type alias for token acquisition
pub type Result<T> = std::result::Result<T, AcquireError>;

/// Pipeline stage that produced a fatal error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CertificateFile,
    CertificateData,
    Authentication,
    CacheWrite,
    Output,
}

/// Fatal token acquisition errors
#[derive(Error, Debug)]
pub enum AcquireError {
    /// CA certificate file could not be loaded into the trust pool
    #[error("could not load the certificate file: {0:#}")]
    CertificateFile(#[source] anyhow::Error),

    /// Inline CA certificate data could not be loaded into the trust pool
    #[error("could not load the certificate data: {0:#}")]
    CertificateData(#[source] anyhow::Error),

    /// Authenticator failed or the operation was cancelled
    #[error("authentication error: {0:#}")]
    Authentication(#[source] anyhow::Error),

    /// Newly obtained token pair could not be persisted
    #[error("could not write the token cache: {0:#}")]
    CacheWrite(#[source] anyhow::Error),

    /// Token could not be handed to the client
    #[error("could not write the token to client: {0:#}")]
    Output(#[source] anyhow::Error),
}

impl AcquireError {
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::CertificateFile(_) => Stage::CertificateFile,
            Self::CertificateData(_) => Stage::CertificateData,
            Self::Authentication(_) => Stage::Authentication,
            Self::CacheWrite(_) => Stage::CacheWrite,
            Self::Output(_) => Stage::Output,
        }
    }

    /// Underlying collaborator error
    pub fn cause(&self) -> &anyhow::Error {
        match self {
            Self::CertificateFile(e)
            | Self::CertificateData(e)
            | Self::Authentication(e)
            | Self::CacheWrite(e)
            | Self::Output(e) => e,
        }
    }
}
