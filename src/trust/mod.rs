//! Trust anchors for the issuer connection
//!
//! A pool starts from whatever the factory provides and grows with the CA
//! file and inline CA data of the request, in that order.

pub mod pem_pool;

use std::fmt::Debug;
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::config::request::TokenRequest;
use crate::error::AcquireError;

pub trait TrustPool: Debug + Send + Sync {
    /// Load every certificate of a PEM file.
    fn add_file(&mut self, path: &Path) -> Result<()>;

    /// Load every certificate of base64 encoded PEM data.
    fn add_base64(&mut self, data: &str) -> Result<()>;

    /// Certificates added on top of the base pool.
    fn certificates(&self) -> Vec<reqwest::Certificate>;
}

pub trait TrustPoolFactory: Send + Sync {
    fn new_pool(&self) -> Box<dyn TrustPool>;
}

/// Build the trust pool for `request`.
///
/// Neither CA field set yields the base pool unchanged.
pub fn assemble(factory: &dyn TrustPoolFactory, request: &TokenRequest) -> Result<Box<dyn TrustPool>, AcquireError> {
    let mut pool = factory.new_pool();
    if let Some(path) = request.ca_cert_filename() {
        debug!(path = %path.display(), "loading the certificate file");
        pool.add_file(path).map_err(AcquireError::CertificateFile)?;
    }
    if let Some(data) = request.ca_cert_data() {
        debug!("loading the certificate data");
        pool.add_base64(data).map_err(AcquireError::CertificateData)?;
    }
    Ok(pool)
}
