use std::path::Path;

use anyhow::{anyhow, Context, Result};
use base64::Engine;
use reqwest::{Certificate, ClientBuilder};

use crate::trust::{TrustPool, TrustPoolFactory};

/// Pool of PEM certificates trusted in addition to the TLS backend's built-in roots
#[derive(Debug, Clone, Default)]
pub struct PemTrustPool {
    certificates: Vec<Certificate>,
}

impl PemTrustPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.certificates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty()
    }

    fn add_pem(&mut self, pem: &[u8]) -> Result<()> {
        let bundle = Certificate::from_pem_bundle(pem).map_err(|e| anyhow!("invalid PEM: {}", e))?;
        if bundle.is_empty() {
            return Err(anyhow!("no certificate found"));
        }
        self.certificates.extend(bundle);
        Ok(())
    }
}

impl TrustPool for PemTrustPool {
    fn add_file(&mut self, path: &Path) -> Result<()> {
        let pem = std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
        self.add_pem(&pem).with_context(|| format!("could not append certificate from {}", path.display()))
    }

    fn add_base64(&mut self, data: &str) -> Result<()> {
        let pem = base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map_err(|e| anyhow!("base64 decode error: {}", e))?;
        self.add_pem(&pem).context("could not append certificate data")
    }

    fn certificates(&self) -> Vec<Certificate> {
        self.certificates.clone()
    }
}

/// Hands out empty pools on top of the built-in roots
#[derive(Debug, Clone, Default)]
pub struct SystemTrustPoolFactory;

impl TrustPoolFactory for SystemTrustPoolFactory {
    fn new_pool(&self) -> Box<dyn TrustPool> {
        Box::new(PemTrustPool::new())
    }
}

/// Apply the trust pool and TLS verification policy to an HTTP client builder.
pub fn configure_client(builder: ClientBuilder, pool: &dyn TrustPool, skip_tls_verify: bool) -> ClientBuilder {
    pool.certificates()
        .into_iter()
        .fold(builder, |builder, cert| builder.add_root_certificate(cert))
        .danger_accept_invalid_certs(skip_tls_verify)
}
