//! client-go exec credential output
//!
//! See https://kubernetes.io/docs/reference/access-authn-authz/authentication/#client-go-credential-plugins

use std::io::Write;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use chrono::SecondsFormat;
use serde::Serialize;
use tracing::debug;

use crate::sinks::{OutputSink, TokenOutput};
use crate::utils::constants::{EXEC_CREDENTIAL_API_VERSION, EXEC_CREDENTIAL_KIND};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecCredential<'a> {
    kind: &'static str,
    api_version: &'static str,
    status: ExecCredentialStatus<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecCredentialStatus<'a> {
    token: &'a str,
    /// RFC 3339, whole seconds
    expiration_timestamp: String,
}

/// Writes an `ExecCredential` JSON object, stdout by default
pub struct ExecCredentialWriter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ExecCredentialWriter {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self { out: Mutex::new(Box::new(out)) }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl OutputSink for ExecCredentialWriter {
    fn deliver(&self, output: &TokenOutput) -> Result<()> {
        let credential = ExecCredential {
            kind: EXEC_CREDENTIAL_KIND,
            api_version: EXEC_CREDENTIAL_API_VERSION,
            status: ExecCredentialStatus {
                token: &output.token,
                expiration_timestamp: output.expiry.to_rfc3339_opts(SecondsFormat::Secs, true),
            },
        };

        let mut out = self.out.lock().map_err(|_| anyhow!("output writer poisoned"))?;
        serde_json::to_writer(&mut *out, &credential).context("could not encode the credential")?;
        out.write_all(b"\n").context("could not write the credential")?;
        out.flush().context("could not flush the credential")?;
        debug!(expiry = %output.expiry, "credential written");
        Ok(())
    }
}
