//! Entrypoint for credential plugin binaries
//!
//! Wires the file token cache, the PEM trust pool and the client-go
//! credential writer around a caller-supplied [`Authenticator`].

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::auth::Authenticator;
use crate::cache::store::FileCacheStore;
use crate::config::request::TokenRequest;
use crate::config::settings::PluginSettings;
use crate::error::Result;
use crate::sinks::exec_credential::ExecCredentialWriter;
use crate::sinks::OutputSink;
use crate::trust::pem_pool::SystemTrustPoolFactory;
use crate::usecases::get_token::GetToken;
use crate::utils::logging;

/// Initialise logging from the environment and write the credential to stdout.
pub async fn run(authenticator: Arc<dyn Authenticator>, request: TokenRequest, cancel: CancellationToken) -> Result<()> {
    run_with_output(authenticator, request, Arc::new(ExecCredentialWriter::stdout()), cancel).await
}

/// Same as [`run`] with the credential going to `output`.
///
/// An empty cache directory in `request` is replaced by the one from settings.
pub async fn run_with_output(
    authenticator: Arc<dyn Authenticator>,
    mut request: TokenRequest,
    output: Arc<dyn OutputSink>,
    cancel: CancellationToken,
) -> Result<()> {
    let settings = PluginSettings::from_env();
    logging::init(&settings);

    if request.token_cache_dir.as_os_str().is_empty() {
        request.token_cache_dir = settings.token_cache_dir;
    }
    debug!(dir = %request.token_cache_dir.display(), "using token cache directory");

    GetToken::new(
        authenticator,
        Arc::new(FileCacheStore::new()),
        Arc::new(SystemTrustPoolFactory),
        output,
    )
    .run(&request, cancel)
    .await
}
