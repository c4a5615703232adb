use tracing::info;

use filestore_client::{Client, CredentialStatus};
use filestore_protocol::ComponentConfig;

use crate::ActionError;

/// Verifies the configured credentials against the API.
///
/// Probes the file collection without an id; the server answers 400
/// for accepted credentials because no file id was supplied, so both
/// 2xx and 400 count as valid. A 5xx concludes nothing about the
/// credentials and is surfaced as its own error.
pub async fn verify_credentials(cfg: &ComponentConfig) -> Result<bool, ActionError> {
    cfg.validate()?;

    let client = Client::new(cfg)?;
    let status = client.verify_credentials().await?;
    info!(?status, "credentials verified");

    match status {
        CredentialStatus::Valid => Ok(true),
        CredentialStatus::Invalid => Ok(false),
        CredentialStatus::ServerError => Err(ActionError::ServerUnavailable),
    }
}
