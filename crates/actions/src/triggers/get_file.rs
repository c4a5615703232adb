use tokio::sync::mpsc;
use tracing::debug;

use filestore_client::Client;
use filestore_protocol::{ComponentConfig, ConfigError, Message};

use crate::{ActionError, ActionEvent, emit_data, fail};

/// Polling trigger: fetches one configured file and emits its metadata.
///
/// Triggers receive an empty message, so the file id comes from the
/// trigger configuration rather than the message body.
pub async fn get_file(
    file_id: &str,
    cfg: &ComponentConfig,
    events: &mpsc::Sender<ActionEvent>,
) -> Result<(), ActionError> {
    match run(file_id, cfg).await {
        Ok(outgoing) => {
            emit_data(events, outgoing).await;
            Ok(())
        }
        Err(err) => Err(fail(events, err).await),
    }
}

async fn run(file_id: &str, cfg: &ComponentConfig) -> Result<Message, ActionError> {
    cfg.validate()?;
    if file_id.trim().is_empty() {
        return Err(ConfigError::MissingField("fileId").into());
    }

    let client = Client::new(cfg)?;
    let result = client.get_file(file_id).await?;
    debug!(file_id, "trigger fetched file");

    Ok(Message::with_body(result))
}
