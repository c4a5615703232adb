use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::mpsc;
use tracing::debug;

use filestore_client::Client;
use filestore_protocol::{ComponentConfig, Message};

use crate::validation::require_str;
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Downloads a file's content and emits it base64-encoded.
pub async fn get_file_data(
    msg: &Message,
    cfg: &ComponentConfig,
    events: &mpsc::Sender<ActionEvent>,
) -> Result<(), ActionError> {
    match run(msg, cfg).await {
        Ok(outgoing) => {
            emit_data(events, outgoing).await;
            Ok(())
        }
        Err(err) => Err(fail(events, err).await),
    }
}

async fn run(msg: &Message, cfg: &ComponentConfig) -> Result<Message, ActionError> {
    cfg.validate()?;
    let file_id = require_str(&msg.body, "fileId")?;

    let client = Client::new(cfg)?;
    let bytes = client.download_file(file_id).await?;
    debug!(file_id, size = bytes.len(), "file content downloaded");

    Ok(Message::with_body(serde_json::json!({
        "fileId": file_id,
        "size": bytes.len(),
        "data": STANDARD.encode(&bytes),
    })))
}
