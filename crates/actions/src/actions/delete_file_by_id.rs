use tokio::sync::mpsc;
use tracing::info;

use filestore_client::Client;
use filestore_protocol::{ComponentConfig, Message};

use crate::validation::require_str;
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Deletes a file by id and emits the server's response.
pub async fn delete_file_by_id(
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
    let file_id = require_str(&msg.body, "fileToDelete")?;

    let client = Client::new(cfg)?;
    let result = client.delete_file(file_id).await?;
    info!(file_id, "file deleted");

    Ok(Message::with_body(result))
}
