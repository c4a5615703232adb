use tokio::sync::mpsc;
use tracing::debug;

use filestore_client::Client;
use filestore_protocol::{ComponentConfig, Message};

use crate::validation::require_str;
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Fetches a file's metadata by id and emits it.
pub async fn lookup_file_by_id(
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
    let file_id = require_str(&msg.body, "fileToGet")?;

    let client = Client::new(cfg)?;
    let result = client.get_file(file_id).await?;
    debug!(file_id, "file metadata fetched");

    Ok(Message::with_body(result))
}
