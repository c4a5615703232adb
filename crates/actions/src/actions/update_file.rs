use tokio::sync::mpsc;
use tracing::info;

use filestore_client::Client;
use filestore_protocol::types::UploadOutcome;
use filestore_protocol::{ComponentConfig, Message};
use filestore_transfer::{UploadMetadata, UploadSession, UploadTarget};

use super::materialize_source;
use crate::validation::{require_access, require_str};
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Replaces the content of an existing file.
///
/// Same pipeline as the create-upload, but the metadata request goes
/// to the file addressed by `fileToUpdate` and the chunks reuse that
/// id instead of a newly minted one.
pub async fn update_file(
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
    let access = require_access(&msg.body)?;
    let file_path = require_str(&msg.body, "filePath")?;
    let file_to_update = require_str(&msg.body, "fileToUpdate")?;

    let client = Client::new(cfg)?;
    let buffer = materialize_source(msg, &client).await?;

    let metadata = UploadMetadata {
        access,
        source_path: file_path.to_string(),
    };
    let file_id = UploadSession::new(&client)
        .run(&UploadTarget::update(file_to_update), &metadata, &buffer)
        .await?;

    info!(file_id = %file_id, bytes = buffer.len(), "file updated");

    let outcome = UploadOutcome {
        message: format!("successfully updated file {file_id}"),
        file_id,
    };
    Ok(Message::with_body(serde_json::to_value(&outcome)?))
}
