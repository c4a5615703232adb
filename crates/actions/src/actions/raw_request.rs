use tokio::sync::mpsc;
use tracing::debug;

use filestore_client::Client;
use filestore_protocol::{ComponentConfig, Message};

use crate::validation::{optional_headers, require_str};
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Forwards an arbitrary request to the API and emits the response.
///
/// The message supplies the method, a path relative to the configured
/// server, optional custom headers, and an optional JSON body.
pub async fn raw_request(
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
    let method = require_str(&msg.body, "requestType")?;
    let path = require_str(&msg.body, "url")?;
    let headers = optional_headers(&msg.body, "customHeaders")?;
    let body = msg.body.get("requestBody").filter(|v| !v.is_null());

    let client = Client::new(cfg)?;
    let result = client.raw_request(method, path, &headers, body).await?;
    debug!(method, path, "raw request completed");

    Ok(Message::with_body(result))
}
