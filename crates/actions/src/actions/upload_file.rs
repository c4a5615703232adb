use tokio::sync::mpsc;
use tracing::info;

use filestore_client::Client;
use filestore_protocol::types::UploadOutcome;
use filestore_protocol::{ComponentConfig, Message};
use filestore_transfer::{UploadMetadata, UploadSession, UploadTarget};

use super::materialize_source;
use crate::validation::{require_access, require_str};
use crate::{ActionError, ActionEvent, emit_data, fail};

/// Creates a new file from the incoming message and uploads its content.
///
/// One metadata request allocates the file id, then the buffered
/// payload goes out in ranged chunks addressed to that id.
pub async fn upload_file(
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
    let source = require_str(&msg.body, "source")?;

    let client = Client::new(cfg)?;
    let buffer = materialize_source(msg, &client).await?;

    let metadata = UploadMetadata {
        access,
        source_path: source.to_string(),
    };
    let file_id = UploadSession::new(&client)
        .run(&UploadTarget::create(), &metadata, &buffer)
        .await?;

    info!(file_id = %file_id, bytes = buffer.len(), "file uploaded");

    let outcome = UploadOutcome {
        message: format!("successfully uploaded file {file_id}"),
        file_id,
    };
    Ok(Message::with_body(serde_json::to_value(&outcome)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::testutil::{config_for, drain, events_channel, mock_server};

    #[tokio::test]
    async fn uploads_inline_data_and_emits_outcome() {
        let (url, captured, handle) = mock_server(vec![
            (200, r#"{"fileId":"f-9"}"#.to_string()),
            (200, "{}".to_string()),
        ])
        .await;
        let (tx, mut rx) = events_channel();

        let msg = Message::with_body(json!({
            "access": "private",
            "source": "notes/a.txt",
            "data": "hello",
        }));
        upload_file(&msg, &config_for(&url), &tx).await.unwrap();

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        let ActionEvent::Data(out) = &events[0] else {
            panic!("expected a data event, got {events:?}");
        };
        assert_eq!(out.body["fileId"], "f-9");
        assert_eq!(out.body["message"], "successfully uploaded file f-9");

        let reqs = captured.lock().unwrap();
        assert!(reqs[0].starts_with("POST /api/v2/file HTTP/1.1"));
        assert!(reqs[1].starts_with("PATCH /api/v2/file/f-9 HTTP/1.1"));
        assert!(reqs[1].ends_with("hello"));

        handle.abort();
    }

    #[tokio::test]
    async fn attachment_used_when_no_inline_data() {
        let (url, captured, handle) = mock_server(vec![
            (200, "attachment-bytes".to_string()),
            (200, r#"{"fileId":"f-2"}"#.to_string()),
            (200, "{}".to_string()),
        ])
        .await;
        let (tx, mut rx) = events_channel();

        let msg = Message::with_body(json!({"access": "public", "source": "b.bin"}))
            .with_attachment("b.bin", format!("{url}/stored/b.bin"));
        upload_file(&msg, &config_for(&url), &tx).await.unwrap();

        let events = drain(&mut rx);
        let ActionEvent::Data(out) = &events[0] else {
            panic!("expected a data event");
        };
        assert_eq!(out.body["fileId"], "f-2");

        let reqs = captured.lock().unwrap();
        assert!(reqs[0].starts_with("GET /stored/b.bin HTTP/1.1"));
        assert!(reqs[1].starts_with("POST /api/v2/file HTTP/1.1"));
        assert!(reqs[2].ends_with("attachment-bytes"));

        handle.abort();
    }

    #[tokio::test]
    async fn invalid_access_rejected_before_network() {
        let (tx, mut rx) = events_channel();

        let msg = Message::with_body(json!({
            "access": "internal",
            "source": "a",
            "data": "x",
        }));
        let err = upload_file(&msg, &config_for("http://127.0.0.1:1"), &tx)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("access"), "{err}");
        let events = drain(&mut rx);
        assert!(matches!(events[0], ActionEvent::Error(_)));
        assert_eq!(events[1], ActionEvent::End);
    }

    #[tokio::test]
    async fn missing_source_is_named() {
        let (tx, _rx) = events_channel();
        let msg = Message::with_body(json!({"access": "private", "data": "x"}));
        let err = upload_file(&msg, &config_for("http://127.0.0.1:1"), &tx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("msg.body.source"), "{err}");
    }

    #[tokio::test]
    async fn missing_payload_is_an_error() {
        let (tx, _rx) = events_channel();
        let msg = Message::with_body(json!({"access": "private", "source": "a"}));
        let err = upload_file(&msg, &config_for("http://127.0.0.1:1"), &tx)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("msg.body.data"), "{err}");
    }

    #[tokio::test]
    async fn missing_api_key_rejected() {
        let (tx, _rx) = events_channel();
        let mut cfg = config_for("http://127.0.0.1:1");
        cfg.api_key = String::new();
        let msg = Message::with_body(json!({
            "access": "private",
            "source": "a",
            "data": "x",
        }));
        let err = upload_file(&msg, &cfg, &tx).await.unwrap_err();
        assert!(err.to_string().contains("cfg.apiKey"), "{err}");
    }
}
