//! Workflow-platform actions of the Filestore connector.
//!
//! Each action receives an incoming [`Message`] and the component
//! configuration, validates its inputs before touching the network,
//! performs the request(s) through [`filestore_client::Client`], and
//! emits the outcome on an explicit event channel. Terminal failures
//! are mirrored onto the channel (`Error` followed by `End`) before the
//! error is returned to the invoking platform.

pub mod actions;
pub mod triggers;
mod validation;
mod verify;

pub use verify::verify_credentials;

use tokio::sync::mpsc;

use filestore_protocol::Message;

/// Events an action emits back to the platform.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionEvent {
    /// An outgoing data message.
    Data(Message),
    /// A terminal failure, reported before the stream ends.
    Error(String),
    /// End of the action's output stream.
    End,
}

/// Errors surfaced to the platform by actions.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("error occurred in the Filestore component - {0}")]
    Config(#[from] filestore_protocol::ConfigError),

    #[error("msg.body.{field} is required and needs to be {expected}, the {received} was received in the Filestore component")]
    Input {
        field: &'static str,
        expected: &'static str,
        received: String,
    },

    #[error("error occurred in the Filestore component: {0}")]
    Client(#[from] filestore_client::Error),

    #[error("error occurred in the Filestore component: {0}")]
    Transfer(#[from] filestore_transfer::TransferError),

    #[error("error occurred in the Filestore component: {0}")]
    Json(#[from] serde_json::Error),

    #[error("the Filestore API is currently unavailable, try again later")]
    ServerUnavailable,
}

/// Reports a terminal failure on the event stream, then hands the
/// error back for the platform to re-raise.
pub(crate) async fn fail(events: &mpsc::Sender<ActionEvent>, err: ActionError) -> ActionError {
    let _ = events.send(ActionEvent::Error(err.to_string())).await;
    let _ = events.send(ActionEvent::End).await;
    err
}

/// Emits an outgoing data message.
pub(crate) async fn emit_data(events: &mpsc::Sender<ActionEvent>, msg: Message) {
    let _ = events.send(ActionEvent::Data(msg)).await;
}

#[cfg(test)]
pub(crate) mod testutil;
