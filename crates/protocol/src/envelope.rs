use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reference to a file held by the platform, reachable by URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
}

/// Envelope for messages exchanged with the workflow platform.
///
/// Incoming messages carry the action input in `body` plus zero or more
/// named attachments; outgoing messages are built with [`Message::with_body`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub body: serde_json::Value,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub attachments: HashMap<String, Attachment>,
}

impl Message {
    /// Creates an outgoing message with the given body and a fresh id.
    pub fn with_body(body: serde_json::Value) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            body,
            attachments: HashMap::new(),
        }
    }

    /// Creates a message with an empty object body (what triggers receive).
    pub fn empty() -> Self {
        Self::with_body(serde_json::Value::Object(serde_json::Map::new()))
    }

    /// Adds a named attachment reference.
    pub fn with_attachment(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.attachments
            .insert(name.into(), Attachment { url: url.into() });
        self
    }

    /// Returns any attachment carried by the message.
    ///
    /// Upload messages carry exactly one; the name the platform stored
    /// it under is not significant to the connector.
    pub fn first_attachment(&self) -> Option<&Attachment> {
        self.attachments.values().next()
    }
}
