//! Wire types shared by the Filestore connector crates.
//!
//! Covers the workflow-platform message envelope, the component
//! configuration, and the JSON bodies exchanged with the Filestore API.

pub mod config;
pub mod constants;
pub mod envelope;
pub mod types;

pub use config::{ComponentConfig, ConfigError};
pub use envelope::{Attachment, Message};
pub use types::{Access, InitUploadRequest, InitUploadResponse, UploadOutcome};
