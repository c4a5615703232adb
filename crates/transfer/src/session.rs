//! Upload session: the metadata request followed by the ordered chunk loop.
//!
//! `ChunkTransport` is implemented by the HTTP client. Using a trait
//! keeps the session logic decoupled from the wire and testable with
//! mocks.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, info};

use filestore_protocol::types::Access;

use crate::{
    ByteRange, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, TransferError, plan_chunks,
};

/// Addressing for one upload.
///
/// A present `file_id` updates that file in place; an absent one
/// creates a new file and lets the server mint the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTarget {
    pub file_id: Option<String>,
}

impl UploadTarget {
    /// Target for creating a new file.
    pub fn create() -> Self {
        Self { file_id: None }
    }

    /// Target for updating an existing file.
    pub fn update(file_id: impl Into<String>) -> Self {
        Self {
            file_id: Some(file_id.into()),
        }
    }
}

/// Descriptive fields sent once in the initial metadata request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadMetadata {
    pub access: Access,
    pub source_path: String,
}

/// Transport used to reach the remote file API.
pub trait ChunkTransport: Send + Sync {
    /// Sends the initial metadata request and returns the file id.
    fn init_upload(
        &self,
        target: &UploadTarget,
        metadata: &UploadMetadata,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransferError>> + Send + '_>>;

    /// Sends one chunk of the payload as a range-addressed request.
    fn send_chunk(
        &self,
        file_id: &str,
        range: ByteRange,
        total_size: usize,
        data: &[u8],
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + '_>>;
}

/// Resolves an attachment reference into an in-memory payload.
///
/// The whole payload is buffered before chunking begins; there is no
/// streaming read from the live source.
pub trait SourceMaterializer: Send + Sync {
    fn materialize(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, TransferError>> + Send + '_>>;
}

/// Drives one resumable upload from start to finish.
///
/// The session obtains the file id exactly once, then walks the chunk
/// plan in ascending order, awaiting each request before dispatching
/// the next. It is created per upload invocation and discarded after;
/// nothing persists across invocations, and the first failing chunk
/// aborts the transfer without retry.
#[derive(Debug)]
pub struct UploadSession<'a, T: ChunkTransport> {
    transport: &'a T,
    chunk_size: usize,
}

impl<'a, T: ChunkTransport> UploadSession<'a, T> {
    /// Creates a session with [`DEFAULT_CHUNK_SIZE`].
    pub fn new(transport: &'a T) -> Self {
        Self {
            transport,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Creates a session with a custom chunk size.
    ///
    /// Fails before any network call when the size is outside the
    /// bounds the server accepts.
    pub fn with_chunk_size(transport: &'a T, chunk_size: usize) -> Result<Self, TransferError> {
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(TransferError::InvalidChunkSize(chunk_size));
        }
        Ok(Self {
            transport,
            chunk_size,
        })
    }

    /// Runs the upload: metadata request, then every chunk in order.
    ///
    /// Returns the file id the rest of the flow should refer to.
    pub async fn run(
        &self,
        target: &UploadTarget,
        metadata: &UploadMetadata,
        buffer: &[u8],
    ) -> Result<String, TransferError> {
        let file_id = self.initiate(target, metadata).await?;
        self.transfer(&file_id, buffer).await?;
        Ok(file_id)
    }

    async fn initiate(
        &self,
        target: &UploadTarget,
        metadata: &UploadMetadata,
    ) -> Result<String, TransferError> {
        let file_id = self.transport.init_upload(target, metadata).await?;
        debug!(
            file_id = %file_id,
            update = target.file_id.is_some(),
            "upload initiated"
        );
        Ok(file_id)
    }

    async fn transfer(&self, file_id: &str, buffer: &[u8]) -> Result<(), TransferError> {
        let plan = plan_chunks(buffer.len(), self.chunk_size);
        let total = plan.len();

        for (i, range) in plan.iter().enumerate() {
            self.transport
                .send_chunk(file_id, *range, buffer.len(), &buffer[range.start..range.end])
                .await
                .map_err(|e| TransferError::Chunk {
                    index: i + 1,
                    total,
                    source: Box::new(e),
                })?;
            debug!(file_id = %file_id, chunk = i + 1, total, "chunk accepted");
        }

        info!(
            file_id = %file_id,
            chunks = total,
            bytes = buffer.len(),
            "transfer complete"
        );
        Ok(())
    }
}
