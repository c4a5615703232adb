//! Chunked resumable upload core for the Filestore API.
//!
//! A resumable upload is an initial metadata request that allocates a
//! file id, followed by `Content-Range` chunk requests that cover the
//! buffered payload in ascending order, one request at a time.

mod planner;
mod session;

pub use planner::{ByteRange, plan_chunks};
pub use session::{
    ChunkTransport, SourceMaterializer, UploadMetadata, UploadSession, UploadTarget,
};

/// Smallest chunk the server accepts: 5 MiB.
pub const MIN_CHUNK_SIZE: usize = 5 * 1024 * 1024;

/// Largest chunk the server accepts: 50 MiB.
pub const MAX_CHUNK_SIZE: usize = 50 * 1024 * 1024;

/// Default chunk size: 10 MiB.
///
/// Larger chunks reduce per-chunk request overhead; the value must stay
/// within [`MIN_CHUNK_SIZE`]..=[`MAX_CHUNK_SIZE`].
pub const DEFAULT_CHUNK_SIZE: usize = 10 * 1024 * 1024;

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("chunk size {0} is out of bounds (5 MiB minimum, 50 MiB maximum)")]
    InvalidChunkSize(usize),

    #[error("initial upload request failed: {0}")]
    Init(String),

    #[error("failed to upload chunk {index}/{total}: {source}")]
    Chunk {
        index: usize,
        total: usize,
        #[source]
        source: Box<TransferError>,
    },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("source unreachable: {0}")]
    Source(String),
}
