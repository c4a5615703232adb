//! Transport seams bridging the transfer crate to HTTP.
//!
//! The upload session only sees these trait implementations; client
//! errors are flattened to strings here because the session reports
//! them inside its own chunk/init context.

use std::future::Future;
use std::pin::Pin;

use filestore_transfer::{
    ByteRange, ChunkTransport, SourceMaterializer, TransferError, UploadMetadata, UploadTarget,
};

use crate::client::Client;

impl ChunkTransport for Client {
    fn init_upload(
        &self,
        target: &UploadTarget,
        metadata: &UploadMetadata,
    ) -> Pin<Box<dyn Future<Output = Result<String, TransferError>> + Send + '_>> {
        let target = target.clone();
        let metadata = metadata.clone();
        Box::pin(async move {
            let result = match target.file_id.as_deref() {
                Some(id) => {
                    self.update_file(id, metadata.access, &metadata.source_path)
                        .await
                }
                None => {
                    self.create_file(metadata.access, &metadata.source_path)
                        .await
                }
            };
            result.map_err(|e| TransferError::Init(e.to_string()))
        })
    }

    fn send_chunk(
        &self,
        file_id: &str,
        range: ByteRange,
        total_size: usize,
        data: &[u8],
    ) -> Pin<Box<dyn Future<Output = Result<(), TransferError>> + Send + '_>> {
        let file_id = file_id.to_string();
        let data = data.to_vec();
        Box::pin(async move {
            self.upload_chunk(&file_id, range, total_size, &data)
                .await
                .map_err(|e| TransferError::Transport(e.to_string()))
        })
    }
}

impl SourceMaterializer for Client {
    fn materialize(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, TransferError>> + Send + '_>> {
        let url = url.to_string();
        Box::pin(async move {
            self.fetch_attachment(&url)
                .await
                .map_err(|e| TransferError::Source(format!(r#"URL "{url}" unreachable: {e}"#)))
        })
    }
}
