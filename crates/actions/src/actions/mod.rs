//! Action entry points, one per operation the platform can invoke.

mod delete_file_by_id;
mod get_file_data;
mod lookup_file_by_id;
mod raw_request;
mod update_file;
mod upload_file;

pub use delete_file_by_id::delete_file_by_id;
pub use get_file_data::get_file_data;
pub use lookup_file_by_id::lookup_file_by_id;
pub use raw_request::raw_request;
pub use update_file::update_file;
pub use upload_file::upload_file;

use filestore_client::Client;
use filestore_protocol::Message;
use filestore_transfer::SourceMaterializer as _;

use crate::ActionError;
use crate::validation::optional_str;

/// Buffers the upload payload.
///
/// The inline `data` body field wins when present; otherwise the
/// message's attachment is fetched and buffered fully before chunking.
pub(crate) async fn materialize_source(
    msg: &Message,
    client: &Client,
) -> Result<Vec<u8>, ActionError> {
    if let Some(data) = optional_str(&msg.body, "data")? {
        return Ok(data.as_bytes().to_vec());
    }

    let Some(attachment) = msg.first_attachment() else {
        return Err(ActionError::Input {
            field: "data",
            expected: "a string or a message attachment",
            received: "undefined".into(),
        });
    };
    Ok(client.materialize(&attachment.url).await?)
}
