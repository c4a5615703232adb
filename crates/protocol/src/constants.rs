//! Header names and paths of the Filestore HTTP API.

/// Header carrying the API key.
pub const HEADER_API_KEY: &str = "x-api-key";

/// Header carrying the tenant identifier.
pub const HEADER_TENANT: &str = "x-dxp-tenant";

/// Collection path of the file resource, relative to the server base URL.
pub const FILE_PATH: &str = "api/v2/file";

/// Marker sent in the metadata request to select the chunked upload protocol.
pub const UPLOAD_TYPE_RESUMABLE: &str = "resumable";
