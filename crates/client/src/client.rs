//! Filestore API client.
//!
//! Async HTTP client using `reqwest` with API-key/tenant header
//! authentication.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::header::{CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use filestore_protocol::ComponentConfig;
use filestore_protocol::constants::{FILE_PATH, HEADER_API_KEY, HEADER_TENANT};
use filestore_protocol::types::{Access, InitUploadRequest, InitUploadResponse};
use filestore_transfer::ByteRange;

/// Characters escaped when a file id is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Errors from the Filestore client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} from {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response from {0} did not contain a fileId")]
    MissingFileId(String),

    #[error("cfg.{0} is not a valid header value")]
    InvalidHeader(&'static str),

    #[error("invalid request method: {0}")]
    InvalidMethod(String),
}

/// Outcome of a credential verification probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// The key and tenant were accepted.
    Valid,
    /// The key or tenant was rejected.
    Invalid,
    /// The server failed; nothing can be said about the credentials.
    ServerError,
}

/// Filestore API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client from the component configuration.
    ///
    /// The API key and tenant id become default headers sent with
    /// every request.
    pub fn new(cfg: &ComponentConfig) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(HEADER_API_KEY),
            HeaderValue::from_str(&cfg.api_key).map_err(|_| Error::InvalidHeader("apiKey"))?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_TENANT),
            HeaderValue::from_str(&cfg.tenant_id).map_err(|_| Error::InvalidHeader("tenantId"))?,
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url().to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/{FILE_PATH}", self.base_url)
    }

    fn file_url(&self, file_id: &str) -> String {
        let encoded = utf8_percent_encode(file_id, PATH_SEGMENT);
        format!("{}/{FILE_PATH}/{encoded}", self.base_url)
    }

    /// Sends the request and parses the response body as JSON.
    ///
    /// An empty success body becomes `Value::Null`; a non-2xx status
    /// becomes [`Error::Api`] carrying the target URL.
    async fn execute_json(
        &self,
        req: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<serde_json::Value, Error> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Allocates a new file and returns its id.
    ///
    /// `POST {base}/api/v2/file` with `uploadType: "resumable"`; the
    /// chunk requests that follow address the returned id.
    pub async fn create_file(&self, access: Access, source: &str) -> Result<String, Error> {
        let url = self.collection_url();
        let body = InitUploadRequest::resumable(access, source);
        let value = self
            .execute_json(self.http.post(&url).json(&body), &url)
            .await?;

        let resp: InitUploadResponse = serde_json::from_value(value)?;
        resp.file_id.ok_or(Error::MissingFileId(url))
    }

    /// Re-announces metadata for an existing file before its content
    /// is replaced.
    ///
    /// `PATCH {base}/api/v2/file/{id}`. The server echoes the id; when
    /// the response omits it, the requested id is kept.
    pub async fn update_file(
        &self,
        file_id: &str,
        access: Access,
        source: &str,
    ) -> Result<String, Error> {
        let url = self.file_url(file_id);
        let body = InitUploadRequest::resumable(access, source);
        let value = self
            .execute_json(self.http.patch(&url).json(&body), &url)
            .await?;

        let echoed = match value {
            serde_json::Value::Null => None,
            value => serde_json::from_value::<InitUploadResponse>(value)?.file_id,
        };
        Ok(echoed.unwrap_or_else(|| file_id.to_string()))
    }

    /// Sends one chunk of file content.
    ///
    /// `PATCH {base}/api/v2/file/{id}` carrying the raw bytes with a
    /// `Content-Range` of the form `bytes {start}-{end-1}/{total}`.
    /// Exactly one request per call; nothing is retried here.
    pub async fn upload_chunk(
        &self,
        file_id: &str,
        range: ByteRange,
        total_size: usize,
        data: &[u8],
    ) -> Result<(), Error> {
        let url = self.file_url(file_id);
        let resp = self
            .http
            .patch(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_RANGE, range.content_range(total_size))
            .header(CONTENT_LENGTH, data.len())
            .body(data.to_vec())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }
        debug!(file_id, start = range.start, end = range.end, "chunk accepted");
        Ok(())
    }

    /// Fetches file metadata.
    pub async fn get_file(&self, file_id: &str) -> Result<serde_json::Value, Error> {
        let url = self.file_url(file_id);
        self.execute_json(self.http.get(&url), &url).await
    }

    /// Downloads the file content.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, Error> {
        let url = format!("{}/download", self.file_url(file_id));
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                url,
                body,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }

    /// Deletes a file.
    pub async fn delete_file(&self, file_id: &str) -> Result<serde_json::Value, Error> {
        let url = self.file_url(file_id);
        self.execute_json(self.http.delete(&url), &url).await
    }

    /// Performs an arbitrary request against the API.
    ///
    /// `path` is joined to the configured base URL. Custom headers are
    /// merged over the default authentication headers.
    pub async fn raw_request(
        &self,
        method: &str,
        path: &str,
        headers: &[(String, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, Error> {
        let method = reqwest::Method::from_bytes(method.to_uppercase().as_bytes())
            .map_err(|_| Error::InvalidMethod(method.to_string()))?;
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));

        let mut req = self.http.request(method, &url);
        for (name, value) in headers {
            req = req.header(name, value);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute_json(req, &url).await
    }

    /// Probes the API with the configured credentials.
    ///
    /// The probe hits the file collection without an id, so the server
    /// answers 400 even for accepted credentials; both 2xx and 400
    /// therefore mean valid. A 5xx says nothing about the credentials
    /// and is reported separately.
    pub async fn verify_credentials(&self) -> Result<CredentialStatus, Error> {
        let url = format!("{}/", self.collection_url());
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();

        let outcome = if status.is_success() || status.as_u16() == 400 {
            CredentialStatus::Valid
        } else if status.is_server_error() {
            CredentialStatus::ServerError
        } else {
            CredentialStatus::Invalid
        };
        debug!(status = status.as_u16(), ?outcome, "credential probe");
        Ok(outcome)
    }

    /// Fetches an attachment by URL and buffers it fully.
    pub async fn fetch_attachment(&self, url: &str) -> Result<Vec<u8>, Error> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body: "attachment fetch failed".into(),
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}
