use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::UPLOAD_TYPE_RESUMABLE;

/// Error for an `access` value outside the recognized set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(r#"access needs to be one of "private", "public", the "{0}" was received"#)]
pub struct InvalidAccess(pub String);

/// Visibility of a stored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Access {
    #[serde(rename = "private")]
    Private,
    #[serde(rename = "public")]
    Public,
}

impl Access {
    /// Returns the wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Private => "private",
            Access::Public => "public",
        }
    }
}

impl FromStr for Access {
    type Err = InvalidAccess;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Access::Private),
            "public" => Ok(Access::Public),
            other => Err(InvalidAccess(other.to_string())),
        }
    }
}

/// JSON body of the initial metadata request.
///
/// Sent once per upload, before any chunk, to allocate or re-announce
/// the file on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadRequest {
    pub access: Access,
    pub source: String,
    pub upload_type: String,
}

impl InitUploadRequest {
    /// Builds the body selecting the chunked upload protocol.
    pub fn resumable(access: Access, source: impl Into<String>) -> Self {
        Self {
            access,
            source: source.into(),
            upload_type: UPLOAD_TYPE_RESUMABLE.to_string(),
        }
    }
}

/// Response of the initial metadata request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

/// Standardized success body emitted after an upload or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub message: String,
    pub file_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Access::Private).unwrap(), r#""private""#);
        assert_eq!(serde_json::to_string(&Access::Public).unwrap(), r#""public""#);
    }

    #[test]
    fn access_parses_recognized_values() {
        assert_eq!("private".parse::<Access>().unwrap(), Access::Private);
        assert_eq!("public".parse::<Access>().unwrap(), Access::Public);
    }

    #[test]
    fn access_rejects_anything_else() {
        let err = "restricted".parse::<Access>().unwrap_err();
        assert_eq!(err, InvalidAccess("restricted".into()));
        assert!(err.to_string().contains("restricted"));
    }

    #[test]
    fn access_rejects_wrong_case() {
        assert!("Private".parse::<Access>().is_err());
    }

    #[test]
    fn init_request_carries_resumable_marker() {
        let body = InitUploadRequest::resumable(Access::Public, "reports/q3.pdf");
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""uploadType":"resumable""#));
        assert!(json.contains(r#""access":"public""#));
        assert!(json.contains(r#""source":"reports/q3.pdf""#));
    }

    #[test]
    fn init_response_tolerates_extra_fields() {
        let resp: InitUploadResponse =
            serde_json::from_str(r#"{"fileId":"f-7","status":"pending"}"#).unwrap();
        assert_eq!(resp.file_id.as_deref(), Some("f-7"));
    }

    #[test]
    fn init_response_without_file_id() {
        let resp: InitUploadResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(resp.file_id.is_none());
    }

    #[test]
    fn outcome_uses_camel_case_file_id() {
        let outcome = UploadOutcome {
            message: "successfully uploaded file f-1".into(),
            file_id: "f-1".into(),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""fileId":"f-1""#));
    }
}
