use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Upload;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    ExtractJd,
    GenerateBoolean,
    GeneratePointers,
}

/// Body of `POST /extract-jd` and `POST /extract-jd-text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub text: Option<String>,
    pub groups: Vec<Vec<String>>,
    pub exclude: Vec<String>,
}

/// Body sent to `POST /generate-boolean`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooleanRequest {
    pub groups: Vec<Vec<String>>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BooleanResponse {
    pub boolean_query: String,
}

/// Multipart fields of `POST /generate-pointers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointersRequest {
    pub resume: Upload,
    pub target_match: u8,
    pub jd_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PointersResponse {
    pub match_score: f64,
    pub role_title: String,
    pub role_type: String,
    pub level: String,
    pub updated_pointers: Vec<String>,
}

/// JD extraction with the JD text that should be kept for pointer generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub groups: Vec<Vec<String>>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendRequest {
    ExtractJdFile(Upload),
    ExtractJdText(String),
    GenerateBoolean(BooleanRequest),
    GeneratePointers(PointersRequest),
}

impl BackendRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            BackendRequest::ExtractJdFile(_) | BackendRequest::ExtractJdText(_) => {
                RequestKind::ExtractJd
            }
            BackendRequest::GenerateBoolean(_) => RequestKind::GenerateBoolean,
            BackendRequest::GeneratePointers(_) => RequestKind::GeneratePointers,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Extracted(Extraction),
    Boolean(String),
    Pointers(PointersResponse),
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineEvent {
    pub request_id: RequestId,
    pub kind: RequestKind,
    pub result: Result<Reply, BackendError>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct BackendError {
    pub kind: FailureKind,
    pub message: String,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    InvalidRequest,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::InvalidRequest => write!(f, "invalid request"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
