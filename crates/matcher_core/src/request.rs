use std::fmt;

pub type RequestId = u64;

/// Which output a backend request feeds. Both JD extraction paths share one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestKind {
    ExtractJd,
    GenerateBoolean,
    GeneratePointers,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::ExtractJd => write!(f, "keyword extraction"),
            RequestKind::GenerateBoolean => write!(f, "boolean query"),
            RequestKind::GeneratePointers => write!(f, "resume pointers"),
        }
    }
}

/// A user-selected document, already read into memory.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Result of JD extraction, with `text` already resolved to the JD text to keep.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JdExtraction {
    pub text: String,
    pub groups: Vec<Vec<String>>,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointerReport {
    pub match_score: f64,
    pub role_title: String,
    pub role_type: String,
    pub level: String,
    pub updated_pointers: Vec<String>,
}

/// Where a visible error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSource {
    Request(RequestKind),
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub source: ErrorSource,
    pub message: String,
}
