use crate::sync::CanonicalGroups;
use crate::{RequestId, RequestKind, UploadFile};

/// I/O requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /extract-jd` with the document as multipart field `file`.
    ExtractJdFile {
        request_id: RequestId,
        file: UploadFile,
    },
    /// `POST /extract-jd-text` with the trimmed text.
    ExtractJdText { request_id: RequestId, text: String },
    /// `POST /generate-boolean` with the canonical groups and exclusions.
    GenerateBoolean {
        request_id: RequestId,
        groups: CanonicalGroups,
        exclude: Vec<String>,
    },
    /// `POST /generate-pointers` with the resume, target and stored JD text.
    GeneratePointers {
        request_id: RequestId,
        resume: UploadFile,
        target_match: u8,
        jd_text: String,
    },
}

impl Effect {
    pub fn request_id(&self) -> RequestId {
        match self {
            Effect::ExtractJdFile { request_id, .. }
            | Effect::ExtractJdText { request_id, .. }
            | Effect::GenerateBoolean { request_id, .. }
            | Effect::GeneratePointers { request_id, .. } => *request_id,
        }
    }

    pub fn kind(&self) -> RequestKind {
        match self {
            Effect::ExtractJdFile { .. } | Effect::ExtractJdText { .. } => RequestKind::ExtractJd,
            Effect::GenerateBoolean { .. } => RequestKind::GenerateBoolean,
            Effect::GeneratePointers { .. } => RequestKind::GeneratePointers,
        }
    }
}
