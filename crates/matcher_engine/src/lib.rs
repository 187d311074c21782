//! Resume matcher engine: backend client, request execution and file IO.
mod client;
mod engine;
mod persist;
mod types;
mod upload;

pub use client::{Backend, BackendSettings, ReqwestBackend};
pub use engine::{execute, EngineHandle};
pub use persist::{ensure_dir, write_atomic, PersistError};
pub use types::{
    BackendError, BackendRequest, BooleanRequest, BooleanResponse, EngineEvent, Extraction,
    ExtractResponse, FailureKind, PointersRequest, PointersResponse, Reply, RequestId,
    RequestKind,
};
pub use upload::{Upload, UploadError};
