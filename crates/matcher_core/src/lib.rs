//! Resume matcher core: keyword-group editor model and pure state machine.
mod editor;
mod effect;
mod keywords;
mod msg;
mod request;
mod state;
mod sync;
mod update;
mod view_model;

pub use editor::{EditOutcome, Editor};
pub use effect::Effect;
pub use keywords::{ExcludeList, GroupId, GroupRegistry, KeywordGroup, KeywordTag, TagId};
pub use msg::Msg;
pub use request::{
    ErrorNotice, ErrorSource, JdExtraction, PointerReport, RequestId, RequestKind, UploadFile,
};
pub use state::{AppState, DEFAULT_TARGET_MATCH, MAX_TARGET_MATCH};
pub use sync::{canonical_groups, CanonicalGroups};
pub use update::update;
pub use view_model::{AppViewModel, ClassificationView, EditorView, GroupView, TagView};
