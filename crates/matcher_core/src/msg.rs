use crate::{GroupId, JdExtraction, PointerReport, RequestId, RequestKind, TagId, UploadFile};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked (or dropped) a JD document; `None` when the picker was dismissed.
    JdFileSelected(Option<UploadFile>),
    /// JD text field lost focus with this content.
    JdTextCommitted(String),
    /// Backend returned groups and exclusions for a JD.
    JdExtracted {
        request_id: RequestId,
        extraction: JdExtraction,
    },
    /// User clicked "add group".
    AddGroupClicked,
    /// User clicked the removal control in a group title.
    GroupRemoveClicked { group: GroupId },
    /// User clicked the trailing "add keyword" affordance of a group.
    AddKeywordClicked { group: GroupId },
    /// User double-activated a tag label.
    TagEditStarted { tag: TagId },
    /// Text typed into the open inline input.
    EditorInput(String),
    /// Enter pressed in the open inline input.
    EditorConfirmed,
    /// Escape pressed in the open inline input.
    EditorCancelled,
    /// The open inline input lost focus.
    EditorBlurred,
    /// User clicked the removal control of a tag.
    TagRemoveClicked { tag: TagId },
    /// A drag ended with `tag` dropped into `group` at `index`.
    TagDropped {
        tag: TagId,
        group: GroupId,
        index: usize,
    },
    /// User clicked "generate boolean".
    GenerateBooleanClicked,
    /// Backend returned a boolean query.
    BooleanGenerated { request_id: RequestId, query: String },
    /// User picked (or dropped) a resume; `None` clears the selection.
    ResumeSelected(Option<UploadFile>),
    /// Target-match slider moved.
    TargetMatchChanged(u32),
    /// User clicked "generate pointers".
    GeneratePointersClicked,
    /// Backend returned match analysis and suggested bullets.
    PointersGenerated {
        request_id: RequestId,
        report: PointerReport,
    },
    /// A backend request failed.
    RequestFailed {
        request_id: RequestId,
        kind: RequestKind,
        message: String,
    },
    /// A local input (typically a file) could not be used.
    InputRejected(String),
}
