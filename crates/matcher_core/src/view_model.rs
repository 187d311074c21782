use crate::{GroupId, RequestKind, TagId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub groups: Vec<GroupView>,
    pub exclude: Vec<String>,
    pub canonical: Vec<Vec<String>>,
    pub editor: Option<EditorView>,
    pub jd_text: String,
    pub resume_file: Option<String>,
    pub target_match: u8,
    pub target_match_label: String,
    pub boolean_query: String,
    pub match_score: String,
    pub classification: Option<ClassificationView>,
    /// Suggested bullets, one entry per pointer.
    pub updated_pointers: Vec<String>,
    /// The same bullets joined with blank lines for a single text area.
    pub suggestions: String,
    pub busy: Vec<RequestKind>,
    pub error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub group_id: GroupId,
    /// Positional title, "Group 1" onwards.
    pub title: String,
    pub tags: Vec<TagView>,
    /// Draft of the open "add keyword" input in this group.
    pub new_keyword: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagView {
    pub tag_id: TagId,
    pub text: String,
    /// Draft shown in place of the label while the tag is being edited.
    pub editing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorView {
    Tag { tag_id: TagId, original: String },
    NewKeyword { group_id: GroupId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationView {
    pub role_title: String,
    pub role_type: String,
    pub level: String,
}

impl AppViewModel {
    /// Resolve a 1-based group position to its id.
    pub fn group_at(&self, position: usize) -> Option<GroupId> {
        position
            .checked_sub(1)
            .and_then(|index| self.groups.get(index))
            .map(|group| group.group_id)
    }

    /// Resolve 1-based group and tag positions to the tag id.
    pub fn tag_at(&self, group_position: usize, tag_position: usize) -> Option<TagId> {
        let group = self.groups.get(group_position.checked_sub(1)?)?;
        group
            .tags
            .get(tag_position.checked_sub(1)?)
            .map(|tag| tag.tag_id)
    }
}
