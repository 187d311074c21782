use crate::keywords::{GroupId, GroupRegistry, TagId};

/// The single open inline input, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Editor {
    /// Editing the text of an existing tag.
    Tag {
        tag: TagId,
        original: String,
        draft: String,
    },
    /// Typing a new keyword at the end of a group.
    NewKeyword { group: GroupId, draft: String },
}

/// Whether closing an editor changed the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Changed,
}

impl Editor {
    pub fn edit_tag(tag: TagId, current: &str) -> Self {
        let current = current.trim().to_string();
        Editor::Tag {
            tag,
            original: current.clone(),
            draft: current,
        }
    }

    pub fn new_keyword(group: GroupId) -> Self {
        Editor::NewKeyword {
            group,
            draft: String::new(),
        }
    }

    pub fn draft(&self) -> &str {
        match self {
            Editor::Tag { draft, .. } | Editor::NewKeyword { draft, .. } => draft,
        }
    }

    pub fn set_draft(&mut self, text: String) {
        match self {
            Editor::Tag { draft, .. } | Editor::NewKeyword { draft, .. } => *draft = text,
        }
    }

    /// Apply the trimmed draft to the registry.
    ///
    /// A non-empty draft replaces the tag text (or appends a new tag); an
    /// empty draft deletes the edited tag (or adds nothing). Targets that
    /// vanished while the editor was open are ignored.
    pub fn commit(self, registry: &mut GroupRegistry) -> EditOutcome {
        match self {
            Editor::Tag { tag, draft, .. } => {
                let value = draft.trim();
                let changed = if value.is_empty() {
                    registry.remove_tag(tag)
                } else {
                    registry.set_tag_text(tag, value)
                };
                outcome(changed)
            }
            Editor::NewKeyword { group, draft } => {
                let value = draft.trim();
                if value.is_empty() {
                    return EditOutcome::Unchanged;
                }
                outcome(registry.push_tag(group, value).is_some())
            }
        }
    }
}

fn outcome(changed: bool) -> EditOutcome {
    if changed {
        EditOutcome::Changed
    } else {
        EditOutcome::Unchanged
    }
}
