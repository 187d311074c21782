//! Keyword groups as an explicit, ordered model.
//!
//! Groups and tags carry stable ids so gestures that target them (edit, drag,
//! remove) stay valid while positions change. Positions are what the user
//! sees; ids are what messages carry.

pub type GroupId = u64;
pub type TagId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTag {
    id: TagId,
    text: String,
}

impl KeywordTag {
    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    id: GroupId,
    tags: Vec<KeywordTag>,
}

impl KeywordGroup {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn tags(&self) -> &[KeywordTag] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Ordered set of keyword groups plus the id allocators for groups and tags.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupRegistry {
    groups: Vec<KeywordGroup>,
    next_group_id: GroupId,
    next_tag_id: TagId,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Replace every group with one group per entry of `groups`, keeping
    /// keyword order. Ids keep increasing across seeds so stale ids held by
    /// in-flight gestures never alias new tags.
    pub fn seed(&mut self, groups: Vec<Vec<String>>) {
        self.groups.clear();
        for keywords in groups {
            let group_id = self.add_group();
            for keyword in keywords {
                self.push_tag(group_id, keyword);
            }
        }
    }

    /// Append an empty group and return its id.
    pub fn add_group(&mut self) -> GroupId {
        self.next_group_id += 1;
        let id = self.next_group_id;
        self.groups.push(KeywordGroup {
            id,
            tags: Vec::new(),
        });
        id
    }

    /// Remove a group with all of its tags. Returns `false` for unknown ids.
    pub fn remove_group(&mut self, group: GroupId) -> bool {
        match self.group_index(group) {
            Some(index) => {
                self.groups.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn group(&self, group: GroupId) -> Option<&KeywordGroup> {
        self.groups.iter().find(|g| g.id == group)
    }

    pub fn tag(&self, tag: TagId) -> Option<&KeywordTag> {
        self.locate_tag(tag)
            .map(|(group_index, tag_index)| &self.groups[group_index].tags[tag_index])
    }

    /// Group that currently owns `tag`.
    pub fn group_of(&self, tag: TagId) -> Option<GroupId> {
        self.locate_tag(tag)
            .map(|(group_index, _)| self.groups[group_index].id)
    }

    /// Append a tag to the end of `group`.
    pub fn push_tag(&mut self, group: GroupId, text: impl Into<String>) -> Option<TagId> {
        let index = self.group(group)?.tags.len();
        self.insert_tag(group, index, text)
    }

    /// Insert a tag at `index` (clamped to the group length).
    pub fn insert_tag(
        &mut self,
        group: GroupId,
        index: usize,
        text: impl Into<String>,
    ) -> Option<TagId> {
        let group_index = self.group_index(group)?;
        self.next_tag_id += 1;
        let id = self.next_tag_id;
        let tags = &mut self.groups[group_index].tags;
        let index = index.min(tags.len());
        tags.insert(
            index,
            KeywordTag {
                id,
                text: text.into(),
            },
        );
        Some(id)
    }

    pub fn set_tag_text(&mut self, tag: TagId, text: impl Into<String>) -> bool {
        match self.locate_tag(tag) {
            Some((group_index, tag_index)) => {
                self.groups[group_index].tags[tag_index].text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn remove_tag(&mut self, tag: TagId) -> bool {
        match self.locate_tag(tag) {
            Some((group_index, tag_index)) => {
                self.groups[group_index].tags.remove(tag_index);
                true
            }
            None => false,
        }
    }

    /// Move `tag` into `to_group` at `index`.
    ///
    /// `index` addresses the target list after the tag has been taken out of
    /// its source, so moving within one group behaves like a sortable list:
    /// `move_tag(t, same_group, 0)` makes `t` the first tag. Out-of-range
    /// indices append.
    pub fn move_tag(&mut self, tag: TagId, to_group: GroupId, index: usize) -> bool {
        let Some(target_index) = self.group_index(to_group) else {
            return false;
        };
        let Some((source_index, tag_index)) = self.locate_tag(tag) else {
            return false;
        };
        let moved = self.groups[source_index].tags.remove(tag_index);
        let tags = &mut self.groups[target_index].tags;
        let index = index.min(tags.len());
        tags.insert(index, moved);
        true
    }

    fn group_index(&self, group: GroupId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == group)
    }

    fn locate_tag(&self, tag: TagId) -> Option<(usize, usize)> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(group_index, group)| {
                group
                    .tags
                    .iter()
                    .position(|t| t.id == tag)
                    .map(|tag_index| (group_index, tag_index))
            })
    }
}

/// Excluded keywords as received from extraction. Replaced, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExcludeList {
    keywords: Vec<String>,
}

impl ExcludeList {
    pub fn replace(&mut self, keywords: Vec<String>) {
        self.keywords = keywords;
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}
