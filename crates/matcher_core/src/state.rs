use std::collections::BTreeMap;

use crate::editor::{EditOutcome, Editor};
use crate::keywords::{ExcludeList, GroupId, GroupRegistry, TagId};
use crate::sync::{canonical_groups, CanonicalGroups};
use crate::view_model::{AppViewModel, ClassificationView, EditorView, GroupView, TagView};
use crate::{
    Effect, ErrorNotice, ErrorSource, JdExtraction, PointerReport, RequestId, RequestKind,
    UploadFile,
};

pub const DEFAULT_TARGET_MATCH: u8 = 80;
pub const MAX_TARGET_MATCH: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    registry: GroupRegistry,
    exclude: ExcludeList,
    editor: Option<Editor>,
    canonical: CanonicalGroups,
    jd_text: String,
    resume: Option<UploadFile>,
    target_match: u8,
    boolean_query: String,
    pointer_report: Option<PointerReport>,
    in_flight: BTreeMap<RequestKind, u32>,
    error: Option<ErrorNotice>,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            registry: GroupRegistry::new(),
            exclude: ExcludeList::default(),
            editor: None,
            canonical: Vec::new(),
            jd_text: String::new(),
            resume: None,
            target_match: DEFAULT_TARGET_MATCH,
            boolean_query: String::new(),
            pointer_report: None,
            in_flight: BTreeMap::new(),
            error: None,
            next_request_id: 0,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Canonical groups as of the last resync.
    pub fn canonical(&self) -> &CanonicalGroups {
        &self.canonical
    }

    pub fn jd_text(&self) -> &str {
        &self.jd_text
    }

    pub fn has_resume(&self) -> bool {
        self.resume.is_some()
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight.values().sum()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> AppViewModel {
        let groups = self
            .registry
            .groups()
            .iter()
            .enumerate()
            .map(|(index, group)| {
                let tags = group
                    .tags()
                    .iter()
                    .map(|tag| TagView {
                        tag_id: tag.id(),
                        text: tag.text().to_string(),
                        editing: match &self.editor {
                            Some(Editor::Tag { tag: id, draft, .. }) if *id == tag.id() => {
                                Some(draft.clone())
                            }
                            _ => None,
                        },
                    })
                    .collect();
                let new_keyword = match &self.editor {
                    Some(Editor::NewKeyword { group: id, draft }) if *id == group.id() => {
                        Some(draft.clone())
                    }
                    _ => None,
                };
                GroupView {
                    group_id: group.id(),
                    title: format!("Group {}", index + 1),
                    tags,
                    new_keyword,
                }
            })
            .collect();

        let editor = self.editor.as_ref().map(|editor| match editor {
            Editor::Tag { tag, original, .. } => EditorView::Tag {
                tag_id: *tag,
                original: original.clone(),
            },
            Editor::NewKeyword { group, .. } => EditorView::NewKeyword { group_id: *group },
        });

        let report = self.pointer_report.as_ref();
        AppViewModel {
            groups,
            exclude: self.exclude.keywords().to_vec(),
            canonical: self.canonical.clone(),
            editor,
            jd_text: self.jd_text.clone(),
            resume_file: self.resume.as_ref().map(|file| file.file_name.clone()),
            target_match: self.target_match,
            target_match_label: format!("{}%", self.target_match),
            boolean_query: self.boolean_query.clone(),
            match_score: report
                .map(|r| format!("{}%", r.match_score))
                .unwrap_or_default(),
            classification: report.map(|r| ClassificationView {
                role_title: r.role_title.clone(),
                role_type: r.role_type.clone(),
                level: r.level.clone(),
            }),
            updated_pointers: report
                .map(|r| r.updated_pointers.clone())
                .unwrap_or_default(),
            suggestions: report
                .map(|r| r.updated_pointers.join("\n\n"))
                .unwrap_or_default(),
            busy: self
                .in_flight
                .iter()
                .filter(|(_, count)| **count > 0)
                .map(|(kind, _)| *kind)
                .collect(),
            error: self.error.as_ref().map(|notice| match notice.source {
                ErrorSource::Request(kind) => format!("{kind} failed: {}", notice.message),
                ErrorSource::Input => notice.message.clone(),
            }),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute the canonical groups from the registry.
    pub(crate) fn resync(&mut self) {
        self.canonical = canonical_groups(&self.registry);
        self.mark_dirty();
    }

    pub(crate) fn seed(&mut self, extraction: JdExtraction) {
        self.jd_text = extraction.text;
        self.editor = None;
        self.registry.seed(extraction.groups);
        self.exclude.replace(extraction.exclude);
        self.resync();
    }

    pub(crate) fn add_group(&mut self) {
        self.registry.add_group();
        self.resync();
    }

    pub(crate) fn remove_group(&mut self, group: GroupId) {
        if self.registry.remove_group(group) {
            self.resync();
        }
    }

    pub(crate) fn open_new_keyword(&mut self, group: GroupId) {
        if self.registry.group(group).is_some() {
            self.editor = Some(Editor::new_keyword(group));
            self.mark_dirty();
        }
    }

    pub(crate) fn start_tag_edit(&mut self, tag: TagId) {
        let Some(current) = self.registry.tag(tag).map(|t| t.text().to_string()) else {
            return;
        };
        self.editor = Some(Editor::edit_tag(tag, &current));
        self.mark_dirty();
    }

    pub(crate) fn set_editor_draft(&mut self, text: String) {
        if let Some(editor) = self.editor.as_mut() {
            editor.set_draft(text);
            self.mark_dirty();
        }
    }

    pub(crate) fn commit_editor(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        self.mark_dirty();
        if editor.commit(&mut self.registry) == EditOutcome::Changed {
            self.resync();
        }
    }

    pub(crate) fn cancel_editor(&mut self) {
        if self.editor.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn remove_tag(&mut self, tag: TagId) {
        if self.registry.remove_tag(tag) {
            self.resync();
        }
    }

    pub(crate) fn drop_tag(&mut self, tag: TagId, group: GroupId, index: usize) {
        if self.registry.move_tag(tag, group, index) {
            self.resync();
        }
    }

    pub(crate) fn set_target_match(&mut self, value: u32) {
        let clamped = value.min(u32::from(MAX_TARGET_MATCH)) as u8;
        if clamped != self.target_match {
            self.target_match = clamped;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_resume(&mut self, resume: Option<UploadFile>) {
        if resume.is_some() {
            self.clear_input_error();
        }
        self.resume = resume;
        self.mark_dirty();
    }

    pub(crate) fn begin_extract_file(&mut self, file: UploadFile) -> Effect {
        self.clear_input_error();
        let request_id = self.begin_request(RequestKind::ExtractJd);
        Effect::ExtractJdFile { request_id, file }
    }

    pub(crate) fn begin_extract_text(&mut self, text: String) -> Effect {
        let request_id = self.begin_request(RequestKind::ExtractJd);
        Effect::ExtractJdText { request_id, text }
    }

    pub(crate) fn begin_generate_boolean(&mut self) -> Effect {
        self.resync();
        let request_id = self.begin_request(RequestKind::GenerateBoolean);
        Effect::GenerateBoolean {
            request_id,
            groups: self.canonical.clone(),
            exclude: self.exclude.keywords().to_vec(),
        }
    }

    pub(crate) fn begin_generate_pointers(&mut self) -> Option<Effect> {
        let resume = self.resume.clone()?;
        let request_id = self.begin_request(RequestKind::GeneratePointers);
        Some(Effect::GeneratePointers {
            request_id,
            resume,
            target_match: self.target_match,
            jd_text: self.jd_text.clone(),
        })
    }

    pub(crate) fn apply_extraction(&mut self, extraction: JdExtraction) {
        self.finish_request(RequestKind::ExtractJd, true);
        self.seed(extraction);
    }

    pub(crate) fn apply_boolean(&mut self, query: String) {
        self.finish_request(RequestKind::GenerateBoolean, true);
        self.boolean_query = query;
    }

    pub(crate) fn apply_pointers(&mut self, report: PointerReport) {
        self.finish_request(RequestKind::GeneratePointers, true);
        self.pointer_report = Some(report);
    }

    pub(crate) fn apply_failure(&mut self, kind: RequestKind, message: String) {
        self.finish_request(kind, false);
        self.error = Some(ErrorNotice {
            source: ErrorSource::Request(kind),
            message,
        });
    }

    pub(crate) fn reject_input(&mut self, message: String) {
        self.error = Some(ErrorNotice {
            source: ErrorSource::Input,
            message,
        });
        self.mark_dirty();
    }

    fn begin_request(&mut self, kind: RequestKind) -> RequestId {
        self.next_request_id += 1;
        *self.in_flight.entry(kind).or_insert(0) += 1;
        self.mark_dirty();
        self.next_request_id
    }

    fn finish_request(&mut self, kind: RequestKind, succeeded: bool) {
        if let Some(count) = self.in_flight.get_mut(&kind) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(&kind);
            }
        }
        if succeeded
            && self.error.as_ref().is_some_and(|notice| {
                notice.source == ErrorSource::Request(kind) || notice.source == ErrorSource::Input
            })
        {
            self.error = None;
        }
        self.mark_dirty();
    }

    /// A usable file or a successful request supersedes an earlier bad input.
    fn clear_input_error(&mut self) {
        if self
            .error
            .as_ref()
            .is_some_and(|notice| notice.source == ErrorSource::Input)
        {
            self.error = None;
            self.mark_dirty();
        }
    }

    /// Any gesture outside the open input takes focus from it, which commits it.
    pub(crate) fn blur_editor(&mut self) {
        if self.editor.is_some() {
            self.commit_editor();
        }
    }
}
