use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if takes_focus(&msg) {
        state.blur_editor();
    }

    let effects = match msg {
        Msg::JdFileSelected(file) => match file {
            Some(file) => vec![state.begin_extract_file(file)],
            None => Vec::new(),
        },
        Msg::JdTextCommitted(raw) => {
            let text = raw.trim();
            if text.is_empty() {
                return (state, Vec::new());
            }
            vec![state.begin_extract_text(text.to_string())]
        }
        Msg::JdExtracted { extraction, .. } => {
            state.apply_extraction(extraction);
            Vec::new()
        }
        Msg::AddGroupClicked => {
            state.add_group();
            Vec::new()
        }
        Msg::GroupRemoveClicked { group } => {
            state.remove_group(group);
            Vec::new()
        }
        Msg::AddKeywordClicked { group } => {
            state.open_new_keyword(group);
            Vec::new()
        }
        Msg::TagEditStarted { tag } => {
            state.start_tag_edit(tag);
            Vec::new()
        }
        Msg::EditorInput(text) => {
            state.set_editor_draft(text);
            Vec::new()
        }
        Msg::EditorConfirmed | Msg::EditorBlurred => {
            state.commit_editor();
            Vec::new()
        }
        Msg::EditorCancelled => {
            state.cancel_editor();
            Vec::new()
        }
        Msg::TagRemoveClicked { tag } => {
            state.remove_tag(tag);
            Vec::new()
        }
        Msg::TagDropped { tag, group, index } => {
            state.drop_tag(tag, group, index);
            Vec::new()
        }
        Msg::GenerateBooleanClicked => vec![state.begin_generate_boolean()],
        Msg::BooleanGenerated { query, .. } => {
            state.apply_boolean(query);
            Vec::new()
        }
        Msg::ResumeSelected(file) => {
            state.set_resume(file);
            Vec::new()
        }
        Msg::TargetMatchChanged(value) => {
            state.set_target_match(value);
            Vec::new()
        }
        Msg::GeneratePointersClicked => state.begin_generate_pointers().into_iter().collect(),
        Msg::PointersGenerated { report, .. } => {
            state.apply_pointers(report);
            Vec::new()
        }
        Msg::RequestFailed { kind, message, .. } => {
            state.apply_failure(kind, message);
            Vec::new()
        }
        Msg::InputRejected(message) => {
            state.reject_input(message);
            Vec::new()
        }
    };

    (state, effects)
}

/// User gestures outside the open inline input move focus away from it.
fn takes_focus(msg: &Msg) -> bool {
    match msg {
        Msg::EditorInput(_)
        | Msg::EditorConfirmed
        | Msg::EditorCancelled
        | Msg::EditorBlurred
        | Msg::JdExtracted { .. }
        | Msg::BooleanGenerated { .. }
        | Msg::PointersGenerated { .. }
        | Msg::RequestFailed { .. }
        | Msg::InputRejected(_) => false,
        Msg::JdFileSelected(_)
        | Msg::JdTextCommitted(_)
        | Msg::AddGroupClicked
        | Msg::GroupRemoveClicked { .. }
        | Msg::AddKeywordClicked { .. }
        | Msg::TagEditStarted { .. }
        | Msg::TagRemoveClicked { .. }
        | Msg::TagDropped { .. }
        | Msg::GenerateBooleanClicked
        | Msg::ResumeSelected(_)
        | Msg::TargetMatchChanged(_)
        | Msg::GeneratePointersClicked => true,
    }
}
