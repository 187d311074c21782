#![allow(dead_code)]

use std::sync::Once;

use matcher_core::{update, AppState, Effect, JdExtraction, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(matcher_logging::initialize_for_tests);
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Apply messages in order, collecting every effect.
pub fn apply(state: AppState, msgs: Vec<Msg>) -> (AppState, Vec<Effect>) {
    msgs.into_iter()
        .fold((state, Vec::new()), |(state, mut effects), msg| {
            let (state, new_effects) = update(state, msg);
            effects.extend(new_effects);
            (state, effects)
        })
}

/// State seeded as if an extraction for `groups`/`exclude` had just arrived.
pub fn seeded(groups: &[&[&str]], exclude: &[&str]) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::JdExtracted {
            request_id: 1,
            extraction: JdExtraction {
                text: "jd".to_string(),
                groups: groups.iter().map(|g| strings(g)).collect(),
                exclude: strings(exclude),
            },
        },
    );
    state
}

/// Keyword texts per group as displayed, including empty groups.
pub fn displayed(state: &AppState) -> Vec<Vec<String>> {
    state
        .view()
        .groups
        .iter()
        .map(|g| g.tags.iter().map(|t| t.text.clone()).collect())
        .collect()
}

pub fn titles(state: &AppState) -> Vec<String> {
    state.view().groups.iter().map(|g| g.title.clone()).collect()
}
