use matcher_core::{AppViewModel, GroupView};

const RULE: &str = "----------------------------------------";

/// Project the view model onto terminal lines. Pure; printing is the caller's job.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![RULE.to_string()];

    if view.jd_text.is_empty() {
        lines.push("JD: (none)".to_string());
    } else {
        lines.push(format!("JD: {} chars", view.jd_text.chars().count()));
    }

    if view.groups.is_empty() {
        lines.push("Keyword groups: (none)".to_string());
    } else {
        lines.push("Keyword groups:".to_string());
        lines.extend(view.groups.iter().map(group_line));
    }
    if !view.exclude.is_empty() {
        lines.push(format!("Exclude: {}", view.exclude.join(", ")));
    }

    if !view.boolean_query.is_empty() {
        lines.push(format!("Boolean: {}", view.boolean_query));
    }

    lines.push(format!(
        "Resume: {} | Target match: {}",
        view.resume_file.as_deref().unwrap_or("(none)"),
        view.target_match_label
    ));

    if let Some(class) = &view.classification {
        lines.push(format!(
            "Match: {} | {} | {} | {}",
            view.match_score, class.role_title, class.role_type, class.level
        ));
        for pointer in &view.updated_pointers {
            let mut rows = pointer.lines();
            lines.push(format!("  * {}", rows.next().unwrap_or_default()));
            lines.extend(rows.map(|row| format!("    {row}")));
        }
    }

    if !view.busy.is_empty() {
        let busy: Vec<String> = view.busy.iter().map(ToString::to_string).collect();
        lines.push(format!("Working: {}", busy.join(", ")));
    }
    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }
    lines
}

fn group_line(group: &GroupView) -> String {
    let mut parts: Vec<String> = group
        .tags
        .iter()
        .enumerate()
        .map(|(index, tag)| match &tag.editing {
            Some(draft) => format!("{}:[{}_]", index + 1, draft),
            None => format!("{}:{}", index + 1, tag.text),
        })
        .collect();
    if let Some(draft) = &group.new_keyword {
        parts.push(format!("+[{draft}_]"));
    }
    if parts.is_empty() {
        format!("  {}: (empty)", group.title)
    } else {
        format!("  {}: {}", group.title, parts.join("  "))
    }
}
