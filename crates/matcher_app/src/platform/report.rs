use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use matcher_core::AppViewModel;
use matcher_engine::write_atomic;
use matcher_logging::matcher_info;

/// Write the current results as Markdown to `path`.
pub(crate) fn save_report(path: &Path, view: &AppViewModel) -> Result<PathBuf> {
    let content = build_report(view, &Utc::now().to_rfc3339());
    let written = write_atomic(path, &content)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    matcher_info!("Report written to {:?} ({} bytes)", written, content.len());
    Ok(written)
}

pub(crate) fn build_report(view: &AppViewModel, generated_at: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Resume match report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Generated: {generated_at}");

    let _ = writeln!(out);
    let _ = writeln!(out, "## Keyword groups");
    let _ = writeln!(out);
    if view.canonical.is_empty() {
        let _ = writeln!(out, "_none_");
    }
    for (index, group) in view.canonical.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, group.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Excluded");
    let _ = writeln!(out);
    if view.exclude.is_empty() {
        let _ = writeln!(out, "_none_");
    } else {
        let _ = writeln!(out, "{}", view.exclude.join(", "));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Boolean query");
    let _ = writeln!(out);
    if view.boolean_query.is_empty() {
        let _ = writeln!(out, "_not generated_");
    } else {
        let _ = writeln!(out, "```");
        let _ = writeln!(out, "{}", view.boolean_query);
        let _ = writeln!(out, "```");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "## Resume fit");
    let _ = writeln!(out);
    let _ = writeln!(out, "Target match: {}", view.target_match_label);
    match &view.classification {
        Some(class) => {
            let _ = writeln!(out, "Match score: {}", view.match_score);
            let _ = writeln!(out, "Role: {}", class.role_title);
            let _ = writeln!(out, "Type: {}", class.role_type);
            let _ = writeln!(out, "Level: {}", class.level);
            let _ = writeln!(out);
            let _ = writeln!(out, "### Suggested pointers");
            let _ = writeln!(out);
            for pointer in &view.updated_pointers {
                let mut rows = pointer.lines();
                let _ = writeln!(out, "- {}", rows.next().unwrap_or_default());
                for row in rows {
                    let _ = writeln!(out, "  {row}");
                }
            }
        }
        None => {
            let _ = writeln!(out, "_not generated_");
        }
    }
    out
}
