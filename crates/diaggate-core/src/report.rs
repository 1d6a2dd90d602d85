//! Deterministic Markdown report rendering.
//!
//! Downstream consumers parse the report by structure, so the line order
//! and literals here are a compatibility contract: summary header first,
//! then per-file sections in snapshot order, then per-diagnostic detail
//! blocks in snapshot order. Rendering the same snapshot twice must yield
//! byte-identical output.

use std::path::Path;

use crate::snapshot::{Diagnostic, Snapshot};
use crate::tally::{FileTally, SeverityTally};

/// Render `file_path` relative to the project root when possible.
///
/// Entries outside the root (or unresolvable ones) fall back to the
/// original path string; a single odd path never fails the render.
fn relativize(file_path: &str, project_root: Option<&Path>) -> String {
    let Some(root) = project_root else {
        return file_path.to_string();
    };
    let path = Path::new(file_path);
    let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    match resolved.strip_prefix(root) {
        Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
        Err(_) => file_path.to_string(),
    }
}

/// Parenthesized per-file summary: non-zero counts in fixed class order.
fn file_summary(tally: &FileTally) -> String {
    let mut parts = Vec::new();
    if tally.errors > 0 {
        parts.push(format!("{}个error", tally.errors));
    }
    if tally.warnings > 0 {
        parts.push(format!("{}个warning", tally.warnings));
    }
    if tally.information > 0 {
        parts.push(format!("{}个information", tally.information));
    }
    if tally.hints > 0 {
        parts.push(format!("{}个hint", tally.hints));
    }
    parts.join(", ")
}

/// Detail block for one diagnostic. Line and character offsets are
/// reproduced raw (zero-based) exactly as the snapshot gave them.
fn push_diagnostic(
    lines: &mut Vec<String>,
    diag: &Diagnostic,
    file_path: &str,
    project_root: Option<&Path>,
) {
    let class = diag.severity_class();
    lines.push(format!(
        "**第{}行:{}-{}** - {} {}",
        diag.start.line,
        diag.start.character,
        diag.end.character,
        class.icon(),
        class.label(),
    ));
    lines.push(format!(
        "- **消息**: {}",
        diag.message.as_deref().unwrap_or("无")
    ));
    if let Some(source) = diag.source.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("- **来源**: {source}"));
    }
    if let Some(code) = &diag.code {
        lines.push(format!("- **错误代码**: {code}"));
    }
    lines.push(format!(
        "- **文件路径**: `{}`",
        relativize(file_path, project_root)
    ));
    lines.push(String::new());
}

/// Render the diagnostics report for a snapshot.
///
/// Returns `None` when the global Error and Warning counts are both zero —
/// the caller stays silent. Otherwise the report lists every file that has
/// at least one diagnostic, in snapshot order.
pub fn render_report(
    snapshot: &Snapshot,
    tally: &SeverityTally,
    project_root: Option<&Path>,
) -> Option<String> {
    if !tally.has_findings() {
        return None;
    }

    let mut lines = vec![
        "### 诊断摘要".to_string(),
        String::new(),
        format!("- ❌ Error: {}", tally.errors),
        format!("- ⚠️ Warning: {}", tally.warnings),
        String::new(),
    ];

    for entry in snapshot {
        if entry.diagnostics.is_empty() {
            continue;
        }

        let file_tally = FileTally::from_file(entry);
        let file_name = Path::new(&entry.file)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.file.clone());

        lines.push(format!(
            "### 📄 {} ({})",
            file_name,
            file_summary(&file_tally)
        ));
        lines.push(String::new());

        for diag in &entry.diagnostics {
            push_diagnostic(&mut lines, diag, &entry.file, project_root);
        }
    }

    Some(lines.join("\n"))
}
