//! Wire types for the diagnostics snapshot file.
//!
//! The snapshot is a JSON array dumped to `vscode-diagnostics.json` by an
//! external editor integration; this module models the read side only. The
//! gate never mutates a snapshot.

use serde::{Deserialize, Serialize};

/// Severity class of a diagnostic.
///
/// The snapshot encodes severity as an ordinal (0–3). An absent ordinal
/// decodes as `Error`; a present ordinal outside 0–3 decodes as `Unknown`
/// so malformed upstream data degrades instead of failing the pipeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
    Unknown,
}

impl Severity {
    /// Decode a raw severity ordinal. Absent means ordinal 0.
    pub fn from_ordinal(ordinal: Option<i64>) -> Self {
        match ordinal {
            None | Some(0) => Severity::Error,
            Some(1) => Severity::Warning,
            Some(2) => Severity::Information,
            Some(3) => Severity::Hint,
            Some(_) => Severity::Unknown,
        }
    }

    /// Display name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
            Severity::Information => "Information",
            Severity::Hint => "Hint",
            Severity::Unknown => "Unknown",
        }
    }

    /// Report icon for this class.
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Error => "❌",
            Severity::Warning => "⚠️",
            Severity::Information => "ℹ️",
            Severity::Hint => "💡",
            Severity::Unknown => "📋",
        }
    }
}

/// Zero-based position within a source file (half-open ranges).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    #[serde(default)]
    pub line: u64,
    #[serde(default)]
    pub character: u64,
}

/// Diagnostic code as emitted by the producer — a string or a bare number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DiagnosticCode {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticCode::Text(text) => write!(f, "{text}"),
            DiagnosticCode::Number(number) => write!(f, "{number}"),
        }
    }
}

/// A single reported issue. Immutable once parsed.
///
/// Extra fields the producer writes (e.g. a textual `level`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnostic {
    /// Raw severity ordinal (0–3); absent is treated as 0.
    #[serde(default)]
    pub severity: Option<i64>,

    #[serde(default)]
    pub message: Option<String>,

    /// Which analyzer emitted this diagnostic (e.g. "C/C++").
    #[serde(default)]
    pub source: Option<String>,

    /// Analyzer-specific code (e.g. "C2065").
    #[serde(default)]
    pub code: Option<DiagnosticCode>,

    #[serde(default)]
    pub start: Position,

    #[serde(default)]
    pub end: Position,
}

impl Diagnostic {
    /// Decoded severity class of this diagnostic.
    pub fn severity_class(&self) -> Severity {
        Severity::from_ordinal(self.severity)
    }
}

/// One source file's worth of diagnostics, in snapshot order.
///
/// Order is preserved all the way into the rendered report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileDiagnostics {
    /// Absolute or project-relative path as written by the producer.
    pub file: String,

    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

/// The full diagnostics dump at one point in time, in producer order.
pub type Snapshot = Vec<FileDiagnostics>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_from_ordinal() {
        assert_eq!(Severity::from_ordinal(Some(0)), Severity::Error);
        assert_eq!(Severity::from_ordinal(Some(1)), Severity::Warning);
        assert_eq!(Severity::from_ordinal(Some(2)), Severity::Information);
        assert_eq!(Severity::from_ordinal(Some(3)), Severity::Hint);
    }

    #[test]
    fn test_absent_severity_is_error() {
        assert_eq!(Severity::from_ordinal(None), Severity::Error);
    }

    #[test]
    fn test_out_of_range_severity_is_unknown() {
        assert_eq!(Severity::from_ordinal(Some(4)), Severity::Unknown);
        assert_eq!(Severity::from_ordinal(Some(-1)), Severity::Unknown);
        assert_eq!(Severity::from_ordinal(Some(99)), Severity::Unknown);
    }

    #[test]
    fn test_severity_icons() {
        assert_eq!(Severity::Error.icon(), "❌");
        assert_eq!(Severity::Warning.icon(), "⚠️");
        assert_eq!(Severity::Unknown.icon(), "📋");
    }

    #[test]
    fn test_parse_full_entry() {
        let json = r#"[{
            "file": "/proj/main.c",
            "diagnostics": [{
                "severity": 0,
                "message": "undeclared identifier",
                "source": "C/C++",
                "code": "C2065",
                "start": {"line": 44, "character": 12},
                "end": {"line": 44, "character": 25}
            }]
        }]"#;

        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].file, "/proj/main.c");

        let diag = &snapshot[0].diagnostics[0];
        assert_eq!(diag.severity_class(), Severity::Error);
        assert_eq!(diag.message.as_deref(), Some("undeclared identifier"));
        assert_eq!(diag.code, Some(DiagnosticCode::Text("C2065".to_string())));
        assert_eq!(diag.start.line, 44);
        assert_eq!(diag.end.character, 25);
    }

    #[test]
    fn test_parse_tolerates_sparse_and_extra_fields() {
        // The producer also writes a textual `level`; unknown fields are
        // ignored and missing ones take their defaults.
        let json = r#"[{
            "file": "lib.rs",
            "diagnostics": [{"level": "Error", "message": "broken"}]
        }]"#;

        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let diag = &snapshot[0].diagnostics[0];
        assert_eq!(diag.severity, None);
        assert_eq!(diag.severity_class(), Severity::Error);
        assert_eq!(diag.start, Position::default());
    }

    #[test]
    fn test_numeric_code_accepted() {
        let json = r#"[{"file": "a.ts", "diagnostics": [{"severity": 1, "code": 2304}]}]"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        let code = snapshot[0].diagnostics[0].code.clone().expect("code");
        assert_eq!(code.to_string(), "2304");
    }

    #[test]
    fn test_missing_diagnostics_list_defaults_empty() {
        let json = r#"[{"file": "a.c"}]"#;
        let snapshot: Snapshot = serde_json::from_str(json).expect("parse");
        assert!(snapshot[0].diagnostics.is_empty());
    }
}
