//! Severity aggregation.
//!
//! Pure counting over a snapshot: global totals plus per-file breakdowns for
//! the renderer. Counts are monotonic sums — identical diagnostics count
//! twice. Recomputed every invocation, never persisted.

use serde::{Deserialize, Serialize};

use crate::snapshot::{FileDiagnostics, Severity, Snapshot};

/// Per-severity counts for one file entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileTally {
    pub errors: usize,
    pub warnings: usize,
    pub information: usize,
    pub hints: usize,
    pub unknown: usize,
}

impl FileTally {
    /// Count the diagnostics of a single file entry.
    pub fn from_file(entry: &FileDiagnostics) -> Self {
        let mut tally = Self::default();
        for diag in &entry.diagnostics {
            match diag.severity_class() {
                Severity::Error => tally.errors += 1,
                Severity::Warning => tally.warnings += 1,
                Severity::Information => tally.information += 1,
                Severity::Hint => tally.hints += 1,
                Severity::Unknown => tally.unknown += 1,
            }
        }
        tally
    }

    /// Total diagnostics counted for this file.
    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.information + self.hints + self.unknown
    }
}

/// Global severity counts across a snapshot.
///
/// Invariant: `total_diagnostics` equals the sum of per-file totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityTally {
    pub total_files: usize,
    pub total_diagnostics: usize,
    pub errors: usize,
    pub warnings: usize,
    pub information: usize,
    pub hints: usize,
    pub unknown: usize,
}

impl SeverityTally {
    /// Aggregate a snapshot. An empty snapshot yields all-zero counts.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut tally = Self::default();
        for entry in snapshot {
            tally.total_files += 1;
            tally.total_diagnostics += entry.diagnostics.len();

            let file = FileTally::from_file(entry);
            tally.errors += file.errors;
            tally.warnings += file.warnings;
            tally.information += file.information;
            tally.hints += file.hints;
            tally.unknown += file.unknown;
        }
        tally
    }

    /// Whether any Error or Warning is present — the report trigger.
    /// Information and Hint counts alone never trigger a report.
    pub fn has_findings(&self) -> bool {
        self.errors > 0 || self.warnings > 0
    }
}
