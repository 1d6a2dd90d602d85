//! diaggate Core Library
//!
//! A hook-driven diagnostics gate: invoked once per editor/agent workflow
//! event, it locates the diagnostics snapshot an external analyzer
//! integration writes, loads it under writer races, aggregates severities,
//! renders a deterministic Markdown report, and emits a control decision
//! for the orchestrator to consume.

pub mod decision;
pub mod error;
pub mod event;
pub mod gate;
pub mod load;
pub mod locate;
pub mod report;
pub mod snapshot;
pub mod tally;
pub mod telemetry;

// Re-export key types
pub use decision::{emit, Decision};
pub use error::{GateError, LoadError, Result};
pub use event::{normalize_windows_paths, resolve_event, HookEvent, HookPayload};
pub use gate::{DiagnosticsGate, GateConfig};
pub use load::{load_snapshot, RetryPolicy};
pub use locate::{locate_snapshot, LocatorContext, SNAPSHOT_FILE_NAME};
pub use report::render_report;
pub use snapshot::{Diagnostic, DiagnosticCode, FileDiagnostics, Position, Severity, Snapshot};
pub use tally::{FileTally, SeverityTally};
pub use telemetry::init_tracing;
