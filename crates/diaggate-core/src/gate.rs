//! The diagnostics gate pipeline.
//!
//! One invocation, one decision: settle, locate, load, tally, render,
//! decide. All waiting is bounded — the settle delay, one optional
//! relocate delay, and the loader's retry bound.

use std::time::Duration;

use tracing::debug;

use crate::decision::{self, Decision};
use crate::event::HookEvent;
use crate::load::{load_snapshot, RetryPolicy};
use crate::locate::{locate_snapshot, LocatorContext, SNAPSHOT_FILE_NAME};
use crate::report::render_report;
use crate::tally::SeverityTally;

/// Tunable knobs for one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    /// Snapshot file name probed at each candidate location.
    pub snapshot_file: String,

    /// Wait before the first locate, letting a just-finished external
    /// write flush to disk.
    pub settle_delay: Duration,

    /// Extra wait before the single re-probe when nothing was found.
    pub relocate_delay: Duration,

    /// Loader retry policy.
    pub retry: RetryPolicy,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            snapshot_file: SNAPSHOT_FILE_NAME.to_string(),
            settle_delay: Duration::from_secs(3),
            relocate_delay: Duration::from_secs(2),
            retry: RetryPolicy::default(),
        }
    }
}

/// One-shot diagnostics gate over a snapshot produced externally.
#[derive(Debug, Clone)]
pub struct DiagnosticsGate {
    config: GateConfig,
    ctx: LocatorContext,
}

impl DiagnosticsGate {
    pub fn new(config: GateConfig, ctx: LocatorContext) -> Self {
        Self { config, ctx }
    }

    /// Evaluate the gate for `event`.
    ///
    /// Acquisition failures degrade to an empty snapshot and therefore
    /// `Pass`; this method never fails.
    pub async fn evaluate(&self, event: &HookEvent) -> Decision {
        debug!(event = %event, "diagnostics check started");

        debug!(
            delay_secs = self.config.settle_delay.as_secs(),
            "settling before snapshot access"
        );
        tokio::time::sleep(self.config.settle_delay).await;

        let mut path = locate_snapshot(&self.ctx, &self.config.snapshot_file);
        if path.is_none() {
            debug!("snapshot not found, waiting before one more probe");
            tokio::time::sleep(self.config.relocate_delay).await;
            path = locate_snapshot(&self.ctx, &self.config.snapshot_file);
        }
        match &path {
            Some(found) => debug!(path = %found.display(), "using snapshot"),
            None => debug!("no snapshot file located"),
        }

        let snapshot = load_snapshot(path.as_deref(), &self.config.retry).await;
        let tally = SeverityTally::from_snapshot(&snapshot);
        debug!(
            errors = tally.errors,
            warnings = tally.warnings,
            files = tally.total_files,
            "severity tally"
        );

        let project_root = self
            .ctx
            .presumed_root()
            .and_then(|root| root.canonicalize().ok());
        let report = render_report(&snapshot, &tally, project_root.as_deref());
        match &report {
            Some(_) => debug!("findings present, report generated"),
            None => debug!("no findings, staying silent"),
        }

        decision::emit(event, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_bounds() {
        let config = GateConfig::default();
        assert_eq!(config.snapshot_file, SNAPSHOT_FILE_NAME);
        assert_eq!(config.settle_delay, Duration::from_secs(3));
        assert_eq!(config.relocate_delay, Duration::from_secs(2));
        assert_eq!(config.retry, RetryPolicy::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_snapshot_anywhere_passes() {
        let gate = DiagnosticsGate::new(GateConfig::default(), LocatorContext::default());
        let decision = gate.evaluate(&HookEvent::PostToolUse).await;
        assert_eq!(decision, Decision::Pass);
    }
}
