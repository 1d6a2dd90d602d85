//! Snapshot file location.
//!
//! The snapshot can sit in a few well-known places depending on how the hook
//! was installed and invoked. The locator probes a fixed, ordered candidate
//! list and never scans the filesystem beyond it.

use std::path::{Path, PathBuf};

use tracing::debug;

/// File name the editor integration writes its diagnostics dump to.
pub const SNAPSHOT_FILE_NAME: &str = "vscode-diagnostics.json";

/// Filesystem context the locator probes from.
///
/// Built from the process environment by the CLI; tests construct it
/// directly against temporary directories.
#[derive(Debug, Clone, Default)]
pub struct LocatorContext {
    /// Directory the hook binary is installed in (`<root>/.claude/hooks`).
    pub install_dir: Option<PathBuf>,

    /// Working directory of the invocation.
    pub cwd: Option<PathBuf>,

    /// Explicit project root override (`CLAUDE_PROJECT_DIR`).
    pub project_root_override: Option<PathBuf>,
}

impl LocatorContext {
    /// Build the context from the process environment.
    pub fn from_env() -> Self {
        Self {
            install_dir: std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            cwd: std::env::current_dir().ok(),
            project_root_override: std::env::var_os("CLAUDE_PROJECT_DIR").map(PathBuf::from),
        }
    }

    /// Project root presumed from the install location. Hook binaries live
    /// two levels below the root, in `<root>/.claude/hooks/`.
    pub fn presumed_root(&self) -> Option<PathBuf> {
        self.install_dir
            .as_deref()
            .and_then(Path::parent)
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    /// Candidate snapshot paths in probe order.
    fn candidates(&self, file_name: &str) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(root) = self.presumed_root() {
            candidates.push(root.join(file_name));
        }
        if let Some(cwd) = &self.cwd {
            candidates.push(cwd.join(file_name));
        }
        if let Some(root) = &self.project_root_override {
            candidates.push(root.join(file_name));
        }
        candidates
    }
}

/// Find the first existing snapshot file among the fixed candidates.
///
/// `None` is the normal "no analyzer has run yet" outcome, not an error.
pub fn locate_snapshot(ctx: &LocatorContext, file_name: &str) -> Option<PathBuf> {
    for candidate in ctx.candidates(file_name) {
        if candidate.exists() {
            debug!(path = %candidate.display(), "snapshot candidate exists");
            return Some(candidate.canonicalize().unwrap_or(candidate));
        }
    }
    None
}
