//! Hook event resolution.
//!
//! The triggering event name can arrive several ways depending on how the
//! orchestrator invoked us. Resolution is an explicit ordered chain —
//! argument, environment, stdin payload, host-environment heuristic — with
//! each resolver returning an optional name and the first success winning.

use std::io::{IsTerminal, Read};

use regex::Regex;
use serde::Deserialize;
use tracing::debug;

/// Environment variable selecting the event kind.
pub const EVENT_ENV_VAR: &str = "CLAUDE_HOOK_EVENT";

/// Lifecycle event that triggered this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    /// A tool action just finished; findings block the workflow.
    PostToolUse,

    /// The user submitted a prompt; findings are injected as context.
    UserPromptSubmit,

    /// Any event this gate has no policy for; the raw name is preserved.
    Other(String),
}

impl HookEvent {
    /// Match an event name exactly as it appears on the wire.
    pub fn parse(name: &str) -> Self {
        match name {
            "PostToolUse" => HookEvent::PostToolUse,
            "UserPromptSubmit" => HookEvent::UserPromptSubmit,
            other => HookEvent::Other(other.to_string()),
        }
    }

    /// The wire name of this event.
    pub fn name(&self) -> &str {
        match self {
            HookEvent::PostToolUse => "PostToolUse",
            HookEvent::UserPromptSubmit => "UserPromptSubmit",
            HookEvent::Other(name) => name,
        }
    }
}

impl std::fmt::Display for HookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One-shot structured payload read from the stdin channel.
///
/// Orchestrators attach arbitrary extra fields; only the event name is
/// consumed here.
#[derive(Debug, Deserialize)]
pub struct HookPayload {
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// Rewrite Windows-style paths inside raw JSON text with forward slashes.
///
/// Producers on Windows emit backslash paths whose escape sequences do not
/// always survive JSON parsing; normalizing the raw text first keeps the
/// payload parseable. Applied to drive-letter paths and UNC paths.
pub fn normalize_windows_paths(json_text: &str) -> String {
    let mut normalized = json_text.to_string();

    // "C:\\dir\\file" drive-letter paths
    if let Ok(drive) = Regex::new(r#""([A-Za-z]:\\\\[^"]*)""#) {
        normalized = drive
            .replace_all(&normalized, |caps: &regex::Captures| {
                let path = caps[1].replace("\\\\", "/").replace('\\', "/");
                format!("\"{path}\"")
            })
            .into_owned();
    }

    // "\\\\server\\share" UNC paths
    if let Ok(unc) = Regex::new(r#""(\\\\\\\\[^"]*)""#) {
        normalized = unc
            .replace_all(&normalized, |caps: &regex::Captures| {
                let path = caps[1]
                    .replace("\\\\\\\\", "//")
                    .replace("\\\\", "/")
                    .replace('\\', "/");
                format!("\"{path}\"")
            })
            .into_owned();
    }

    normalized
}

/// Resolver 1: explicit invocation argument.
fn from_argument(arg: Option<&str>) -> Option<String> {
    let name = arg.filter(|value| !value.is_empty())?.to_string();
    debug!(source = "argument", event = %name, "hook event resolved");
    Some(name)
}

/// Resolver 2: environment override.
fn from_environment() -> Option<String> {
    let name = std::env::var(EVENT_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())?;
    debug!(source = "environment", event = %name, "hook event resolved");
    Some(name)
}

/// Resolver 3: one-shot stdin payload.
///
/// Only consulted when stdin is a non-interactive pipe with content.
/// Unparseable input falls through to the next resolver.
fn from_stdin() -> Option<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        debug!("stdin is a terminal, no piped payload");
        return None;
    }

    let mut input = String::new();
    if stdin.lock().read_to_string(&mut input).is_err() {
        debug!("stdin read failed");
        return None;
    }
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = normalize_windows_paths(trimmed);
    match serde_json::from_str::<HookPayload>(&normalized) {
        Ok(payload) => {
            let name = payload.hook_event_name?;
            debug!(source = "stdin", event = %name, "hook event resolved");
            Some(name)
        }
        Err(err) => {
            debug!(error = %err, "stdin payload did not parse");
            None
        }
    }
}

/// Resolver 4: host-environment heuristic.
///
/// When the process looks like it is running inside the expected host
/// integration, default to `PostToolUse`.
fn from_host_heuristic() -> Option<String> {
    let env_indicator = ["CLAUDE_PROJECT_DIR", "CLAUDE_USER_ID", "CLAUDE_SESSION_ID"]
        .iter()
        .any(|var| std::env::var_os(var).is_some());

    let exe_indicator = std::env::current_exe()
        .map(|exe| exe.to_string_lossy().contains(".claude"))
        .unwrap_or(false);

    let argv_indicator = std::env::args().any(|arg| arg.to_ascii_lowercase().contains("claude"));

    if env_indicator || exe_indicator || argv_indicator {
        debug!(source = "host heuristic", "defaulting to PostToolUse");
        return Some("PostToolUse".to_string());
    }
    None
}

/// Resolve the triggering event from the prioritized sources.
///
/// Order: explicit argument, `CLAUDE_HOOK_EVENT`, stdin payload, host
/// heuristic. When every source comes up empty the event is
/// `Other("Unknown")`, which takes the acknowledgment-only path.
pub fn resolve_event(arg: Option<&str>) -> HookEvent {
    let resolved = from_argument(arg)
        .or_else(from_environment)
        .or_else(from_stdin)
        .or_else(from_host_heuristic);

    match resolved {
        Some(name) => HookEvent::parse(&name),
        None => {
            debug!("no event source matched");
            HookEvent::Other("Unknown".to_string())
        }
    }
}
