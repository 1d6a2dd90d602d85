//! diaggate - Diagnostics Gate Hook CLI
//!
//! The `diaggate` command runs once per workflow hook event: it resolves
//! which event fired, checks the diagnostics snapshot the editor
//! integration dumps to disk, and prints a single decision payload on
//! stdout for the orchestrator.
//!
//! ## Invocation
//!
//! - `diaggate --event PostToolUse` — explicit event selection
//! - `CLAUDE_HOOK_EVENT=PostToolUse diaggate` — environment selection
//! - `echo '{"hook_event_name":"PostToolUse"}' | diaggate` — hook payload
//!
//! Exit code is 0 on every normal completion, blocking included — the
//! block signal travels in the stdout payload, never the exit code.

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::debug;

use diaggate_core::{
    init_tracing, resolve_event, DiagnosticsGate, GateConfig, HookEvent, LocatorContext,
};

#[derive(Parser)]
#[command(name = "diaggate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Diagnostics gate hook for editor/agent tool workflows", long_about = None)]
struct Cli {
    /// Hook event name (e.g. PostToolUse)
    #[arg(long)]
    event: Option<String>,

    /// Emit debug progress on stderr
    #[arg(long, env = "CLAUDE_HOOK_DEBUG")]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let outcome = tokio::select! {
        result = run(&cli) => result,
        _ = tokio::signal::ctrl_c() => {
            std::process::exit(130);
        }
    };

    if let Err(err) = outcome {
        report_failure(&err);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let event = resolve_event(cli.event.as_deref());
    debug!(event = %event, "dispatching");

    match &event {
        HookEvent::Other(name) => {
            // No diagnostics policy for this event; acknowledge and stop.
            println!("{name}：钩子触发");
        }
        known => {
            let gate = DiagnosticsGate::new(GateConfig::default(), LocatorContext::from_env());
            let decision = gate.evaluate(known).await;
            if let Some(payload) = decision.to_payload()? {
                println!("{payload}");
            }
        }
    }

    Ok(())
}

/// Structured failure detail on stderr for unexpected internal errors.
fn report_failure(err: &anyhow::Error) {
    let detail = json!({
        "error": format!("{err:#}"),
        "argv": std::env::args().collect::<Vec<_>>(),
        "env": {
            "CLAUDE_PROJECT_DIR": std::env::var("CLAUDE_PROJECT_DIR").ok(),
            "CLAUDE_HOOK_EVENT": std::env::var("CLAUDE_HOOK_EVENT").ok(),
            "CLAUDE_HOOK_DEBUG": std::env::var("CLAUDE_HOOK_DEBUG").ok(),
        },
    });
    match serde_json::to_string_pretty(&detail) {
        Ok(rendered) => eprintln!("hook failure: {rendered}"),
        Err(_) => eprintln!("hook failure: {err:#}"),
    }
}
