//! Centralised tracing initialisation for the hook binary.
//!
//! Call [`init_tracing`] once at program start. All log output goes to
//! stderr: stdout is reserved for the single decision payload and must
//! never carry anything else.
//!
//! Safe to call more than once — subsequent calls are silently ignored
//! (the global subscriber can only be set once per process).

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the global tracing subscriber on stderr.
///
/// * `debug` — when `true`, progress messages are emitted at `DEBUG`;
///   otherwise only warnings and above surface.
///
/// Respects the `RUST_LOG` environment variable for fine-grained
/// filtering. If `RUST_LOG` is not set, falls back to the level implied
/// by `debug`.
pub fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
