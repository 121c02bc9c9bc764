use std::io::IsTerminal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. Logs go to stderr so stdout stays
/// clean for CSV/JSON output; verbosity comes from `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .init();
    });
}
