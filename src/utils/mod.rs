pub mod build_info;
pub mod dates;
pub mod format;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber. Output goes to stderr so it
/// never mixes with rendered calendars on stdout.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("budgeteer_core=info"));

        if let Err(err) = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
        {
            tracing::debug!(error = %err, "global subscriber already installed");
        }
    });
}
