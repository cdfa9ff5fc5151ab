use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `phrasectl=trace`.
pub const LOG_ENV: &str = "PHRASECTL_LOG";

/// Install the stderr diagnostics subscriber.
///
/// `PHRASECTL_LOG` wins over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose {
        "phrasectl=debug"
    } else {
        "phrasectl=warn"
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .try_init();
}
