//! Tracing subscriber setup for the `celer` binary.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the Celer log filter.
pub const LOG_ENV: &str = "CELER_LOG";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Installs a hierarchical subscriber on stderr, so log lines never mix
/// with program output on stdout. Does nothing unless `CELER_LOG` or
/// `RUST_LOG` is set, e.g. `CELER_LOG=celer_eval=trace`. Safe to call
/// multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_tree::HierarchicalLayer;

        let Some(filter) = filter_from_env() else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(
                HierarchicalLayer::new(2)
                    .with_writer(std::io::stderr)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .try_init();
    });
}

/// `CELER_LOG` wins over `RUST_LOG`; neither set means no subscriber.
fn filter_from_env() -> Option<EnvFilter> {
    if std::env::var_os(LOG_ENV).is_some() {
        Some(EnvFilter::from_env(LOG_ENV))
    } else if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        Some(EnvFilter::from_default_env())
    } else {
        None
    }
}
