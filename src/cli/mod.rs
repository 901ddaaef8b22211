//! Command-line interface logic
//!
//! One module per mode: `show` (the default), `login`, and `reset`. Each
//! run function owns its logging setup and wires storage, settings, and the
//! popup controller together.

pub mod login;
pub mod reset;
pub mod show;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr, keeping stdout for rendered output
pub(crate) fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "error" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
