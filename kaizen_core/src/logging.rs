//! Tracing setup for the interactive shells.
//!
//! Every tool talks to the user on stdout, so log lines go to stderr and
//! default to `warn`. Session starts, goal transitions and aborted games are
//! logged at `info`/`debug` and only show up with `--verbose` or `RUST_LOG`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when the user has not asked for more detail
pub const QUIET_LEVEL: &str = "warn";

/// Level used by `--verbose`
pub const VERBOSE_LEVEL: &str = "debug";

/// Install the subscriber for an interactive shell
pub fn init_for_shell(verbose: bool) {
    init_with_level(if verbose { VERBOSE_LEVEL } else { QUIET_LEVEL })
}

/// Install the subscriber with `default_level` unless `RUST_LOG` is set
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new(VERBOSE_LEVEL))
        .try_init();
}
