//! Logger setup for the bolt-init binary.

use log::LevelFilter;

/// Initializes the global logger. Verbose runs log debug output, otherwise
/// only warnings and errors are shown. `RUST_LOG` overrides either level.
pub fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}
