use std::sync::Once;

use env_logger::{Builder, Target};
use log::LevelFilter;

static INIT: Once = Once::new();

/// Routes `log` records to stderr. Only warnings and errors show unless
/// `RUST_LOG` asks for more; stdout stays reserved for the verdict. Later
/// calls are no-ops.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder
            .target(Target::Stderr)
            .filter_level(LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();
        // Fails only when some other logger got there first.
        let _ = builder.try_init();
    });
}
