//! Logger set-up for the report binary and tests

use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

/// Guards the one-time logger installation
static INIT: Once = Once::new();

/// Installs an `env_logger` backend at `Info`, overridable through `RUST_LOG`.
///
/// Safe to call repeatedly; a logger installed elsewhere is left in place.
pub fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Info)
            .filter_module("probing", LevelFilter::Info)
            .filter_module("plotters", LevelFilter::Warn)
            .format_timestamp_millis()
            .parse_default_env();

        if builder.try_init().is_err() {
            log::debug!("logger already installed, keeping it");
        }
    });
}

/// Installs a capturing logger for unit tests.
#[cfg(test)]
pub(crate) fn init_test_logger() {
    if env_logger::builder().filter_level(LevelFilter::Trace).is_test(true).try_init().is_err() {
        log::trace!("test logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use log::{debug, info};

    use super::*;

    #[test]
    fn test_initialize_twice() {
        initialize_logger();
        initialize_logger();
        debug!("Debug message in test");
        info!("Info message in test");
    }
}
