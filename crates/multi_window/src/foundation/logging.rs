//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system with an explicit filter string
///
/// The filter uses the `env_logger` syntax (`"info"`, `"multi_window=debug"`, ...).
/// `RUST_LOG` still takes precedence when it is set, so a developer can
/// override the configured level without touching config files.
///
/// Fails if a global logger has already been installed.
pub fn init_with_filter(filter: &str) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(filter);
    if let Ok(env_filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&env_filter);
    }
    builder.try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_installs_once() {
        assert!(init_with_filter("warn").is_ok());
        assert!(init_with_filter("multi_window=debug").is_err());
        info!("logger installed");
    }
}
