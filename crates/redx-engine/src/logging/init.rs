use std::sync::Once;

use log::LevelFilter;

/// Logger configuration.
///
/// `env_filter` uses `env_logger` directives ("info",
/// "redx_engine=debug,wgpu=warn"). It wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// Builds the logger from `config`, falling back to `rust_log` directives and
/// then to info level with the wgpu internals kept at warnings.
fn builder(config: &LoggingConfig, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    match config.env_filter.as_deref().or(rust_log) {
        Some(directives) => {
            builder.parse_filters(directives);
        }
        None => {
            builder
                .filter_level(LevelFilter::Info)
                .filter_module("wgpu_core", LevelFilter::Warn)
                .filter_module("wgpu_hal", LevelFilter::Warn);
        }
    }

    builder.write_style(config.write_style);
    builder
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
///
/// Run before the event loop is created so windowing failures get logged.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        builder(&config, rust_log.as_deref()).init();
        log::debug!("logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info() {
        let logger = builder(&LoggingConfig::default(), None).build();
        assert_eq!(logger.filter(), LevelFilter::Info);
    }

    #[test]
    fn rust_log_applies_without_explicit_filter() {
        let logger = builder(&LoggingConfig::default(), Some("trace")).build();
        assert_eq!(logger.filter(), LevelFilter::Trace);
    }

    #[test]
    fn explicit_filter_wins_over_rust_log() {
        let config = LoggingConfig {
            env_filter: Some("warn".to_string()),
            ..LoggingConfig::default()
        };
        let logger = builder(&config, Some("trace")).build();
        assert_eq!(logger.filter(), LevelFilter::Warn);
    }
}
