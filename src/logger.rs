use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::DEFAULT_LOG_FILTER;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct LoggerConfig {
    /// Append-mode log file, written without ANSI colours.
    pub log_file: Option<PathBuf>,
    /// Also log to stderr.
    pub println: bool,
    /// Directives used when `RUST_LOG` is not set.
    pub default_filter: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            println: true,
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LoggerConfig {
    fn filter(&self) -> EnvFilter {
        let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| self.default_filter.clone());
        EnvFilter::new(directives)
    }
}

/// Installs the global tracing subscriber. Can only succeed once per process.
pub fn init(config: &LoggerConfig) -> Result<()> {
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };
    let stderr_layer = config
        .println
        .then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(config.filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_logs_to_stderr_only() {
        let config = LoggerConfig::default();
        assert!(config.println);
        assert!(config.log_file.is_none());
        assert_eq!(config.default_filter, "info");
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let config = LoggerConfig {
            log_file: Some(PathBuf::from("/nonexistent-dir/lorawan_profiles.log")),
            println: false,
            ..Default::default()
        };
        assert!(matches!(init(&config), Err(crate::Error::Io(_))));
    }
}
