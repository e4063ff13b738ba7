//! Logging setup for the command-line binary
//!
//! Everything at the chosen level goes to `<log_dir>/main.log`. The console
//! (stderr) only shows errors unless verbose, and nothing when silent.

use std::fs::File;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{Result, TypoForgeError};

/// Log file name inside the log directory
pub const LOG_FILE_NAME: &str = "main.log";

#[derive(Debug, Clone)]
pub struct LogOptions {
    pub level: LevelFilter,
    pub verbose: bool,
    pub silent: bool,
    pub log_dir: PathBuf,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            level: LevelFilter::DEBUG,
            verbose: false,
            silent: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl LogOptions {
    /// Level shown on the console
    pub fn console_level(&self) -> LevelFilter {
        if self.silent {
            LevelFilter::OFF
        } else if self.verbose {
            self.level
        } else {
            LevelFilter::ERROR
        }
    }
}

/// Parse a log level name, case-insensitively.
///
/// Accepts the tracing names plus `warning` and `critical`.
pub fn parse_level(input: &str) -> Result<LevelFilter> {
    match input.trim().to_lowercase().as_str() {
        "warning" => Ok(LevelFilter::WARN),
        "critical" | "fatal" => Ok(LevelFilter::ERROR),
        other => other
            .parse::<LevelFilter>()
            .map_err(|_| TypoForgeError::invalid_input(format!("Unknown log level: {}", input))),
    }
}

/// Create `<log_dir>/main.log`, truncating the previous run's log
pub fn open_log_file(log_dir: &Path) -> Result<File> {
    std::fs::create_dir_all(log_dir).map_err(|e| {
        TypoForgeError::io(e.to_string(), Some(log_dir.to_string_lossy().to_string()))
    })?;

    let path = log_dir.join(LOG_FILE_NAME);
    File::create(&path)
        .map_err(|e| TypoForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string())))
}

/// Install the global subscriber. Keep the guard alive until exit so the
/// file writer flushes.
pub fn init_logging(options: &LogOptions) -> Result<WorkerGuard> {
    let (writer, guard) = tracing_appender::non_blocking(open_log_file(&options.log_dir)?);

    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("typo_forge={}", options.level)));

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_filter(file_filter);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_filter(options.console_level());

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| TypoForgeError::internal(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level("Warning").unwrap(), LevelFilter::WARN);
        assert_eq!(parse_level("critical").unwrap(), LevelFilter::ERROR);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_console_level() {
        let options = LogOptions {
            level: LevelFilter::INFO,
            ..Default::default()
        };
        assert_eq!(options.console_level(), LevelFilter::ERROR);

        let verbose = LogOptions { verbose: true, ..options.clone() };
        assert_eq!(verbose.console_level(), LevelFilter::INFO);

        let silent = LogOptions { verbose: true, silent: true, ..options };
        assert_eq!(silent.console_level(), LevelFilter::OFF);
    }

    #[test]
    fn test_log_file_is_truncated_per_run() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");

        let mut first = open_log_file(&log_dir).unwrap();
        writeln!(first, "first run").unwrap();
        drop(first);

        let second = open_log_file(&log_dir).unwrap();
        drop(second);

        let content = std::fs::read_to_string(log_dir.join(LOG_FILE_NAME)).unwrap();
        assert!(content.is_empty());
    }
}
