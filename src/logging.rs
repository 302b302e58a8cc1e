//! Append-only audit sink for the `log` facade.
//!
//! Every record becomes one line, `{timestamp} - {message}`, written to stderr
//! and/or appended to a file. The interpreter itself only calls `log::info!`
//! and `log::error!`; installing this sink is up to the binary.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug, Error)]
pub enum LogInitError {
    #[error("cannot open log file '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("a logger is already installed")]
    AlreadySet(#[from] log::SetLoggerError),
}

/// Where audit lines go.
#[derive(Debug, Clone, Default)]
pub struct AuditConfig {
    /// Append lines to this file.
    pub file: Option<PathBuf>,
    /// Also echo lines to stderr.
    pub stderr: bool,
    pub level: Option<LevelFilter>,
}

struct AuditLogger {
    level: LevelFilter,
    stderr: bool,
    file: Option<Mutex<File>>,
}

impl Log for AuditLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with(env!("CARGO_CRATE_NAME"))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = audit_line(&Local::now().format(TIMESTAMP_FORMAT).to_string(), &record.args().to_string());

        if self.stderr {
            // stderr is line-locked by std
            eprintln!("{}", line);
        }
        if let Some(file) = &self.file {
            let Ok(mut file) = file.lock() else {
                return;
            };
            let _ = writeln!(file, "{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

fn audit_line(timestamp: &str, message: &str) -> String {
    format!("{} - {}", timestamp, message)
}

/// Install the audit sink as the global logger. Fails if the file cannot be
/// opened or another logger is already set.
pub fn init(config: &AuditConfig) -> Result<(), LogInitError> {
    let file = match &config.file {
        Some(path) => Some(Mutex::new(open_append(path)?)),
        None => None,
    };
    let level = config.level.unwrap_or(LevelFilter::Info);

    log::set_boxed_logger(Box::new(AuditLogger { level, stderr: config.stderr, file }))?;
    log::set_max_level(level);
    Ok(())
}

fn open_append(path: &Path) -> Result<File, LogInitError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LogInitError::Open { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_format() {
        assert_eq!(
            audit_line("2024-01-01 10:00:00.000", "Command received: 'two plus two'"),
            "2024-01-01 10:00:00.000 - Command received: 'two plus two'"
        );
    }

    #[test]
    fn timestamp_format_parses_back() {
        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        assert!(chrono::NaiveDateTime::parse_from_str(&stamp, TIMESTAMP_FORMAT).is_ok(), "{}", stamp);
    }

    #[test]
    fn logger_appends_to_file() {
        let path = std::env::temp_dir().join(format!("saycalc-audit-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = AuditLogger {
            level: LevelFilter::Info,
            stderr: false,
            file: Some(Mutex::new(open_append(&path).unwrap())),
        };
        for message in ["first", "second"] {
            logger.log(
                &Record::builder()
                    .args(format_args!("{}", message))
                    .level(log::Level::Info)
                    .target(env!("CARGO_CRATE_NAME"))
                    .build(),
            );
        }
        // below the level filter
        logger.log(
            &Record::builder()
                .args(format_args!("noise"))
                .level(log::Level::Debug)
                .target(env!("CARGO_CRATE_NAME"))
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - first"));
        assert!(lines[1].ends_with(" - second"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_directory_is_reported() {
        let err = open_append(Path::new("/nonexistent-saycalc-dir/audit.log")).unwrap_err();
        assert!(err.to_string().starts_with("cannot open log file"));
    }
}
