//! Logging and tracing initialization.

use crate::config::LoggingConfig;
use crate::error::{FramegrabError, FramegrabResult};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Initialize the tracing subscriber with the given configuration.
///
/// Logs go to stderr unless `config.file` names a path, in which case they
/// are appended there instead. Fails if the log file cannot be opened.
pub fn init_logging(config: &LoggingConfig) -> FramegrabResult<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_file = match &config.file {
        Some(path) => Some(open_log_file(path)?),
        None => None,
    };

    match (config.json, log_file) {
        (true, Some(file)) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .with_writer(file)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (true, None) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .json()
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (false, Some(file)) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
        (false, None) => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok();
        }
    }

    Ok(())
}

/// Open (or create) the log file for appending.
fn open_log_file(path: &Path) -> FramegrabResult<Arc<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| {
            FramegrabError::config(format!("cannot open log file {}: {}", path.display(), e))
        })?;
    Ok(Arc::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("framegrab-logging-tests")
            .join(format!("{}-{}", std::process::id(), name))
    }

    #[test]
    fn log_file_is_created_on_init() {
        let path = scratch_path("created.log");
        let config = LoggingConfig {
            level: "debug".to_string(),
            json: false,
            file: Some(path.clone()),
        };

        init_logging(&config).unwrap();
        assert!(path.exists());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        // A path whose parent is a regular file cannot be created.
        let blocker = scratch_path("blocker");
        std::fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        std::fs::write(&blocker, b"not a directory").unwrap();

        let config = LoggingConfig {
            level: "info".to_string(),
            json: false,
            file: Some(blocker.join("nested.log")),
        };
        assert!(init_logging(&config).is_err());

        std::fs::remove_file(&blocker).ok();
    }
}
