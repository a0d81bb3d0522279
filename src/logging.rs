use std::fs::{self, File};
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::error::AppError;

const APP_DIR_NAME: &str = "snake-arena";
const LOG_FILE_NAME: &str = "snake-arena.log";

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

/// Routes the `log` facade into `path`, truncating any previous run's log.
///
/// The terminal belongs to the game screen, so nothing is logged to stdout or
/// stderr while the game runs.
pub fn init(path: &Path, debug: bool) -> Result<(), AppError> {
    let file = create_log_file(path)?;
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}

fn create_log_file(path: &Path) -> Result<File, AppError> {
    let log_file_error = |source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(log_file_error)?;
    }

    File::create(path).map_err(log_file_error)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use crate::error::AppError;

    use super::{create_log_file, default_log_path};

    #[test]
    fn default_path_ends_in_app_log_file() {
        let path = default_log_path();

        assert!(path.ends_with("snake-arena/snake-arena.log"));
    }

    #[test]
    fn log_file_creation_makes_parent_directories() {
        let path = unique_test_path("nested");

        create_log_file(&path).expect("log file should be creatable");

        assert!(path.exists());
        cleanup_test_path(&path);
    }

    #[test]
    fn unwritable_log_path_reports_the_path() {
        let blocker = unique_test_path("blocker");
        if let Some(parent) = blocker.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(&blocker, "not a directory").expect("test file write should succeed");
        let path = blocker.join("inner.log");

        match create_log_file(&path) {
            Err(AppError::LogFile { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a log file error, got {other:?}"),
        }

        cleanup_test_path(&blocker);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("snake-arena-log-tests")
            .join(format!("{label}-{nanos}"))
            .join("game.log")
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
