use log::{LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{DiagramStyleError, Result};

struct FileLogger {
    file_path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)
            {
                let _ = writeln!(
                    file,
                    "[{}] {}: {}",
                    record.level(),
                    record.target(),
                    record.args()
                );
            }
        }
    }

    fn flush(&self) {}
}

/// Appends engine log records up to `level` to the file at `path`.
///
/// Fails if a logger is already installed in this process.
pub fn init_logger(path: impl AsRef<Path>, level: LevelFilter) -> Result<()> {
    let logger = FileLogger {
        file_path: path.as_ref().to_path_buf(),
        level,
    };
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| DiagramStyleError::Logger(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}
