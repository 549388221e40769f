use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagramStyleError {
    #[error("cannot read style sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logger error: {0}")]
    Logger(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, DiagramStyleError>;
