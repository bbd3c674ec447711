use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read catalog csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog row {line}: {message}")]
    Row { line: u64, message: String },
    #[error("unknown export format: {0}")]
    UnknownFormat(String),
}
