use std::path::PathBuf;
use thiserror::Error;

/// Locator errors
#[derive(Error, Debug)]
pub enum LocateError {
    #[error("Empty module name")]
    EmptyModuleName,

    #[error("Failed to list directory {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to walk directory tree: {source}")]
    Walk {
        #[from]
        source: walkdir::Error,
    },
}

pub type Result<T> = std::result::Result<T, LocateError>;
