use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or writing workbooks
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Workbook engine could not read {}: {message}", path.display())]
    Engine { path: PathBuf, message: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Write error: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
