use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Filesystem error at {path}: {reason}")]
    Filesystem { path: PathBuf, reason: String },

    #[error("Dataset root not found: {0}")]
    RootNotFound(PathBuf),

    #[error("No volume directories found under {0}")]
    NoVolumes(PathBuf),

    #[error("Invalid volume pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid table {path}: {reason}")]
    Table { path: PathBuf, reason: String },

    #[cfg(feature = "images")]
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Propeller not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, IndexError>;
