use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Scan root not found or not a directory: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
