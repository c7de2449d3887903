//! Error types for wordstatlib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while configuring or counting documents
#[derive(Error, Debug)]
pub enum WordstatError {
    /// Words-per-page value is not a positive integer
    #[error("invalid words per page '{value}': expected a positive integer")]
    InvalidWordsPerPage { value: String },

    /// Failed to read a document
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Settings file is not valid TOML
    #[error("failed to parse settings '{path}': {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
