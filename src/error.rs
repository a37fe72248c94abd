//! Error types for the exhibit library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the exhibit library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Token is neither a uniform-case letter run nor a positive integer
    #[error("Invalid label '{0}'. Valid labels are letters of one case (e.g. \"A\", \"aa\") or positive integers")]
    InvalidLabel(String),

    /// No label could be inferred from a filename
    #[error("No valid label found in file name: {0}")]
    LabelInference(String),

    /// Inputs required for the requested mode are missing
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Invalid PDF (no pages)
    #[error("PDF has no pages: {}", .0.display())]
    EmptyPdf(PathBuf),

    /// Invalid glob pattern
    #[error("Invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// No files matched pattern
    #[error("No PDF files found matching pattern: {0}")]
    NoFilesMatched(String),

    /// Moving the finished output onto its destination failed
    #[error("Failed to replace {}: {source}", .path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Whether this error stems from bad user input rather than document I/O
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::InvalidLabel(_) | Error::MissingInput(_))
    }
}
