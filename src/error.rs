//! Error handling for statement processing operations.
//!
//! Provides typed errors with context for header parsing, positional
//! column mapping, and the surrounding file processing pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Source folder not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Malformed header field {field:?}: expected a single 'key: value' pair")]
    MalformedHeaderField { field: String },

    #[error("Statement header carries no account number")]
    MissingAccountNo,

    #[error("Invalid contract code {code:?}: {reason}")]
    InvalidContractCode { code: String, reason: String },

    #[error(
        "Column count mismatch in segment '{segment}': expected at least {expected} columns, found {found}"
    )]
    ColumnCount {
        segment: String,
        expected: usize,
        found: usize,
    },

    #[error("Header parsing failed for file: {path} - {reason}")]
    HeaderParsingFailed { path: PathBuf, reason: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Merge failed: {reason}")]
    MergeFailed { reason: String },
}

pub type Result<T> = std::result::Result<T, BillError>;
