//! Input adapters for wxq
//!
//! This crate turns files into the core's input types: CSV station
//! readings into a [`wxq_core::Dataset`] and JSON documents into a
//! [`wxq_core::NestedValue`]. Validation of rows happens here, at the
//! boundary, so the core can assume well-formed data.

pub mod document;
pub mod records;

pub use document::*;
pub use records::*;

use thiserror::Error;
use wxq_core::CoreError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Unsupported value at {path}: {kind}")]
    UnsupportedValue { path: String, kind: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type IngestResult<T> = Result<T, IngestError>;
