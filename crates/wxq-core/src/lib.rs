//! Core data types and pure computations for wxq
//!
//! This crate provides the station reading model, the per-station
//! fluctuation queries, and lazy flattening of nested documents.
//! Nothing here performs I/O.

pub mod extremes;
pub mod flatten;
pub mod fluctuation;
pub mod index;
pub mod types;

pub use extremes::*;
pub use flatten::*;
pub use fluctuation::*;
pub use index::*;
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("Dataset contains no records")]
    EmptyDataset,

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
