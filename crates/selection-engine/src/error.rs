//! Error types for selection-engine operations.
//!
//! Only programmer errors surface here. Picking a disabled date or committing a
//! range that fails the validity scan is not an error: the root simply ignores
//! the pick or keeps it as a preview.

use thiserror::Error;

use crate::granularity::Granularity;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown panel part: {0}")]
    UnknownPart(String),

    #[error("Panel part already registered: {0}")]
    DuplicatePart(String),

    #[error("Panel part {part} cannot display a {granularity} grid")]
    UnsupportedDisplay { part: String, granularity: Granularity },

    #[error("Target range edited while comparison is inactive")]
    CompareInactive,

    #[error("Invalid {unit} step: {step}")]
    InvalidStep { unit: &'static str, step: u32 },
}

pub type Result<T> = std::result::Result<T, SelectionError>;
