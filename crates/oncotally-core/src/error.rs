//! Error types for filter validation.

use crate::event::FusionFilter;
use thiserror::Error;

/// Result type for filter validation.
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while validating a count request, before storage is reached.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error(
        "Filtering for mutations vs. fusions ({fusions:?}) and specifying mutation types simultaneously is not permitted"
    )]
    InvalidCombination { fusions: FusionFilter },
}
