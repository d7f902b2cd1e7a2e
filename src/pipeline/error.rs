//! Error taxonomy for the preparation pipeline

use polars::prelude::PolarsError;
use thiserror::Error;

/// Result alias used throughout the pipeline
pub type PrepResult<T> = std::result::Result<T, PrepError>;

/// Errors raised while preparing a record set.
///
/// Both domain variants are fatal: the pipeline produces no partial output.
#[derive(Error, Debug)]
pub enum PrepError {
    /// Input is missing a required column, has the wrong type, or the two
    /// record sets disagree on their columns.
    #[error("Schema error: {0}")]
    Schema(String),

    /// A statistic the pipeline needs cannot be computed from the data.
    #[error("Data error: {0}")]
    Data(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl PrepError {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    /// True for the `Schema` variant
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    /// True for the `Data` variant
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }
}
