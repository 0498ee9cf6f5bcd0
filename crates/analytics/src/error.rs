use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Fund dataset rejected: {0}")]
    Dataset(#[from] CoreError),
}

impl AnalyticsError {
    /// True when a table lacked an expected column.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, AnalyticsError::Dataset(CoreError::ColumnNotFound { .. }))
    }
}
