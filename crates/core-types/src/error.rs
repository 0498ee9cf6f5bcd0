use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    /// A table lacks a column whose header contains the expected keyword.
    #[error("Lookup failure: table '{table}' has no column matching '{keyword}'")]
    ColumnNotFound { table: String, keyword: String },

    #[error("Failed to parse fund dataset: {0}")]
    Parse(#[from] serde_json::Error),
}
