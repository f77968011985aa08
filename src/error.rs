use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExploreError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Cannot read dataset {}: {source}", .path.display())]
    MissingResource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Input closed")]
    InputClosed,

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
