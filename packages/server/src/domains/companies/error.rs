use thiserror::Error;

/// Errors surfaced by the company ingest pipeline.
///
/// Normalization misses and enrichment failures never show up here: they
/// resolve to absent fields.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Bad or missing input; nothing was processed.
    #[error("{0}")]
    Validation(String),

    /// A store read or write failed. Rows committed before the failure stay
    /// committed.
    #[error("{0:#}")]
    Store(#[from] anyhow::Error),
}

impl IngestError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Validation(format!("Invalid CSV: {}", err))
    }
}
