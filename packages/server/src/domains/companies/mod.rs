//! Company ingest domain: normalization, cleaning, enrichment and
//! deduplicating persistence of uploaded company rows.

pub mod activities;
pub mod cleaning;
pub mod data;
pub mod error;
pub mod models;
pub mod normalize;

pub use activities::{ingest_rows, IngestSummary};
pub use error::IngestError;
