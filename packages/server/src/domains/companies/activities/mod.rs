pub mod enrich;
pub mod ingest;
pub mod persist;

pub use enrich::{enrich_if_needed, parse_hints, EnrichmentSettings};
pub use ingest::{ingest_rows, prepare_rows, IngestSummary};
pub use persist::{find_domainless_match, persist_company, PersistOutcome};
