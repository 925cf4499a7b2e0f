// Company Ingest - API Core
//
// Cleans uploaded company spreadsheets, optionally fills gaps through an LLM,
// and stores deduplicated records in Postgres.
//
// Architecture follows domain-driven design: domains/companies holds the
// normalizers, cleaner and ingest activities; kernel holds infrastructure.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
