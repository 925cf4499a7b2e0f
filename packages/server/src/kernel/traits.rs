// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "fill missing company fields") lives in domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseCompanyStore)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::companies::models::{
    Company, CompanyFilter, CompanyListQuery, CompanyPage, CompanyPayload, CompanyUpdate,
};

// =============================================================================
// AI Trait (Infrastructure - Generic LLM capabilities)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a system + user prompt pair, expecting a JSON object back
    /// (returns the raw JSON string; parse in calling code)
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

// =============================================================================
// Company Store Trait (Infrastructure - record persistence)
// =============================================================================

/// Persistence operations the ingest pipeline depends on.
///
/// `find` returns rows in a stable store order (insertion order); callers that
/// only need one match take the first.
#[async_trait]
pub trait BaseCompanyStore: Send + Sync {
    async fn find(&self, filter: &CompanyFilter, limit: i64) -> Result<Vec<Company>>;

    async fn insert(&self, company: &CompanyPayload) -> Result<Company>;

    /// Apply present fields of `changes`; absent fields keep the stored value.
    async fn update(&self, id: Uuid, changes: &CompanyUpdate) -> Result<Company>;

    /// Insert-or-overwrite keyed on (domain, name).
    async fn upsert(&self, company: &CompanyPayload) -> Result<Company>;

    /// Bulk clear. Returns the number of removed records.
    async fn delete_all(&self) -> Result<u64>;

    async fn list(&self, query: &CompanyListQuery) -> Result<CompanyPage>;

    /// Cheap connectivity check for health probes
    async fn ping(&self) -> Result<()>;
}
