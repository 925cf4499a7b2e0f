//! Server dependencies for activities (using traits for testability)
//!
//! This module provides the central dependency container used by the ingest
//! pipeline and the HTTP handlers. External services sit behind traits so
//! tests can swap them for in-memory versions.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::companies::activities::EnrichmentSettings;
use crate::domains::companies::models::{
    Company, CompanyFilter, CompanyListQuery, CompanyPage, CompanyPayload, CompanyUpdate,
};
use crate::kernel::{BaseAI, BaseCompanyStore};

// =============================================================================
// PostgresCompanyStore (implements BaseCompanyStore over the companies table)
// =============================================================================

/// Postgres-backed company store. Queries live on `Company` in the models
/// layer; this adapter only forwards the pool.
#[derive(Clone)]
pub struct PostgresCompanyStore {
    pool: PgPool,
}

impl PostgresCompanyStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseCompanyStore for PostgresCompanyStore {
    async fn find(&self, filter: &CompanyFilter, limit: i64) -> Result<Vec<Company>> {
        Company::find(filter, limit, &self.pool).await
    }

    async fn insert(&self, company: &CompanyPayload) -> Result<Company> {
        Company::insert(company, &self.pool).await
    }

    async fn update(&self, id: Uuid, changes: &CompanyUpdate) -> Result<Company> {
        Company::update(id, changes, &self.pool).await
    }

    async fn upsert(&self, company: &CompanyPayload) -> Result<Company> {
        Company::upsert(company, &self.pool).await
    }

    async fn delete_all(&self) -> Result<u64> {
        Company::delete_all(&self.pool).await
    }

    async fn list(&self, query: &CompanyListQuery) -> Result<CompanyPage> {
        Company::list(query, &self.pool).await
    }

    async fn ping(&self) -> Result<()> {
        Company::ping(&self.pool).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseCompanyStore>,
    /// Inference service; `None` when enrichment is disabled or unconfigured.
    pub ai: Option<Arc<dyn BaseAI>>,
    pub enrichment: EnrichmentSettings,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseCompanyStore>,
        ai: Option<Arc<dyn BaseAI>>,
        enrichment: EnrichmentSettings,
    ) -> Self {
        Self {
            store,
            ai,
            enrichment,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.ai.is_some()
    }
}
