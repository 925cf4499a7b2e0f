// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{BaseAI, BaseCompanyStore, ServerDeps};
use crate::domains::companies::activities::EnrichmentSettings;
use crate::domains::companies::data::keep_or_fill;
use crate::domains::companies::models::{
    Company, CompanyFilter, CompanyListQuery, CompanyPage, CompanyPayload, CompanyUpdate,
};

// =============================================================================
// Mock AI (Generic LLM capabilities)
// =============================================================================

/// Queued replies for `complete_json`. Clones share the queue and the call log.
#[derive(Clone, Default)]
pub struct MockAI {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl MockAI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(response.into()));
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.with_response(json)
    }

    /// Queue a failed call
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    /// Sleep before answering (for timeout tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all user prompts that were sent to the AI
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last user prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().cloned()
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|p| p.contains(text))
    }

    /// Get the number of times the AI was called
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete_json(&self, _system_prompt: &str, user_prompt: &str) -> Result<String> {
        // Record the call
        self.calls.lock().unwrap().push(user_prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            // Nothing to fill
            None => Ok("{}".to_string()),
        }
    }
}

// =============================================================================
// In-memory Company Store
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FailureMode {
    Writes,
    /// Writes succeed until this many have gone through
    WritesAfter(usize),
    All,
}

/// Company store over a `Vec`, mirroring the Postgres semantics: insertion
/// order for lookups, merge-by-presence updates and the partial unique
/// (domain, name) key. Clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryCompanyStore {
    companies: Arc<Mutex<Vec<Company>>>,
    failure: Arc<Mutex<Option<(FailureMode, String)>>>,
    writes: Arc<Mutex<usize>>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every mutation with `message` (reads still succeed)
    pub fn fail_writes(self, message: impl Into<String>) -> Self {
        *self.failure.lock().unwrap() = Some((FailureMode::Writes, message.into()));
        self
    }

    /// Let `count` more writes through, then fail every mutation with `message`
    pub fn fail_writes_after(self, count: usize, message: impl Into<String>) -> Self {
        *self.writes.lock().unwrap() = 0;
        *self.failure.lock().unwrap() = Some((FailureMode::WritesAfter(count), message.into()));
        self
    }

    /// Fail every operation, including `ping`
    pub fn unavailable(self, message: impl Into<String>) -> Self {
        *self.failure.lock().unwrap() = Some((FailureMode::All, message.into()));
        self
    }

    /// Clear any injected failure
    pub fn recover(&self) {
        self.failure.lock().unwrap().take();
    }

    /// All records in insertion order
    pub fn all(&self) -> Vec<Company> {
        self.companies.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.companies.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, write: bool) -> Result<()> {
        match &*self.failure.lock().unwrap() {
            Some((FailureMode::All, message)) => bail!("{}", message),
            Some((FailureMode::Writes, message)) if write => bail!("{}", message),
            Some((FailureMode::WritesAfter(count), message)) if write => {
                let mut writes = self.writes.lock().unwrap();
                if *writes >= *count {
                    bail!("{}", message);
                }
                *writes += 1;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn new_company(payload: &CompanyPayload) -> Result<Company> {
        let now = Utc::now();
        Ok(Company {
            id: Uuid::now_v7(),
            name: payload.name.clone(),
            domain: payload.domain.clone(),
            country: payload.country.clone(),
            city: payload.city.clone(),
            employee_size_bucket: payload.employee_size_bucket.clone(),
            raw_json: serde_json::to_value(&payload.raw_json)?,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Another record already owns this (domain, name) key.
fn key_taken(companies: &[Company], except: Option<Uuid>, domain: &str, name: Option<&str>) -> bool {
    companies.iter().any(|c| {
        Some(c.id) != except && c.domain.as_deref() == Some(domain) && c.name.as_deref() == name
    })
}

#[async_trait]
impl BaseCompanyStore for InMemoryCompanyStore {
    async fn find(&self, filter: &CompanyFilter, limit: i64) -> Result<Vec<Company>> {
        self.check(false)?;
        let companies = self.companies.lock().unwrap();
        Ok(companies
            .iter()
            .filter(|c| filter.matches(c))
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn insert(&self, payload: &CompanyPayload) -> Result<Company> {
        self.check(true)?;
        let mut companies = self.companies.lock().unwrap();
        if let Some(domain) = payload.domain.as_deref() {
            if key_taken(&companies, None, domain, payload.name.as_deref()) {
                bail!("duplicate key value violates unique constraint on (domain, name)");
            }
        }
        let company = Self::new_company(payload)?;
        companies.push(company.clone());
        Ok(company)
    }

    async fn update(&self, id: Uuid, changes: &CompanyUpdate) -> Result<Company> {
        self.check(true)?;
        let mut companies = self.companies.lock().unwrap();
        let index = companies
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| anyhow!("Company {} not found", id))?;

        let current = &companies[index];
        let domain = keep_or_fill(changes.domain.clone(), current.domain.clone());
        if let Some(domain) = domain.as_deref() {
            if key_taken(&companies, Some(id), domain, current.name.as_deref()) {
                bail!("duplicate key value violates unique constraint on (domain, name)");
            }
        }

        let raw_json = match &changes.raw_json {
            Some(raw) => serde_json::to_value(raw)?,
            None => current.raw_json.clone(),
        };

        let company = &mut companies[index];
        company.country = keep_or_fill(changes.country.clone(), company.country.take());
        company.city = keep_or_fill(changes.city.clone(), company.city.take());
        company.employee_size_bucket = keep_or_fill(
            changes.employee_size_bucket.clone(),
            company.employee_size_bucket.take(),
        );
        company.domain = domain;
        company.raw_json = raw_json;
        company.updated_at = Utc::now();
        Ok(company.clone())
    }

    async fn upsert(&self, payload: &CompanyPayload) -> Result<Company> {
        self.check(true)?;
        let mut companies = self.companies.lock().unwrap();

        let existing = payload.domain.as_deref().and_then(|domain| {
            companies.iter().position(|c| {
                c.domain.as_deref() == Some(domain) && c.name == payload.name
            })
        });

        match existing {
            Some(index) => {
                let raw_json = serde_json::to_value(&payload.raw_json)?;
                let company = &mut companies[index];
                company.country = keep_or_fill(payload.country.clone(), company.country.take());
                company.city = keep_or_fill(payload.city.clone(), company.city.take());
                company.employee_size_bucket = keep_or_fill(
                    payload.employee_size_bucket.clone(),
                    company.employee_size_bucket.take(),
                );
                company.raw_json = raw_json;
                company.updated_at = Utc::now();
                Ok(company.clone())
            }
            None => {
                let company = Self::new_company(payload)?;
                companies.push(company.clone());
                Ok(company)
            }
        }
    }

    async fn delete_all(&self) -> Result<u64> {
        self.check(true)?;
        let mut companies = self.companies.lock().unwrap();
        let removed = companies.len() as u64;
        companies.clear();
        Ok(removed)
    }

    async fn list(&self, query: &CompanyListQuery) -> Result<CompanyPage> {
        self.check(false)?;
        let companies = self.companies.lock().unwrap();

        // Newest first
        let matching: Vec<&Company> = companies.iter().rev().filter(|c| query.matches(c)).collect();
        let total = matching.len() as i64;
        let data = matching
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit() as usize)
            .cloned()
            .collect();

        Ok(CompanyPage { data, total })
    }

    async fn ping(&self) -> Result<()> {
        self.check(false)
    }
}

// =============================================================================
// TestDependencies builder
// =============================================================================

/// Builder for `ServerDeps` backed by mocks.
pub struct TestDependencies {
    pub store: Arc<dyn BaseCompanyStore>,
    pub ai: Option<Arc<dyn BaseAI>>,
    pub enrichment: EnrichmentSettings,
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryCompanyStore::new()),
            ai: None,
            enrichment: EnrichmentSettings {
                timeout: Duration::from_secs(2),
                concurrency: 4,
            },
        }
    }

    /// Set the company store
    pub fn store(mut self, store: impl BaseCompanyStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Enable enrichment with a mock AI
    pub fn ai(mut self, ai: MockAI) -> Self {
        self.ai = Some(Arc::new(ai));
        self
    }

    pub fn enrichment(mut self, settings: EnrichmentSettings) -> Self {
        self.enrichment = settings;
        self
    }

    /// Convert into ServerDeps for testing
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(self.store, self.ai, self.enrichment)
    }
}
