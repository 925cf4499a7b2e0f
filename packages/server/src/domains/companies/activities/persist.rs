//! Deduplication / merge engine.
//!
//! Decides per cleaned row whether to promote a domainless record, upsert on
//! (domain, name), update a domainless match in place, or insert fresh.
//! Matching is exact equality on `name` (and `city` when present).

use anyhow::Result;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::domains::companies::data::CleanCompany;
use crate::domains::companies::models::{Company, CompanyFilter, CompanyPayload, CompanyUpdate};
use crate::kernel::BaseCompanyStore;

/// What happened to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistOutcome {
    /// A domainless record gained this row's domain, then the upsert ran.
    Promoted { id: Uuid },
    /// Upsert on (domain, name) with no prior domainless match.
    Upserted { id: Uuid },
    /// A domainless record matched by name (and city) was updated.
    Updated { id: Uuid },
    /// No match; a new record was created.
    Inserted { id: Uuid },
}

impl PersistOutcome {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Promoted { id }
            | Self::Upserted { id }
            | Self::Updated { id }
            | Self::Inserted { id } => *id,
        }
    }
}

/// First domainless record with this name, preferring one in the same city.
pub async fn find_domainless_match(
    store: &dyn BaseCompanyStore,
    name: &str,
    city: Option<&str>,
) -> Result<Option<Company>> {
    if let Some(city) = city {
        let by_city = store
            .find(&CompanyFilter::domainless(name, Some(city)), 1)
            .await?;
        if let Some(found) = by_city.into_iter().next() {
            return Ok(Some(found));
        }
    }

    let by_name = store.find(&CompanyFilter::domainless(name, None), 1).await?;
    Ok(by_name.into_iter().next())
}

/// Write one cleaned row to the store.
///
/// Store errors propagate untouched; earlier rows stay committed.
pub async fn persist_company(
    store: &dyn BaseCompanyStore,
    company: &CleanCompany,
) -> Result<PersistOutcome> {
    let payload = CompanyPayload::from(company);

    match (payload.domain.as_deref(), payload.name.as_deref()) {
        (Some(domain), Some(name)) => {
            // A domainless record can only take over the key while it is free;
            // otherwise the upsert merges into the keyed record.
            let key_taken = !store
                .find(&CompanyFilter::keyed(domain, name), 1)
                .await?
                .is_empty();

            let candidate = if key_taken {
                None
            } else {
                find_domainless_match(store, name, payload.city.as_deref()).await?
            };

            let promoted = match candidate {
                Some(existing) => {
                    store.update(existing.id, &promotion(&payload)).await?;
                    debug!(id = %existing.id, domain, name, "Promoted domainless company");
                    true
                }
                None => false,
            };

            let saved = store.upsert(&payload).await?;
            debug!(id = %saved.id, domain, name, "Upserted company");

            Ok(if promoted {
                PersistOutcome::Promoted { id: saved.id }
            } else {
                PersistOutcome::Upserted { id: saved.id }
            })
        }
        (Some(domain), None) => {
            let saved = store.upsert(&payload).await?;
            debug!(id = %saved.id, domain, "Upserted nameless company");
            Ok(PersistOutcome::Upserted { id: saved.id })
        }
        (None, Some(name)) => {
            match find_domainless_match(store, name, payload.city.as_deref()).await? {
                Some(existing) => {
                    let saved = store.update(existing.id, &enrichment(&payload)).await?;
                    debug!(id = %saved.id, name, "Updated domainless company");
                    Ok(PersistOutcome::Updated { id: saved.id })
                }
                None => {
                    let saved = store.insert(&payload).await?;
                    debug!(id = %saved.id, name, "Inserted domainless company");
                    Ok(PersistOutcome::Inserted { id: saved.id })
                }
            }
        }
        (None, None) => {
            let saved = store.insert(&payload).await?;
            debug!(id = %saved.id, "Inserted anonymous company");
            Ok(PersistOutcome::Inserted { id: saved.id })
        }
    }
}

fn promotion(payload: &CompanyPayload) -> CompanyUpdate {
    CompanyUpdate {
        domain: payload.domain.clone(),
        ..enrichment(payload)
    }
}

fn enrichment(payload: &CompanyPayload) -> CompanyUpdate {
    CompanyUpdate {
        domain: None,
        country: payload.country.clone(),
        city: payload.city.clone(),
        employee_size_bucket: payload.employee_size_bucket.clone(),
        raw_json: Some(payload.raw_json.clone()),
    }
}
