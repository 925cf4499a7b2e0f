//! Upload pipeline: clean -> enrich -> merge -> re-normalize -> persist.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info};

use crate::domains::companies::activities::enrich::enrich_if_needed;
use crate::domains::companies::activities::persist::{persist_company, PersistOutcome};
use crate::domains::companies::cleaning::clean_row;
use crate::domains::companies::data::{CleanCompany, RawRow};
use crate::domains::companies::error::IngestError;
use crate::kernel::ServerDeps;

/// Counts reported back to the uploader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    /// Input rows processed
    pub rows: usize,
    pub promoted: usize,
    pub upserted: usize,
    pub updated: usize,
    pub inserted: usize,
    /// Rows that received at least one enrichment hint
    pub enriched: usize,
}

impl IngestSummary {
    fn record(&mut self, outcome: PersistOutcome) {
        match outcome {
            PersistOutcome::Promoted { .. } => self.promoted += 1,
            PersistOutcome::Upserted { .. } => self.upserted += 1,
            PersistOutcome::Updated { .. } => self.updated += 1,
            PersistOutcome::Inserted { .. } => self.inserted += 1,
        }
    }
}

/// Clean and optionally enrich every row; no store access.
///
/// Enrichment runs only when `use_ai` is set and the service is configured.
/// Calls run concurrently (bounded) and results keep input order.
pub async fn prepare_rows(
    deps: &ServerDeps,
    rows: Vec<RawRow>,
    use_ai: bool,
) -> (Vec<CleanCompany>, usize) {
    let cleaned: Vec<CleanCompany> = rows.into_iter().map(clean_row).collect();

    let ai = if use_ai { deps.ai.as_deref() } else { None };
    let Some(ai) = ai else {
        return (cleaned, 0);
    };

    let timeout = deps.enrichment.timeout;
    let results: Vec<(CleanCompany, bool)> = stream::iter(cleaned)
        .map(|company| async move {
            let hints = enrich_if_needed(Some(ai), &company, timeout).await;
            let enriched = !hints.is_empty();
            (company.fill_missing(hints).renormalize(), enriched)
        })
        .buffered(deps.enrichment.concurrency.max(1))
        .collect()
        .await;

    let enriched = results.iter().filter(|(_, enriched)| *enriched).count();
    (results.into_iter().map(|(c, _)| c).collect(), enriched)
}

/// Run one upload through the whole pipeline.
///
/// Domain-bearing rows are persisted first, then domainless rows, one row at
/// a time. The first store error aborts the batch; rows written before it
/// stay written.
pub async fn ingest_rows(
    deps: &ServerDeps,
    rows: Vec<RawRow>,
    use_ai: bool,
) -> Result<IngestSummary, IngestError> {
    let mut summary = IngestSummary {
        rows: rows.len(),
        ..Default::default()
    };

    info!(rows = summary.rows, use_ai, "Ingesting company rows");

    let (companies, enriched) = prepare_rows(deps, rows, use_ai).await;
    summary.enriched = enriched;

    let (with_domain, without_domain): (Vec<_>, Vec<_>) =
        companies.into_iter().partition(|c| c.domain.is_some());

    for company in with_domain.iter().chain(without_domain.iter()) {
        match persist_company(deps.store.as_ref(), company).await {
            Ok(outcome) => summary.record(outcome),
            Err(e) => {
                error!(
                    error = %e,
                    name = ?company.name,
                    domain = ?company.domain,
                    "Failed to persist company, aborting batch"
                );
                return Err(IngestError::Store(e));
            }
        }
    }

    info!(
        rows = summary.rows,
        promoted = summary.promoted,
        upserted = summary.upserted,
        updated = summary.updated,
        inserted = summary.inserted,
        enriched = summary.enriched,
        "Company ingest complete"
    );

    Ok(summary)
}
