//! Enrichment adapter: asks the inference service to fill fields the cleaner
//! could not resolve.
//!
//! Every failure mode (timeout, transport error, bad status, malformed JSON)
//! resolves to empty hints; nothing here returns an error.

use std::time::Duration;

use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

use crate::domains::companies::data::{CleanCompany, CompanyField, EnrichmentHints};
use crate::kernel::BaseAI;

pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(20);
pub const DEFAULT_ENRICHMENT_CONCURRENCY: usize = 8;

const SYSTEM_PROMPT: &str = "You clean messy company data. Only fill missing fields. \
Never modify provided non-null fields. If uncertain, return null.\n\
Rules: (1) If domain is missing and name is a single brand token (letters/digits only, \
e.g. airbnb), set domain to '<brand>.com'.\n\
(2) If any input suggests global/worldwide, set country to 'Global'.\n\
(3) If country is missing but city is present (e.g. San Francisco, Palo Alto), \
infer the country and keep city.\n\
Return JSON with keys: name, domain, country, city, employee_size_bucket.";

/// Per-call bound and fan-out for one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichmentSettings {
    pub timeout: Duration,
    pub concurrency: usize,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_ENRICHMENT_TIMEOUT,
            concurrency: DEFAULT_ENRICHMENT_CONCURRENCY,
        }
    }
}

/// Ask the inference service for the fields `company` is missing.
///
/// Returns empty hints when `ai` is `None` (service disabled), when nothing
/// is missing, or on any failure. Hints for fields that were not missing are
/// dropped before returning.
pub async fn enrich_if_needed(
    ai: Option<&dyn BaseAI>,
    company: &CleanCompany,
    timeout: Duration,
) -> EnrichmentHints {
    let Some(ai) = ai else {
        return EnrichmentHints::default();
    };

    let missing = company.missing_fields();
    if missing.is_empty() {
        return EnrichmentHints::default();
    }

    let user_prompt = build_user_prompt(company, &missing);

    let content =
        match tokio::time::timeout(timeout, ai.complete_json(SYSTEM_PROMPT, &user_prompt)).await {
            Ok(Ok(content)) => content,
            Ok(Err(e)) => {
                warn!(error = %e, missing = missing.len(), "Enrichment call failed, skipping");
                return EnrichmentHints::default();
            }
            Err(_) => {
                warn!(
                    timeout_ms = timeout.as_millis() as u64,
                    "Enrichment call timed out, skipping"
                );
                return EnrichmentHints::default();
            }
        };

    let hints = parse_hints(&content, &missing);
    debug!(
        missing = missing.len(),
        filled = CompanyField::ALL
            .into_iter()
            .filter(|f| hints.get(*f).is_some())
            .count(),
        "Enrichment response parsed"
    );
    hints
}

fn build_user_prompt(company: &CleanCompany, missing: &[CompanyField]) -> String {
    json!({
        "missing": missing,
        "context": company.present_fields(),
        "row": company.raw_json,
    })
    .to_string()
}

/// Read a JSON object reply into hints for the `missing` fields only.
///
/// Non-string and blank values are treated as absent. Anything that is not a
/// JSON object yields empty hints.
pub fn parse_hints(content: &str, missing: &[CompanyField]) -> EnrichmentHints {
    let content = openai_client::strip_code_blocks(content);

    let object = match serde_json::from_str::<JsonValue>(content) {
        Ok(JsonValue::Object(object)) => object,
        Ok(_) => {
            debug!("Enrichment response was not a JSON object");
            return EnrichmentHints::default();
        }
        Err(e) => {
            debug!(error = %e, "Enrichment response was not valid JSON");
            return EnrichmentHints::default();
        }
    };

    let mut hints = EnrichmentHints::default();
    for field in CompanyField::ALL {
        let value = object
            .get(field.as_str())
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        hints.set(field, value);
    }

    hints.retain_only(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockAI;

    fn partial() -> CleanCompany {
        CleanCompany {
            name: Some("Airbnb".into()),
            city: Some("San Francisco".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_hints() {
        let hints = parse_hints(
            r#"{"name": "Other", "domain": "airbnb.com", "country": "United States", "city": 7, "employee_size_bucket": null}"#,
            &[CompanyField::Domain, CompanyField::Country, CompanyField::City],
        );

        assert_eq!(hints.name, None);
        assert_eq!(hints.domain.as_deref(), Some("airbnb.com"));
        assert_eq!(hints.country.as_deref(), Some("United States"));
        assert_eq!(hints.city, None);
        assert_eq!(hints.employee_size_bucket, None);
    }

    #[test]
    fn parse_hints_accepts_fenced_json() {
        let hints = parse_hints("```json\n{\"city\": \" Paris \"}\n```", &[CompanyField::City]);
        assert_eq!(hints.city.as_deref(), Some("Paris"));
    }

    #[test]
    fn parse_hints_rejects_non_objects() {
        assert!(parse_hints("not json", &CompanyField::ALL).is_empty());
        assert!(parse_hints("[1, 2]", &CompanyField::ALL).is_empty());
        assert!(parse_hints(r#"{"city": ""}"#, &CompanyField::ALL).is_empty());
    }

    #[test]
    fn user_prompt_lists_missing_fields_and_context() {
        let company = partial();
        let prompt: JsonValue =
            serde_json::from_str(&build_user_prompt(&company, &company.missing_fields()))
                .unwrap();

        assert_eq!(
            prompt["missing"],
            json!(["domain", "country", "employee_size_bucket"])
        );
        assert_eq!(prompt["context"]["name"], "Airbnb");
        assert!(prompt["context"].get("domain").is_none());
        assert!(prompt["row"].is_object());
    }

    #[tokio::test]
    async fn disabled_service_returns_empty() {
        let hints = enrich_if_needed(None, &partial(), DEFAULT_ENRICHMENT_TIMEOUT).await;
        assert!(hints.is_empty());
    }

    #[tokio::test]
    async fn complete_record_skips_the_call() {
        let ai = MockAI::new().with_response(r#"{"city": "Oslo"}"#);
        let company = CleanCompany {
            name: Some("Acme".into()),
            domain: Some("acme.com".into()),
            country: Some("Norway".into()),
            city: Some("Bergen".into()),
            employee_size_bucket: Some("11-50".into()),
            ..Default::default()
        };

        let hints = enrich_if_needed(Some(&ai), &company, DEFAULT_ENRICHMENT_TIMEOUT).await;
        assert!(hints.is_empty());
        assert_eq!(ai.call_count(), 0);
    }

    #[tokio::test]
    async fn hints_for_populated_fields_are_dropped() {
        let ai = MockAI::new()
            .with_response(r#"{"name": "Not Airbnb", "city": "Paris", "domain": "airbnb.com"}"#);

        let hints = enrich_if_needed(Some(&ai), &partial(), DEFAULT_ENRICHMENT_TIMEOUT).await;

        assert_eq!(hints.name, None);
        assert_eq!(hints.city, None);
        assert_eq!(hints.domain.as_deref(), Some("airbnb.com"));
        assert!(ai.was_called_with("\"missing\""));
    }

    #[tokio::test]
    async fn service_error_returns_empty() {
        let ai = MockAI::new().with_error("rate limited");
        let hints = enrich_if_needed(Some(&ai), &partial(), DEFAULT_ENRICHMENT_TIMEOUT).await;
        assert!(hints.is_empty());
        assert_eq!(ai.call_count(), 1);
    }

    #[tokio::test]
    async fn timeout_returns_empty() {
        let ai = MockAI::new()
            .with_delay(Duration::from_millis(200))
            .with_response(r#"{"domain": "airbnb.com"}"#);

        let hints = enrich_if_needed(Some(&ai), &partial(), Duration::from_millis(20)).await;
        assert!(hints.is_empty());
    }
}
