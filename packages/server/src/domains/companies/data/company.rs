//! Canonical (cleaned) company shape shared by the cleaner, the enrichment
//! adapter and the persist engine.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domains::companies::normalize::{
    bucket_employee_size, normalize_city, normalize_country, normalize_domain,
};

/// One uploaded row: column name (any case) -> scalar cell, in file order.
pub type RawRow = IndexMap<String, JsonValue>;

/// Fields the cleaner and the inference service can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyField {
    Name,
    Domain,
    Country,
    City,
    EmployeeSizeBucket,
}

impl CompanyField {
    pub const ALL: [CompanyField; 5] = [
        CompanyField::Name,
        CompanyField::Domain,
        CompanyField::Country,
        CompanyField::City,
        CompanyField::EmployeeSizeBucket,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Domain => "domain",
            Self::Country => "country",
            Self::City => "city",
            Self::EmployeeSizeBucket => "employee_size_bucket",
        }
    }
}

/// Keep `existing` when present, otherwise take `candidate`.
///
/// Used for enrichment merges (existing = cleaned value) and for store
/// updates (existing = incoming value, candidate = stored value).
pub fn keep_or_fill<T>(existing: Option<T>, candidate: Option<T>) -> Option<T> {
    existing.or(candidate)
}

/// A row after alias resolution and normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanCompany {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub employee_size_bucket: Option<String>,
    pub raw_json: RawRow,
}

impl CleanCompany {
    pub fn get(&self, field: CompanyField) -> Option<&str> {
        match field {
            CompanyField::Name => self.name.as_deref(),
            CompanyField::Domain => self.domain.as_deref(),
            CompanyField::Country => self.country.as_deref(),
            CompanyField::City => self.city.as_deref(),
            CompanyField::EmployeeSizeBucket => self.employee_size_bucket.as_deref(),
        }
    }

    /// Fields still absent, in canonical order.
    pub fn missing_fields(&self) -> Vec<CompanyField> {
        CompanyField::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Present fields as a JSON object (context for the inference service).
    pub fn present_fields(&self) -> serde_json::Map<String, JsonValue> {
        CompanyField::ALL
            .into_iter()
            .filter_map(|field| {
                self.get(field)
                    .map(|value| (field.as_str().to_string(), JsonValue::from(value)))
            })
            .collect()
    }

    /// Fill absent fields from enrichment hints. Populated fields are never
    /// replaced.
    pub fn fill_missing(self, hints: EnrichmentHints) -> Self {
        Self {
            name: keep_or_fill(self.name, hints.name),
            domain: keep_or_fill(self.domain, hints.domain),
            country: keep_or_fill(self.country, hints.country),
            city: keep_or_fill(self.city, hints.city),
            employee_size_bucket: keep_or_fill(
                self.employee_size_bucket,
                hints.employee_size_bucket,
            ),
            raw_json: self.raw_json,
        }
    }

    /// Re-run the field normalizers (enrichment output is free text).
    pub fn renormalize(self) -> Self {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Self {
            name,
            domain: self.domain.as_deref().and_then(normalize_domain),
            country: self.country.as_deref().and_then(normalize_country),
            city: self.city.as_deref().and_then(normalize_city),
            employee_size_bucket: self
                .employee_size_bucket
                .as_deref()
                .and_then(bucket_employee_size),
            raw_json: self.raw_json,
        }
    }
}

/// Best-effort field guesses returned by the inference service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentHints {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub employee_size_bucket: Option<String>,
}

impl EnrichmentHints {
    pub fn is_empty(&self) -> bool {
        CompanyField::ALL.into_iter().all(|f| self.get(f).is_none())
    }

    pub fn get(&self, field: CompanyField) -> Option<&str> {
        match field {
            CompanyField::Name => self.name.as_deref(),
            CompanyField::Domain => self.domain.as_deref(),
            CompanyField::Country => self.country.as_deref(),
            CompanyField::City => self.city.as_deref(),
            CompanyField::EmployeeSizeBucket => self.employee_size_bucket.as_deref(),
        }
    }

    fn slot(&mut self, field: CompanyField) -> &mut Option<String> {
        match field {
            CompanyField::Name => &mut self.name,
            CompanyField::Domain => &mut self.domain,
            CompanyField::Country => &mut self.country,
            CompanyField::City => &mut self.city,
            CompanyField::EmployeeSizeBucket => &mut self.employee_size_bucket,
        }
    }

    pub fn set(&mut self, field: CompanyField, value: Option<String>) {
        *self.slot(field) = value;
    }

    /// Drop every hint for a field not listed in `allowed`.
    pub fn retain_only(mut self, allowed: &[CompanyField]) -> Self {
        for field in CompanyField::ALL {
            if !allowed.contains(&field) {
                self.slot(field).take();
            }
        }
        self
    }
}
