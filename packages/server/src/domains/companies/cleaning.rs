//! Row cleaner: maps arbitrary spreadsheet columns onto the canonical company
//! shape, then runs the field normalizers.

use std::collections::HashMap;

use serde_json::Value as JsonValue;

use crate::domains::companies::data::{CleanCompany, RawRow};
use crate::domains::companies::error::IngestError;
use crate::domains::companies::normalize::{
    bucket_employee_size, derive_display_name, normalize_city, normalize_country,
    normalize_domain,
};

// Column aliases, tried in order. Matching is case-insensitive.
pub const NAME_ALIASES: &[&str] = &[
    "name",
    "company",
    "company name",
    "company_name",
    "organization",
    "org",
];
pub const DOMAIN_ALIASES: &[&str] = &["domain", "website", "url", "website url", "website_url"];
pub const COUNTRY_ALIASES: &[&str] = &["country", "country code", "country_code", "location"];
pub const CITY_ALIASES: &[&str] = &["city", "town"];
pub const EMPLOYEE_SIZE_ALIASES: &[&str] = &[
    "employees",
    "employee_size",
    "employee range",
    "size",
    "headcount",
    "number of employees",
];

/// Case-insensitive view over one row's column names.
struct ColumnIndex<'a> {
    row: &'a RawRow,
    by_lower: HashMap<String, &'a str>,
}

impl<'a> ColumnIndex<'a> {
    fn new(row: &'a RawRow) -> Self {
        let by_lower = row
            .keys()
            .map(|key| (key.trim().to_lowercase(), key.as_str()))
            .collect();
        Self { row, by_lower }
    }

    /// First alias whose cell has a non-blank value, trimmed.
    fn pick(&self, aliases: &[&str]) -> Option<String> {
        aliases.iter().find_map(|alias| {
            let key = self.by_lower.get(*alias)?;
            cell_text(self.row.get(*key)?)
        })
    }
}

fn cell_text(value: &JsonValue) -> Option<String> {
    let text = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Clean one raw row. Never fails; unresolvable fields are absent.
pub fn clean_row(row: RawRow) -> CleanCompany {
    let columns = ColumnIndex::new(&row);

    let domain = columns
        .pick(DOMAIN_ALIASES)
        .and_then(|raw| normalize_domain(&raw));

    let name = columns
        .pick(NAME_ALIASES)
        .or_else(|| domain.as_deref().and_then(derive_display_name));

    let country_raw = columns.pick(COUNTRY_ALIASES);
    let country = country_raw.as_deref().and_then(normalize_country);

    // "San Francisco, USA" in a location column still yields a city
    let city = columns
        .pick(CITY_ALIASES)
        .and_then(|raw| normalize_city(&raw))
        .or_else(|| {
            country_raw
                .as_deref()
                .and_then(|raw| raw.split_once(','))
                .and_then(|(left, _)| normalize_city(left.trim()))
        });

    let employee_size_bucket = columns
        .pick(EMPLOYEE_SIZE_ALIASES)
        .and_then(|raw| bucket_employee_size(&raw));

    CleanCompany {
        name,
        domain,
        country,
        city,
        employee_size_bucket,
        raw_json: row,
    }
}

/// Parse header-labeled CSV text into raw rows.
///
/// Every cell is kept as a string; blank lines are skipped; short records
/// simply omit their trailing columns.
pub fn parse_csv(content: &str) -> Result<Vec<RawRow>, IngestError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(IngestError::validation("CSV header row is empty"));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, field)| (header.to_string(), JsonValue::from(field)))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}
