use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domains::companies::data::{CleanCompany, RawRow};

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 500;

/// Company - persisted, deduplicated company record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub name: Option<String>,
    pub domain: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub employee_size_bucket: Option<String>,
    pub raw_json: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert/upsert payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyPayload {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub employee_size_bucket: Option<String>,
    pub raw_json: RawRow,
}

impl From<&CleanCompany> for CompanyPayload {
    fn from(company: &CleanCompany) -> Self {
        Self {
            name: company.name.clone(),
            domain: company.domain.clone(),
            country: company.country.clone(),
            city: company.city.clone(),
            employee_size_bucket: company.employee_size_bucket.clone(),
            raw_json: company.raw_json.clone(),
        }
    }
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub domain: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub employee_size_bucket: Option<String>,
    pub raw_json: Option<RawRow>,
}

/// Equality filter used by the dedup lookups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub domain_is_null: bool,
    pub domain: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
}

impl CompanyFilter {
    /// Domainless records matching `name` (and `city` when given).
    pub fn domainless(name: &str, city: Option<&str>) -> Self {
        Self {
            domain_is_null: true,
            name: Some(name.to_string()),
            city: city.map(str::to_string),
            ..Default::default()
        }
    }

    /// The record owning the (domain, name) key, if any.
    pub fn keyed(domain: &str, name: &str) -> Self {
        Self {
            domain: Some(domain.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn matches(&self, company: &Company) -> bool {
        (!self.domain_is_null || company.domain.is_none())
            && self
                .domain
                .as_ref()
                .map_or(true, |domain| company.domain.as_ref() == Some(domain))
            && self
                .name
                .as_ref()
                .map_or(true, |name| company.name.as_ref() == Some(name))
            && self
                .city
                .as_ref()
                .map_or(true, |city| company.city.as_ref() == Some(city))
    }
}

/// Listing filters and pagination
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyListQuery {
    pub country: Option<String>,
    #[serde(rename = "employee_size")]
    pub employee_size_bucket: Option<String>,
    pub domain: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl CompanyListQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Domain substring filter; ignored below two characters.
    pub fn domain_contains(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|d| d.chars().count() >= 2)
    }

    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn country(&self) -> Option<&str> {
        Self::non_empty(&self.country)
    }

    pub fn employee_size_bucket(&self) -> Option<&str> {
        Self::non_empty(&self.employee_size_bucket)
    }

    pub fn matches(&self, company: &Company) -> bool {
        self.country()
            .map_or(true, |c| company.country.as_deref() == Some(c))
            && self
                .employee_size_bucket()
                .map_or(true, |b| company.employee_size_bucket.as_deref() == Some(b))
            && self.domain_contains().map_or(true, |needle| {
                company
                    .domain
                    .as_deref()
                    .map_or(false, |d| d.to_lowercase().contains(&needle.to_lowercase()))
            })
    }
}

/// One page of companies plus the total matching count
#[derive(Debug, Clone, Serialize)]
pub struct CompanyPage {
    pub data: Vec<Company>,
    pub total: i64,
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// =============================================================================
// SQL Queries - ALL queries must be in models/
// =============================================================================

impl Company {
    /// Find companies matching an equality filter, oldest first
    pub async fn find(filter: &CompanyFilter, limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT * FROM companies
            WHERE (NOT $1::bool OR domain IS NULL)
              AND ($2::text IS NULL OR name = $2)
              AND ($3::text IS NULL OR city = $3)
              AND ($4::text IS NULL OR domain = $4)
            ORDER BY created_at, id
            LIMIT $5
            "#,
        )
        .bind(filter.domain_is_null)
        .bind(&filter.name)
        .bind(&filter.city)
        .bind(&filter.domain)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        Ok(companies)
    }

    /// Insert new company
    pub async fn insert(payload: &CompanyPayload, pool: &PgPool) -> Result<Self> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, domain, country, city, employee_size_bucket, raw_json
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&payload.name)
        .bind(&payload.domain)
        .bind(&payload.country)
        .bind(&payload.city)
        .bind(&payload.employee_size_bucket)
        .bind(Json(&payload.raw_json))
        .fetch_one(pool)
        .await?;
        Ok(company)
    }

    /// Update present fields only; absent fields keep their stored value
    pub async fn update(id: Uuid, changes: &CompanyUpdate, pool: &PgPool) -> Result<Self> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET domain = COALESCE($2, domain),
                country = COALESCE($3, country),
                city = COALESCE($4, city),
                employee_size_bucket = COALESCE($5, employee_size_bucket),
                raw_json = COALESCE($6, raw_json),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.domain)
        .bind(&changes.country)
        .bind(&changes.city)
        .bind(&changes.employee_size_bucket)
        .bind(changes.raw_json.as_ref().map(Json))
        .fetch_optional(pool)
        .await?
        .with_context(|| format!("Company {} not found", id))?;
        Ok(company)
    }

    /// Insert, or overwrite the row with the same (domain, name)
    ///
    /// Incoming non-null fields win; null fields keep the stored value.
    pub async fn upsert(payload: &CompanyPayload, pool: &PgPool) -> Result<Self> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, domain, country, city, employee_size_bucket, raw_json
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (domain, name) WHERE domain IS NOT NULL
            DO UPDATE SET
                country = COALESCE(EXCLUDED.country, companies.country),
                city = COALESCE(EXCLUDED.city, companies.city),
                employee_size_bucket = COALESCE(
                    EXCLUDED.employee_size_bucket,
                    companies.employee_size_bucket
                ),
                raw_json = EXCLUDED.raw_json,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&payload.name)
        .bind(&payload.domain)
        .bind(&payload.country)
        .bind(&payload.city)
        .bind(&payload.employee_size_bucket)
        .bind(Json(&payload.raw_json))
        .fetch_one(pool)
        .await?;
        Ok(company)
    }

    /// Delete every company, returning how many were removed
    pub async fn delete_all(pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM companies").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Filtered page, newest first, plus total count
    pub async fn list(query: &CompanyListQuery, pool: &PgPool) -> Result<CompanyPage> {
        let domain_pattern = query.domain_contains().map(like_pattern);

        let data = sqlx::query_as::<_, Company>(
            r#"
            SELECT * FROM companies
            WHERE ($1::text IS NULL OR country = $1)
              AND ($2::text IS NULL OR employee_size_bucket = $2)
              AND ($3::text IS NULL OR domain ILIKE $3)
            ORDER BY created_at DESC, id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.country())
        .bind(query.employee_size_bucket())
        .bind(&domain_pattern)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM companies
            WHERE ($1::text IS NULL OR country = $1)
              AND ($2::text IS NULL OR employee_size_bucket = $2)
              AND ($3::text IS NULL OR domain ILIKE $3)
            "#,
        )
        .bind(query.country())
        .bind(query.employee_size_bucket())
        .bind(&domain_pattern)
        .fetch_one(pool)
        .await?;

        Ok(CompanyPage {
            data,
            total: total.0,
        })
    }

    /// Connectivity check
    pub async fn ping(pool: &PgPool) -> Result<()> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
