//! Field normalizers.
//!
//! Pure, total functions: each returns the canonical value or `None`, never an
//! error and never a placeholder.

pub mod city;
pub mod countries;
pub mod country;
pub mod domain;
pub mod employee_size;

pub use city::normalize_city;
pub use countries::country_names;
pub use country::{normalize_country, GLOBAL};
pub use domain::{derive_display_name, normalize_domain};
pub use employee_size::{bucket_employee_size, is_bucket, EMPLOYEE_BUCKETS};
