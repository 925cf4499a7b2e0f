pub mod company;

pub use company::{keep_or_fill, CleanCompany, CompanyField, EnrichmentHints, RawRow};
