pub mod company;

pub use company::{
    Company, CompanyFilter, CompanyListQuery, CompanyPage, CompanyPayload, CompanyUpdate,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
