//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use ai::{OpenAIService, GPT_4O_MINI};
pub use deps::{PostgresCompanyStore, ServerDeps};
pub use test_dependencies::TestDependencies;
pub use traits::*;
