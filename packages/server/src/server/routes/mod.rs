// HTTP routes
pub mod companies;
pub mod health;
pub mod reference;
pub mod upload;

pub use companies::*;
pub use health::*;
pub use reference::*;
pub use upload::*;
