pub mod interface;
pub mod contract;
pub mod prompt;
pub mod service;

pub use interface::*;
pub use contract::ResponseContract;
pub use service::TranslationService;
