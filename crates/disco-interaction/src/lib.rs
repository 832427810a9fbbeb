//! Clients for the external services disco talks to.

pub mod openai_api_generator;
pub mod service_account;
pub mod sheets_store;

pub use openai_api_generator::OpenAIApiGenerator;
pub use service_account::ServiceAccountAuth;
pub use sheets_store::GoogleSheetsStore;
