pub mod analysis;
pub mod config;
pub mod error;
pub mod generation;
pub mod prompt;
pub mod question;
pub mod secret;
pub mod session;
pub mod store;

// Re-export common types
pub use analysis::AnalysisRow;
pub use error::{DiscoError, GenerationError, StoreError, SubmitError, ValidationError};
pub use generation::AnalysisGenerator;
pub use prompt::PromptTemplate;
pub use question::QuestionSet;
pub use session::DiscoverySession;
pub use store::AnalysisStore;
