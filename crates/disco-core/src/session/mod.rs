mod model;

pub use model::{DiscoverySession, generate_session_id};
