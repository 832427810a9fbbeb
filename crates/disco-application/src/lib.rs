pub mod controller;
pub mod session;
pub mod status;

pub use controller::{DiscoveryController, validate_submission};
pub use session::{SessionHandle, SessionRegistry};
pub use status::{StatusLevel, StatusMessage};
