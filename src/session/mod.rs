//! Session State Management
//!
//! The ordered collection of forwarding-rule entries, its lifecycle
//! operations, and round-trip persistence to the session file.

pub mod manager;
pub mod registry;
pub mod store;
pub mod types;

pub use manager::SessionManager;
pub use registry::{RuleEntry, RuleRegistry};
pub use store::{LoadOutcome, SessionStore, StorageError};
pub use types::{DocumentDecodeError, ForwardingParameters, SessionDocument};
