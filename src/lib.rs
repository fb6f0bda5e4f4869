//! Portward session core
//!
//! Session state management for a graphical port-forwarding rule manager:
//! the in-memory ordered collection of forwarding-rule entries, its
//! lifecycle operations (new default session, add, clear), and round-trip
//! persistence of the session to a JSON document on disk, with graceful
//! fallback when that document is missing or unreadable.
//!
//! The crate owns no GUI code and no forwarding engine. A presentation
//! layer subscribes to registry changes through [`SessionObserver`] and
//! renders rows in response; the stored [`ForwardingParameters`] only
//! describe a rule, they never execute it.

pub mod config;
pub mod events;
pub mod session;

pub use config::{AppConfig, NoConfigDir, DEFAULT_LINE_COUNT, SESSION_FILE_NAME};
pub use events::{AttachError, SessionEvents, SessionObserver};
pub use session::{
    DocumentDecodeError, ForwardingParameters, LoadOutcome, RuleEntry, RuleRegistry,
    SessionDocument, SessionManager, SessionStore, StorageError,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging
///
/// Respects `RUST_LOG`, defaulting to `info`. The embedding application
/// calls this once at startup.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
