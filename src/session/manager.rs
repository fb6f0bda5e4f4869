//! Session Manager
//!
//! Orchestrates the startup, save, and shutdown protocol between the
//! registry and the store. Startup never fails: a missing or invalid
//! session file degrades to a fresh default session instead of an error.

use tracing::{error, info};

use super::registry::RuleRegistry;
use super::store::{LoadOutcome, SessionStore, StorageError};
use crate::config::AppConfig;
use crate::events::SessionEvents;

/// Owner of the registry and its persistence
pub struct SessionManager {
    store: SessionStore,
    registry: RuleRegistry,
}

impl SessionManager {
    pub fn new(config: &AppConfig, events: SessionEvents) -> Self {
        Self {
            store: SessionStore::new(config),
            registry: RuleRegistry::new(config, events),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    /// Restore the previous session, or fall back to a default one
    ///
    /// Never propagates an error: absence, corruption, and read failures
    /// all degrade to `new_default_session`.
    pub fn start_session(&mut self) {
        match self.store.load() {
            LoadOutcome::Session(document) => {
                info!(
                    "Restoring session with {} entries from {:?}",
                    document.parameters.len(),
                    self.store.path()
                );
                self.registry.load_from(&document);
            }
            LoadOutcome::AbsentOrInvalid => {
                self.registry.new_default_session();
            }
        }
    }

    /// Persist the current session
    ///
    /// A failure is logged and returned; the in-memory session stays
    /// valid and a later save may retry.
    pub fn save_session(&self) -> Result<(), StorageError> {
        let document = self.registry.export_to_document();

        if let Err(e) = self.store.save(&document, true) {
            error!("Failed to save session: {}", e);
            return Err(e);
        }

        Ok(())
    }

    /// Best-effort save before shutdown
    ///
    /// A failure has already been logged by `save_session` and never
    /// blocks termination.
    pub fn close_session(&self) {
        let _ = self.save_session();
    }
}
