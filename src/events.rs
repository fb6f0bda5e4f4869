//! Registry Notifications
//!
//! The registry owns the session data and never touches a toolkit.
//! A presentation layer subscribes here and renders rows in response.
//! Notifications carry data indices; the fixed header/toolbar slot at
//! visual index 0 belongs to the presentation layer, so data index `i`
//! maps to visual slot `i + 1` and slot 0 is never reported or removed.

use std::sync::Arc;

use crate::session::registry::RuleEntry;

/// A row component could not be attached for a new entry
#[derive(Debug, thiserror::Error)]
#[error("Failed to attach entry row: {0}")]
pub struct AttachError(pub String);

/// Subscriber to registry changes
pub trait SessionObserver: Send + Sync {
    /// A new entry was appended at the given data index.
    ///
    /// An error here is logged and skipped; the entry stays in the
    /// registry either way.
    fn entry_added(&self, index: usize, entry: &RuleEntry) -> Result<(), AttachError>;

    /// All data entries were removed
    fn entries_cleared(&self);

    /// The dark-display preference changed
    fn display_preference_changed(&self, prefer_dark: bool);
}

/// Registered observers with emit helpers
///
/// Can be empty (`noop`) for testing or headless use.
#[derive(Clone, Default)]
pub struct SessionEvents {
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl SessionEvents {
    /// Create an event sink with no subscribers yet
    pub fn new() -> Self {
        Self::default()
    }

    /// A no-op sink (for testing or when notifications are not needed)
    pub fn noop() -> Self {
        Self::default()
    }

    /// Register an observer
    pub fn subscribe(&mut self, observer: Arc<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn emit_entry_added(&self, index: usize, entry: &RuleEntry) {
        for observer in &self.observers {
            if let Err(e) = observer.entry_added(index, entry) {
                tracing::error!("{}", e);
            }
        }
    }

    pub(crate) fn emit_entries_cleared(&self) {
        for observer in &self.observers {
            observer.entries_cleared();
        }
    }

    pub(crate) fn emit_display_preference_changed(&self, prefer_dark: bool) {
        for observer in &self.observers {
            observer.display_preference_changed(prefer_dark);
        }
    }
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::types::ForwardingParameters;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        added: AtomicUsize,
        cleared: AtomicUsize,
    }

    impl SessionObserver for Counter {
        fn entry_added(&self, _index: usize, _entry: &RuleEntry) -> Result<(), AttachError> {
            self.added.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn entries_cleared(&self) {
            self.cleared.fetch_add(1, Ordering::SeqCst);
        }

        fn display_preference_changed(&self, _prefer_dark: bool) {}
    }

    struct FailingAttach;

    impl SessionObserver for FailingAttach {
        fn entry_added(&self, index: usize, _entry: &RuleEntry) -> Result<(), AttachError> {
            Err(AttachError(format!("row {} failed", index)))
        }

        fn entries_cleared(&self) {}

        fn display_preference_changed(&self, _prefer_dark: bool) {}
    }

    #[test]
    fn test_noop_sink() {
        let events = SessionEvents::noop();
        let entry = RuleEntry::new(ForwardingParameters::default());
        // Should not panic
        events.emit_entry_added(0, &entry);
        events.emit_entries_cleared();
        events.emit_display_preference_changed(true);
    }

    #[test]
    fn test_all_observers_notified() {
        let mut events = SessionEvents::new();
        let counter = Arc::new(Counter {
            added: AtomicUsize::new(0),
            cleared: AtomicUsize::new(0),
        });
        events.subscribe(counter.clone());
        events.subscribe(Arc::new(FailingAttach));

        let entry = RuleEntry::new(ForwardingParameters::default());
        events.emit_entry_added(0, &entry);
        events.emit_entries_cleared();

        assert_eq!(counter.added.load(Ordering::SeqCst), 1);
        assert_eq!(counter.cleared.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_attach_failure_does_not_stop_later_observers() {
        let mut events = SessionEvents::new();
        events.subscribe(Arc::new(FailingAttach));
        let counter = Arc::new(Counter {
            added: AtomicUsize::new(0),
            cleared: AtomicUsize::new(0),
        });
        events.subscribe(counter.clone());

        let entry = RuleEntry::new(ForwardingParameters::default());
        events.emit_entry_added(3, &entry);

        assert_eq!(counter.added.load(Ordering::SeqCst), 1);
    }
}
