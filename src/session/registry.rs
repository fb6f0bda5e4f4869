//! Rule Registry
//!
//! The in-memory ordered collection of live rule entries backing the UI.
//! The registry holds data entries only. The view's fixed header/toolbar
//! row occupies visual slot 0 and is never part of the registry; clear
//! therefore only ever touches visual slots >= 1.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use super::types::{ForwardingParameters, SessionDocument};
use crate::config::AppConfig;
use crate::events::SessionEvents;

/// Handle to one live rule entry
///
/// The presentation layer edits the parameters in place through a clone
/// of the handle; the registry reads them back (never moves them) only
/// when exporting the session.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    parameters: Arc<Mutex<ForwardingParameters>>,
}

impl RuleEntry {
    /// Create an entry holding the given parameters
    pub fn new(parameters: ForwardingParameters) -> Self {
        Self {
            parameters: Arc::new(Mutex::new(parameters)),
        }
    }

    /// Snapshot of the current parameters
    pub fn parameters(&self) -> ForwardingParameters {
        self.parameters.lock().clone()
    }

    /// Replace the parameters wholesale
    pub fn set_parameters(&self, parameters: ForwardingParameters) {
        *self.parameters.lock() = parameters;
    }

    /// Edit the parameters in place
    pub fn update<F: FnOnce(&mut ForwardingParameters)>(&self, f: F) {
        f(&mut self.parameters.lock());
    }
}

/// Ordered registry of rule entries plus the display preference
///
/// Exclusively owns its entries; an entry belongs to at most one
/// registry at a time.
pub struct RuleRegistry {
    entries: Vec<RuleEntry>,
    prefer_dark_display: bool,
    default_line_count: usize,
    events: SessionEvents,
}

impl RuleRegistry {
    /// Create an empty registry
    pub fn new(config: &AppConfig, events: SessionEvents) -> Self {
        Self {
            entries: Vec::new(),
            prefer_dark_display: false,
            default_line_count: config.default_line_count,
            events,
        }
    }

    /// Number of data entries (the view's header slot is never counted)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered snapshot of the entry handles
    pub fn entries(&self) -> Vec<RuleEntry> {
        self.entries.clone()
    }

    /// Current display preference
    pub fn prefer_dark_display(&self) -> bool {
        self.prefer_dark_display
    }

    /// Set the display preference and notify observers
    pub fn set_prefer_dark_display(&mut self, prefer_dark: bool) {
        self.prefer_dark_display = prefer_dark;
        self.events.emit_display_preference_changed(prefer_dark);
    }

    /// Replace the session with the default one: a fixed count of blank
    /// entries. Never fails.
    pub fn new_default_session(&mut self) {
        info!("Creating new session");

        self.clear();

        for _ in 0..self.default_line_count {
            self.add(None);
        }
    }

    /// Append one entry, blank when no parameters are given
    ///
    /// Observers are notified with the new data index; an attach failure
    /// is logged by the event sink and the entry stays in the registry,
    /// so no half-added state can exist.
    pub fn add(&mut self, parameters: Option<ForwardingParameters>) -> RuleEntry {
        let entry = RuleEntry::new(parameters.unwrap_or_default());
        self.entries.push(entry.clone());

        self.events.emit_entry_added(self.entries.len() - 1, &entry);

        entry
    }

    /// Remove every data entry. Total, never partial.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.events.emit_entries_cleared();
    }

    /// Rebuild the registry from a persisted document: clear, append
    /// each entry in document order, then adopt the display preference.
    pub fn load_from(&mut self, document: &SessionDocument) {
        self.clear();

        for parameters in &document.parameters {
            self.add(Some(parameters.clone()));
        }

        self.set_prefer_dark_display(document.dark_mode);
    }

    /// Snapshot the live entries into a document, in order
    pub fn export_to_document(&self) -> SessionDocument {
        SessionDocument {
            parameters: self.entries.iter().map(|e| e.parameters()).collect(),
            dark_mode: self.prefer_dark_display,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{AttachError, SessionObserver};
    use parking_lot::Mutex as PlMutex;

    fn registry() -> RuleRegistry {
        let config = AppConfig::with_session_file("unused.json");
        RuleRegistry::new(&config, SessionEvents::noop())
    }

    fn params(label: &str, port: u16) -> ForwardingParameters {
        ForwardingParameters::new(label, "127.0.0.1", port, "target", port)
    }

    #[test]
    fn test_default_session_size() {
        let mut reg = registry();
        reg.add(Some(params("stale", 1)));

        reg.new_default_session();

        assert_eq!(reg.len(), crate::config::DEFAULT_LINE_COUNT);
        for entry in reg.entries() {
            assert_eq!(entry.parameters(), ForwardingParameters::default());
        }
    }

    #[test]
    fn test_add_returns_live_handle() {
        let mut reg = registry();
        let entry = reg.add(None);

        // The view edits in place; the registry sees it at export time
        entry.update(|p| p.label = "edited".into());

        let doc = reg.export_to_document();
        assert_eq!(doc.parameters[0].label, "edited");
    }

    #[test]
    fn test_clear_is_total() {
        for n in [1, 2, 7] {
            let mut reg = registry();
            for i in 0..n {
                reg.add(Some(params("x", i)));
            }
            reg.clear();
            assert_eq!(reg.len(), 0);
        }
    }

    #[test]
    fn test_count_tracks_adds_since_clear() {
        let mut reg = registry();
        reg.add(None);
        reg.add(None);
        reg.add(None);
        assert_eq!(reg.len(), 3);

        reg.clear();
        reg.add(None);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_load_from_replaces_and_orders() {
        let mut reg = registry();
        reg.add(Some(params("stale", 9)));

        let doc = SessionDocument {
            parameters: vec![params("a", 1), params("b", 2), params("c", 3)],
            dark_mode: true,
        };
        reg.load_from(&doc);

        assert_eq!(reg.len(), 3);
        assert!(reg.prefer_dark_display());
        assert_eq!(reg.export_to_document(), doc);
    }

    #[test]
    fn test_export_reads_without_consuming() {
        let mut reg = registry();
        reg.add(Some(params("keep", 4)));

        let first = reg.export_to_document();
        let second = reg.export_to_document();

        assert_eq!(first, second);
        assert_eq!(reg.len(), 1);
    }

    /// Presentation double: a slot list whose index 0 is a fixed header
    /// row, mirroring how a real view container maps data index i to
    /// visual slot i + 1.
    #[derive(Debug, PartialEq)]
    enum Slot {
        Header,
        Row(String),
    }

    struct PanelView {
        slots: PlMutex<Vec<Slot>>,
    }

    impl PanelView {
        fn new() -> Self {
            Self {
                slots: PlMutex::new(vec![Slot::Header]),
            }
        }
    }

    impl SessionObserver for PanelView {
        fn entry_added(&self, index: usize, entry: &RuleEntry) -> Result<(), AttachError> {
            let mut slots = self.slots.lock();
            slots.insert(index + 1, Slot::Row(entry.parameters().label));
            Ok(())
        }

        fn entries_cleared(&self) {
            // Only data rows go; the header slot stays put
            self.slots.lock().truncate(1);
        }

        fn display_preference_changed(&self, _prefer_dark: bool) {}
    }

    #[test]
    fn test_header_slot_survives_any_add_clear_sequence() {
        let view = Arc::new(PanelView::new());
        let mut events = SessionEvents::new();
        events.subscribe(view.clone());

        let config = AppConfig::with_session_file("unused.json");
        let mut reg = RuleRegistry::new(&config, events);

        reg.add(Some(params("a", 1)));
        reg.add(Some(params("b", 2)));
        reg.clear();
        reg.add(Some(params("c", 3)));
        reg.new_default_session();
        reg.clear();

        let slots = view.slots.lock();
        assert_eq!(slots[0], Slot::Header);
        assert_eq!(slots.len(), 1);
        assert_eq!(reg.len(), 0);
    }

    struct RefusingView;

    impl SessionObserver for RefusingView {
        fn entry_added(&self, _index: usize, _entry: &RuleEntry) -> Result<(), AttachError> {
            Err(AttachError("toolkit said no".into()))
        }

        fn entries_cleared(&self) {}

        fn display_preference_changed(&self, _prefer_dark: bool) {}
    }

    #[test]
    fn test_attach_failure_leaves_registry_consistent() {
        let mut events = SessionEvents::new();
        events.subscribe(Arc::new(RefusingView));

        let config = AppConfig::with_session_file("unused.json");
        let mut reg = RuleRegistry::new(&config, events);

        let entry = reg.add(Some(params("still-here", 5)));

        assert_eq!(reg.len(), 1);
        assert_eq!(entry.parameters(), params("still-here", 5));
        assert_eq!(reg.export_to_document().parameters.len(), 1);
    }
}
