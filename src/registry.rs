//! Dataset Registry
//!
//! Process-wide state holding all successfully loaded analysis documents,
//! keyed by source id, plus the single "currently displayed" pointer. The
//! registry replaces the free-floating globals a dashboard tends to grow:
//! switching datasets goes through [`DatasetRegistry::activate`], the one
//! synchronization point, so nothing ever observes a half-applied switch.

use thiserror::Error;

use crate::model::AnalysisDocument;

/// Registry errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RegistryError {
    /// Activation requested for an id that was never registered. This is a
    /// programming/UI error and must fail loudly rather than no-op.
    #[error("unknown dataset: {0}")]
    UnknownDataset(String),
}

/// One registered source: id, human-readable name, and its document.
#[derive(Debug, Clone)]
struct Entry {
    id: String,
    display_name: String,
    document: AnalysisDocument,
}

/// Insertion-ordered map of source id -> document, plus the active pointer.
///
/// Invariant: `active` is either `None` (nothing loaded yet) or an index
/// into `entries`, so an active id is always a registered id.
#[derive(Debug, Clone, Default)]
pub struct DatasetRegistry {
    entries: Vec<Entry>,
    active: Option<usize>,
}

impl DatasetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `id`. Re-registering an existing id
    /// overwrites its document and display name (last write wins) without
    /// disturbing declared order or the active pointer.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        display_name: impl Into<String>,
        document: AnalysisDocument,
    ) {
        let id = id.into();
        let display_name = display_name.into();

        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.display_name = display_name;
            entry.document = document;
        } else {
            self.entries.push(Entry {
                id,
                display_name,
                document,
            });
        }
    }

    /// Make `id` the active dataset and return its document.
    ///
    /// Fails with [`RegistryError::UnknownDataset`] without touching the
    /// current active pointer.
    pub fn activate(&mut self, id: &str) -> Result<&AnalysisDocument, RegistryError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| RegistryError::UnknownDataset(id.to_string()))?;

        self.active = Some(index);
        Ok(&self.entries[index].document)
    }

    /// The currently active document, if any dataset has been activated.
    pub fn active(&self) -> Option<&AnalysisDocument> {
        self.active.map(|i| &self.entries[i].document)
    }

    /// Id of the active dataset, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].id.as_str())
    }

    /// Registered ids in declared (insertion) order.
    pub fn available_ids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    /// Human-readable name for a registered id.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.display_name.as_str())
    }

    /// Document for a registered id, without changing the active pointer.
    pub fn get(&self, id: &str) -> Option<&AnalysisDocument> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.document)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;

    #[test]
    fn registers_in_declared_order() {
        let mut registry = DatasetRegistry::new();
        registry.register("facebook", "Facebook", sample_document());
        registry.register("reddit", "Reddit", sample_document());
        registry.register("x", "X (Twitter)", sample_document());

        assert_eq!(registry.available_ids(), vec!["facebook", "reddit", "x"]);
        assert_eq!(registry.display_name("x"), Some("X (Twitter)"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn activate_unknown_id_fails_and_preserves_active() {
        let mut registry = DatasetRegistry::new();
        registry.register("reddit", "Reddit", sample_document());
        registry.activate("reddit").unwrap();

        let err = registry.activate("linkedin").unwrap_err();
        assert_eq!(err, RegistryError::UnknownDataset("linkedin".to_string()));
        assert_eq!(registry.active_id(), Some("reddit"));
    }

    #[test]
    fn activate_on_empty_registry_leaves_no_active() {
        let mut registry = DatasetRegistry::new();
        assert!(registry.activate("anything").is_err());
        assert!(registry.active().is_none());
        assert!(registry.active_id().is_none());
    }

    #[test]
    fn reregistering_overwrites_without_reordering() {
        let mut doc = sample_document();
        let mut registry = DatasetRegistry::new();
        registry.register("a", "A", doc.clone());
        registry.register("b", "B", doc.clone());

        doc.metadata.topic = "actualizado".to_string();
        registry.register("a", "A2", doc);

        assert_eq!(registry.available_ids(), vec!["a", "b"]);
        assert_eq!(registry.display_name("a"), Some("A2"));
        assert_eq!(registry.get("a").unwrap().metadata.topic, "actualizado");
    }

    #[test]
    fn switching_replaces_the_whole_active_pointer() {
        let mut first = sample_document();
        first.metadata.topic = "primero".to_string();
        let mut second = sample_document();
        second.metadata.topic = "segundo".to_string();

        let mut registry = DatasetRegistry::new();
        registry.register("one", "One", first);
        registry.register("two", "Two", second);

        registry.activate("one").unwrap();
        assert_eq!(registry.active().unwrap().metadata.topic, "primero");

        registry.activate("two").unwrap();
        assert_eq!(registry.active().unwrap().metadata.topic, "segundo");
        assert_eq!(registry.active_id(), Some("two"));
    }
}
