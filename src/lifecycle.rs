//! Widget Lifecycle
//!
//! Enforces the destroy-before-create discipline for every render pass.
//! Chart-library widgets and raw-canvas widgets (the word cloud) differ in
//! how they are torn down, so both hide behind one capability interface:
//! [`Widget::destroy`]. The manager tracks at most one live widget per slot;
//! stale instances bound to a since-replaced canvas are a resource leak and
//! a correctness bug (phantom tooltips, doubled memory).

use std::collections::HashMap;

use thiserror::Error;

/// Destroy capability shared by every mounted visual.
///
/// For chart widgets this is the library teardown; for raw canvases it
/// clears the drawing surface; for DOM panels it empties the anchor.
pub trait Widget {
    fn destroy(&mut self);
}

/// Lifecycle errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LifecycleError {
    /// `mount` was called on a slot that already holds a live widget.
    /// Render passes must call [`ChartLifecycleManager::destroy_all`] first.
    #[error("slot '{0}' already holds a live widget")]
    SlotOccupied(String),
}

/// Failure to build one widget during a render pass. Contained per slot:
/// one broken chart must not blank the whole dashboard.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("widget for slot '{slot}' failed: {reason}")]
pub struct WidgetRenderFailure {
    pub slot: String,
    pub reason: String,
}

impl WidgetRenderFailure {
    pub fn new(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            reason: reason.into(),
        }
    }
}

/// Owns the set of currently-mounted widgets, keyed by slot id.
#[derive(Default)]
pub struct ChartLifecycleManager {
    slots: HashMap<String, Box<dyn Widget>>,
}

impl ChartLifecycleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy every tracked widget and clear the slot table. After this
    /// returns, every slot holds zero live widgets.
    pub fn destroy_all(&mut self) {
        let count = self.slots.len();
        for (slot, mut widget) in self.slots.drain() {
            tracing::debug!(slot = %slot, "destroying widget");
            widget.destroy();
        }
        if count > 0 {
            tracing::debug!(count, "render surface cleared");
        }
    }

    /// Record a freshly created widget under `slot_id`.
    ///
    /// Mounting over a live widget is a programming error: the render pass
    /// skipped `destroy_all`.
    pub fn mount(
        &mut self,
        slot_id: impl Into<String>,
        widget: Box<dyn Widget>,
    ) -> Result<(), LifecycleError> {
        let slot_id = slot_id.into();
        if self.slots.contains_key(&slot_id) {
            return Err(LifecycleError::SlotOccupied(slot_id));
        }
        self.slots.insert(slot_id, widget);
        Ok(())
    }

    /// Build a widget via `factory` and mount it, containing failure to the
    /// slot: a factory error is logged and the slot is left empty so the
    /// rest of the render pass proceeds.
    pub fn mount_with<F>(&mut self, slot_id: &str, factory: F)
    where
        F: FnOnce() -> Result<Box<dyn Widget>, WidgetRenderFailure>,
    {
        match factory() {
            Ok(widget) => {
                if let Err(e) = self.mount(slot_id, widget) {
                    tracing::warn!(slot = slot_id, error = %e, "mount rejected");
                }
            }
            Err(e) => {
                tracing::warn!(slot = slot_id, error = %e, "widget skipped");
            }
        }
    }

    /// Number of live widgets.
    pub fn live_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether a given slot currently holds a live widget.
    pub fn is_mounted(&self, slot_id: &str) -> bool {
        self.slots.contains_key(slot_id)
    }
}

impl Drop for ChartLifecycleManager {
    fn drop(&mut self) {
        self.destroy_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Test widget that records whether destroy ran.
    struct Probe {
        destroyed: Rc<Cell<bool>>,
    }

    impl Probe {
        fn new() -> (Box<dyn Widget>, Rc<Cell<bool>>) {
            let flag = Rc::new(Cell::new(false));
            (
                Box::new(Probe {
                    destroyed: Rc::clone(&flag),
                }),
                flag,
            )
        }
    }

    impl Widget for Probe {
        fn destroy(&mut self) {
            self.destroyed.set(true);
        }
    }

    #[test]
    fn destroy_all_empties_every_slot() {
        let mut manager = ChartLifecycleManager::new();
        let (w1, d1) = Probe::new();
        let (w2, d2) = Probe::new();
        manager.mount("chart-a", w1).unwrap();
        manager.mount("chart-b", w2).unwrap();
        assert_eq!(manager.live_count(), 2);

        manager.destroy_all();

        assert!(manager.is_empty());
        assert!(d1.get());
        assert!(d2.get());
    }

    #[test]
    fn destroy_all_on_empty_manager_is_harmless() {
        let mut manager = ChartLifecycleManager::new();
        manager.destroy_all();
        assert!(manager.is_empty());
    }

    #[test]
    fn double_mount_on_one_slot_is_rejected() {
        let mut manager = ChartLifecycleManager::new();
        let (w1, _) = Probe::new();
        let (w2, _) = Probe::new();

        manager.mount("chart-a", w1).unwrap();
        let err = manager.mount("chart-a", w2).unwrap_err();
        assert_eq!(err, LifecycleError::SlotOccupied("chart-a".to_string()));
        assert_eq!(manager.live_count(), 1);
    }

    #[test]
    fn slot_is_reusable_after_destroy_all() {
        let mut manager = ChartLifecycleManager::new();
        let (w1, _) = Probe::new();
        manager.mount("chart-a", w1).unwrap();
        manager.destroy_all();

        let (w2, _) = Probe::new();
        manager.mount("chart-a", w2).unwrap();
        assert!(manager.is_mounted("chart-a"));
    }

    #[test]
    fn factory_failure_leaves_slot_empty_and_pass_continues() {
        let mut manager = ChartLifecycleManager::new();

        manager.mount_with("chart-broken", || {
            Err(WidgetRenderFailure::new("chart-broken", "malformed descriptor"))
        });
        let (w, _) = Probe::new();
        manager.mount_with("chart-ok", move || Ok(w));

        assert!(!manager.is_mounted("chart-broken"));
        assert!(manager.is_mounted("chart-ok"));
        assert_eq!(manager.live_count(), 1);
    }

    #[test]
    fn widgets_are_destroyed_when_the_manager_is_dropped() {
        let (w, destroyed) = Probe::new();
        {
            let mut manager = ChartLifecycleManager::new();
            manager.mount("chart-a", w).unwrap();
        }
        assert!(destroyed.get());
    }
}
