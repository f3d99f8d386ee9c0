//! Global Application State
//!
//! Reactive state management using Leptos signals. The dataset registry is
//! the single source of truth; every card, panel and chart reads the active
//! document through it, so a switch propagates everywhere at once.

use leptos::*;

use sentiscope::model::AnalysisDocument;
use sentiscope::registry::DatasetRegistry;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// All loaded documents plus the active pointer
    pub registry: RwSignal<DatasetRegistry>,
    /// Startup load in progress
    pub loading: RwSignal<bool>,
    /// Fatal startup condition: nothing could be loaded
    pub fatal: RwSignal<Option<String>>,
    /// Transient error message (toast)
    pub error: RwSignal<Option<String>>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        registry: create_rw_signal(DatasetRegistry::new()),
        loading: create_rw_signal(true),
        fatal: create_rw_signal(None),
        error: create_rw_signal(None),
    };

    provide_context(state);
}

/// Fetch the state provided by the root component.
pub fn expect_state() -> GlobalState {
    use_context::<GlobalState>().expect("GlobalState not found")
}

impl GlobalState {
    /// Clone of the active document, tracked reactively.
    pub fn active_document(&self) -> Option<AnalysisDocument> {
        self.registry.with(|r| r.active().cloned())
    }

    /// Switch the active dataset. A failed switch surfaces a toast and
    /// leaves the previously rendered dashboard untouched.
    pub fn switch_dataset(&self, id: &str) {
        let result = self
            .registry
            .try_update(|registry| registry.activate(id).map(|_| ()))
            .unwrap_or_else(|| {
                Err(sentiscope::registry::RegistryError::UnknownDataset(
                    id.to_string(),
                ))
            });

        match result {
            Ok(()) => {
                web_sys::console::log_1(&format!("dataset switched to {id}").into());
            }
            Err(e) => {
                web_sys::console::error_1(&format!("dataset switch failed: {e}").into());
                self.show_error(&format!("No se pudo cambiar de dataset: {e}"));
            }
        }
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}
