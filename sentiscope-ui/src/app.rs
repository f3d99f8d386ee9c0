//! App Root Component
//!
//! Startup load, global providers, and the dashboard shell. Startup fans
//! out every configured document fetch, joins on all of them, and either
//! shows the dashboard (first successful source active) or the full-screen
//! error state when nothing loaded.

use leptos::*;

use sentiscope::lifecycle::ChartLifecycleManager;
use sentiscope::loader::DataLoader;

use crate::components::{
    Conclusions, FatalError, Interpretation, Loader, Sidebar, Summary, Toast, Visualizations,
};
use crate::net::{fetch_dashboard_config, GlooTransport};
use crate::render;
use crate::state::{expect_state, provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();
    let state = expect_state();

    // Startup: fetch the source configuration, then every document.
    create_effect(move |_| {
        spawn_local(async move {
            load_all_datasets(state).await;
        });
    });

    view! {
        <Toast />
        {move || {
            if state.loading.get() {
                view! { <Loader /> }.into_view()
            } else if let Some(message) = state.fatal.get() {
                view! { <FatalError message /> }.into_view()
            } else {
                view! { <Dashboard /> }.into_view()
            }
        }}
    }
}

/// Fan out all fetches, join, and populate the registry. Zero successes is
/// the fatal startup condition; per-source failures are logged and skipped.
async fn load_all_datasets(state: GlobalState) {
    state.loading.set(true);

    let config = fetch_dashboard_config().await;
    web_sys::console::log_1(&format!("loading {} sources", config.sources.len()).into());

    let loader = DataLoader::new(GlooTransport, config.loader);
    let report = loader.load_all(&config.sources).await;

    for (source, error) in report.failures() {
        web_sys::console::warn_1(
            &format!("{} ({}) failed to load: {}", source.display_name, source.id, error).into(),
        );
    }

    match report.into_registry() {
        Ok(registry) => {
            web_sys::console::log_1(
                &format!("{} datasets available", registry.len()).into(),
            );
            state.registry.set(registry);
        }
        Err(e) => {
            state.fatal.set(Some(format!(
                "No se pudieron cargar los archivos de análisis ({e})"
            )));
        }
    }

    state.loading.set(false);
}

/// Dashboard shell: sidebar plus the four content sections. Owns the
/// lifecycle manager and re-runs the full render pass on every dataset
/// switch.
#[component]
fn Dashboard() -> impl IntoView {
    let state = expect_state();
    let active_section = create_rw_signal("resumen");
    let manager = store_value(ChartLifecycleManager::new());

    // Any change of the active document rebuilds every widget slot. The
    // pass runs on the next animation frame so the anchors exist in the
    // DOM before widgets are mounted.
    create_effect(move |_| {
        if let Some(doc) = state.active_document() {
            request_animation_frame(move || {
                manager.update_value(|m| render::render_pass(m, &doc));
            });
        }
    });

    view! {
        <div class="dashboard">
            <Sidebar active_section />
            <main class="content">
                <Summary active_section />
                <Interpretation active_section />
                <Visualizations active_section />
                <Conclusions active_section />
            </main>
        </div>
    }
}
