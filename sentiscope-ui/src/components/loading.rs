//! Loading, Fatal Error and Toast Components

use leptos::*;

use crate::state::expect_state;

/// Full-screen loader shown while the documents are being fetched.
#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="screen-center">
            <div class="loading-spinner" />
            <p>"Cargando análisis..."</p>
        </div>
    }
}

/// Full-screen error state: nothing could be loaded, the dashboard never
/// renders.
#[component]
pub fn FatalError(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="screen-center error">
            <div class="error-icon">"⚠"</div>
            <h1>"No se pudo iniciar el dashboard"</h1>
            <p>{message}</p>
            <p class="hint">"Verifica que los archivos de resultados estén publicados y recarga la página."</p>
        </div>
    }
}

/// Non-blocking error toast. Dataset-switch failures land here, leaving the
/// previously rendered dashboard intact.
#[component]
pub fn Toast() -> impl IntoView {
    let state = expect_state();

    view! {
        <div class="toast-container">
            {move || {
                state.error.get().map(|msg| view! {
                    <div class="toast toast-error">
                        <span class="toast-icon">"✕"</span>
                        <span>{msg}</span>
                    </div>
                })
            }}
        </div>
    }
}
