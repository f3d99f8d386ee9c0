//! LLM Interpretation Section
//!
//! Full narrative with light formatting, plus the model badge.

use leptos::*;

use sentiscope::text::render_interpretation_html;

use crate::state::expect_state;

#[component]
pub fn Interpretation(active_section: RwSignal<&'static str>) -> impl IntoView {
    let state = expect_state();

    let html = move || {
        state
            .active_document()
            .map(|doc| render_interpretation_html(&doc.llm_interpretation.full_interpretation))
            .unwrap_or_default()
    };

    let model = move || {
        state
            .active_document()
            .and_then(|doc| doc.llm_interpretation.model_used)
            .unwrap_or_else(|| "N/A".to_string())
    };

    view! {
        <section
            id="interpretacion"
            class="content-section"
            class:active=move || active_section.get() == "interpretacion"
        >
            <div class="section-header">
                <h2>"Interpretación IA"</h2>
                <span class="model-badge">{model}</span>
            </div>

            <div class="interpretation-text" inner_html=html />
        </section>
    }
}
