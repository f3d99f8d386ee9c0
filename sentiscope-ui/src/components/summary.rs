//! Executive Summary Section
//!
//! Metric cards, the sentiment-distribution doughnut and the narrative
//! highlight boxes.

use leptos::*;

use sentiscope::bindings::shape;
use sentiscope::bindings::slots;
use sentiscope::text::{highlight_or_fallback, HighlightMarkers, HIGHLIGHT_BUDGET};

use crate::state::expect_state;

#[component]
pub fn Summary(active_section: RwSignal<&'static str>) -> impl IntoView {
    view! {
        <section
            id="resumen"
            class="content-section"
            class:active=move || active_section.get() == "resumen"
        >
            <h2>"Resumen Ejecutivo"</h2>

            <div class="metric-cards">
                <TotalCommentsCard />
                <AveragePolarityCard />
                <ConfidenceCard />
                <PredominantSentimentCard />
            </div>

            <div class="chart-card">
                <h3>"Distribución de Sentimientos"</h3>
                <canvas id={slots::SENTIMENT_DISTRIBUTION} width="800" height="360" />
            </div>

            <Highlights />
        </section>
    }
}

#[component]
fn MetricCard(title: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="metric-card">
            <span class="metric-title">{title}</span>
            <span class="metric-value">{move || value.get()}</span>
        </div>
    }
}

#[component]
fn TotalCommentsCard() -> impl IntoView {
    let state = expect_state();
    let value = Signal::derive(move || {
        state
            .active_document()
            .map(|doc| doc.metadata.total_comments.to_string())
            .unwrap_or_else(|| "—".to_string())
    });

    view! { <MetricCard title="Comentarios analizados" value /> }
}

#[component]
fn AveragePolarityCard() -> impl IntoView {
    let state = expect_state();
    let value = Signal::derive(move || {
        state
            .active_document()
            .map(|doc| {
                format!(
                    "{:.3}",
                    doc.polarity_analysis.global_metrics.average_polarity
                )
            })
            .unwrap_or_else(|| "—".to_string())
    });

    view! { <MetricCard title="Polaridad promedio" value /> }
}

#[component]
fn ConfidenceCard() -> impl IntoView {
    let state = expect_state();
    let value = Signal::derive(move || {
        state
            .active_document()
            .map(|doc| {
                format!(
                    "{:.1}%",
                    doc.polarity_analysis.global_metrics.average_confidence * 100.0
                )
            })
            .unwrap_or_else(|| "—".to_string())
    });

    view! { <MetricCard title="Confianza promedio" value /> }
}

#[component]
fn PredominantSentimentCard() -> impl IntoView {
    let state = expect_state();

    let value = Signal::derive(move || {
        state
            .active_document()
            .map(|doc| {
                let sentiment =
                    shape::predominant(&doc.polarity_analysis.sentiment_distribution);
                format!("{} {}", sentiment.icon(), sentiment.label())
            })
            .unwrap_or_else(|| "—".to_string())
    });

    view! { <MetricCard title="Sentimiento predominante" value /> }
}

/// Best-effort extracts from the LLM narrative, one box per marker.
#[component]
fn Highlights() -> impl IntoView {
    let state = expect_state();

    let highlight = move |pick: fn(&HighlightMarkers) -> &str| {
        let markers = HighlightMarkers::default();
        state
            .active_document()
            .map(|doc| {
                highlight_or_fallback(
                    &doc.llm_interpretation.full_interpretation,
                    pick(&markers),
                    HIGHLIGHT_BUDGET,
                )
            })
            .unwrap_or_default()
    };

    view! {
        <div class="highlight-grid">
            <HighlightBox title="Sentimiento predominante">
                {move || highlight(|m| &m.predominant)}
            </HighlightBox>
            <HighlightBox title="Aspectos positivos">
                {move || highlight(|m| &m.positive_aspects)}
            </HighlightBox>
            <HighlightBox title="Aspectos negativos">
                {move || highlight(|m| &m.negative_aspects)}
            </HighlightBox>
            <HighlightBox title="Patrones y tendencias">
                {move || highlight(|m| &m.patterns)}
            </HighlightBox>
        </div>
    }
}

#[component]
fn HighlightBox(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="highlight-box">
            <h4>{title}</h4>
            <p>{children()}</p>
        </div>
    }
}
