//! Conclusions Section
//!
//! A generated sentiment summary sentence, the statistical findings list
//! and the insight/recommendation extracts from the narrative.

use leptos::*;

use sentiscope::model::AnalysisDocument;
use sentiscope::text::{block_or_fallback, HighlightMarkers, CONCLUSION_BUDGET};

use crate::state::expect_state;

#[component]
pub fn Conclusions(active_section: RwSignal<&'static str>) -> impl IntoView {
    let state = expect_state();

    let summary = move || {
        state
            .active_document()
            .map(|doc| summary_sentence(&doc))
            .unwrap_or_default()
    };

    let findings = move || {
        state
            .active_document()
            .map(|doc| statistical_findings(&doc))
            .unwrap_or_default()
    };

    let block = move |pick: fn(&HighlightMarkers) -> &str| {
        let markers = HighlightMarkers::default();
        state
            .active_document()
            .map(|doc| {
                block_or_fallback(
                    &doc.llm_interpretation.full_interpretation,
                    pick(&markers),
                    CONCLUSION_BUDGET,
                )
            })
            .unwrap_or_default()
    };

    view! {
        <section
            id="conclusiones"
            class="content-section"
            class:active=move || active_section.get() == "conclusiones"
        >
            <h2>"Conclusiones"</h2>

            <div class="conclusion-block">
                <h3>"Sentimiento general"</h3>
                <p>{summary}</p>
            </div>

            <div class="conclusion-block">
                <h3>"Hallazgos estadísticos"</h3>
                <ul>
                    {move || {
                        findings()
                            .into_iter()
                            .map(|finding| view! { <li>{finding}</li> })
                            .collect_view()
                    }}
                </ul>
            </div>

            <div class="conclusion-block">
                <h3>"Insights"</h3>
                <p>{move || block(|m| &m.insights)}</p>
            </div>

            <div class="conclusion-block">
                <h3>"Recomendaciones"</h3>
                <p>{move || block(|m| &m.recommendations)}</p>
            </div>
        </section>
    }
}

/// The distribution and mean polarity rendered as one sentence.
fn summary_sentence(doc: &AnalysisDocument) -> String {
    let dist = &doc.polarity_analysis.sentiment_distribution;
    let average = doc.polarity_analysis.global_metrics.average_polarity;
    let tendency = if average < 0.0 { "negativa" } else { "positiva" };

    format!(
        "El análisis revela que {:.1}% de los comentarios son neutrales, {:.1}% negativos y \
         {:.1}% positivos. La polaridad promedio de {:.3} indica una tendencia ligeramente {}.",
        dist.percent_neutral, dist.percent_negative, dist.percent_positive, average, tendency
    )
}

fn statistical_findings(doc: &AnalysisDocument) -> Vec<String> {
    let polarity = &doc.polarity_analysis;
    let emotion = &doc.emotion_charged_words.summary;
    let negation = &doc.negation_analysis.summary;

    vec![
        format!(
            "Total de {} comentarios analizados",
            doc.metadata.total_comments
        ),
        format!(
            "Confianza promedio del modelo: {:.1}%",
            polarity.global_metrics.average_confidence * 100.0
        ),
        format!(
            "{:.0} palabras con carga positiva detectadas",
            emotion.total_positive_words
        ),
        format!(
            "{:.0} palabras con carga negativa detectadas",
            emotion.total_negative_words
        ),
        format!(
            "{:.1}% de comentarios contienen negaciones",
            negation.percent_with_negation
        ),
    ]
}
