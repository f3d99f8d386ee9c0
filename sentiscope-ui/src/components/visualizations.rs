//! Visualizations Section
//!
//! The tabbed chart area: every widget slot's anchor lives here (or in the
//! summary section), identified by the catalogue's stable slot ids. The
//! render pass finds the anchors by id; this component only owns the
//! markup and the single-active-tab toggling.

use leptos::*;

use sentiscope::bindings::slots;

const TABS: [(&str, &str); 7] = [
    ("polaridad", "Polaridad"),
    ("frecuencias", "Frecuencias"),
    ("ngramas", "N-gramas"),
    ("tfidf", "TF-IDF"),
    ("emociones", "Carga Emocional"),
    ("negaciones", "Negaciones"),
    ("metricas", "Métricas"),
];

#[component]
pub fn Visualizations(active_section: RwSignal<&'static str>) -> impl IntoView {
    let active_tab = create_rw_signal("polaridad");

    view! {
        <section
            id="visualizaciones"
            class="content-section"
            class:active=move || active_section.get() == "visualizaciones"
        >
            <h2>"Visualizaciones"</h2>

            <div class="tab-bar">
                {TABS
                    .into_iter()
                    .map(|(id, label)| {
                        view! {
                            <button
                                class="tab-button"
                                class:active=move || active_tab.get() == id
                                on:click=move |_| active_tab.set(id)
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <TabPanel id="polaridad" active_tab>
                <ChartCard title="Polaridad por Sentimiento" slot_id=slots::POLARITY_BY_SENTIMENT />
                <ChartCard title="Distribución de Polaridad" slot_id=slots::POLARITY_HISTOGRAM />
                <ChartCard title="Rangos de Polaridad" slot_id=slots::POLARITY_RANGES />
            </TabPanel>

            <TabPanel id="frecuencias" active_tab>
                <ChartCard title="Nube de Palabras" slot_id=slots::WORDCLOUD_OVERALL />
                <ChartCard title="Top 10 Palabras" slot_id=slots::TOP_WORDS />
                <ChartCard title="Palabras por Sentimiento" slot_id=slots::WORDS_BY_SENTIMENT />
            </TabPanel>

            <TabPanel id="ngramas" active_tab>
                <ChartCard title="Bigramas Generales" slot_id=slots::TOP_BIGRAMS />
                <ChartCard title="Bigramas: Positivos vs Negativos" slot_id=slots::BIGRAM_COMPARISON />
                <ChartCard title="Trigramas Negativos" slot_id=slots::NEGATIVE_TRIGRAMS />
            </TabPanel>

            <TabPanel id="tfidf" active_tab>
                <ChartCard title="Score TF-IDF Promedio" slot_id=slots::TFIDF_AVERAGES />
                <ChartCard title="Palabras Distintivas" slot_id=slots::TFIDF_RADAR />
            </TabPanel>

            <TabPanel id="emociones" active_tab>
                <ChartCard title="Distribución de Emociones" slot_id=slots::EMOTION_DISTRIBUTION />
                <PanelCard title="Ratio Emocional" slot_id=slots::EMOTION_RATIO />
                <ChartCard title="Palabras con Carga Emocional" slot_id=slots::EMOTIONAL_WORDS />
            </TabPanel>

            <TabPanel id="negaciones" active_tab>
                <PanelCard title="Resumen de Negaciones" slot_id=slots::NEGATION_STATS />
                <PanelCard title="Palabras Más Negadas" slot_id=slots::NEGATED_WORDS />
                <ChartCard title="Bigramas con Negación" slot_id=slots::NEGATION_BIGRAMS />
            </TabPanel>

            <TabPanel id="metricas" active_tab>
                <ChartCard title="Longitud de Comentarios" slot_id=slots::COMMENT_LENGTH />
                <PanelCard title="Métricas por Sentimiento" slot_id=slots::METRICS_TABLE />
            </TabPanel>
        </section>
    }
}

/// One tab's content; exactly one panel is active per group.
#[component]
fn TabPanel(
    id: &'static str,
    active_tab: RwSignal<&'static str>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="tab-content" class:active=move || active_tab.get() == id>
            {children()}
        </div>
    }
}

/// A canvas-backed widget slot.
#[component]
fn ChartCard(title: &'static str, slot_id: &'static str) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3>{title}</h3>
            <canvas id=slot_id width="800" height="360" />
        </div>
    }
}

/// A DOM-backed widget slot (meter, stat list, table).
#[component]
fn PanelCard(title: &'static str, slot_id: &'static str) -> impl IntoView {
    view! {
        <div class="chart-card">
            <h3>{title}</h3>
            <div id=slot_id class="panel-anchor" />
        </div>
    }
}
