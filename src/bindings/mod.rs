//! View Binding Catalogue
//!
//! A fixed, ordered catalogue of binding functions, each a pure mapping
//! from the active [`AnalysisDocument`](crate::model::AnalysisDocument) to
//! the description of one widget slot. Rendering is someone else's job:
//! descriptions carry chart type, labels, series and options, and are
//! testable without any DOM or canvas.
//!
//! Any dataset switch re-runs the whole catalogue from scratch. Switches
//! are rare human-driven events, so there is no incremental diffing.

pub mod emotion;
pub mod frequency;
pub mod metrics;
pub mod negation;
pub mod ngrams;
pub mod polarity;
pub mod shape;
pub mod tfidf;

use serde::{Deserialize, Serialize};

use crate::model::AnalysisDocument;

/// Dashboard color scheme, shared by every binding.
pub mod palette {
    pub const POSITIVE: &str = "#10b981";
    pub const NEGATIVE: &str = "#ef4444";
    pub const NEUTRAL: &str = "#6b7280";
    pub const PRIMARY: &str = "#3b82f6";
    pub const RANGE_FILL: &str = "rgba(0,0,0,0.1)";

    /// One color per emotion bar, cycled when the lexicon has more.
    pub const EMOTIONS: [&str; 8] = [
        "#10b981", "#6b7280", "#ef4444", "#f59e0b", "#8b5cf6", "#3b82f6", "#ec4899", "#14b8a6",
    ];

    /// Word-cloud fill rotation.
    pub const WORDCLOUD: [&str; 5] = ["#3b82f6", "#8b5cf6", "#ec4899", "#10b981", "#f59e0b"];
}

/// Stable anchor ids, one per widget slot.
pub mod slots {
    pub const SENTIMENT_DISTRIBUTION: &str = "chart-sentiment-distribution";
    pub const POLARITY_BY_SENTIMENT: &str = "chart-polarity-by-sentiment";
    pub const POLARITY_HISTOGRAM: &str = "chart-polarity-histogram";
    pub const POLARITY_RANGES: &str = "chart-polarity-ranges";
    pub const WORDCLOUD_OVERALL: &str = "wordcloud-overall";
    pub const TOP_WORDS: &str = "chart-top-words";
    pub const WORDS_BY_SENTIMENT: &str = "chart-words-by-sentiment";
    pub const TOP_BIGRAMS: &str = "chart-top-bigrams";
    pub const BIGRAM_COMPARISON: &str = "chart-bigram-comparison";
    pub const NEGATIVE_TRIGRAMS: &str = "chart-negative-trigrams";
    pub const TFIDF_AVERAGES: &str = "chart-tfidf-averages";
    pub const TFIDF_RADAR: &str = "chart-tfidf-radar";
    pub const EMOTION_DISTRIBUTION: &str = "chart-emotion-distribution";
    pub const EMOTION_RATIO: &str = "emotion-ratio";
    pub const EMOTIONAL_WORDS: &str = "chart-emotional-words";
    pub const NEGATION_STATS: &str = "negation-stats";
    pub const NEGATED_WORDS: &str = "negated-words";
    pub const NEGATION_BIGRAMS: &str = "chart-negation-bigrams";
    pub const COMMENT_LENGTH: &str = "chart-comment-length";
    pub const METRICS_TABLE: &str = "sentiment-metrics-table";
}

/// Placeholder text for slots whose source data is absent.
pub const NO_DATA_PLACEHOLDER: &str = "Datos insuficientes para visualizar";

/// Base chart geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Bar,
    Doughnut,
    Radar,
}

/// How a series is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeriesColor {
    /// One color for the whole series.
    Uniform(String),
    /// One color per value (category charts).
    PerValue(Vec<String>),
}

/// One data series of a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: SeriesColor,
}

impl Series {
    pub fn uniform(name: impl Into<String>, values: Vec<f64>, color: &str) -> Self {
        Self {
            name: name.into(),
            values,
            color: SeriesColor::Uniform(color.to_string()),
        }
    }

    pub fn per_value(name: impl Into<String>, values: Vec<f64>, colors: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
            color: SeriesColor::PerValue(colors),
        }
    }
}

/// Chart presentation options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    /// Bars grow along x instead of y.
    pub horizontal: bool,
    /// Fixed value-axis range; `None` means start at zero and autoscale.
    pub value_range: Option<(f64, f64)>,
    pub axis_title: Option<String>,
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    pub options: ChartOptions,
}

/// A word and its layout weight for the word cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordWeight {
    pub word: String,
    pub weight: f64,
}

/// Opposing positive/negative shares with their ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeterSpec {
    pub positive_count: f64,
    pub negative_count: f64,
    pub percent_positive: f64,
    pub percent_negative: f64,
    pub ratio: f64,
}

/// One labelled figure in a stat list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub label: String,
    pub value: String,
}

impl StatLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A small data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What a binding produced for its slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WidgetSpec {
    Chart(ChartDescription),
    WordCloud(Vec<WordWeight>),
    Meter(MeterSpec),
    Stats(Vec<StatLine>),
    Table(TableSpec),
    /// Nothing to draw; the slot shows the given placeholder text.
    NoData(String),
}

impl WidgetSpec {
    pub fn no_data() -> Self {
        WidgetSpec::NoData(NO_DATA_PLACEHOLDER.to_string())
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, WidgetSpec::NoData(_))
    }
}

/// One entry of the catalogue: a slot, its card title, and the pure
/// function that shapes the active document into the slot's widget.
#[derive(Clone, Copy)]
pub struct BindingSpec {
    pub slot: &'static str,
    pub title: &'static str,
    build: fn(&AnalysisDocument) -> WidgetSpec,
}

impl BindingSpec {
    pub fn build(&self, doc: &AnalysisDocument) -> WidgetSpec {
        (self.build)(doc)
    }
}

/// The fixed, ordered catalogue. Order matches the dashboard's section and
/// tab layout: summary, polarity, frequencies, n-grams, TF-IDF, emotional
/// charge, negations, metrics.
pub const CATALOGUE: [BindingSpec; 20] = [
    BindingSpec {
        slot: slots::SENTIMENT_DISTRIBUTION,
        title: "Distribución de Sentimientos",
        build: polarity::sentiment_distribution,
    },
    BindingSpec {
        slot: slots::POLARITY_BY_SENTIMENT,
        title: "Polaridad por Sentimiento",
        build: polarity::polarity_by_sentiment,
    },
    BindingSpec {
        slot: slots::POLARITY_HISTOGRAM,
        title: "Distribución de Polaridad",
        build: polarity::polarity_histogram,
    },
    BindingSpec {
        slot: slots::POLARITY_RANGES,
        title: "Rangos de Polaridad",
        build: polarity::polarity_ranges,
    },
    BindingSpec {
        slot: slots::WORDCLOUD_OVERALL,
        title: "Nube de Palabras",
        build: frequency::wordcloud_overall,
    },
    BindingSpec {
        slot: slots::TOP_WORDS,
        title: "Top 10 Palabras",
        build: frequency::top_words,
    },
    BindingSpec {
        slot: slots::WORDS_BY_SENTIMENT,
        title: "Palabras por Sentimiento",
        build: frequency::words_by_sentiment,
    },
    BindingSpec {
        slot: slots::TOP_BIGRAMS,
        title: "Bigramas Generales",
        build: ngrams::top_bigrams,
    },
    BindingSpec {
        slot: slots::BIGRAM_COMPARISON,
        title: "Bigramas: Positivos vs Negativos",
        build: ngrams::bigram_comparison,
    },
    BindingSpec {
        slot: slots::NEGATIVE_TRIGRAMS,
        title: "Trigramas Negativos",
        build: ngrams::negative_trigrams,
    },
    BindingSpec {
        slot: slots::TFIDF_AVERAGES,
        title: "Score TF-IDF Promedio",
        build: tfidf::tfidf_averages,
    },
    BindingSpec {
        slot: slots::TFIDF_RADAR,
        title: "Palabras Distintivas",
        build: tfidf::tfidf_radar,
    },
    BindingSpec {
        slot: slots::EMOTION_DISTRIBUTION,
        title: "Distribución de Emociones",
        build: emotion::emotion_distribution,
    },
    BindingSpec {
        slot: slots::EMOTION_RATIO,
        title: "Ratio Emocional",
        build: emotion::emotion_ratio,
    },
    BindingSpec {
        slot: slots::EMOTIONAL_WORDS,
        title: "Palabras con Carga Emocional",
        build: emotion::emotional_words,
    },
    BindingSpec {
        slot: slots::NEGATION_STATS,
        title: "Resumen de Negaciones",
        build: negation::negation_stats,
    },
    BindingSpec {
        slot: slots::NEGATED_WORDS,
        title: "Palabras Más Negadas",
        build: negation::negated_words,
    },
    BindingSpec {
        slot: slots::NEGATION_BIGRAMS,
        title: "Bigramas con Negación",
        build: negation::negation_bigrams,
    },
    BindingSpec {
        slot: slots::COMMENT_LENGTH,
        title: "Longitud de Comentarios",
        build: metrics::comment_length,
    },
    BindingSpec {
        slot: slots::METRICS_TABLE,
        title: "Métricas por Sentimiento",
        build: metrics::metrics_table,
    },
];

/// Run the whole catalogue against a document, in catalogue order.
pub fn run_catalogue(doc: &AnalysisDocument) -> Vec<(&'static str, WidgetSpec)> {
    CATALOGUE
        .iter()
        .map(|binding| (binding.slot, binding.build(doc)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;
    use std::collections::HashSet;

    #[test]
    fn catalogue_slots_are_unique() {
        let slots: HashSet<_> = CATALOGUE.iter().map(|b| b.slot).collect();
        assert_eq!(slots.len(), CATALOGUE.len());
    }

    #[test]
    fn full_catalogue_runs_on_a_complete_document() {
        let doc = sample_document();
        let results = run_catalogue(&doc);
        assert_eq!(results.len(), 20);

        for (slot, spec) in &results {
            assert!(
                !spec.is_no_data(),
                "slot {slot} produced NoData on a complete document"
            );
        }
    }

    #[test]
    fn full_catalogue_survives_an_empty_document() {
        // All nine sections present but internally empty: every binding must
        // fall back instead of panicking.
        let value = serde_json::json!({
            "metadata": {},
            "polarity_analysis": {},
            "word_frequency": {},
            "ngram_analysis": {},
            "tfidf_analysis": {},
            "emotion_charged_words": {},
            "negation_analysis": {},
            "additional_metrics": {},
            "llm_interpretation": {}
        });
        let doc = crate::model::validate_document(value).unwrap();

        let results = run_catalogue(&doc);
        assert_eq!(results.len(), 20);
    }
}
