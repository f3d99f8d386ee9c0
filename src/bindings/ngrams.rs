//! N-gram tab bindings: overall bigrams, the positive/negative comparison
//! and the negative trigram ranking.

use crate::model::{AnalysisDocument, NgramCount};

use super::shape;
use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, WidgetSpec};

fn as_pairs(ngrams: &[NgramCount]) -> Vec<(&str, f64)> {
    ngrams
        .iter()
        .map(|n| (n.ngram.as_str(), n.frequency))
        .collect()
}

fn ranked_bar(ngrams: &[NgramCount], color: &str) -> WidgetSpec {
    if ngrams.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: ngrams.iter().map(|n| n.ngram.clone()).collect(),
        series: vec![Series::uniform(
            "Frecuencia",
            ngrams.iter().map(|n| n.frequency).collect(),
            color,
        )],
        options: ChartOptions {
            horizontal: true,
            ..Default::default()
        },
    })
}

/// Horizontal ranking of the overall bigrams.
pub fn top_bigrams(doc: &AnalysisDocument) -> WidgetSpec {
    ranked_bar(&doc.ngram_analysis.top_bigrams, palette::PRIMARY)
}

/// Grouped horizontal bars aligning the top-5 positive and negative
/// bigrams on their label union.
pub fn bigram_comparison(doc: &AnalysisDocument) -> WidgetSpec {
    let ngrams = &doc.ngram_analysis;
    let positive = as_pairs(shape::top_n(&ngrams.positive_bigrams, 5));
    let negative = as_pairs(shape::top_n(&ngrams.negative_bigrams, 5));

    let labels = shape::union_labels(&[&positive, &negative]);
    if labels.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        series: vec![
            Series::uniform(
                "Positivos",
                shape::values_for(&labels, &positive),
                palette::POSITIVE,
            ),
            Series::uniform(
                "Negativos",
                shape::values_for(&labels, &negative),
                palette::NEGATIVE,
            ),
        ],
        labels,
        options: ChartOptions {
            horizontal: true,
            ..Default::default()
        },
    })
}

/// Horizontal ranking of the negative trigrams.
pub fn negative_trigrams(doc: &AnalysisDocument) -> WidgetSpec {
    ranked_bar(&doc.ngram_analysis.negative_trigrams, palette::NEGATIVE)
}
