//! Word-frequency tab bindings: the word cloud, the top-10 ranking and the
//! per-sentiment grouped comparison.

use crate::model::{AnalysisDocument, WordCount};

use super::shape;
use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, WidgetSpec, WordWeight};

fn as_pairs(words: &[WordCount]) -> Vec<(&str, f64)> {
    words.iter().map(|w| (w.word.as_str(), w.frequency)).collect()
}

/// Word cloud over the overall top words.
pub fn wordcloud_overall(doc: &AnalysisDocument) -> WidgetSpec {
    let words = &doc.word_frequency.top_overall;
    if words.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::WordCloud(
        words
            .iter()
            .map(|w| WordWeight {
                word: w.word.clone(),
                weight: w.frequency,
            })
            .collect(),
    )
}

/// Horizontal bars for the first ten overall words, upstream order kept.
pub fn top_words(doc: &AnalysisDocument) -> WidgetSpec {
    let words = shape::top_n(&doc.word_frequency.top_overall, 10);
    if words.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: words.iter().map(|w| w.word.clone()).collect(),
        series: vec![Series::uniform(
            "Frecuencia",
            words.iter().map(|w| w.frequency).collect(),
            palette::PRIMARY,
        )],
        options: ChartOptions {
            horizontal: true,
            axis_title: Some("Frecuencia".to_string()),
            ..Default::default()
        },
    })
}

/// Grouped bars aligning the top-5 words of each sentiment class on the
/// union of their labels; a label absent from a class counts as 0 there.
pub fn words_by_sentiment(doc: &AnalysisDocument) -> WidgetSpec {
    let freq = &doc.word_frequency;
    let positive = as_pairs(shape::top_n(&freq.top_positive, 5));
    let negative = as_pairs(shape::top_n(&freq.top_negative, 5));
    let neutral = as_pairs(shape::top_n(&freq.top_neutral, 5));

    let labels = shape::union_labels(&[&positive, &negative, &neutral]);
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
            Series::uniform(
                "Neutrales",
                shape::values_for(&labels, &neutral),
                palette::NEUTRAL,
            ),
        ],
        labels,
        options: ChartOptions {
            axis_title: Some("Frecuencia".to_string()),
            ..Default::default()
        },
    })
}
