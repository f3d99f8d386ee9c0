//! Emotional-charge tab bindings: the emotion lexicon distribution, the
//! positive/negative ratio meter and the mirrored emotional-word chart.

use crate::model::AnalysisDocument;

use super::shape;
use super::{
    palette, ChartDescription, ChartKind, ChartOptions, MeterSpec, Series, WidgetSpec,
};

/// Bars of emotion-lexicon occurrence counts, in upstream key order, one
/// palette color per emotion.
pub fn emotion_distribution(doc: &AnalysisDocument) -> WidgetSpec {
    let emotions = &doc.emotion_charged_words.emotion_distribution;
    if emotions.is_empty() {
        return WidgetSpec::no_data();
    }

    let labels: Vec<String> = emotions.keys().cloned().collect();
    let values: Vec<f64> = emotions
        .values()
        .map(|v| v.as_f64().unwrap_or(0.0))
        .collect();
    let colors: Vec<String> = (0..labels.len())
        .map(|i| palette::EMOTIONS[i % palette::EMOTIONS.len()].to_string())
        .collect();

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels,
        series: vec![Series::per_value("Ocurrencias", values, colors)],
        options: ChartOptions::default(),
    })
}

/// Positive vs negative emotional-word shares plus the upstream ratio.
pub fn emotion_ratio(doc: &AnalysisDocument) -> WidgetSpec {
    let summary = &doc.emotion_charged_words.summary;
    let total = summary.total_positive_words + summary.total_negative_words;
    if total <= 0.0 {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Meter(MeterSpec {
        positive_count: summary.total_positive_words,
        negative_count: summary.total_negative_words,
        percent_positive: summary.total_positive_words / total * 100.0,
        percent_negative: summary.total_negative_words / total * 100.0,
        ratio: summary.negative_positive_ratio,
    })
}

/// Mirrored horizontal bars: top-5 positive word frequencies plotted as
/// positive values, top-5 negative frequencies arithmetically negated, on
/// one shared axis so the two groups visually oppose each other.
pub fn emotional_words(doc: &AnalysisDocument) -> WidgetSpec {
    let charged = &doc.emotion_charged_words;
    let positive = shape::top_n(&charged.top_positive_words, 5);
    let negative = shape::top_n(&charged.top_negative_words, 5);

    if positive.is_empty() && negative.is_empty() {
        return WidgetSpec::no_data();
    }

    let mut labels = Vec::with_capacity(positive.len() + negative.len());
    let mut values = Vec::with_capacity(labels.capacity());
    let mut colors = Vec::with_capacity(labels.capacity());

    for word in positive {
        labels.push(format!("{} (+)", word.word));
        values.push(word.frequency);
        colors.push(palette::POSITIVE.to_string());
    }
    for word in negative {
        labels.push(format!("{} (-)", word.word));
        values.push(-word.frequency);
        colors.push(palette::NEGATIVE.to_string());
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels,
        series: vec![Series::per_value("Frecuencia", values, colors)],
        options: ChartOptions {
            horizontal: true,
            axis_title: Some(
                "Frecuencia (positivas a la derecha, negativas a la izquierda)".to_string(),
            ),
            ..Default::default()
        },
    })
}
