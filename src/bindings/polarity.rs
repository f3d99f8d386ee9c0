//! Polarity tab bindings: distribution doughnut, per-class polarity bars,
//! the polarity histogram and the mean/min/max range chart.

use crate::model::AnalysisDocument;

use super::shape;
use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, WidgetSpec};

const CLASS_LABELS: [&str; 3] = ["Positivos", "Negativos", "Neutrales"];

fn class_colors() -> Vec<String> {
    vec![
        palette::POSITIVE.to_string(),
        palette::NEGATIVE.to_string(),
        palette::NEUTRAL.to_string(),
    ]
}

/// Doughnut of neutral/negative/positive comment counts.
pub fn sentiment_distribution(doc: &AnalysisDocument) -> WidgetSpec {
    let dist = &doc.polarity_analysis.sentiment_distribution;
    let total = dist.neutrals + dist.negatives + dist.positives;
    if total <= 0.0 {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Doughnut,
        labels: vec![
            "Neutral".to_string(),
            "Negativo".to_string(),
            "Positivo".to_string(),
        ],
        series: vec![Series::per_value(
            "Comentarios",
            vec![dist.neutrals, dist.negatives, dist.positives],
            vec![
                palette::NEUTRAL.to_string(),
                palette::NEGATIVE.to_string(),
                palette::POSITIVE.to_string(),
            ],
        )],
        options: ChartOptions::default(),
    })
}

/// Horizontal bars of mean polarity per class, pinned to the [-1, 1] axis.
pub fn polarity_by_sentiment(doc: &AnalysisDocument) -> WidgetSpec {
    let pol = &doc.polarity_analysis.polarity_by_sentiment;

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: CLASS_LABELS.iter().map(|s| s.to_string()).collect(),
        series: vec![Series::per_value(
            "Polaridad Promedio",
            vec![pol.positives.mean, pol.negatives.mean, pol.neutrals.mean],
            class_colors(),
        )],
        options: ChartOptions {
            horizontal: true,
            value_range: Some((-1.0, 1.0)),
            axis_title: Some("Polaridad (-1 = Muy Negativo, +1 = Muy Positivo)".to_string()),
        },
    })
}

/// Polarity histogram. Bins the raw per-comment samples into 20 buckets
/// when the pipeline exported them; otherwise falls back to the simulated
/// 5-bucket split of the aggregate class counts.
pub fn polarity_histogram(doc: &AnalysisDocument) -> WidgetSpec {
    let analysis = &doc.polarity_analysis;

    let (labels, values) = match analysis.polarity_samples.as_deref() {
        Some(samples) if !samples.is_empty() => {
            let buckets = 20;
            let counts = shape::polarity_histogram(samples, buckets);
            (
                shape::histogram_bucket_labels(buckets),
                counts.into_iter().map(|c| c as f64).collect::<Vec<f64>>(),
            )
        }
        _ => {
            let counts = shape::simulated_histogram(&analysis.sentiment_distribution);
            if counts.iter().all(|c| *c == 0.0) {
                return WidgetSpec::no_data();
            }
            (
                shape::SIMULATED_BUCKET_LABELS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                counts.to_vec(),
            )
        }
    };

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels,
        series: vec![Series::uniform(
            "Número de Comentarios",
            values,
            palette::PRIMARY,
        )],
        options: ChartOptions {
            axis_title: Some("Frecuencia".to_string()),
            ..Default::default()
        },
    })
}

/// Grouped mean/min/max polarity per class on a fixed [-1, 1] axis.
pub fn polarity_ranges(doc: &AnalysisDocument) -> WidgetSpec {
    let pol = &doc.polarity_analysis.polarity_by_sentiment;

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: CLASS_LABELS.iter().map(|s| s.to_string()).collect(),
        series: vec![
            Series::per_value(
                "Promedio",
                vec![pol.positives.mean, pol.negatives.mean, pol.neutrals.mean],
                class_colors(),
            ),
            Series::uniform(
                "Mínimo",
                vec![pol.positives.min, pol.negatives.min, pol.neutrals.min],
                palette::RANGE_FILL,
            ),
            Series::uniform(
                "Máximo",
                vec![pol.positives.max, pol.negatives.max, pol.neutrals.max],
                palette::RANGE_FILL,
            ),
        ],
        options: ChartOptions {
            value_range: Some((-1.0, 1.0)),
            ..Default::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;

    #[test]
    fn distribution_orders_neutral_negative_positive() {
        let doc = sample_document();
        let WidgetSpec::Chart(chart) = sentiment_distribution(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.kind, ChartKind::Doughnut);
        assert_eq!(chart.labels, vec!["Neutral", "Negativo", "Positivo"]);
        assert_eq!(chart.series[0].values, vec![40.0, 50.0, 30.0]);
    }

    #[test]
    fn histogram_prefers_true_binning_when_samples_exist() {
        let mut doc = sample_document();
        doc.polarity_analysis.polarity_samples = Some(vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

        let WidgetSpec::Chart(chart) = polarity_histogram(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.labels.len(), 20);
        assert_eq!(chart.series[0].values.iter().sum::<f64>(), 5.0);
        // +1.0 clamps into the last bucket.
        assert_eq!(*chart.series[0].values.last().unwrap(), 1.0);
    }

    #[test]
    fn histogram_falls_back_to_simulated_buckets() {
        let doc = sample_document();
        let WidgetSpec::Chart(chart) = polarity_histogram(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(
            chart.labels,
            vec!["Muy Negativo", "Negativo", "Neutral", "Positivo", "Muy Positivo"]
        );
        // negatives=50 split 0.4/0.6, neutrals pass through, positives=30
        // split 0.7/0.3.
        assert_eq!(chart.series[0].values, vec![20.0, 30.0, 40.0, 21.0, 9.0]);
    }

    #[test]
    fn empty_distribution_yields_no_data() {
        let mut doc = sample_document();
        doc.polarity_analysis.sentiment_distribution = Default::default();
        doc.polarity_analysis.polarity_samples = None;

        assert!(sentiment_distribution(&doc).is_no_data());
        assert!(polarity_histogram(&doc).is_no_data());
    }

    #[test]
    fn ranges_pin_the_polarity_axis() {
        let doc = sample_document();
        let WidgetSpec::Chart(chart) = polarity_ranges(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.options.value_range, Some((-1.0, 1.0)));
        assert_eq!(chart.series[0].values, vec![0.45, -0.52, 0.01]);
    }
}
