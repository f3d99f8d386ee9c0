//! TF-IDF tab bindings: per-class average distinctiveness and the radar
//! over the distinctive-word union.

use crate::model::{AnalysisDocument, TfidfWord};

use super::shape;
use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, WidgetSpec};

/// Radar charts get unreadable past a handful of axes.
const RADAR_LABEL_CAP: usize = 6;

fn as_pairs(words: &[TfidfWord]) -> Vec<(&str, f64)> {
    words.iter().map(|w| (w.word.as_str(), w.score)).collect()
}

/// Mean TF-IDF score of each class' top-5 distinctive words.
pub fn tfidf_averages(doc: &AnalysisDocument) -> WidgetSpec {
    let tfidf = &doc.tfidf_analysis;

    let averages = [
        &tfidf.distinctive_positive,
        &tfidf.distinctive_negative,
        &tfidf.distinctive_neutral,
    ]
    .map(|words| shape::mean_or_zero(shape::top_n(words, 5).iter().map(|w| w.score)));

    if averages.iter().all(|a| *a == 0.0) {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: vec![
            "Positivos".to_string(),
            "Negativos".to_string(),
            "Neutrales".to_string(),
        ],
        series: vec![Series::per_value(
            "Score TF-IDF Promedio",
            averages.to_vec(),
            vec![
                palette::POSITIVE.to_string(),
                palette::NEGATIVE.to_string(),
                palette::NEUTRAL.to_string(),
            ],
        )],
        options: ChartOptions {
            axis_title: Some("Score TF-IDF Promedio".to_string()),
            ..Default::default()
        },
    })
}

/// Radar of distinctive-word scores per class, over the capped union of
/// each class' top-5 words.
pub fn tfidf_radar(doc: &AnalysisDocument) -> WidgetSpec {
    let tfidf = &doc.tfidf_analysis;
    let positive = as_pairs(shape::top_n(&tfidf.distinctive_positive, 5));
    let negative = as_pairs(shape::top_n(&tfidf.distinctive_negative, 5));
    let neutral = as_pairs(shape::top_n(&tfidf.distinctive_neutral, 5));

    let mut labels = shape::union_labels(&[&positive, &negative, &neutral]);
    labels.truncate(RADAR_LABEL_CAP);
    if labels.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Radar,
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
        options: ChartOptions::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;

    fn words(pairs: &[(&str, f64)]) -> Vec<TfidfWord> {
        pairs
            .iter()
            .map(|(word, score)| TfidfWord {
                word: (*word).to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn averages_use_only_the_top_five() {
        let mut doc = sample_document();
        doc.tfidf_analysis.distinctive_positive = words(&[
            ("a", 1.0),
            ("b", 1.0),
            ("c", 1.0),
            ("d", 1.0),
            ("e", 1.0),
            // Beyond the slice; must not drag the mean down.
            ("f", 0.0),
        ]);

        let WidgetSpec::Chart(chart) = tfidf_averages(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.series[0].values[0], 1.0);
    }

    #[test]
    fn averages_fall_back_to_zero_for_an_empty_class() {
        let mut doc = sample_document();
        doc.tfidf_analysis.distinctive_neutral = vec![];

        let WidgetSpec::Chart(chart) = tfidf_averages(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.series[0].values[2], 0.0);
    }

    #[test]
    fn radar_caps_the_label_union_at_six() {
        let mut doc = sample_document();
        doc.tfidf_analysis.distinctive_positive =
            words(&[("p1", 0.9), ("p2", 0.8), ("p3", 0.7), ("p4", 0.6), ("p5", 0.5)]);
        doc.tfidf_analysis.distinctive_negative =
            words(&[("n1", 0.9), ("n2", 0.8), ("n3", 0.7)]);
        doc.tfidf_analysis.distinctive_neutral = vec![];

        let WidgetSpec::Chart(chart) = tfidf_radar(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.kind, ChartKind::Radar);
        assert_eq!(chart.labels.len(), 6);
        assert_eq!(chart.labels, vec!["p1", "p2", "p3", "p4", "p5", "n1"]);
        // Neutral series is all fallback zeroes on the union.
        assert!(chart.series[2].values.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn empty_tfidf_section_yields_no_data() {
        let mut doc = sample_document();
        doc.tfidf_analysis = Default::default();

        assert!(tfidf_averages(&doc).is_no_data());
        assert!(tfidf_radar(&doc).is_no_data());
    }
}
