//! Additional-metrics tab bindings: comment-length averages and the
//! per-sentiment summary table.

use crate::model::AnalysisDocument;

use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, TableSpec, WidgetSpec};

/// Average comment length per class plus the overall average. Per-class
/// averages are optional upstream and fall back to 0 explicitly.
pub fn comment_length(doc: &AnalysisDocument) -> WidgetSpec {
    let length = &doc.additional_metrics.comment_length;
    let values = vec![
        length.average_positive.unwrap_or(0.0),
        length.average_negative.unwrap_or(0.0),
        length.average_neutral.unwrap_or(0.0),
        length.average_overall,
    ];

    if values.iter().all(|v| *v == 0.0) {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: vec![
            "Positivos".to_string(),
            "Negativos".to_string(),
            "Neutrales".to_string(),
            "General".to_string(),
        ],
        series: vec![Series::per_value(
            "Longitud Promedio (palabras)",
            values,
            vec![
                palette::POSITIVE.to_string(),
                palette::NEGATIVE.to_string(),
                palette::NEUTRAL.to_string(),
                palette::PRIMARY.to_string(),
            ],
        )],
        options: ChartOptions {
            axis_title: Some("Número de Palabras".to_string()),
            ..Default::default()
        },
    })
}

/// Per-class count / share / mean polarity / mean length table.
pub fn metrics_table(doc: &AnalysisDocument) -> WidgetSpec {
    let dist = &doc.polarity_analysis.sentiment_distribution;
    let pol = &doc.polarity_analysis.polarity_by_sentiment;
    let length = &doc.additional_metrics.comment_length;

    let rows = vec![
        (
            "Positivo",
            dist.positives,
            dist.percent_positive,
            pol.positives.mean,
            length.average_positive.unwrap_or(0.0),
        ),
        (
            "Negativo",
            dist.negatives,
            dist.percent_negative,
            pol.negatives.mean,
            length.average_negative.unwrap_or(0.0),
        ),
        (
            "Neutral",
            dist.neutrals,
            dist.percent_neutral,
            pol.neutrals.mean,
            length.average_neutral.unwrap_or(0.0),
        ),
    ];

    WidgetSpec::Table(TableSpec {
        columns: vec![
            "Sentimiento".to_string(),
            "Cantidad".to_string(),
            "Porcentaje".to_string(),
            "Polaridad Promedio".to_string(),
            "Longitud Promedio".to_string(),
        ],
        rows: rows
            .into_iter()
            .map(|(name, count, percent, polarity, len)| {
                vec![
                    name.to_string(),
                    format!("{:.0}", count),
                    format!("{:.1}%", percent),
                    format!("{:.3}", polarity),
                    format!("{:.1}", len),
                ]
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;

    #[test]
    fn length_chart_includes_the_overall_bar() {
        let doc = sample_document();
        let WidgetSpec::Chart(chart) = comment_length(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.labels.len(), 4);
        assert_eq!(chart.series[0].values, vec![21.0, 29.3, 18.2, 24.5]);
    }

    #[test]
    fn missing_per_class_lengths_fall_back_to_zero() {
        let mut doc = sample_document();
        doc.additional_metrics.comment_length.average_positive = None;
        doc.additional_metrics.comment_length.average_neutral = None;

        let WidgetSpec::Chart(chart) = comment_length(&doc) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.series[0].values[0], 0.0);
        assert_eq!(chart.series[0].values[2], 0.0);
        assert_eq!(chart.series[0].values[3], 24.5);
    }

    #[test]
    fn table_formats_three_class_rows() {
        let doc = sample_document();
        let WidgetSpec::Table(table) = metrics_table(&doc) else {
            panic!("expected a table");
        };
        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0][0], "Positivo");
        assert_eq!(table.rows[0][1], "30");
        assert_eq!(table.rows[0][2], "25.0%");
        assert_eq!(table.rows[1][3], "-0.520");
        assert_eq!(table.rows[2][4], "18.2");
    }
}
