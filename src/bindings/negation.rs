//! Negation tab bindings: the summary figures, the most-negated word list
//! and the negated-bigram ranking.

use crate::model::AnalysisDocument;

use super::{palette, ChartDescription, ChartKind, ChartOptions, Series, StatLine, WidgetSpec};

/// Headline negation figures.
pub fn negation_stats(doc: &AnalysisDocument) -> WidgetSpec {
    let summary = &doc.negation_analysis.summary;

    WidgetSpec::Stats(vec![
        StatLine::new(
            "Total de negaciones",
            format!("{:.0}", summary.total_negations),
        ),
        StatLine::new(
            "Comentarios con negación",
            format!("{:.0}", summary.comments_with_negation),
        ),
        StatLine::new(
            "Porcentaje con negación",
            format!("{:.1}%", summary.percent_with_negation),
        ),
    ])
}

/// Most-negated words, one "word / Nx" line each.
pub fn negated_words(doc: &AnalysisDocument) -> WidgetSpec {
    let words = &doc.negation_analysis.most_negated_words;
    if words.is_empty() {
        return WidgetSpec::no_data();
    }

    WidgetSpec::Stats(
        words
            .iter()
            .map(|w| StatLine::new(w.word.clone(), format!("{:.0}x", w.times_negated)))
            .collect(),
    )
}

/// Horizontal ranking of bigrams containing a negation. Sparse corpora
/// often have none; that is a placeholder, not an error.
pub fn negation_bigrams(doc: &AnalysisDocument) -> WidgetSpec {
    let bigrams = &doc.negation_analysis.negated_bigrams;
    if bigrams.is_empty() {
        return WidgetSpec::NoData(
            "No hay suficientes bigramas con negación para visualizar".to_string(),
        );
    }

    WidgetSpec::Chart(ChartDescription {
        kind: ChartKind::Bar,
        labels: bigrams.iter().map(|b| b.ngram.clone()).collect(),
        series: vec![Series::uniform(
            "Frecuencia",
            bigrams.iter().map(|b| b.frequency).collect(),
            palette::NEGATIVE,
        )],
        options: ChartOptions {
            horizontal: true,
            ..Default::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::sample_document;

    #[test]
    fn stats_format_counts_and_percentage() {
        let doc = sample_document();
        let WidgetSpec::Stats(lines) = negation_stats(&doc) else {
            panic!("expected stats");
        };
        assert_eq!(lines[0].value, "45");
        assert_eq!(lines[1].value, "38");
        assert_eq!(lines[2].value, "31.7%");
    }

    #[test]
    fn negated_words_render_with_multiplier() {
        let doc = sample_document();
        let WidgetSpec::Stats(lines) = negated_words(&doc) else {
            panic!("expected stats");
        };
        assert_eq!(lines[0].label, "funciona");
        assert_eq!(lines[0].value, "6x");
    }

    #[test]
    fn empty_bigrams_show_the_dedicated_placeholder() {
        let mut doc = sample_document();
        doc.negation_analysis.negated_bigrams = vec![];

        let WidgetSpec::NoData(reason) = negation_bigrams(&doc) else {
            panic!("expected no-data");
        };
        assert!(reason.contains("bigramas con negación"));
    }
}
