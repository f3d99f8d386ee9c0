//! Analysis Document Model
//!
//! Typed view of one pre-computed sentiment-analysis result. Documents are
//! produced by the upstream pipeline and consumed as-is: nothing in this
//! crate recomputes polarity, TF-IDF or n-gram statistics.
//!
//! A document is accepted only if all nine top-level sections are present
//! and non-null. Nested fields are optional with explicit defaults, so a
//! sparse document still renders with fallbacks instead of failing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level sections every analysis document must carry.
pub const REQUIRED_SECTIONS: [&str; 9] = [
    "metadata",
    "polarity_analysis",
    "word_frequency",
    "ngram_analysis",
    "tfidf_analysis",
    "emotion_charged_words",
    "negation_analysis",
    "additional_metrics",
    "llm_interpretation",
];

/// One loaded, validated analysis result for one source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub metadata: Metadata,
    pub polarity_analysis: PolarityAnalysis,
    pub word_frequency: WordFrequency,
    pub ngram_analysis: NgramAnalysis,
    pub tfidf_analysis: TfidfAnalysis,
    pub emotion_charged_words: EmotionChargedWords,
    pub negation_analysis: NegationAnalysis,
    pub additional_metrics: AdditionalMetrics,
    pub llm_interpretation: LlmInterpretation,
    /// Unrecognized top-level sections, preserved so an exported document
    /// round-trips without losing upstream extensions.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub total_comments: u64,
    /// RFC 3339 timestamp of the upstream analysis run.
    #[serde(default)]
    pub analysis_date: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityAnalysis {
    #[serde(default)]
    pub global_metrics: GlobalMetrics,
    #[serde(default)]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(default)]
    pub polarity_by_sentiment: PolarityBySentiment,
    /// Raw per-comment polarity values, when the pipeline exports them.
    /// Enables true histogram binning instead of the simulated fallback.
    #[serde(default)]
    pub polarity_samples: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalMetrics {
    /// Mean polarity over all comments, in [-1, 1].
    #[serde(default)]
    pub average_polarity: f64,
    /// Mean classifier confidence, in [0, 1].
    #[serde(default)]
    pub average_confidence: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(default)]
    pub positives: f64,
    #[serde(default)]
    pub negatives: f64,
    #[serde(default)]
    pub neutrals: f64,
    #[serde(default)]
    pub percent_positive: f64,
    #[serde(default)]
    pub percent_negative: f64,
    #[serde(default)]
    pub percent_neutral: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityBySentiment {
    #[serde(default)]
    pub positives: PolarityStats,
    #[serde(default)]
    pub negatives: PolarityStats,
    #[serde(default)]
    pub neutrals: PolarityStats,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityStats {
    #[serde(default)]
    pub mean: f64,
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

/// Ranked word/frequency pair. Upstream order is authoritative; the binder
/// slices, it never re-ranks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    #[serde(default)]
    pub top_overall: Vec<WordCount>,
    #[serde(default)]
    pub top_positive: Vec<WordCount>,
    #[serde(default)]
    pub top_negative: Vec<WordCount>,
    #[serde(default)]
    pub top_neutral: Vec<WordCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NgramCount {
    #[serde(default)]
    pub ngram: String,
    #[serde(default)]
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NgramAnalysis {
    #[serde(default)]
    pub top_bigrams: Vec<NgramCount>,
    #[serde(default)]
    pub positive_bigrams: Vec<NgramCount>,
    #[serde(default)]
    pub negative_bigrams: Vec<NgramCount>,
    #[serde(default)]
    pub negative_trigrams: Vec<NgramCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfWord {
    #[serde(default)]
    pub word: String,
    /// TF-IDF distinctiveness, non-negative, produced upstream.
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfAnalysis {
    #[serde(default)]
    pub distinctive_positive: Vec<TfidfWord>,
    #[serde(default)]
    pub distinctive_negative: Vec<TfidfWord>,
    #[serde(default)]
    pub distinctive_neutral: Vec<TfidfWord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionChargedWords {
    #[serde(default)]
    pub summary: EmotionSummary,
    /// Emotion -> occurrence count, in upstream key order.
    #[serde(default)]
    pub emotion_distribution: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub top_positive_words: Vec<WordCount>,
    #[serde(default)]
    pub top_negative_words: Vec<WordCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionSummary {
    #[serde(default)]
    pub total_positive_words: f64,
    #[serde(default)]
    pub total_negative_words: f64,
    #[serde(default)]
    pub negative_positive_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegationAnalysis {
    #[serde(default)]
    pub summary: NegationSummary,
    #[serde(default)]
    pub most_negated_words: Vec<NegatedWord>,
    #[serde(default)]
    pub negated_bigrams: Vec<NgramCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegationSummary {
    #[serde(default)]
    pub total_negations: f64,
    #[serde(default)]
    pub comments_with_negation: f64,
    #[serde(default)]
    pub percent_with_negation: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegatedWord {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub times_negated: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalMetrics {
    #[serde(default)]
    pub comment_length: CommentLength,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentLength {
    #[serde(default)]
    pub average_overall: f64,
    #[serde(default)]
    pub average_positive: Option<f64>,
    #[serde(default)]
    pub average_negative: Option<f64>,
    #[serde(default)]
    pub average_neutral: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmInterpretation {
    /// Free-form narrative with `###` section headings. Not contractually
    /// structured; see `text::extract_highlight`.
    #[serde(default)]
    pub full_interpretation: String,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// Why a parsed JSON value was rejected as an analysis document.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SchemaError {
    #[error("document is missing required sections: {}", missing.join(", "))]
    MissingSections { missing: Vec<String> },

    #[error("document is not a JSON object")]
    NotAnObject,

    #[error("document has malformed section content: {detail}")]
    Invalid { detail: String },
}

/// Required sections absent (or null) in `value`, in declared order.
pub fn missing_sections(value: &serde_json::Value) -> Vec<String> {
    let Some(object) = value.as_object() else {
        return REQUIRED_SECTIONS.iter().map(|s| s.to_string()).collect();
    };

    REQUIRED_SECTIONS
        .iter()
        .filter(|section| object.get(**section).map_or(true, |v| v.is_null()))
        .map(|s| s.to_string())
        .collect()
}

/// Validate a fetched JSON value and convert it into a typed document.
///
/// Missing top-level keys are the failure signal; empty-object sections are
/// accepted and fall back field by field.
pub fn validate_document(value: serde_json::Value) -> Result<AnalysisDocument, SchemaError> {
    if !value.is_object() {
        return Err(SchemaError::NotAnObject);
    }

    let missing = missing_sections(&value);
    if !missing.is_empty() {
        return Err(SchemaError::MissingSections { missing });
    }

    serde_json::from_value(value).map_err(|e| SchemaError::Invalid {
        detail: e.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A complete, small document used across the crate's tests.
    pub(crate) fn sample_value() -> serde_json::Value {
        serde_json::json!({
            "metadata": {
                "topic": "cambio climático",
                "total_comments": 120,
                "analysis_date": "2025-11-03T10:30:00Z",
                "source": "reddit"
            },
            "polarity_analysis": {
                "global_metrics": {
                    "average_polarity": -0.12,
                    "average_confidence": 0.83
                },
                "sentiment_distribution": {
                    "positives": 30.0,
                    "negatives": 50.0,
                    "neutrals": 40.0,
                    "percent_positive": 25.0,
                    "percent_negative": 41.7,
                    "percent_neutral": 33.3
                },
                "polarity_by_sentiment": {
                    "positives": { "mean": 0.45, "min": 0.1, "max": 0.9 },
                    "negatives": { "mean": -0.52, "min": -0.95, "max": -0.1 },
                    "neutrals": { "mean": 0.01, "min": -0.05, "max": 0.08 }
                }
            },
            "word_frequency": {
                "top_overall": [
                    { "word": "clima", "frequency": 42.0 },
                    { "word": "futuro", "frequency": 31.0 },
                    { "word": "energía", "frequency": 25.0 }
                ],
                "top_positive": [
                    { "word": "esperanza", "frequency": 12.0 },
                    { "word": "solución", "frequency": 9.0 }
                ],
                "top_negative": [
                    { "word": "crisis", "frequency": 18.0 },
                    { "word": "miedo", "frequency": 11.0 }
                ],
                "top_neutral": [
                    { "word": "informe", "frequency": 8.0 }
                ]
            },
            "ngram_analysis": {
                "top_bigrams": [
                    { "ngram": "cambio climático", "frequency": 22.0 }
                ],
                "positive_bigrams": [
                    { "ngram": "energía limpia", "frequency": 7.0 }
                ],
                "negative_bigrams": [
                    { "ngram": "crisis climática", "frequency": 13.0 }
                ],
                "negative_trigrams": [
                    { "ngram": "no hay futuro", "frequency": 4.0 }
                ]
            },
            "tfidf_analysis": {
                "distinctive_positive": [
                    { "word": "renovable", "score": 0.61 }
                ],
                "distinctive_negative": [
                    { "word": "desastre", "score": 0.72 }
                ],
                "distinctive_neutral": [
                    { "word": "estudio", "score": 0.33 }
                ]
            },
            "emotion_charged_words": {
                "summary": {
                    "total_positive_words": 64.0,
                    "total_negative_words": 96.0,
                    "negative_positive_ratio": 1.5
                },
                "emotion_distribution": {
                    "joy": 14.0, "sadness": 22.0, "anger": 19.0, "fear": 25.0
                },
                "top_positive_words": [
                    { "word": "esperanza", "frequency": 12.0 }
                ],
                "top_negative_words": [
                    { "word": "miedo", "frequency": 11.0 }
                ]
            },
            "negation_analysis": {
                "summary": {
                    "total_negations": 45.0,
                    "comments_with_negation": 38.0,
                    "percent_with_negation": 31.7
                },
                "most_negated_words": [
                    { "word": "funciona", "times_negated": 6.0 }
                ],
                "negated_bigrams": [
                    { "ngram": "no funciona", "frequency": 5.0 }
                ]
            },
            "additional_metrics": {
                "comment_length": {
                    "average_overall": 24.5,
                    "average_positive": 21.0,
                    "average_negative": 29.3,
                    "average_neutral": 18.2
                }
            },
            "llm_interpretation": {
                "full_interpretation": "### Análisis del sentimiento predominante\nEl tono general es moderadamente negativo.\n\n### Recomendaciones\nComunicar avances concretos.",
                "model_used": "gemma-2-9b"
            }
        })
    }

    pub(crate) fn sample_document() -> AnalysisDocument {
        validate_document(sample_value()).expect("sample document is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::sample_value;
    use super::*;

    #[test]
    fn accepts_complete_document() {
        let doc = validate_document(sample_value()).unwrap();
        assert_eq!(doc.metadata.topic, "cambio climático");
        assert_eq!(doc.metadata.total_comments, 120);
        assert_eq!(doc.word_frequency.top_overall.len(), 3);
        assert_eq!(
            doc.llm_interpretation.model_used.as_deref(),
            Some("gemma-2-9b")
        );
    }

    #[test]
    fn rejects_every_combination_of_missing_sections() {
        // Power set over the nine required keys: every non-empty subset of
        // removed sections must be rejected, reporting exactly that subset.
        for mask in 1u32..(1 << REQUIRED_SECTIONS.len()) {
            let mut value = sample_value();
            let object = value.as_object_mut().unwrap();

            let mut removed = Vec::new();
            for (i, section) in REQUIRED_SECTIONS.iter().enumerate() {
                if mask & (1 << i) != 0 {
                    object.remove(*section);
                    removed.push(section.to_string());
                }
            }

            match validate_document(value) {
                Err(SchemaError::MissingSections { missing }) => {
                    assert_eq!(missing, removed, "mask {mask:#b}");
                }
                other => panic!("mask {mask:#b}: expected rejection, got {other:?}"),
            }
        }
    }

    #[test]
    fn null_section_counts_as_missing() {
        let mut value = sample_value();
        value["tfidf_analysis"] = serde_json::Value::Null;

        let err = validate_document(value).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingSections {
                missing: vec!["tfidf_analysis".to_string()]
            }
        );
    }

    #[test]
    fn empty_object_sections_fall_back_to_defaults() {
        let mut value = sample_value();
        value["additional_metrics"] = serde_json::json!({});
        value["negation_analysis"] = serde_json::json!({});

        let doc = validate_document(value).unwrap();
        assert_eq!(doc.additional_metrics.comment_length.average_overall, 0.0);
        assert_eq!(
            doc.additional_metrics.comment_length.average_positive,
            None
        );
        assert!(doc.negation_analysis.most_negated_words.is_empty());
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert_eq!(
            validate_document(serde_json::json!([1, 2, 3])),
            Err(SchemaError::NotAnObject)
        );
    }

    #[test]
    fn unknown_top_level_sections_survive_a_round_trip() {
        let mut value = sample_value();
        value["pipeline_debug"] = serde_json::json!({ "elapsed_ms": 412 });

        let doc = validate_document(value).unwrap();
        let exported = serde_json::to_value(&doc).unwrap();
        assert_eq!(exported["pipeline_debug"]["elapsed_ms"], 412);
    }
}
