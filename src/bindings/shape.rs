//! Shared shaping helpers for the binding catalogue.
//!
//! Everything here is a pure function over upstream-provided numbers. The
//! one rule that matters: upstream ranking is authoritative. Helpers slice
//! and align sequences, they never re-rank them.

use crate::model::SentimentDistribution;

/// Sentiment classes as displayed on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positivo",
            Sentiment::Negative => "Negativo",
            Sentiment::Neutral => "Neutral",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Negative => "😞",
            Sentiment::Neutral => "😐",
        }
    }
}

/// Predominant sentiment of a distribution: the class whose percentage
/// strictly exceeds both others. Ties and no-majority resolve to Neutral.
pub fn predominant(dist: &SentimentDistribution) -> Sentiment {
    let pos = dist.percent_positive;
    let neg = dist.percent_negative;
    let neu = dist.percent_neutral;

    if pos > neg && pos > neu {
        Sentiment::Positive
    } else if neg > pos && neg > neu {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

/// First `n` entries of an upstream-ranked sequence.
pub fn top_n<T>(seq: &[T], n: usize) -> &[T] {
    &seq[..seq.len().min(n)]
}

/// Union of labels across ranked groups, preserving first-seen order across
/// the groups in the order given (positive, then negative, then neutral).
/// This is what keeps grouped bars aligned across heterogeneous label sets.
pub fn union_labels(groups: &[&[(&str, f64)]]) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for group in groups {
        for (label, _) in *group {
            if !labels.iter().any(|l| l == label) {
                labels.push((*label).to_string());
            }
        }
    }
    labels
}

/// One series' value per union label, defaulting to 0 where the label is
/// absent from this group's sequence.
pub fn values_for(labels: &[String], group: &[(&str, f64)]) -> Vec<f64> {
    labels
        .iter()
        .map(|label| {
            group
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| *v)
                .unwrap_or(0.0)
        })
        .collect()
}

/// Labels for the simulated 5-bucket polarity histogram.
pub const SIMULATED_BUCKET_LABELS: [&str; 5] =
    ["Muy Negativo", "Negativo", "Neutral", "Positivo", "Muy Positivo"];

/// Approximate a 5-bucket polarity histogram from aggregate class counts.
///
/// This is an explicit approximation, not a binning of raw data: the
/// negative count is split 0.4/0.6 into {very-negative, negative}, the
/// positive count 0.7/0.3 into {positive, very-positive}, and the neutral
/// count passes through unchanged. The fixed weights carry no statistical
/// meaning. Used only when per-comment samples are unavailable; prefer
/// [`polarity_histogram`].
pub fn simulated_histogram(dist: &SentimentDistribution) -> [f64; 5] {
    [
        dist.negatives * 0.4,
        dist.negatives * 0.6,
        dist.neutrals,
        dist.positives * 0.7,
        dist.positives * 0.3,
    ]
}

/// True histogram over the closed range [-1, 1] with `buckets` equal-width
/// buckets. A sample lands in bucket `floor((value + 1) / width)`, clamped
/// into the valid index range so the boundary value +1 falls into the last
/// bucket instead of overflowing.
pub fn polarity_histogram(samples: &[f64], buckets: usize) -> Vec<u64> {
    assert!(buckets > 0, "histogram needs at least one bucket");

    let width = 2.0 / buckets as f64;
    let mut counts = vec![0u64; buckets];

    for &value in samples {
        let index = ((value + 1.0) / width).floor() as i64;
        let index = index.clamp(0, buckets as i64 - 1) as usize;
        counts[index] += 1;
    }

    counts
}

/// Axis labels for the true histogram buckets.
pub fn histogram_bucket_labels(buckets: usize) -> Vec<String> {
    let width = 2.0 / buckets as f64;
    (0..buckets)
        .map(|i| {
            let low = -1.0 + i as f64 * width;
            format!("{:.2} a {:.2}", low, low + width)
        })
        .collect()
}

/// Mean of the values, or the explicit fallback 0.0 for an empty slice.
pub fn mean_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(pos: f64, neg: f64, neu: f64) -> SentimentDistribution {
        SentimentDistribution {
            percent_positive: pos,
            percent_negative: neg,
            percent_neutral: neu,
            ..Default::default()
        }
    }

    #[test]
    fn predominant_requires_strict_majority_over_both() {
        assert_eq!(predominant(&dist(34.0, 33.0, 33.0)).label(), "Positivo");
        assert_eq!(predominant(&dist(50.0, 30.0, 20.0)).label(), "Positivo");
        assert_eq!(predominant(&dist(20.0, 50.0, 30.0)).label(), "Negativo");
        // Tie between positive and negative: neutral wins.
        assert_eq!(predominant(&dist(40.0, 40.0, 20.0)).label(), "Neutral");
        // Neutral leading outright.
        assert_eq!(predominant(&dist(30.0, 30.0, 40.0)).label(), "Neutral");
        // Exact three-way tie.
        assert_eq!(
            predominant(&dist(100.0 / 3.0, 100.0 / 3.0, 100.0 / 3.0)).label(),
            "Neutral"
        );
    }

    #[test]
    fn top_n_never_overruns() {
        let seq = [1, 2, 3];
        assert_eq!(top_n(&seq, 2), &[1, 2]);
        assert_eq!(top_n(&seq, 10), &[1, 2, 3]);
        assert_eq!(top_n::<i32>(&[], 5), &[] as &[i32]);
    }

    #[test]
    fn union_labels_keep_first_seen_order_and_default_to_zero() {
        let positive: &[(&str, f64)] = &[("a", 5.0), ("b", 3.0)];
        let negative: &[(&str, f64)] = &[("b", 2.0), ("c", 4.0)];
        let neutral: &[(&str, f64)] = &[];

        let labels = union_labels(&[positive, negative, neutral]);
        assert_eq!(labels, vec!["a", "b", "c"]);

        assert_eq!(values_for(&labels, positive), vec![5.0, 3.0, 0.0]);
        assert_eq!(values_for(&labels, negative), vec![0.0, 2.0, 4.0]);
        assert_eq!(values_for(&labels, neutral), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn simulated_histogram_splits_with_fixed_weights() {
        let dist = SentimentDistribution {
            positives: 30.0,
            negatives: 50.0,
            neutrals: 40.0,
            ..Default::default()
        };
        let counts = simulated_histogram(&dist);
        assert_eq!(counts, [20.0, 30.0, 40.0, 21.0, 9.0]);
    }

    #[test]
    fn polarity_histogram_clamps_the_upper_boundary() {
        let samples = [-1.0, -0.5, 0.0, 0.5, 1.0];
        assert_eq!(polarity_histogram(&samples, 4), vec![1, 1, 1, 2]);
    }

    #[test]
    fn polarity_histogram_default_binning() {
        // 20 buckets of width 0.1: -1.0 -> bucket 0, 0.0 -> bucket 10,
        // 0.99 -> bucket 19.
        let counts = polarity_histogram(&[-1.0, 0.0, 0.99], 20);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[10], 1);
        assert_eq!(counts[19], 1);
        assert_eq!(counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn polarity_histogram_tolerates_out_of_range_samples() {
        let counts = polarity_histogram(&[-2.0, 2.0], 4);
        assert_eq!(counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn bucket_labels_cover_the_full_range() {
        let labels = histogram_bucket_labels(4);
        assert_eq!(labels[0], "-1.00 a -0.50");
        assert_eq!(labels[3], "0.50 a 1.00");
    }

    #[test]
    fn mean_or_zero_has_an_explicit_empty_fallback() {
        assert_eq!(mean_or_zero([1.0, 2.0, 3.0].into_iter()), 2.0);
        assert_eq!(mean_or_zero(std::iter::empty()), 0.0);
    }
}
