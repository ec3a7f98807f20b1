// Usability score - Bayesian-shrunk star rating on a 0-100 scale

use crate::config::ScoringConfig;
use crate::model::RatingHistogram;
use serde::{Deserialize, Serialize};

/// Directory-wide prior mean rating
pub const DEFAULT_GLOBAL_MEAN: f64 = 3.8;

/// Phantom average ratings blended into every plugin
pub const DEFAULT_CONFIDENCE: f64 = 100.0;

/// Usability breakdown for one plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsabilityResult {
    /// Plain weighted average, 1 decimal
    pub avg_stars: f64,

    /// Average after shrinkage toward the global mean, 1 decimal
    pub adjusted_avg: f64,

    /// 0-100, 1 decimal
    pub score: f64,

    /// Total rating count as passed in
    pub total: u64,

    /// Echo of the input histogram (empty when none was given)
    pub distribution: RatingHistogram,
}

impl UsabilityResult {
    fn zero() -> Self {
        Self {
            avg_stars: 0.0,
            adjusted_avg: 0.0,
            score: 0.0,
            total: 0,
            distribution: RatingHistogram::from_counts([0; 5]),
        }
    }

    pub fn color(&self) -> UsabilityColor {
        UsabilityColor::for_score(self.score)
    }
}

/// Traffic-light bucket for a usability score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsabilityColor {
    Good,
    Medium,
    Poor,
}

impl UsabilityColor {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            UsabilityColor::Good
        } else if score >= 40.0 {
            UsabilityColor::Medium
        } else {
            UsabilityColor::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsabilityColor::Good => "good",
            UsabilityColor::Medium => "medium",
            UsabilityColor::Poor => "poor",
        }
    }
}

/// Score a histogram with explicit prior parameters
///
/// The sample size is taken from the histogram itself; `total_ratings` only
/// decides whether there is anything to score and is echoed back. This keeps
/// the result sane when the directory's total disagrees with its histogram.
pub fn score_with(
    histogram: Option<&RatingHistogram>,
    total_ratings: u64,
    global_mean: f64,
    confidence: f64,
) -> UsabilityResult {
    let Some(histogram) = histogram else {
        return UsabilityResult::zero();
    };
    if total_ratings == 0 {
        return UsabilityResult::zero();
    }

    let n = histogram.total() as f64;
    let weighted = histogram.weighted_sum() as f64;
    let avg_stars = if n > 0.0 { weighted / n } else { 0.0 };

    // (C * mean + n * avg) / (C + n), with n * avg == weighted
    let denominator = confidence + n;
    let adjusted_avg = if denominator > 0.0 {
        (confidence * global_mean + weighted) / denominator
    } else {
        global_mean
    };

    let score = (adjusted_avg / 5.0 * 100.0).clamp(0.0, 100.0);

    UsabilityResult {
        avg_stars: round1(avg_stars),
        adjusted_avg: round1(adjusted_avg),
        score: round1(score),
        total: total_ratings,
        distribution: histogram.clone(),
    }
}

/// Score a histogram with the configured prior
pub fn score(
    histogram: Option<&RatingHistogram>,
    total_ratings: u64,
    config: &ScoringConfig,
) -> UsabilityResult {
    score_with(histogram, total_ratings, config.global_mean, config.confidence)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_score(histogram: &RatingHistogram, total: u64) -> UsabilityResult {
        score_with(Some(histogram), total, DEFAULT_GLOBAL_MEAN, DEFAULT_CONFIDENCE)
    }

    #[test]
    fn worked_example() {
        let histogram = RatingHistogram::from_counts([0, 0, 0, 10, 90]);
        let result = default_score(&histogram, 100);

        assert_eq!(result.avg_stars, 4.9);
        // (100 * 3.8 + 100 * 4.9) / 200 = 4.35
        assert_eq!(result.adjusted_avg, 4.4);
        assert_eq!(result.score, 87.0);
        assert_eq!(result.total, 100);
        assert_eq!(result.color(), UsabilityColor::Good);
    }

    #[test]
    fn no_ratings_scores_zero() {
        let histogram = RatingHistogram::from_counts([0, 0, 0, 0, 0]);
        assert_eq!(default_score(&histogram, 0), UsabilityResult::zero());

        let missing = score_with(None, 25, DEFAULT_GLOBAL_MEAN, DEFAULT_CONFIDENCE);
        assert_eq!(missing.score, 0.0);
        assert_eq!(missing.distribution.total(), 0);
    }

    #[test]
    fn single_perfect_review_is_pulled_toward_mean() {
        let histogram = RatingHistogram::from_counts([0, 0, 0, 0, 1]);
        let result = default_score(&histogram, 1);

        assert_eq!(result.avg_stars, 5.0);
        assert_eq!(result.adjusted_avg, 3.8);
        assert!(result.score < 80.0);
    }

    #[test]
    fn shrinkage_vanishes_with_many_ratings() {
        let histogram = RatingHistogram::from_counts([0, 0, 0, 0, 1_000_000]);
        let result = default_score(&histogram, 1_000_000);
        assert_eq!(result.adjusted_avg, 5.0);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn mismatched_total_uses_histogram() {
        let histogram = RatingHistogram::from_counts([0, 0, 0, 10, 90]);
        let trusted = default_score(&histogram, 100);
        let inflated = default_score(&histogram, 5_000);

        assert_eq!(trusted.score, inflated.score);
        assert_eq!(inflated.total, 5_000);
    }

    #[test]
    fn empty_histogram_with_total_shrinks_to_prior() {
        let histogram = RatingHistogram::new();
        let result = default_score(&histogram, 12);
        assert_eq!(result.avg_stars, 0.0);
        assert_eq!(result.adjusted_avg, 3.8);
        assert_eq!(result.score, 76.0);
    }

    #[test]
    fn score_stays_in_bounds() {
        for counts in [
            [1, 0, 0, 0, 0],
            [500, 0, 0, 0, 0],
            [0, 0, 0, 0, 500],
            [3, 7, 2, 9, 40],
            [1000, 1, 1, 1, 1],
        ] {
            let histogram = RatingHistogram::from_counts(counts);
            let result = default_score(&histogram, histogram.total());
            assert!(result.score > 0.0 && result.score <= 100.0, "{counts:?}");
        }
    }

    #[test]
    fn color_thresholds() {
        assert_eq!(UsabilityColor::for_score(70.0), UsabilityColor::Good);
        assert_eq!(UsabilityColor::for_score(69.9), UsabilityColor::Medium);
        assert_eq!(UsabilityColor::for_score(40.0), UsabilityColor::Medium);
        assert_eq!(UsabilityColor::for_score(39.9), UsabilityColor::Poor);
        assert_eq!(UsabilityColor::Poor.as_str(), "poor");
    }
}
