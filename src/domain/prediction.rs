//! Mood/energy prediction result.

use serde::{Deserialize, Serialize};

/// Score at or above which the mood reads as high.
pub const HIGH_THRESHOLD: f64 = 7.0;

/// Score at or above which the mood reads as moderate.
pub const MODERATE_THRESHOLD: f64 = 4.0;

/// Descriptive bucket for a mood score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodBucket {
    High,
    Moderate,
    Low,
}

impl MoodBucket {
    /// Bucket a raw score: `>= 7` high, `[4, 7)` moderate, otherwise low.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MODERATE_THRESHOLD {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "High Energy / Positive Mood",
            Self::Moderate => "Moderate / Neutral Mood",
            Self::Low => "Low Energy / Negative Mood",
        }
    }
}

impl std::fmt::Display for MoodBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Output of a single model call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Raw model score (nominally 0-10)
    pub score: f64,

    /// Bucketed description of the score
    pub bucketed_description: MoodBucket,
}

impl PredictionResult {
    #[must_use]
    pub fn new(score: f64) -> Self {
        Self {
            score,
            bucketed_description: MoodBucket::from_score(score),
        }
    }

    /// Score formatted for display, one decimal place.
    #[must_use]
    pub fn display_score(&self) -> String {
        format!("{:.1} / 10", self.score)
    }

    /// Score as a 0.0-1.0 ratio for gauges.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        (self.score / 10.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(MoodBucket::from_score(7.0), MoodBucket::High);
        assert_eq!(MoodBucket::from_score(6.999), MoodBucket::Moderate);
        assert_eq!(MoodBucket::from_score(4.0), MoodBucket::Moderate);
        assert_eq!(MoodBucket::from_score(3.999), MoodBucket::Low);
    }

    #[test]
    fn test_bucket_extremes() {
        assert_eq!(MoodBucket::from_score(10.5), MoodBucket::High);
        assert_eq!(MoodBucket::from_score(-1.0), MoodBucket::Low);
    }

    #[test]
    fn test_prediction_display() {
        let p = PredictionResult::new(7.26);
        assert_eq!(p.bucketed_description, MoodBucket::High);
        assert_eq!(p.display_score(), "7.3 / 10");
        assert!((p.ratio() - 0.726).abs() < 1e-9);
        assert_eq!(PredictionResult::new(12.0).ratio(), 1.0);
    }
}
