//! Score arithmetic and performance categories

use serde::{Deserialize, Serialize};

/// Upper bound of every criterion score
pub const MAX_SCORE: f64 = 10.0;

/// Round to one decimal place, the precision every persisted score uses
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Unweighted mean; an empty input averages to 0
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// True when a human-entered score lies within 0..=10
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (0.0..=MAX_SCORE).contains(&score)
}

/// Final rating bucket derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceCategory {
    Excellent,
    Good,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl PerformanceCategory {
    /// ≥8 Excellent, ≥6 Good, else Needs Improvement
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            PerformanceCategory::Excellent
        } else if score >= 6.0 {
            PerformanceCategory::Good
        } else {
            PerformanceCategory::NeedsImprovement
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceCategory::Excellent => "Excellent",
            PerformanceCategory::Good => "Good",
            PerformanceCategory::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for PerformanceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for PerformanceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "excellent" => Ok(PerformanceCategory::Excellent),
            "good" => Ok(PerformanceCategory::Good),
            "needs improvement" => Ok(PerformanceCategory::NeedsImprovement),
            other => Err(format!(
                "unknown category '{}' (expected excellent, good or needs-improvement)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round1_half_away_from_zero() {
        assert_eq!(round1(6.25), 6.3);
        assert_eq!(round1(7.04), 7.0);
        assert_eq!(round1(9.0), 9.0);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(Vec::<f64>::new()), 0.0);
        assert_eq!(mean([9.0, 9.0, 9.0]), 9.0);
        assert_eq!(mean([8.0, 6.0]), 7.0);
    }

    #[test]
    fn category_thresholds() {
        assert_eq!(PerformanceCategory::from_score(8.0), PerformanceCategory::Excellent);
        assert_eq!(PerformanceCategory::from_score(7.9), PerformanceCategory::Good);
        assert_eq!(PerformanceCategory::from_score(6.0), PerformanceCategory::Good);
        assert_eq!(
            PerformanceCategory::from_score(5.9),
            PerformanceCategory::NeedsImprovement
        );
    }

    #[test]
    fn category_serde_uses_display_names() {
        let json = serde_json::to_string(&PerformanceCategory::NeedsImprovement).unwrap();
        assert_eq!(json, "\"Needs Improvement\"");
    }

    #[test]
    fn score_range() {
        assert!(is_valid_score(0.0));
        assert!(is_valid_score(10.0));
        assert!(!is_valid_score(10.5));
        assert!(!is_valid_score(f64::NAN));
    }
}
