use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::weekly::WeeklyHistoryEntry;

/// ---------------------------------------------------------------------------
/// Confidence Level
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
  Low,
  Medium,
  High,
}

impl std::fmt::Display for ConfidenceLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Low => write!(f, "low"),
      Self::Medium => write!(f, "medium"),
      Self::High => write!(f, "high"),
    }
  }
}

impl std::str::FromStr for ConfidenceLevel {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "low" => Ok(Self::Low),
      "medium" => Ok(Self::Medium),
      "high" => Ok(Self::High),
      _ => Err(format!("Unknown confidence level: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Metabolism Trend
/// ---------------------------------------------------------------------------

/// How the empirically measured burn rate compares to the population formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetabolismTrend {
  Slower,
  Normal,
  Faster,
}

impl std::fmt::Display for MetabolismTrend {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Slower => write!(f, "slower"),
      Self::Normal => write!(f, "normal"),
      Self::Faster => write!(f, "faster"),
    }
  }
}

impl std::str::FromStr for MetabolismTrend {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "slower" => Ok(Self::Slower),
      "normal" => Ok(Self::Normal),
      "faster" => Ok(Self::Faster),
      _ => Err(format!("Unknown metabolism trend: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// TDEE Result
/// ---------------------------------------------------------------------------

/// The persisted artifact of one full pipeline run. Each calculation wholly
/// supersedes the previous result; the engine keeps no history of past runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdeeResult {
  pub formula_tdee: f64,
  pub adaptive_tdee: f64,
  pub confidence: ConfidenceLevel,
  pub confidence_score: f64,
  /// Absolute difference between adaptive and formula TDEE
  pub difference: f64,
  pub difference_percent: f64,
  /// Number of qualifying week pairs behind the adaptive estimate
  pub data_points: i64,
  pub recommended_calories: f64,
  /// Signed adaptive-minus-formula adjustment
  pub adjustment_from_formula: f64,
  pub metabolism_trend: MetabolismTrend,
  pub insights: Vec<String>,
  pub weekly_history: Vec<WeeklyHistoryEntry>,
  pub last_calculated: DateTime<Utc>,
  /// User-facing pacing signal, always last_calculated + 7 days
  pub next_recalculation: DateTime<Utc>,
}

impl TdeeResult {
  /// Whether this result is still inside the 1-day internal cache window
  pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(self.last_calculated) < Duration::days(1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_freshness_window() {
    let now = Utc::now();
    let result = crate::test_utils::dummy_result(now - Duration::hours(23));
    assert!(result.is_fresh(now));

    let stale = crate::test_utils::dummy_result(now - Duration::days(2));
    assert!(!stale.is_fresh(now));

    // Exactly one day old is no longer fresh
    let boundary = crate::test_utils::dummy_result(now - Duration::days(1));
    assert!(!boundary.is_fresh(now));
  }

  #[test]
  fn test_confidence_round_trips_as_string() {
    for level in [ConfidenceLevel::Low, ConfidenceLevel::Medium, ConfidenceLevel::High] {
      let parsed: ConfidenceLevel = level.to_string().parse().unwrap();
      assert_eq!(parsed, level);
    }
  }
}
