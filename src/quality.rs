//! Data quality gate
//!
//! Decides whether enough paired observations exist to trust an empirical
//! TDEE over the formula. Only paired-day coverage matters: a day counts
//! when it has both a weight log and a calorie log, no matter how many
//! entries of either kind exist.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BodyWeightLog, DailyCalorieLog};

/// Paired-day coverage required before the adaptive path opens (two weeks)
pub const READINESS_THRESHOLD_DAYS: i64 = 14;

/// ---------------------------------------------------------------------------
/// Data Quality Metrics
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQualityMetrics {
  pub is_ready: bool,
  pub days_with_both_logs: i64,
  pub total_weight_logs: i64,
  pub total_calorie_logs: i64,
  pub days_until_ready: i64,
}

impl DataQualityMetrics {
  /// Assess readiness from the raw history in the lookback window
  pub fn assess(weights: &[BodyWeightLog], calories: &[DailyCalorieLog]) -> Self {
    let weight_days: HashSet<NaiveDate> = weights.iter().map(|w| w.date).collect();
    let calorie_days: HashSet<NaiveDate> = calories.iter().map(|c| c.date).collect();

    let days_with_both_logs = weight_days.intersection(&calorie_days).count() as i64;

    Self {
      is_ready: days_with_both_logs >= READINESS_THRESHOLD_DAYS,
      days_with_both_logs,
      total_weight_logs: weights.len() as i64,
      total_calorie_logs: calories.len() as i64,
      days_until_ready: (READINESS_THRESHOLD_DAYS - days_with_both_logs).max(0),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{calorie_log, date, weight_log};

  #[test]
  fn test_empty_history_not_ready() {
    let metrics = DataQualityMetrics::assess(&[], &[]);
    assert!(!metrics.is_ready);
    assert_eq!(metrics.days_with_both_logs, 0);
    assert_eq!(metrics.days_until_ready, READINESS_THRESHOLD_DAYS);
  }

  #[test]
  fn test_only_paired_days_count() {
    // 20 weight logs and 20 calorie logs, but on disjoint days
    let weights: Vec<_> = (0..20).map(|i| weight_log(date(2025, 1, 1 + i), 180.0)).collect();
    let calories: Vec<_> = (0..20).map(|i| calorie_log(date(2025, 2, 1 + i), 2000.0)).collect();

    let metrics = DataQualityMetrics::assess(&weights, &calories);
    assert!(!metrics.is_ready);
    assert_eq!(metrics.days_with_both_logs, 0);
    assert_eq!(metrics.total_weight_logs, 20);
    assert_eq!(metrics.total_calorie_logs, 20);
  }

  #[test]
  fn test_duplicate_logs_on_one_day_count_once() {
    let mut weights = Vec::new();
    let mut calories = Vec::new();
    for i in 0..13 {
      let d = date(2025, 1, 1 + i);
      // Two weigh-ins on the same day (a correction entry)
      weights.push(weight_log(d, 180.0));
      weights.push(weight_log(d, 180.4));
      calories.push(calorie_log(d, 2000.0));
    }

    let metrics = DataQualityMetrics::assess(&weights, &calories);
    assert_eq!(metrics.days_with_both_logs, 13);
    assert!(!metrics.is_ready);
    assert_eq!(metrics.days_until_ready, 1);
  }

  #[test]
  fn test_threshold_boundary() {
    let weights: Vec<_> = (0..14).map(|i| weight_log(date(2025, 1, 1 + i), 180.0)).collect();
    let calories: Vec<_> = (0..14).map(|i| calorie_log(date(2025, 1, 1 + i), 2000.0)).collect();

    let metrics = DataQualityMetrics::assess(&weights, &calories);
    assert!(metrics.is_ready);
    assert_eq!(metrics.days_until_ready, 0);
  }
}
