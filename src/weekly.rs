//! Weekly aggregation
//!
//! Buckets raw weight and calorie logs into Sunday-start calendar weeks and
//! keeps only weeks with enough observations to average meaningfully. Weight
//! is normalized to pounds here so the solver downstream works in one unit.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{BodyWeightLog, DailyCalorieLog};

/// Minimum logs of each kind for a week to qualify
pub const MIN_LOGS_PER_WEEK: usize = 3;

/// ---------------------------------------------------------------------------
/// Weekly Average
/// ---------------------------------------------------------------------------

/// One qualifying calendar week, averaged
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyAverage {
  pub week_start: NaiveDate,
  pub avg_weight_lb: f64,
  pub avg_net_calories: f64,
  pub weight_logs: usize,
  pub calorie_logs: usize,
}

impl WeeklyAverage {
  pub fn week_end(&self) -> NaiveDate {
    self.week_start + Duration::days(6)
  }
}

/// Per-week entry embedded in the persisted result. `implied_tdee` is filled
/// by the solver for the later week of each consecutive pair; the earliest
/// week carries None.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyHistoryEntry {
  pub week_start: NaiveDate,
  pub week_end: NaiveDate,
  pub avg_weight_lb: f64,
  pub avg_net_calories: f64,
  pub implied_tdee: Option<f64>,
  pub weight_logs: i64,
  pub calorie_logs: i64,
}

/// ---------------------------------------------------------------------------
/// Aggregation
/// ---------------------------------------------------------------------------

/// Sunday of the calendar week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

#[derive(Default)]
struct WeekBucket {
  weights_lb: Vec<f64>,
  net_calories: Vec<f64>,
}

/// Bucket logs into calendar weeks and average the qualifying ones.
///
/// Returned weeks are in ascending chronological order. Non-qualifying weeks
/// are dropped entirely; their logs still count toward the quality gate's
/// paired-day tally, which runs on the raw history.
pub fn aggregate_weeks(
  weights: &[BodyWeightLog],
  calories: &[DailyCalorieLog],
) -> Vec<WeeklyAverage> {
  let mut buckets: BTreeMap<NaiveDate, WeekBucket> = BTreeMap::new();

  for log in weights {
    buckets
      .entry(week_start(log.date))
      .or_default()
      .weights_lb
      .push(log.weight_lb());
  }

  for log in calories {
    buckets
      .entry(week_start(log.date))
      .or_default()
      .net_calories
      .push(log.net_calories);
  }

  buckets
    .into_iter()
    .filter(|(_, b)| {
      b.weights_lb.len() >= MIN_LOGS_PER_WEEK && b.net_calories.len() >= MIN_LOGS_PER_WEEK
    })
    .map(|(start, b)| WeeklyAverage {
      week_start: start,
      avg_weight_lb: average(&b.weights_lb),
      avg_net_calories: average(&b.net_calories),
      weight_logs: b.weights_lb.len(),
      calorie_logs: b.net_calories.len(),
    })
    .collect()
}

fn average(values: &[f64]) -> f64 {
  values.iter().sum::<f64>() / values.len() as f64
}
