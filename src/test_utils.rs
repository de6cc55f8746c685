//! Test fixtures and factories shared across the crate's test modules

use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;

use crate::models::{
  ActivityLevel, BodyWeightLog, ConfidenceLevel, DailyCalorieLog, Goal, LogSource,
  MetabolismTrend, Sex, TdeeResult, UserProfile, WeightUnit,
};
use crate::storage::SqliteStorage;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn weight_log(date: NaiveDate, weight_lb: f64) -> BodyWeightLog {
  BodyWeightLog {
    date,
    weight: weight_lb,
    unit: WeightUnit::Pound,
    source: LogSource::Manual,
    recorded_at: Utc::now(),
  }
}

pub fn calorie_log(date: NaiveDate, net_calories: f64) -> DailyCalorieLog {
  DailyCalorieLog {
    date,
    calories_consumed: net_calories + 300.0,
    calories_burned: 300.0,
    net_calories,
    meals_logged: 3,
    is_complete: true,
  }
}

/// The profile used throughout the scenario tests:
/// 30-year-old male, 178 cm, moderately active, losing 1 lb/week
pub fn test_profile() -> UserProfile {
  UserProfile {
    age: 30,
    sex: Sex::Male,
    height_cm: 178.0,
    activity_level: ActivityLevel::Moderate,
    goal: Goal::Lose { weekly_change_lb: -1.0 },
  }
}

/// `days` consecutive days ending at `end`, weight moving linearly from
/// `start_weight_lb` by `daily_delta_lb` per day, intake flat
pub fn daily_history(
  end: NaiveDate,
  days: i64,
  start_weight_lb: f64,
  daily_delta_lb: f64,
  net_calories: f64,
) -> (Vec<BodyWeightLog>, Vec<DailyCalorieLog>) {
  let mut weights = Vec::new();
  let mut calories = Vec::new();

  for i in 0..days {
    let d = end - Duration::days(days - 1 - i);
    weights.push(weight_log(d, start_weight_lb + daily_delta_lb * i as f64));
    calories.push(calorie_log(d, net_calories));
  }

  (weights, calories)
}

/// A plausible stored result with the given calculation timestamp
pub fn dummy_result(last_calculated: DateTime<Utc>) -> TdeeResult {
  TdeeResult {
    formula_tdee: 2739.6,
    adaptive_tdee: 2550.0,
    confidence: ConfidenceLevel::Medium,
    confidence_score: 62.0,
    difference: 189.6,
    difference_percent: 6.9,
    data_points: 3,
    recommended_calories: 2050.0,
    adjustment_from_formula: -189.6,
    metabolism_trend: MetabolismTrend::Slower,
    insights: Vec::new(),
    weekly_history: Vec::new(),
    last_calculated,
    next_recalculation: last_calculated + Duration::days(7),
  }
}

/// In-memory SQLite storage with migrations applied.
///
/// Uses max_connections(1) so multiple pool connections don't create
/// isolated in-memory databases.
pub async fn setup_test_storage() -> SqliteStorage {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  SqliteStorage::from_pool(pool)
}
