//! Adaptive TDEE estimation engine
//!
//! Combines the Mifflin-St Jeor population formula with empirical
//! observation of weight change versus calorie intake to estimate a user's
//! true daily energy expenditure, then turns that estimate into a daily
//! calorie recommendation with a calibrated confidence rating.
//!
//! The entry point is [`TdeeEngine::recalculate_if_needed`], which serves a
//! cached [`TdeeResult`] when the last run is under a day old and otherwise
//! re-runs the full pipeline over fresh history. All I/O goes through the
//! provider/store traits in [`engine`]; [`storage`] ships a SQLite
//! implementation of all three.

pub mod confidence;
pub mod engine;
pub mod error;
pub mod formula;
pub mod insights;
pub mod models;
pub mod quality;
pub mod recommendation;
pub mod solver;
pub mod storage;
pub mod units;
pub mod weekly;

#[cfg(test)]
mod test_utils;

pub use engine::{
  CalorieHistoryProvider, TdeeEngine, TdeeResultStore, WeightHistoryProvider, LOOKBACK_DAYS,
};
pub use error::EngineError;
pub use models::{
  ActivityLevel, BodyWeightLog, ConfidenceLevel, DailyCalorieLog, Goal, LogSource,
  MetabolismTrend, Sex, TdeeResult, UserProfile, WeightUnit,
};
pub use storage::SqliteStorage;
