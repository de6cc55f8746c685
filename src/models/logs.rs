use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::units;

/// ---------------------------------------------------------------------------
/// Weight Unit
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
  Pound,
  Kilogram,
}

impl std::fmt::Display for WeightUnit {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Pound => write!(f, "pound"),
      Self::Kilogram => write!(f, "kilogram"),
    }
  }
}

impl std::str::FromStr for WeightUnit {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pound" => Ok(Self::Pound),
      "kilogram" => Ok(Self::Kilogram),
      _ => Err(format!("Unknown weight unit: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Log Source
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSource {
  /// Entered by hand in the app
  Manual,
  /// Pushed by a connected scale or wearable
  DeviceSync,
}

impl std::fmt::Display for LogSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Manual => write!(f, "manual"),
      Self::DeviceSync => write!(f, "device_sync"),
    }
  }
}

impl std::str::FromStr for LogSource {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "manual" => Ok(Self::Manual),
      "device_sync" => Ok(Self::DeviceSync),
      _ => Err(format!("Unknown log source: {}", s)),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Body Weight Log
/// ---------------------------------------------------------------------------

/// A single weigh-in. Immutable once recorded: corrections are new entries,
/// not edits, and nothing auto-deletes these rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyWeightLog {
  pub date: NaiveDate,
  pub weight: f64,
  pub unit: WeightUnit,
  pub source: LogSource,
  pub recorded_at: DateTime<Utc>,
}

impl BodyWeightLog {
  /// Weight normalized to pounds
  pub fn weight_lb(&self) -> f64 {
    match self.unit {
      WeightUnit::Pound => self.weight,
      WeightUnit::Kilogram => units::kg_to_lb(self.weight),
    }
  }

  /// Weight normalized to kilograms
  pub fn weight_kg(&self) -> f64 {
    match self.unit {
      WeightUnit::Pound => units::lb_to_kg(self.weight),
      WeightUnit::Kilogram => self.weight,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Daily Calorie Log
/// ---------------------------------------------------------------------------

/// One day's intake summary, written by the meal-logging subsystem at day
/// rollover. May be amended while the day is still open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyCalorieLog {
  pub date: NaiveDate,
  pub calories_consumed: f64,
  /// Activity estimate for the day
  pub calories_burned: f64,
  /// consumed minus burned
  pub net_calories: f64,
  pub meals_logged: i64,
  pub is_complete: bool,
}
