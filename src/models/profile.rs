use serde::{Deserialize, Serialize};

/// ---------------------------------------------------------------------------
/// Biological Sex
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
  Male,
  Female,
}

/// ---------------------------------------------------------------------------
/// Activity Level
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
  Sedentary,
  Light,
  Moderate,
  Active,
  VeryActive,
}

impl ActivityLevel {
  /// Standard multiplier applied to basal metabolic rate
  pub fn multiplier(&self) -> f64 {
    match self {
      Self::Sedentary => 1.20,
      Self::Light => 1.375,
      Self::Moderate => 1.55,
      Self::Active => 1.725,
      Self::VeryActive => 1.90,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Goal
/// ---------------------------------------------------------------------------

/// The user's stated goal. Weekly change targets live on the variants that
/// use them, so Maintain cannot carry a stale nonzero target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Goal {
  /// Negative weekly change target (lb/week)
  Lose { weekly_change_lb: f64 },
  Maintain,
  /// Positive weekly change target (lb/week)
  Gain { weekly_change_lb: f64 },
}

/// ---------------------------------------------------------------------------
/// User Profile
/// ---------------------------------------------------------------------------

/// Read-only snapshot assembled by the caller per invocation. The engine
/// never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  pub age: i64,
  pub sex: Sex,
  pub height_cm: f64,
  pub activity_level: ActivityLevel,
  pub goal: Goal,
}
