//! Calorie recommendation
//!
//! Converts the chosen TDEE plus the user's goal into a daily calorie
//! target. The safety floor wins over any goal aggressiveness.

use serde::{Deserialize, Serialize};

use crate::models::{Goal, MetabolismTrend};
use crate::units::KCAL_PER_LB;

/// No recommendation ever drops below this daily floor
pub const MIN_DAILY_CALORIES: f64 = 1200.0;

/// Adaptive-vs-formula gap (percent) beyond which the trend leaves "normal"
const TREND_BAND_PERCENT: f64 = 5.0;

/// ---------------------------------------------------------------------------
/// Recommendation
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
  pub calories: f64,
  /// True when the goal asked for less than the safety floor allows
  pub floor_applied: bool,
}

impl Recommendation {
  /// Daily target for the chosen TDEE and goal.
  ///
  /// Maintain returns the TDEE exactly; any stale weekly-change value a
  /// caller might hold elsewhere cannot reach this arithmetic because the
  /// Goal variants carry their own targets.
  pub fn compute(tdee: f64, goal: Goal) -> Self {
    let target = match goal {
      Goal::Maintain => tdee,
      Goal::Lose { weekly_change_lb } | Goal::Gain { weekly_change_lb } => {
        tdee + (weekly_change_lb * KCAL_PER_LB) / 7.0
      }
    };

    if target < MIN_DAILY_CALORIES {
      Self {
        calories: MIN_DAILY_CALORIES,
        floor_applied: true,
      }
    } else {
      Self {
        calories: target,
        floor_applied: false,
      }
    }
  }
}

/// Classify how the adaptive estimate compares to the formula baseline
pub fn classify_trend(adaptive_tdee: f64, formula_tdee: f64) -> MetabolismTrend {
  let gap_percent = (adaptive_tdee - formula_tdee) / formula_tdee * 100.0;
  if gap_percent < -TREND_BAND_PERCENT {
    MetabolismTrend::Slower
  } else if gap_percent > TREND_BAND_PERCENT {
    MetabolismTrend::Faster
  } else {
    MetabolismTrend::Normal
  }
}
