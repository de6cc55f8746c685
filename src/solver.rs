//! Energy balance solver
//!
//! Backs an implied TDEE out of each pair of consecutive qualifying weeks:
//! observed weight change converts to a calorie imbalance at ~3500 kcal per
//! pound, and true expenditure is intake minus that imbalance spread over
//! the week. A gain means intake exceeded expenditure, so implied TDEE sits
//! below reported intake; a loss means the opposite.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::units::KCAL_PER_LB;
use crate::weekly::WeeklyAverage;

/// ---------------------------------------------------------------------------
/// Week-Pair Estimates
/// ---------------------------------------------------------------------------

/// Implied TDEE for one consecutive week pair, keyed by the later week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPairEstimate {
  /// Start of the later week of the pair
  pub week_start: NaiveDate,
  pub weight_delta_lb: f64,
  pub implied_tdee: f64,
}

/// Combined output across all qualifying week pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyBalance {
  /// Recency-weighted blend of the per-pair implied TDEEs
  pub adaptive_tdee: f64,
  pub pairs: Vec<WeekPairEstimate>,
}

/// ---------------------------------------------------------------------------
/// Solver
/// ---------------------------------------------------------------------------

/// Solve the energy-balance equation across consecutive qualifying weeks.
///
/// `weeks` must be in ascending chronological order (the aggregator's
/// output). Returns None with fewer than two weeks; the caller falls back
/// to the formula estimate.
pub fn solve(weeks: &[WeeklyAverage]) -> Option<EnergyBalance> {
  if weeks.len() < 2 {
    return None;
  }

  let pairs: Vec<WeekPairEstimate> = weeks
    .windows(2)
    .map(|pair| {
      let (earlier, later) = (&pair[0], &pair[1]);
      let weight_delta_lb = later.avg_weight_lb - earlier.avg_weight_lb;
      let implied_weekly_imbalance = weight_delta_lb * KCAL_PER_LB;
      // Intake over the span is approximated by the mean of the two
      // weekly averages.
      let avg_calories = (earlier.avg_net_calories + later.avg_net_calories) / 2.0;

      WeekPairEstimate {
        week_start: later.week_start,
        weight_delta_lb,
        implied_tdee: avg_calories - implied_weekly_imbalance / 7.0,
      }
    })
    .collect();

  Some(EnergyBalance {
    adaptive_tdee: blend(&pairs),
    pairs,
  })
}

/// Recency-weighted average: pair i of n gets weight i+1, so recent pairs
/// count at least as much as older ones.
fn blend(pairs: &[WeekPairEstimate]) -> f64 {
  let mut weighted_sum = 0.0;
  let mut weight_total = 0.0;

  for (i, pair) in pairs.iter().enumerate() {
    let w = (i + 1) as f64;
    weighted_sum += pair.implied_tdee * w;
    weight_total += w;
  }

  weighted_sum / weight_total
}
