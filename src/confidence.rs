//! Confidence scoring
//!
//! Rates how much the adaptive estimate should be trusted over the formula
//! baseline. Self-report noise dominates the error budget, so the score
//! rewards two things: volume of usable week pairs, and how tightly the
//! per-pair implied TDEEs agree with each other.

use serde::{Deserialize, Serialize};

use crate::models::ConfidenceLevel;
use crate::solver::WeekPairEstimate;

/// Pair count at which the volume component saturates
const VOLUME_SATURATION_PAIRS: usize = 6;

/// Per-pair spread (kcal stddev) treated as full agreement
const AGREEMENT_FULL_KCAL: f64 = 100.0;

/// Per-pair spread at which the agreement component reaches zero
const AGREEMENT_ZERO_KCAL: f64 = 500.0;

const LEVEL_MEDIUM_CUTOFF: f64 = 40.0;
const LEVEL_HIGH_CUTOFF: f64 = 75.0;

/// ---------------------------------------------------------------------------
/// Confidence Rating
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceRating {
  pub level: ConfidenceLevel,
  /// 0-100
  pub score: f64,
}

impl ConfidenceRating {
  /// Lowest rating, forced whenever the quality gate reports not-ready
  pub fn floor() -> Self {
    Self {
      level: ConfidenceLevel::Low,
      score: 0.0,
    }
  }

  /// Score the adaptive estimate from its week-pair evidence.
  ///
  /// `gate_ready` is the quality gate's verdict; this scorer never
  /// overrides it, no matter how clean sparse data looks.
  pub fn compute(pairs: &[WeekPairEstimate], gate_ready: bool) -> Self {
    if !gate_ready || pairs.is_empty() {
      return Self::floor();
    }

    let volume = 50.0 * (pairs.len().min(VOLUME_SATURATION_PAIRS) as f64)
      / VOLUME_SATURATION_PAIRS as f64;

    // A single pair has no spread to measure, so it earns no agreement credit
    let agreement = if pairs.len() < 2 {
      0.0
    } else {
      let spread = stddev(pairs);
      let fraction =
        ((AGREEMENT_ZERO_KCAL - spread) / (AGREEMENT_ZERO_KCAL - AGREEMENT_FULL_KCAL)).clamp(0.0, 1.0);
      50.0 * fraction
    };

    let score = (volume + agreement).clamp(0.0, 100.0);

    Self {
      level: level_for(score),
      score,
    }
  }
}

fn level_for(score: f64) -> ConfidenceLevel {
  if score < LEVEL_MEDIUM_CUTOFF {
    ConfidenceLevel::Low
  } else if score <= LEVEL_HIGH_CUTOFF {
    ConfidenceLevel::Medium
  } else {
    ConfidenceLevel::High
  }
}

/// Population standard deviation of the per-pair implied TDEEs
fn stddev(pairs: &[WeekPairEstimate]) -> f64 {
  let n = pairs.len() as f64;
  let mean = pairs.iter().map(|p| p.implied_tdee).sum::<f64>() / n;
  let variance = pairs
    .iter()
    .map(|p| (p.implied_tdee - mean).powi(2))
    .sum::<f64>()
    / n;
  variance.sqrt()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::date;

  fn pairs_with(implied: &[f64]) -> Vec<WeekPairEstimate> {
    implied
      .iter()
      .enumerate()
      .map(|(i, &tdee)| WeekPairEstimate {
        week_start: date(2025, 3, 2) + chrono::Duration::weeks(i as i64),
        weight_delta_lb: 0.0,
        implied_tdee: tdee,
      })
      .collect()
  }

  #[test]
  fn test_gate_not_ready_forces_floor() {
    // Six perfectly agreeing pairs still score zero when the gate says no
    let pairs = pairs_with(&[2500.0; 6]);
    let rating = ConfidenceRating::compute(&pairs, false);
    assert_eq!(rating.level, ConfidenceLevel::Low);
    assert_eq!(rating.score, 0.0);
  }

  #[test]
  fn test_no_pairs_scores_zero() {
    let rating = ConfidenceRating::compute(&[], true);
    assert_eq!(rating.level, ConfidenceLevel::Low);
    assert_eq!(rating.score, 0.0);
  }

  #[test]
  fn test_tight_agreement_with_full_volume_is_high() {
    let pairs = pairs_with(&[2500.0, 2510.0, 2490.0, 2505.0, 2495.0, 2500.0]);
    let rating = ConfidenceRating::compute(&pairs, true);
    assert_eq!(rating.level, ConfidenceLevel::High);
    assert!(rating.score > 90.0);
  }

  #[test]
  fn test_more_pairs_score_higher() {
    let few = ConfidenceRating::compute(&pairs_with(&[2500.0, 2500.0]), true);
    let many = ConfidenceRating::compute(&pairs_with(&[2500.0; 5]), true);
    assert!(many.score > few.score);
  }

  #[test]
  fn test_wide_disagreement_drags_score_down() {
    // Spread of ~700 kcal across pairs: agreement component bottoms out
    let noisy = ConfidenceRating::compute(&pairs_with(&[1800.0, 3200.0, 1900.0, 3100.0]), true);
    let clean = ConfidenceRating::compute(&pairs_with(&[2500.0, 2500.0, 2500.0, 2500.0]), true);
    assert!(noisy.score < clean.score);
    assert_eq!(noisy.level, ConfidenceLevel::Low);
  }

  #[test]
  fn test_single_pair_stays_low() {
    let rating = ConfidenceRating::compute(&pairs_with(&[2500.0]), true);
    assert_eq!(rating.level, ConfidenceLevel::Low);
    assert!(rating.score < LEVEL_MEDIUM_CUTOFF);
  }
}
