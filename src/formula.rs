//! Formula-based TDEE estimation
//!
//! Mifflin-St Jeor basal rate times an activity multiplier. This is the
//! universal fallback for every other branch of the engine: it is always
//! positive and always computable, even with zero logged history.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Sex, UserProfile};

/// Body weight assumed when the user has no weight history at all (kg).
/// A deliberate fallback, not a failure.
pub const DEFAULT_BODY_WEIGHT_KG: f64 = 80.0;

const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// ---------------------------------------------------------------------------
/// Formula Estimate
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulaEstimate {
  /// Basal metabolic rate (kcal/day at rest)
  pub bmr: f64,
  /// BMR scaled by the activity multiplier
  pub tdee: f64,
  /// Weight the formula actually ran against
  pub weight_kg: f64,
  /// True when no weight history existed and the 80 kg default was used
  pub used_default_weight: bool,
}

impl FormulaEstimate {
  /// Compute the formula TDEE for a profile.
  ///
  /// `latest_weight_kg` is the most recent logged weight, if any; the
  /// default-weight substitution happens here, at the input boundary,
  /// rather than anywhere downstream.
  pub fn compute(
    profile: &UserProfile,
    latest_weight_kg: Option<f64>,
  ) -> Result<Self, EngineError> {
    validate_profile(profile)?;

    let (weight_kg, used_default) = match latest_weight_kg {
      Some(kg) => (kg, false),
      None => (DEFAULT_BODY_WEIGHT_KG, true),
    };

    let bmr = basal_metabolic_rate(weight_kg, profile.height_cm, profile.age, profile.sex);
    let tdee = bmr * profile.activity_level.multiplier();

    Ok(Self {
      bmr,
      tdee,
      weight_kg,
      used_default_weight: used_default,
    })
  }
}

/// Mifflin-St Jeor resting metabolism formula
fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: i64, sex: Sex) -> f64 {
  let sex_offset = match sex {
    Sex::Male => MALE_OFFSET,
    Sex::Female => FEMALE_OFFSET,
  };
  10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + sex_offset
}

/// Reject nonsensical profiles before any calorie math runs
pub fn validate_profile(profile: &UserProfile) -> Result<(), EngineError> {
  if profile.age <= 0 {
    return Err(EngineError::InvalidProfile(format!(
      "age must be positive, got {}",
      profile.age
    )));
  }
  if profile.height_cm <= 0.0 {
    return Err(EngineError::InvalidProfile(format!(
      "height must be positive, got {} cm",
      profile.height_cm
    )));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{ActivityLevel, Goal};

  fn profile(sex: Sex) -> UserProfile {
    UserProfile {
      age: 30,
      sex,
      height_cm: 178.0,
      activity_level: ActivityLevel::Moderate,
      goal: Goal::Lose { weekly_change_lb: -1.0 },
    }
  }

  #[test]
  fn test_known_male_estimate() {
    // 10*80 + 6.25*178 - 5*30 + 5 = 1767.5, x1.55 = 2739.625
    let est = FormulaEstimate::compute(&profile(Sex::Male), Some(80.0)).unwrap();
    assert!((est.bmr - 1767.5).abs() < 1e-9);
    assert!((est.tdee - 2739.625).abs() < 1e-9);
    assert!(!est.used_default_weight);
  }

  #[test]
  fn test_female_estimate_is_lower() {
    let male = FormulaEstimate::compute(&profile(Sex::Male), Some(80.0)).unwrap();
    let female = FormulaEstimate::compute(&profile(Sex::Female), Some(80.0)).unwrap();
    assert!(female.tdee < male.tdee);
    // Offset gap is 166 kcal at the BMR level
    assert!((male.bmr - female.bmr - 166.0).abs() < 1e-9);
  }

  #[test]
  fn test_default_weight_when_no_history() {
    let est = FormulaEstimate::compute(&profile(Sex::Male), None).unwrap();
    assert!(est.used_default_weight);
    assert!((est.weight_kg - DEFAULT_BODY_WEIGHT_KG).abs() < 1e-9);
    assert!(est.tdee > 0.0);
  }

  #[test]
  fn test_invalid_profile_rejected() {
    let mut bad = profile(Sex::Male);
    bad.age = 0;
    assert!(matches!(
      FormulaEstimate::compute(&bad, Some(80.0)),
      Err(EngineError::InvalidProfile(_))
    ));

    let mut bad = profile(Sex::Male);
    bad.height_cm = -178.0;
    assert!(matches!(
      FormulaEstimate::compute(&bad, Some(80.0)),
      Err(EngineError::InvalidProfile(_))
    ));
  }
}
