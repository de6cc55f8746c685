//! Pound/kilogram conversion and energy-density constants.
//!
//! All empirical math in the engine runs in pounds because the 3500 kcal
//! rule is defined per pound of body-fat change. Weight logs arrive in
//! either unit and are normalized at the aggregation boundary.

/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462262;

/// Approximate energy content of one pound of body fat (kcal)
pub const KCAL_PER_LB: f64 = 3500.0;

pub fn kg_to_lb(kg: f64) -> f64 {
  kg * LB_PER_KG
}

pub fn lb_to_kg(lb: f64) -> f64 {
  lb / LB_PER_KG
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_round_trip() {
    let kg = 80.0;
    assert!((lb_to_kg(kg_to_lb(kg)) - kg).abs() < 1e-9);
  }

  #[test]
  fn test_known_conversion() {
    // 100 kg ≈ 220.46 lb
    assert!((kg_to_lb(100.0) - 220.462262).abs() < 1e-6);
  }
}
