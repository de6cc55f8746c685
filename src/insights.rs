//! Human-readable insight strings embedded in the result

use crate::confidence::ConfidenceRating;
use crate::models::{ConfidenceLevel, Goal, MetabolismTrend};
use crate::quality::DataQualityMetrics;
use crate::recommendation::Recommendation;

/// Insights for the not-ready branch: the user needs more paired logging
/// before the adaptive estimate unlocks.
pub fn not_ready(quality: &DataQualityMetrics) -> Vec<String> {
  let day_word = if quality.days_until_ready == 1 { "day" } else { "days" };
  vec![
    format!(
      "Log your weight and meals on {} more {} to unlock a personalized burn-rate estimate.",
      quality.days_until_ready, day_word
    ),
    "Your current estimate uses a standard formula based on your profile.".to_string(),
  ]
}

/// Insights for a completed adaptive run
pub fn adaptive(
  trend: MetabolismTrend,
  difference_percent: f64,
  confidence: &ConfidenceRating,
  recommendation: &Recommendation,
  goal: Goal,
  pair_count: usize,
) -> Vec<String> {
  let mut insights = Vec::new();

  match trend {
    MetabolismTrend::Slower => insights.push(format!(
      "Your measured daily burn is about {:.0}% below the formula estimate, so your metabolism appears slower than predicted.",
      difference_percent
    )),
    MetabolismTrend::Faster => insights.push(format!(
      "Your measured daily burn is about {:.0}% above the formula estimate, so your metabolism appears faster than predicted.",
      difference_percent
    )),
    MetabolismTrend::Normal => insights.push(
      "Your measured daily burn closely matches the formula estimate.".to_string(),
    ),
  }

  let week_word = if pair_count == 1 { "week-over-week comparison" } else { "week-over-week comparisons" };
  match confidence.level {
    ConfidenceLevel::High => insights.push(format!(
      "High confidence: {} {} agree closely.",
      pair_count, week_word
    )),
    ConfidenceLevel::Medium => insights.push(format!(
      "Medium confidence from {} {}; a few more consistent weeks will sharpen this.",
      pair_count, week_word
    )),
    ConfidenceLevel::Low => insights.push(
      "Low confidence so far; keep logging steadily to improve accuracy.".to_string(),
    ),
  }

  match goal {
    Goal::Maintain => insights.push(format!(
      "Eat about {:.0} calories a day to hold your current weight.",
      recommendation.calories
    )),
    Goal::Lose { .. } => insights.push(format!(
      "Eat about {:.0} calories a day to stay on pace for your weekly loss target.",
      recommendation.calories
    )),
    Goal::Gain { .. } => insights.push(format!(
      "Eat about {:.0} calories a day to stay on pace for your weekly gain target.",
      recommendation.calories
    )),
  }

  if recommendation.floor_applied {
    insights.push(
      "Your target was raised to the 1,200 calorie daily minimum for safety.".to_string(),
    );
  }

  insights
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_not_ready_names_days_remaining() {
    let quality = DataQualityMetrics {
      is_ready: false,
      days_with_both_logs: 9,
      total_weight_logs: 12,
      total_calorie_logs: 15,
      days_until_ready: 5,
    };
    let insights = not_ready(&quality);
    assert!(insights[0].contains("5 more days"));
  }

  #[test]
  fn test_floor_insight_present_when_clamped() {
    let rec = Recommendation {
      calories: 1200.0,
      floor_applied: true,
    };
    let rating = ConfidenceRating {
      level: ConfidenceLevel::Medium,
      score: 60.0,
    };
    let insights = adaptive(
      MetabolismTrend::Normal,
      1.0,
      &rating,
      &rec,
      Goal::Lose { weekly_change_lb: -3.0 },
      3,
    );
    assert!(insights.iter().any(|s| s.contains("1,200 calorie daily minimum")));
  }
}
