//! Engine entry point: scheduling, caching, and pipeline assembly
//!
//! `recalculate_if_needed` is the only call surrounding features make. It
//! serves a cached result when the last run is under a day old, otherwise
//! fetches fresh history, runs the full pipeline, and replaces the stored
//! result. All I/O goes through the collaborator traits below; the
//! computation itself is pure and synchronous.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::confidence::ConfidenceRating;
use crate::error::EngineError;
use crate::formula::FormulaEstimate;
use crate::insights;
use crate::models::{BodyWeightLog, DailyCalorieLog, TdeeResult, UserProfile};
use crate::quality::DataQualityMetrics;
use crate::recommendation::{classify_trend, Recommendation};
use crate::solver::{self, WeekPairEstimate};
use crate::weekly::{self, WeeklyAverage, WeeklyHistoryEntry};

/// History window fetched for a recalculation (six calendar weeks)
pub const LOOKBACK_DAYS: i64 = 42;

/// User-facing pacing between suggested recalculations
pub const RECALC_INTERVAL_DAYS: i64 = 7;

/// ---------------------------------------------------------------------------
/// Collaborator Traits
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait WeightHistoryProvider: Send + Sync {
  async fn weight_history(&self, lookback_days: i64) -> Result<Vec<BodyWeightLog>, EngineError>;
}

#[async_trait]
pub trait CalorieHistoryProvider: Send + Sync {
  async fn calorie_history(&self, lookback_days: i64)
    -> Result<Vec<DailyCalorieLog>, EngineError>;
}

/// Persistence of the single current result, keyed implicitly to the user
#[async_trait]
pub trait TdeeResultStore: Send + Sync {
  async fn get(&self) -> Result<Option<TdeeResult>, EngineError>;
  async fn save(&self, result: &TdeeResult) -> Result<(), EngineError>;
}

/// ---------------------------------------------------------------------------
/// Engine
/// ---------------------------------------------------------------------------

pub struct TdeeEngine {
  weights: Arc<dyn WeightHistoryProvider>,
  calories: Arc<dyn CalorieHistoryProvider>,
  store: Arc<dyn TdeeResultStore>,
}

impl TdeeEngine {
  pub fn new(
    weights: Arc<dyn WeightHistoryProvider>,
    calories: Arc<dyn CalorieHistoryProvider>,
    store: Arc<dyn TdeeResultStore>,
  ) -> Self {
    Self {
      weights,
      calories,
      store,
    }
  }

  /// Serve the cached result if it is under a day old, otherwise run a full
  /// recalculation. The cheap path performs no history fetches at all.
  pub async fn recalculate_if_needed(
    &self,
    profile: &UserProfile,
  ) -> Result<TdeeResult, EngineError> {
    if let Some(cached) = self.store.get().await? {
      if cached.is_fresh(Utc::now()) {
        debug!(last_calculated = %cached.last_calculated, "serving cached TDEE result");
        return Ok(cached);
      }
    }
    self.recalculate(profile).await
  }

  /// Fetch fresh history, run the pipeline, and persist the new result,
  /// replacing the previous one. A fetch failure fails the whole invocation;
  /// the engine never computes on partial data.
  pub async fn recalculate(&self, profile: &UserProfile) -> Result<TdeeResult, EngineError> {
    // The two reads are independent; no ordering constraint between them
    let (weights, calories) = tokio::try_join!(
      self.weights.weight_history(LOOKBACK_DAYS),
      self.calories.calorie_history(LOOKBACK_DAYS),
    )?;

    let result = compute_result(profile, &weights, &calories, Utc::now())?;
    self.store.save(&result).await?;

    info!(
      adaptive_tdee = result.adaptive_tdee,
      confidence = %result.confidence,
      data_points = result.data_points,
      "TDEE result recalculated"
    );
    Ok(result)
  }
}

/// ---------------------------------------------------------------------------
/// Pipeline
/// ---------------------------------------------------------------------------

/// Run the full estimation pipeline over fetched history. Pure; `now` is
/// injected so the result's timestamps and tests are deterministic.
pub fn compute_result(
  profile: &UserProfile,
  weights: &[BodyWeightLog],
  calories: &[DailyCalorieLog],
  now: DateTime<Utc>,
) -> Result<TdeeResult, EngineError> {
  let latest_weight_kg = weights
    .iter()
    .max_by_key(|w| (w.date, w.recorded_at))
    .map(|w| w.weight_kg());

  let formula = FormulaEstimate::compute(profile, latest_weight_kg)?;
  let quality = DataQualityMetrics::assess(weights, calories);

  if !quality.is_ready {
    debug!(
      days_with_both_logs = quality.days_with_both_logs,
      days_until_ready = quality.days_until_ready,
      "quality gate not ready, using formula estimate"
    );
    return Ok(formula_only_result(&formula, &quality, profile, now));
  }

  let weeks = weekly::aggregate_weeks(weights, calories);
  let balance = solver::solve(&weeks);

  let (adaptive_tdee, pairs): (f64, &[WeekPairEstimate]) = match &balance {
    Some(b) => (b.adaptive_tdee, b.pairs.as_slice()),
    // Gate is ready but fewer than two weeks qualified: fall back
    None => (formula.tdee, &[]),
  };

  let confidence = ConfidenceRating::compute(pairs, quality.is_ready);
  let adjustment = adaptive_tdee - formula.tdee;
  let difference = adjustment.abs();
  let difference_percent = difference / formula.tdee * 100.0;
  let trend = classify_trend(adaptive_tdee, formula.tdee);
  let recommendation = Recommendation::compute(adaptive_tdee, profile.goal);

  Ok(TdeeResult {
    formula_tdee: formula.tdee,
    adaptive_tdee,
    confidence: confidence.level,
    confidence_score: confidence.score,
    difference,
    difference_percent,
    data_points: pairs.len() as i64,
    recommended_calories: recommendation.calories,
    adjustment_from_formula: adjustment,
    metabolism_trend: trend,
    insights: insights::adaptive(
      trend,
      difference_percent,
      &confidence,
      &recommendation,
      profile.goal,
      pairs.len(),
    ),
    weekly_history: build_history(&weeks, pairs),
    last_calculated: now,
    next_recalculation: now + Duration::days(RECALC_INTERVAL_DAYS),
  })
}

/// The not-ready branch: adaptive is the formula value by definition, and
/// the zeroed fields are forced rather than computed.
fn formula_only_result(
  formula: &FormulaEstimate,
  quality: &DataQualityMetrics,
  profile: &UserProfile,
  now: DateTime<Utc>,
) -> TdeeResult {
  let confidence = ConfidenceRating::floor();
  let recommendation = Recommendation::compute(formula.tdee, profile.goal);

  TdeeResult {
    formula_tdee: formula.tdee,
    adaptive_tdee: formula.tdee,
    confidence: confidence.level,
    confidence_score: confidence.score,
    difference: 0.0,
    difference_percent: 0.0,
    data_points: 0,
    recommended_calories: recommendation.calories,
    adjustment_from_formula: 0.0,
    metabolism_trend: crate::models::MetabolismTrend::Normal,
    insights: insights::not_ready(quality),
    weekly_history: Vec::new(),
    last_calculated: now,
    next_recalculation: now + Duration::days(RECALC_INTERVAL_DAYS),
  }
}

fn build_history(weeks: &[WeeklyAverage], pairs: &[WeekPairEstimate]) -> Vec<WeeklyHistoryEntry> {
  weeks
    .iter()
    .map(|w| WeeklyHistoryEntry {
      week_start: w.week_start,
      week_end: w.week_end(),
      avg_weight_lb: w.avg_weight_lb,
      avg_net_calories: w.avg_net_calories,
      implied_tdee: pairs
        .iter()
        .find(|p| p.week_start == w.week_start)
        .map(|p| p.implied_tdee),
      weight_logs: w.weight_logs as i64,
      calorie_logs: w.calorie_logs as i64,
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
