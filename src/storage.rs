//! SQLite-backed storage
//!
//! One reference implementation of the history-provider and result-store
//! traits over a single connection pool. The weight and meal subsystems
//! write the log tables; this engine only reads them. The result table
//! holds exactly one row, replaced wholesale on every save.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::engine::{CalorieHistoryProvider, TdeeResultStore, WeightHistoryProvider};
use crate::error::EngineError;
use crate::models::{
  BodyWeightLog, ConfidenceLevel, DailyCalorieLog, LogSource, MetabolismTrend, TdeeResult,
  WeightUnit,
};

pub struct SqliteStorage {
  pool: SqlitePool,
}

impl SqliteStorage {
  /// Open (or create) the database at `db_url` and run migrations
  pub async fn connect(db_url: &str) -> Result<Self, EngineError> {
    let pool = SqlitePoolOptions::new()
      .max_connections(5)
      .connect(db_url)
      .await?;

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .map_err(|e| EngineError::Storage(e.to_string()))?;

    Ok(Self { pool })
  }

  /// Wrap an existing pool (migrations must already have run)
  pub fn from_pool(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }

  /// Append a weigh-in. Logs are append-only; a correction is a new row.
  pub async fn insert_weight_log(&self, log: &BodyWeightLog) -> Result<(), EngineError> {
    sqlx::query(
      r#"
      INSERT INTO body_weight_logs (date, weight, unit, source, recorded_at)
      VALUES (?1, ?2, ?3, ?4, ?5)
      "#,
    )
    .bind(log.date)
    .bind(log.weight)
    .bind(log.unit.to_string())
    .bind(log.source.to_string())
    .bind(log.recorded_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  /// Insert or amend one day's calorie summary. The meal-logging subsystem
  /// rewrites the row while the day is still open.
  pub async fn upsert_calorie_log(&self, log: &DailyCalorieLog) -> Result<(), EngineError> {
    sqlx::query(
      r#"
      INSERT INTO daily_calorie_logs
        (date, calories_consumed, calories_burned, net_calories, meals_logged, is_complete)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6)
      ON CONFLICT(date) DO UPDATE SET
        calories_consumed = excluded.calories_consumed,
        calories_burned = excluded.calories_burned,
        net_calories = excluded.net_calories,
        meals_logged = excluded.meals_logged,
        is_complete = excluded.is_complete
      "#,
    )
    .bind(log.date)
    .bind(log.calories_consumed)
    .bind(log.calories_burned)
    .bind(log.net_calories)
    .bind(log.meals_logged)
    .bind(log.is_complete)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Provider Implementations
/// ---------------------------------------------------------------------------

#[async_trait]
impl WeightHistoryProvider for SqliteStorage {
  async fn weight_history(&self, lookback_days: i64) -> Result<Vec<BodyWeightLog>, EngineError> {
    let cutoff = Utc::now().date_naive() - Duration::days(lookback_days);

    let rows: Vec<(NaiveDate, f64, String, String, DateTime<Utc>)> = sqlx::query_as(
      r#"
      SELECT date, weight, unit, source, recorded_at
      FROM body_weight_logs
      WHERE date >= ?1
      ORDER BY date, recorded_at
      "#,
    )
    .bind(cutoff)
    .fetch_all(&self.pool)
    .await?;

    rows
      .into_iter()
      .map(|(date, weight, unit, source, recorded_at)| {
        Ok(BodyWeightLog {
          date,
          weight,
          unit: WeightUnit::from_str(&unit).map_err(EngineError::Storage)?,
          source: LogSource::from_str(&source).map_err(EngineError::Storage)?,
          recorded_at,
        })
      })
      .collect()
  }
}

#[async_trait]
impl CalorieHistoryProvider for SqliteStorage {
  async fn calorie_history(
    &self,
    lookback_days: i64,
  ) -> Result<Vec<DailyCalorieLog>, EngineError> {
    let cutoff = Utc::now().date_naive() - Duration::days(lookback_days);

    let rows: Vec<(NaiveDate, f64, f64, f64, i64, bool)> = sqlx::query_as(
      r#"
      SELECT date, calories_consumed, calories_burned, net_calories, meals_logged, is_complete
      FROM daily_calorie_logs
      WHERE date >= ?1
      ORDER BY date
      "#,
    )
    .bind(cutoff)
    .fetch_all(&self.pool)
    .await?;

    Ok(
      rows
        .into_iter()
        .map(
          |(date, calories_consumed, calories_burned, net_calories, meals_logged, is_complete)| {
            DailyCalorieLog {
              date,
              calories_consumed,
              calories_burned,
              net_calories,
              meals_logged,
              is_complete,
            }
          },
        )
        .collect(),
    )
  }
}

#[async_trait]
impl TdeeResultStore for SqliteStorage {
  async fn get(&self) -> Result<Option<TdeeResult>, EngineError> {
    type ResultRow = (
      f64,             // formula_tdee
      f64,             // adaptive_tdee
      String,          // confidence
      f64,             // confidence_score
      f64,             // difference
      f64,             // difference_percent
      i64,             // data_points
      f64,             // recommended_calories
      f64,             // adjustment_from_formula
      String,          // metabolism_trend
      String,          // insights (JSON)
      String,          // weekly_history (JSON)
      DateTime<Utc>,   // last_calculated
      DateTime<Utc>,   // next_recalculation
    );

    let row: Option<ResultRow> = sqlx::query_as(
      r#"
      SELECT formula_tdee, adaptive_tdee, confidence, confidence_score,
             difference, difference_percent, data_points, recommended_calories,
             adjustment_from_formula, metabolism_trend, insights, weekly_history,
             last_calculated, next_recalculation
      FROM tdee_result
      WHERE id = 1
      "#,
    )
    .fetch_optional(&self.pool)
    .await?;

    let Some((
      formula_tdee,
      adaptive_tdee,
      confidence,
      confidence_score,
      difference,
      difference_percent,
      data_points,
      recommended_calories,
      adjustment_from_formula,
      metabolism_trend,
      insights,
      weekly_history,
      last_calculated,
      next_recalculation,
    )) = row
    else {
      return Ok(None);
    };

    Ok(Some(TdeeResult {
      formula_tdee,
      adaptive_tdee,
      confidence: ConfidenceLevel::from_str(&confidence).map_err(EngineError::Storage)?,
      confidence_score,
      difference,
      difference_percent,
      data_points,
      recommended_calories,
      adjustment_from_formula,
      metabolism_trend: MetabolismTrend::from_str(&metabolism_trend)
        .map_err(EngineError::Storage)?,
      insights: serde_json::from_str(&insights)
        .map_err(|e| EngineError::Storage(format!("Failed to parse insights: {}", e)))?,
      weekly_history: serde_json::from_str(&weekly_history)
        .map_err(|e| EngineError::Storage(format!("Failed to parse weekly history: {}", e)))?,
      last_calculated,
      next_recalculation,
    }))
  }

  async fn save(&self, result: &TdeeResult) -> Result<(), EngineError> {
    let insights = serde_json::to_string(&result.insights)
      .map_err(|e| EngineError::Storage(format!("Failed to encode insights: {}", e)))?;
    let weekly_history = serde_json::to_string(&result.weekly_history)
      .map_err(|e| EngineError::Storage(format!("Failed to encode weekly history: {}", e)))?;

    sqlx::query(
      r#"
      INSERT OR REPLACE INTO tdee_result
        (id, formula_tdee, adaptive_tdee, confidence, confidence_score,
         difference, difference_percent, data_points, recommended_calories,
         adjustment_from_formula, metabolism_trend, insights, weekly_history,
         last_calculated, next_recalculation)
      VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
      "#,
    )
    .bind(result.formula_tdee)
    .bind(result.adaptive_tdee)
    .bind(result.confidence.to_string())
    .bind(result.confidence_score)
    .bind(result.difference)
    .bind(result.difference_percent)
    .bind(result.data_points)
    .bind(result.recommended_calories)
    .bind(result.adjustment_from_formula)
    .bind(result.metabolism_trend.to_string())
    .bind(insights)
    .bind(weekly_history)
    .bind(result.last_calculated)
    .bind(result.next_recalculation)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
