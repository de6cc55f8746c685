use thiserror::Error;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
  /// Profile failed validation before the formula estimator ran
  #[error("Invalid profile: {0}")]
  InvalidProfile(String),

  /// History or result storage could not be read/written during a required
  /// recalculation. The engine never computes on partial data; the caller
  /// decides whether to retry or fall back to a previously cached result.
  #[error("Storage error: {0}")]
  Storage(String),
}

impl From<sqlx::Error> for EngineError {
  fn from(e: sqlx::Error) -> Self {
    EngineError::Storage(e.to_string())
  }
}
