pub mod logs;
pub mod profile;
pub mod result;

pub use logs::{BodyWeightLog, DailyCalorieLog, LogSource, WeightUnit};
pub use profile::{ActivityLevel, Goal, Sex, UserProfile};
pub use result::{ConfidenceLevel, MetabolismTrend, TdeeResult};
