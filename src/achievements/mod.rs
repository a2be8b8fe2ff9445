//! Achievement tracking: monotonic unlocks plus threshold progress.

mod data;
mod types;

pub use data::{achievement_def, ALL_ACHIEVEMENTS};
pub use types::{AchievementDef, AchievementId, AchievementProgress, Achievements};
