use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for each achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstHarvest,
    FirstModule,
    DoctrineAdopted,
    FirstVictory,
    BossSlain,
    /// Clear five sectors (progress-tracked).
    Purifier,
    /// Discover every sector (progress-tracked).
    Cartographer,
    LevelFive,
}

/// Static definition of an achievement.
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    /// Threshold target for progress-tracked achievements.
    pub target: Option<u64>,
}

/// Progress toward a threshold achievement; `current` is clamped to `target`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementProgress {
    pub current: u64,
    pub target: u64,
}

/// Achievement state. Unlocks are monotonic: once set, never removed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievements {
    /// Unlocked achievement -> unix timestamp of the unlock.
    unlocked: HashMap<AchievementId, i64>,
    progress: HashMap<AchievementId, AchievementProgress>,
}

impl Achievements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains_key(&id)
    }

    /// Unlocks an achievement. Returns true if newly unlocked.
    pub fn unlock(&mut self, id: AchievementId) -> bool {
        if self.is_unlocked(id) {
            return false;
        }
        self.unlocked.insert(id, chrono::Utc::now().timestamp());
        true
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    pub fn progress(&self, id: AchievementId) -> Option<AchievementProgress> {
        self.progress.get(&id).copied()
    }

    fn record_progress(&mut self, id: AchievementId, current: u64, target: u64) {
        self.progress.insert(
            id,
            AchievementProgress {
                current: current.min(target),
                target,
            },
        );
        if current >= target {
            self.unlock(id);
        }
    }

    // Event hooks, called from game logic.

    pub fn on_first_harvest(&mut self) {
        self.unlock(AchievementId::FirstHarvest);
    }

    pub fn on_module_unlocked(&mut self) {
        self.unlock(AchievementId::FirstModule);
    }

    pub fn on_doctrine_activated(&mut self) {
        self.unlock(AchievementId::DoctrineAdopted);
    }

    pub fn on_victory(&mut self, is_boss: bool) {
        self.unlock(AchievementId::FirstVictory);
        if is_boss {
            self.unlock(AchievementId::BossSlain);
        }
    }

    pub fn on_node_cleared(&mut self, total_cleared: usize) {
        self.record_progress(AchievementId::Purifier, total_cleared as u64, 5);
    }

    pub fn on_node_discovered(&mut self, discovered: usize, total: usize) {
        self.record_progress(AchievementId::Cartographer, discovered as u64, total as u64);
    }

    pub fn on_level_up(&mut self, new_level: u32) {
        if new_level >= 5 {
            self.unlock(AchievementId::LevelFive);
        }
    }
}
