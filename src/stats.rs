//! Stat aggregation: level from experience, passive level bonuses, active
//! doctrine and unlocked module contributions, and the economy-side
//! yield/cost-reduction aggregate from resource upgrades.

use crate::constants::*;
use crate::state::GameState;
use serde::{Deserialize, Serialize};

/// Per-level stat magnitudes carried by modules and doctrines.
/// Zero fields contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatEffects {
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub defense: f64,
    #[serde(default)]
    pub plasma_rate: f64,
    #[serde(default)]
    pub masking: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub integrity: f64,
}

/// Per-level economy magnitudes carried by resource upgrades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EconomyEffects {
    #[serde(default)]
    pub plasma_yield: f64,
    #[serde(default)]
    pub clot_yield: f64,
    #[serde(default)]
    pub essence_yield: f64,
    #[serde(default)]
    pub clot_cost_reduction: f64,
    #[serde(default)]
    pub plasma_cost_reduction: f64,
    #[serde(default)]
    pub essence_cost_reduction: f64,
    #[serde(default)]
    pub threat_shift: f64,
    #[serde(default)]
    pub experience_bonus: f64,
}

/// Current level and progress toward the next one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub level: u32,
    pub current_threshold: f64,
    pub next_threshold: f64,
    /// 0.0..=1.0; 1.0 when already at the last threshold.
    pub progress: f64,
}

/// Level is the largest index i with experience >= thresholds[i-1].
pub fn level_info(experience: f64) -> LevelInfo {
    let mut level = 1usize;
    for (index, threshold) in LEVEL_THRESHOLDS.iter().enumerate() {
        if experience >= *threshold {
            level = index + 1;
        }
    }
    let current_threshold = LEVEL_THRESHOLDS[level - 1];
    let next_threshold = if level < LEVEL_THRESHOLDS.len() {
        LEVEL_THRESHOLDS[level]
    } else {
        current_threshold
    };
    let progress = if next_threshold == current_threshold {
        1.0
    } else {
        (experience - current_threshold) / (next_threshold - current_threshold)
    };
    LevelInfo {
        level: level as u32,
        current_threshold,
        next_threshold,
        progress,
    }
}

/// Aggregated stat totals feeding the derived combat/economy numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatBlock {
    pub attack: f64,
    pub defense: f64,
    pub plasma_rate: f64,
    pub masking: f64,
    pub energy: f64,
    pub integrity: f64,
}

/// Passive bonuses granted by the citadel level itself.
fn level_effects(level: u32) -> StatBlock {
    let stage = (level - 1) as f64;
    StatBlock {
        attack: (stage * 0.8).floor(),
        defense: (stage * 0.4).floor(),
        plasma_rate: stage * 0.25,
        masking: stage * 0.6,
        energy: (stage / 3.0).floor(),
        integrity: stage * 1.5,
    }
}

fn add_scaled(total: &mut StatBlock, effects: &StatEffects, level: u32) {
    let scale = level as f64;
    total.attack += effects.attack * scale;
    total.defense += effects.defense * scale;
    total.plasma_rate += effects.plasma_rate * scale;
    total.masking += effects.masking * scale;
    total.energy += effects.energy * scale;
    total.integrity += effects.integrity * scale;
}

/// Recomputes stat totals from level, the active doctrine, and every
/// unlocked module. Unlocked-but-inactive doctrines contribute nothing.
pub fn aggregate_stats(state: &GameState) -> StatBlock {
    let info = level_info(state.resources.experience);
    let mut total = level_effects(info.level);

    if let Some(doctrine) = state.active_doctrine() {
        add_scaled(&mut total, &doctrine.effects, doctrine.level);
    }

    for module in state.modules.iter().filter(|m| m.unlocked) {
        add_scaled(&mut total, &module.effects, module.level);
    }

    total
}

/// Derived combat/economy numbers recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub max_energy: f64,
    pub plasma_rate: f64,
    pub attack_power: f64,
    pub defense_power: f64,
    pub max_integrity: f64,
}

pub fn derived_stats(state: &GameState) -> DerivedStats {
    let stats = aggregate_stats(state);
    DerivedStats {
        max_energy: BASE_MAX_ENERGY + stats.energy,
        plasma_rate: BASE_PLASMA_RATE + stats.plasma_rate,
        attack_power: BASE_ATTACK_POWER + stats.attack,
        defense_power: stats.defense,
        max_integrity: BASE_MAX_INTEGRITY + stats.integrity,
    }
}

/// Economy-side aggregate from unlocked resource upgrades, scaled by level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomyBonuses {
    pub plasma_yield: f64,
    pub clot_yield: f64,
    pub essence_yield: f64,
    pub clot_cost_reduction: f64,
    pub plasma_cost_reduction: f64,
    pub essence_cost_reduction: f64,
    pub threat_shift: f64,
    pub experience_bonus: f64,
}

impl Default for EconomyBonuses {
    fn default() -> Self {
        Self {
            plasma_yield: 1.0,
            clot_yield: 1.0,
            essence_yield: 1.0,
            clot_cost_reduction: 0.0,
            plasma_cost_reduction: 0.0,
            essence_cost_reduction: 0.0,
            threat_shift: 0.0,
            experience_bonus: 0.0,
        }
    }
}

pub fn economy_bonuses(state: &GameState) -> EconomyBonuses {
    let mut bonuses = EconomyBonuses::default();
    for upgrade in state.resource_upgrades.iter().filter(|u| u.unlocked) {
        let scale = upgrade.level as f64;
        let effects = &upgrade.effects;
        bonuses.plasma_yield += effects.plasma_yield * scale;
        bonuses.clot_yield += effects.clot_yield * scale;
        bonuses.essence_yield += effects.essence_yield * scale;
        bonuses.clot_cost_reduction += effects.clot_cost_reduction * scale;
        bonuses.plasma_cost_reduction += effects.plasma_cost_reduction * scale;
        bonuses.essence_cost_reduction += effects.essence_cost_reduction * scale;
        bonuses.threat_shift += effects.threat_shift * scale;
        bonuses.experience_bonus += effects.experience_bonus * scale;
    }
    bonuses.clot_cost_reduction = bonuses.clot_cost_reduction.min(MAX_COST_REDUCTION);
    bonuses.plasma_cost_reduction = bonuses.plasma_cost_reduction.min(MAX_COST_REDUCTION);
    bonuses.essence_cost_reduction = bonuses.essence_cost_reduction.min(MAX_COST_REDUCTION);
    bonuses
}

/// Adds experience and handles level-up side effects: a log line, a small
/// integrity restore, and the achievement hook.
pub fn gain_experience(state: &mut GameState, amount: f64, reason: Option<&str>) {
    if amount <= 0.0 {
        return;
    }
    let before = level_info(state.resources.experience).level;
    state.resources.experience += amount;
    if let Some(reason) = reason {
        state.log.push(format!("{} +{} experience.", reason, amount));
    }
    let after = level_info(state.resources.experience).level;
    if after > before {
        let max_integrity = derived_stats(state).max_integrity;
        state.resources.integrity =
            (state.resources.integrity + LEVEL_UP_INTEGRITY_BONUS).min(max_integrity);
        state.log.push(format!("The citadel reached level {}.", after));
        state.achievements.on_level_up(after);
    }
}
