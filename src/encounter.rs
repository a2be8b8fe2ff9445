//! Turn-based encounter state machine: one enemy per battle-like node,
//! telegraphed intents, and a small player action set.

use crate::constants::*;
use crate::map::{resolve_node_reward, unlock_next_node, NodeReward, NodeType};
use crate::resources::spend_energy;
use crate::state::GameState;
use crate::stats::{derived_stats, gain_experience, level_info};
use crate::tutorial::TutorialStage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The enemy's telegraphed next action. Each kind carries a fixed damage
/// multiplier, threat gain, and an optional pierce/drain modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Strike,
    Heavy,
    Pierce,
    Drain,
}

impl IntentKind {
    pub const ALL: [IntentKind; 4] = [
        IntentKind::Strike,
        IntentKind::Heavy,
        IntentKind::Pierce,
        IntentKind::Drain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IntentKind::Strike => "Pulsing Strike",
            IntentKind::Heavy => "Heavy Lunge",
            IntentKind::Pierce => "Piercing Impulse",
            IntentKind::Drain => "Draining Touch",
        }
    }

    pub fn multiplier(&self) -> f64 {
        match self {
            IntentKind::Strike => 1.0,
            IntentKind::Heavy => 1.4,
            IntentKind::Pierce => 1.2,
            IntentKind::Drain => 0.9,
        }
    }

    pub fn threat(&self) -> f64 {
        match self {
            IntentKind::Strike => 3.0,
            IntentKind::Heavy => 5.0,
            IntentKind::Pierce | IntentKind::Drain => 4.0,
        }
    }

    /// Pierce intents ignore most of the defender's defense.
    pub fn is_pierce(&self) -> bool {
        matches!(self, IntentKind::Pierce)
    }

    /// Energy drained from the defender, if any.
    pub fn drain(&self) -> Option<f64> {
        match self {
            IntentKind::Drain => Some(0.8),
            _ => None,
        }
    }
}

/// The live combat session. At most one exists; destroyed on victory,
/// retreat, or explicit close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub node_id: String,
    pub enemy_name: String,
    pub hp: f64,
    pub max_hp: f64,
    pub attack: f64,
    pub intent: IntentKind,
    /// Copy of the node's reward, granted on defeat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<NodeReward>,
}

/// Transient combat flags, each consumed by the next resolution step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatFlags {
    #[serde(default)]
    pub guarded: bool,
    #[serde(default)]
    pub focused: bool,
}

/// Rolls the enemy's next intent. Difficulty biases the roll upward so
/// harder nodes skew toward the more punishing kinds, saturating at drain.
pub fn roll_enemy_intent(difficulty: u32, rng: &mut impl Rng) -> IntentKind {
    let count = IntentKind::ALL.len();
    let bias = (difficulty / 2).min(count as u32 - 1) as f64;
    let roll = rng.gen::<f64>() * count as f64;
    let index = ((roll + bias * 0.3).floor() as usize).min(count - 1);
    IntentKind::ALL[index]
}

/// Explores the selected node. Battle-like nodes open an encounter; any
/// other kind is cleared directly and its reward granted.
pub fn explore_node(state: &mut GameState, rng: &mut impl Rng) {
    let Some(node) = state.selected_node().cloned() else {
        state.notices.warn("No sector selected.");
        return;
    };
    if node.cleared {
        state.notices.info("This sector is already stabilized.");
        return;
    }
    if !node.discovered {
        state.notices.warn("This sector has not been discovered yet.");
        return;
    }
    if !spend_energy(state, EXPLORE_ENERGY_COST) {
        return;
    }

    if node.kind.is_battle() {
        let base_hp = if node.kind == NodeType::Boss {
            BOSS_BASE_HP
        } else {
            BATTLE_BASE_HP
        };
        let hp = base_hp + node.difficulty as f64 * ENEMY_HP_PER_DIFFICULTY;
        let enemy_name = if node.kind == NodeType::Boss {
            "Cortex Warden"
        } else {
            "Immune Hunter"
        };
        state.encounter = Some(Encounter {
            node_id: node.id.clone(),
            enemy_name: enemy_name.to_string(),
            hp,
            max_hp: hp,
            attack: ENEMY_BASE_ATTACK + node.difficulty as f64 * ENEMY_ATTACK_PER_DIFFICULTY,
            intent: roll_enemy_intent(node.difficulty, rng),
            reward: node.reward.clone(),
        });
        state.combat = CombatFlags::default();
        state.log.push(format!("Contact with a threat: {}.", enemy_name));
        state.tutorial.advance_past(TutorialStage::Explore);
        return;
    }

    if let Some(entry) = state.nodes.iter_mut().find(|n| n.id == node.id) {
        entry.cleared = true;
    }
    if let Some(reward) = &node.reward {
        resolve_node_reward(state, reward);
    }
    unlock_next_node(state);
    gain_experience(state, NON_BATTLE_CLEAR_XP, None);
    state.log.push(format!("Sector stabilized: {}.", node.name));
    let cleared = state.cleared_count();
    state.achievements.on_node_cleared(cleared);
    state.tutorial.advance_past(TutorialStage::Explore);
}

/// Rolls player damage: consumes the focused flag and applies the crit rule.
fn apply_combat_damage(state: &mut GameState, base: f64, rng: &mut impl Rng) -> (f64, bool) {
    let focus_bonus = if state.combat.focused {
        FOCUS_MULTIPLIER
    } else {
        1.0
    };
    let level = level_info(state.resources.experience).level;
    let crit_chance = BASE_CRIT_CHANCE + level as f64 * CRIT_CHANCE_PER_LEVEL;
    let is_crit = rng.gen::<f64>() < crit_chance;
    let crit_bonus = if is_crit { CRIT_MULTIPLIER } else { 1.0 };
    let damage = (base * focus_bonus * crit_bonus).floor();
    state.combat.focused = false;
    (damage, is_crit)
}

/// Marks the node cleared, grants its reward exactly once, discovers the
/// next node, and closes the encounter.
fn handle_victory(state: &mut GameState, kill_xp: f64) {
    let Some(encounter) = state.encounter.clone() else {
        return;
    };
    let mut is_boss = false;
    let mut node_found = false;
    if let Some(node) = state.nodes.iter_mut().find(|n| n.id == encounter.node_id) {
        is_boss = node.kind == NodeType::Boss;
        node.cleared = true;
        node_found = true;
    }
    if node_found {
        if let Some(reward) = encounter.reward.clone() {
            resolve_node_reward(state, &reward);
        }
        unlock_next_node(state);
        gain_experience(state, kill_xp, None);
        let cleared = state.cleared_count();
        state.achievements.on_node_cleared(cleared);
    }
    state
        .log
        .push(format!("Threat neutralized: {}.", encounter.enemy_name));
    state.achievements.on_victory(is_boss);
    state.tutorial.advance_past(TutorialStage::Victory);
    close_encounter(state);
}

/// The defender turn: the enemy executes its telegraphed intent, then rolls
/// a new one.
fn resolve_enemy_turn(state: &mut GameState, rng: &mut impl Rng) {
    let Some(encounter) = state.encounter.clone() else {
        return;
    };
    let defense = derived_stats(state).defense_power;
    let intent = encounter.intent;

    let raw = encounter.attack * intent.multiplier();
    let mut damage = if intent.is_pierce() {
        (raw - defense * PIERCE_DEFENSE_FACTOR).max(1.0)
    } else {
        (raw - defense).max(1.0)
    };

    if state.combat.guarded {
        damage *= GUARD_DAMAGE_FACTOR;
        state.combat.guarded = false;
        state.log.push("The shield absorbs part of the blow.");
    }

    let final_damage = damage.floor().max(1.0);
    state.resources.integrity = (state.resources.integrity - final_damage).max(0.0);
    state.resources.raise_threat(intent.threat());

    if let Some(drain) = intent.drain() {
        state.resources.energy = (state.resources.energy - drain).max(0.0);
        state.log.push("The enemy drains the citadel's energy.");
    }

    state
        .log
        .push(format!("Enemy turn: {} (-{}).", intent.label(), final_damage));

    let difficulty = state
        .nodes
        .iter()
        .find(|n| n.id == encounter.node_id)
        .map(|n| n.difficulty);
    if let (Some(difficulty), Some(live)) = (difficulty, state.encounter.as_mut()) {
        live.intent = roll_enemy_intent(difficulty, rng);
    }
}

/// Basic attack: attack power plus a small random bonus.
pub fn attack_enemy(state: &mut GameState, rng: &mut impl Rng) {
    if state.encounter.is_none() {
        return;
    }
    if !spend_energy(state, 1.0) {
        return;
    }
    let base = derived_stats(state).attack_power + rng.gen_range(0..5) as f64;
    let (damage, is_crit) = apply_combat_damage(state, base, rng);
    let mut hp = f64::MAX;
    if let Some(encounter) = state.encounter.as_mut() {
        encounter.hp = (encounter.hp - damage).max(0.0);
        hp = encounter.hp;
    }
    let crit_tag = if is_crit { " (crit)" } else { "" };
    state.log.push(format!("Pulse strike: -{}{}.", damage, crit_tag));

    if hp <= 0.0 {
        handle_victory(state, ATTACK_KILL_XP);
        return;
    }
    resolve_enemy_turn(state, rng);
}

/// Heavier strike fueled by clots. The energy already spent is not refunded
/// when the clot fee cannot be paid.
pub fn burst(state: &mut GameState, rng: &mut impl Rng) {
    if state.encounter.is_none() {
        return;
    }
    if !spend_energy(state, 2.0) {
        return;
    }
    if state.resources.clots < BURST_CLOT_FEE {
        state.log.push("Not enough clots for a burst.");
        state.notices.warn("Not enough clots for a burst.");
        return;
    }
    state.resources.clots -= BURST_CLOT_FEE;
    let base = derived_stats(state).attack_power + BURST_DAMAGE_BONUS;
    let (damage, is_crit) = apply_combat_damage(state, base, rng);
    let mut hp = f64::MAX;
    if let Some(encounter) = state.encounter.as_mut() {
        encounter.hp = (encounter.hp - damage).max(0.0);
        hp = encounter.hp;
    }
    let crit_tag = if is_crit { " (crit)" } else { "" };
    state.log.push(format!("Hemo burst: -{}{}.", damage, crit_tag));

    if hp <= 0.0 {
        handle_victory(state, BURST_KILL_XP);
        return;
    }
    resolve_enemy_turn(state, rng);
}

/// Primes the next damage roll; the enemy still takes its turn.
pub fn focus(state: &mut GameState, rng: &mut impl Rng) {
    if state.encounter.is_none() {
        return;
    }
    if !spend_energy(state, 1.0) {
        return;
    }
    state.combat.focused = true;
    state.log.push("Focusing sharpens the next strike.");
    resolve_enemy_turn(state, rng);
}

/// Raises a shield against the next incoming hit; the enemy still takes its
/// turn (and may consume the shield immediately).
pub fn guard(state: &mut GameState, rng: &mut impl Rng) {
    if state.encounter.is_none() {
        return;
    }
    if !spend_energy(state, 1.0) {
        return;
    }
    state.combat.guarded = true;
    state.log.push("Shield raised against the next enemy turn.");
    resolve_enemy_turn(state, rng);
}

/// Exits the encounter with no reward and a permanent threat increase.
pub fn retreat(state: &mut GameState) {
    if state.encounter.is_none() {
        return;
    }
    close_encounter(state);
    state.resources.raise_threat(RETREAT_THREAT_PENALTY);
    state.log.push("Retreat. The threat has grown.");
}

/// Destroys the live encounter and resets combat flags.
pub fn close_encounter(state: &mut GameState) {
    state.encounter = None;
    state.combat = CombatFlags::default();
}
