//! Economy actions: the resource conversion loop outside combat.
//!
//! Every action spends energy first. Secondary costs are checked after the
//! energy spend and are never refunded when they fail; the asymmetry is
//! deliberate and makes careless conversions lossy.

use crate::constants::*;
use crate::map::unlock_next_node;
use crate::resources::{can_afford, spend_cost, spend_energy, ResourceCost};
use crate::state::GameState;
use crate::stats::{aggregate_stats, economy_bonuses, gain_experience};
use crate::tutorial::TutorialStage;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How aggressively plasma is gathered. Affects gather yield and the threat
/// footprint of each gather.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarvestMode {
    #[default]
    Steady,
    Surge,
    Veiled,
}

impl HarvestMode {
    pub fn id(&self) -> &'static str {
        match self {
            HarvestMode::Steady => "steady",
            HarvestMode::Surge => "surge",
            HarvestMode::Veiled => "veiled",
        }
    }

    pub fn from_id(id: &str) -> Option<HarvestMode> {
        match id {
            "steady" => Some(HarvestMode::Steady),
            "surge" => Some(HarvestMode::Surge),
            "veiled" => Some(HarvestMode::Veiled),
            _ => None,
        }
    }

    pub fn yield_multiplier(&self) -> f64 {
        match self {
            HarvestMode::Steady => 1.0,
            HarvestMode::Surge => 1.25,
            HarvestMode::Veiled => 0.85,
        }
    }

    /// Threat delta applied per gather; negative lowers threat.
    pub fn threat_delta(&self) -> f64 {
        match self {
            HarvestMode::Steady => 0.0,
            HarvestMode::Surge => 1.0,
            HarvestMode::Veiled => -1.0,
        }
    }
}

/// Selects the harvest mode by id. Unknown ids are refused with a notice.
pub fn set_harvest_mode(state: &mut GameState, id: &str) -> bool {
    let Some(mode) = HarvestMode::from_id(id) else {
        state.notices.warn("Unknown harvest mode.");
        return false;
    };
    state.harvest_mode = mode;
    true
}

fn grant_action_experience(state: &mut GameState, base: f64, reason: &str) {
    let bonus = economy_bonuses(state).experience_bonus;
    gain_experience(state, base * (1.0 + bonus), Some(reason));
}

/// Checks and spends a secondary cost. On failure the energy already spent
/// stays spent.
fn pay_secondary_cost(state: &mut GameState, cost: &ResourceCost, short_of: &str) -> bool {
    if !can_afford(&state.resources, cost) {
        let message = format!("Not enough {}.", short_of);
        state.log.push(message.clone());
        state.notices.warn(message);
        return false;
    }
    spend_cost(&mut state.resources, cost);
    true
}

/// Gathers plasma. Yield scales with the plasma-rate stat, the plasma yield
/// bonus, and the harvest mode.
pub fn gather_plasma(state: &mut GameState) {
    if !spend_energy(state, 1.0) {
        return;
    }
    let rate_stat = aggregate_stats(state).plasma_rate;
    let base = (GATHER_BASE_PLASMA + rate_stat * GATHER_PLASMA_PER_RATE_STAT).round();
    let bonuses = economy_bonuses(state);
    let mode = state.harvest_mode;
    let amount = (base * bonuses.plasma_yield * mode.yield_multiplier()).round();

    state.resources.plasma += amount;
    let delta = mode.threat_delta();
    if delta > 0.0 {
        state.resources.raise_threat(delta);
    } else if delta < 0.0 {
        state.resources.lower_threat(-delta);
    }
    state.log.push(format!("Gathered {} plasma.", amount));
    grant_action_experience(state, 3.0, "Gathering");
    state.achievements.on_first_harvest();
    state.tutorial.advance_past(TutorialStage::Gather);
}

/// Refines plasma into clots.
pub fn refine_clots(state: &mut GameState) {
    if !spend_energy(state, 1.0) {
        return;
    }
    let bonuses = economy_bonuses(state);
    let cost = ResourceCost::plasma(REFINE_PLASMA_COST * (1.0 - bonuses.plasma_cost_reduction));
    if !pay_secondary_cost(state, &cost, "plasma") {
        return;
    }
    let amount = (REFINE_CLOT_OUTPUT * bonuses.clot_yield).round();
    state.resources.clots += amount;
    state.log.push(format!("Refined {} clots.", amount));
    grant_action_experience(state, 4.0, "Refining");
    state.tutorial.advance_past(TutorialStage::Refine);
}

/// Transmutes clots into essence.
pub fn transmute_essence(state: &mut GameState) {
    if !spend_energy(state, 2.0) {
        return;
    }
    let bonuses = economy_bonuses(state);
    let cost = ResourceCost::clots(TRANSMUTE_CLOT_COST * (1.0 - bonuses.clot_cost_reduction));
    if !pay_secondary_cost(state, &cost, "clots") {
        return;
    }
    let amount = (TRANSMUTE_ESSENCE_OUTPUT * bonuses.essence_yield).round();
    state.resources.essence += amount;
    state.log.push(format!("Transmuted {} essence.", amount));
    grant_action_experience(state, 6.0, "Transmutation");
}

/// Burns essence to thicken the masking veil and shed threat.
pub fn reinforce_masking(state: &mut GameState) {
    if !spend_energy(state, 1.0) {
        return;
    }
    let bonuses = economy_bonuses(state);
    let cost =
        ResourceCost::essence(REINFORCE_ESSENCE_COST * (1.0 - bonuses.essence_cost_reduction));
    if !pay_secondary_cost(state, &cost, "essence") {
        return;
    }
    state.resources.masking = (state.resources.masking + REINFORCE_MASKING_GAIN).min(MASKING_MAX);
    state.resources.lower_threat(REINFORCE_THREAT_DROP);
    state.log.push("The masking veil thickens.");
    grant_action_experience(state, 4.0, "Reinforcement");
}

/// Scans the bloodstream: always sheds threat, sometimes discovers a sector.
pub fn scan_flow(state: &mut GameState, rng: &mut impl Rng) {
    if !spend_energy(state, 1.0) {
        return;
    }
    state.resources.lower_threat(SCAN_THREAT_DROP);
    if rng.gen_bool(SCAN_DISCOVERY_CHANCE) && unlock_next_node(state) {
        state.log.push("The scan revealed a new sector.");
    } else {
        state.log.push("The scan found nothing new.");
    }
    grant_action_experience(state, 5.0, "Scanning");
}

/// Repairs the citadel's structure.
pub fn stabilize_core(state: &mut GameState) {
    if !spend_energy(state, 2.0) {
        return;
    }
    let bonuses = economy_bonuses(state);
    let cost = ResourceCost::plasma(STABILIZE_PLASMA_COST * (1.0 - bonuses.plasma_cost_reduction))
        .and_essence(STABILIZE_ESSENCE_COST * (1.0 - bonuses.essence_cost_reduction));
    if !pay_secondary_cost(state, &cost, "plasma or essence") {
        return;
    }
    let max_integrity = crate::stats::derived_stats(state).max_integrity;
    state.resources.integrity =
        (state.resources.integrity + STABILIZE_INTEGRITY_GAIN).min(max_integrity);
    state.log.push("The core stabilizes.");
    grant_action_experience(state, 6.0, "Stabilization");
}

/// Pushes the exploration front: guaranteed discovery attempt, at the price
/// of essence and attention.
pub fn advance_front(state: &mut GameState) {
    if !spend_energy(state, 2.0) {
        return;
    }
    let bonuses = economy_bonuses(state);
    let cost =
        ResourceCost::essence(ADVANCE_ESSENCE_COST * (1.0 - bonuses.essence_cost_reduction));
    if !pay_secondary_cost(state, &cost, "essence") {
        return;
    }
    state.resources.raise_threat(ADVANCE_THREAT_GAIN);
    if !unlock_next_node(state) {
        state.log.push("The front cannot advance further.");
    }
    grant_action_experience(state, 8.0, "Advance");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_gather_fresh_state_yields_base_amount() {
        let mut state = GameState::new();
        gather_plasma(&mut state);
        // No stats, no bonuses: round(14) plasma for 1 energy
        assert_eq!(state.resources.plasma, INITIAL_PLASMA + 14.0);
        assert_eq!(state.resources.energy, INITIAL_ENERGY - 1.0);
        assert_eq!(state.resources.experience, 3.0);
        assert!(state
            .achievements
            .is_unlocked(crate::achievements::AchievementId::FirstHarvest));
        assert_eq!(state.tutorial.stage(), TutorialStage::Refine);
    }

    #[test]
    fn test_gather_surge_mode_scales_yield_and_threat() {
        let mut state = GameState::new();
        assert!(set_harvest_mode(&mut state, "surge"));
        gather_plasma(&mut state);
        // round(14 * 1.25) = 18
        assert_eq!(state.resources.plasma, INITIAL_PLASMA + 18.0);
        assert_eq!(state.resources.threat, INITIAL_THREAT + 1.0);
    }

    #[test]
    fn test_gather_veiled_mode_lowers_threat() {
        let mut state = GameState::new();
        assert!(set_harvest_mode(&mut state, "veiled"));
        gather_plasma(&mut state);
        // round(14 * 0.85) = 12
        assert_eq!(state.resources.plasma, INITIAL_PLASMA + 12.0);
        assert_eq!(state.resources.threat, INITIAL_THREAT - 1.0);
    }

    #[test]
    fn test_unknown_harvest_mode_refused() {
        let mut state = GameState::new();
        assert!(!set_harvest_mode(&mut state, "reckless"));
        assert_eq!(state.harvest_mode, HarvestMode::Steady);
    }

    #[test]
    fn test_refine_converts_plasma_to_clots() {
        let mut state = GameState::new();
        refine_clots(&mut state);
        assert_eq!(state.resources.plasma, INITIAL_PLASMA - REFINE_PLASMA_COST);
        assert_eq!(state.resources.clots, INITIAL_CLOTS + REFINE_CLOT_OUTPUT);
        assert_eq!(state.resources.experience, 4.0);
    }

    #[test]
    fn test_refine_without_plasma_loses_energy_only() {
        let mut state = GameState::new();
        state.resources.plasma = 10.0;
        refine_clots(&mut state);
        // Energy spent, plasma and clots untouched
        assert_eq!(state.resources.energy, INITIAL_ENERGY - 1.0);
        assert_eq!(state.resources.plasma, 10.0);
        assert_eq!(state.resources.clots, INITIAL_CLOTS);
        assert_eq!(state.resources.experience, 0.0);
    }

    #[test]
    fn test_refine_without_energy_changes_nothing() {
        let mut state = GameState::new();
        state.resources.energy = 0.5;
        refine_clots(&mut state);
        assert_eq!(state.resources.energy, 0.5);
        assert_eq!(state.resources.plasma, INITIAL_PLASMA);
    }

    #[test]
    fn test_transmute_converts_clots_to_essence() {
        let mut state = GameState::new();
        transmute_essence(&mut state);
        assert_eq!(state.resources.clots, INITIAL_CLOTS - TRANSMUTE_CLOT_COST);
        assert_eq!(
            state.resources.essence,
            INITIAL_ESSENCE + TRANSMUTE_ESSENCE_OUTPUT
        );
        assert_eq!(state.resources.energy, INITIAL_ENERGY - 2.0);
    }

    #[test]
    fn test_reinforce_masking_caps_at_max() {
        let mut state = GameState::new();
        state.resources.masking = 98.0;
        reinforce_masking(&mut state);
        assert_eq!(state.resources.masking, MASKING_MAX);
        assert_eq!(state.resources.threat, INITIAL_THREAT - REINFORCE_THREAT_DROP);
        assert_eq!(state.resources.essence, 0.0);
    }

    #[test]
    fn test_scan_always_sheds_threat() {
        let mut state = GameState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        scan_flow(&mut state, &mut rng);
        assert_eq!(state.resources.threat, INITIAL_THREAT - SCAN_THREAT_DROP);
        assert_eq!(state.resources.experience, 5.0);
    }

    #[test]
    fn test_scan_eventually_discovers() {
        let mut state = GameState::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        state.resources.energy = 100.0;
        for _ in 0..50 {
            scan_flow(&mut state, &mut rng);
        }
        assert!(state.nodes.iter().filter(|n| n.discovered).count() > 1);
    }

    #[test]
    fn test_stabilize_caps_at_max_integrity() {
        let mut state = GameState::new();
        state.resources.integrity = 95.0;
        stabilize_core(&mut state);
        assert_eq!(state.resources.integrity, 100.0);
        assert_eq!(state.resources.plasma, INITIAL_PLASMA - STABILIZE_PLASMA_COST);
        assert_eq!(state.resources.essence, INITIAL_ESSENCE - STABILIZE_ESSENCE_COST);
    }

    #[test]
    fn test_advance_front_discovers_and_raises_threat() {
        let mut state = GameState::new();
        state.resources.essence = 4.0;
        advance_front(&mut state);
        assert!(state.nodes[1].discovered);
        assert_eq!(state.resources.threat, INITIAL_THREAT + ADVANCE_THREAT_GAIN);
        assert_eq!(state.resources.essence, 0.0);
        assert_eq!(state.resources.experience, 8.0);
    }

    #[test]
    fn test_advance_front_without_essence_loses_energy() {
        let mut state = GameState::new();
        state.resources.essence = 1.0;
        advance_front(&mut state);
        assert_eq!(state.resources.energy, INITIAL_ENERGY - 2.0);
        assert_eq!(state.resources.essence, 1.0);
        assert!(!state.nodes[1].discovered);
    }

    #[test]
    fn test_yield_bonuses_apply() {
        let mut state = GameState::new();
        let upgrade = state
            .resource_upgrades
            .iter_mut()
            .find(|u| u.effects.clot_yield > 0.0)
            .unwrap();
        upgrade.unlocked = true;
        upgrade.level = 1;
        let clot_yield = 1.0 + upgrade.effects.clot_yield;

        refine_clots(&mut state);
        let expected = (REFINE_CLOT_OUTPUT * clot_yield).round();
        assert_eq!(state.resources.clots, INITIAL_CLOTS + expected);
    }

    #[test]
    fn test_cost_reduction_applies() {
        let mut state = GameState::new();
        let upgrade = state
            .resource_upgrades
            .iter_mut()
            .find(|u| u.effects.plasma_cost_reduction > 0.0)
            .unwrap();
        upgrade.unlocked = true;
        upgrade.level = 2;
        let reduction = upgrade.effects.plasma_cost_reduction * 2.0;

        refine_clots(&mut state);
        let expected_cost = REFINE_PLASMA_COST * (1.0 - reduction);
        assert!((state.resources.plasma - (INITIAL_PLASMA - expected_cost)).abs() < 1e-9);
    }
}
