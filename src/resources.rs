//! Resource ledger: the scalar stores every other subsystem reads and spends.

use crate::constants::*;
use crate::state::GameState;
use serde::{Deserialize, Serialize};

/// All scalar resource stores. Bounds are enforced by the mutating
/// operations, not by the struct itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub clots: f64,
    pub plasma: f64,
    pub essence: f64,
    pub energy: f64,
    pub threat: f64,
    pub masking: f64,
    pub integrity: f64,
    pub experience: f64,
    pub day: u64,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            clots: INITIAL_CLOTS,
            plasma: INITIAL_PLASMA,
            essence: INITIAL_ESSENCE,
            energy: INITIAL_ENERGY,
            threat: INITIAL_THREAT,
            masking: INITIAL_MASKING,
            integrity: INITIAL_INTEGRITY,
            experience: 0.0,
            day: 1,
        }
    }

    pub fn raise_threat(&mut self, amount: f64) {
        self.threat = (self.threat + amount).min(THREAT_MAX);
    }

    pub fn lower_threat(&mut self, amount: f64) {
        self.threat = (self.threat - amount).max(0.0);
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial cost: absent entries are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clots: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plasma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essence: Option<f64>,
}

impl ResourceCost {
    pub fn clots(amount: f64) -> Self {
        Self {
            clots: Some(amount),
            ..Self::default()
        }
    }

    pub fn plasma(amount: f64) -> Self {
        Self {
            plasma: Some(amount),
            ..Self::default()
        }
    }

    pub fn essence(amount: f64) -> Self {
        Self {
            essence: Some(amount),
            ..Self::default()
        }
    }

    pub fn and_clots(mut self, amount: f64) -> Self {
        self.clots = Some(amount);
        self
    }

    pub fn and_plasma(mut self, amount: f64) -> Self {
        self.plasma = Some(amount);
        self
    }

    pub fn and_essence(mut self, amount: f64) -> Self {
        self.essence = Some(amount);
        self
    }
}

/// True iff every resource named in `cost` is available in at least the
/// required amount.
pub fn can_afford(resources: &Resources, cost: &ResourceCost) -> bool {
    let check = |have: f64, need: Option<f64>| need.map_or(true, |n| have >= n);
    check(resources.clots, cost.clots)
        && check(resources.plasma, cost.plasma)
        && check(resources.essence, cost.essence)
}

/// Unconditionally debits each present entry. Callers must have checked
/// `can_afford` first.
pub fn spend_cost(resources: &mut Resources, cost: &ResourceCost) {
    if let Some(amount) = cost.clots {
        resources.clots -= amount;
    }
    if let Some(amount) = cost.plasma {
        resources.plasma -= amount;
    }
    if let Some(amount) = cost.essence {
        resources.essence -= amount;
    }
}

/// Spends energy, returning false (state unchanged, warning notice emitted)
/// when there is not enough.
pub fn spend_energy(state: &mut GameState, amount: f64) -> bool {
    if state.resources.energy < amount {
        state.notices.warn("Not enough energy.");
        return false;
    }
    state.resources.energy -= amount;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ledger_values() {
        let resources = Resources::new();
        assert_eq!(resources.clots, 25.0);
        assert_eq!(resources.plasma, 60.0);
        assert_eq!(resources.essence, 2.0);
        assert_eq!(resources.energy, 5.0);
        assert_eq!(resources.day, 1);
    }

    #[test]
    fn test_can_afford_ignores_absent_entries() {
        let resources = Resources::new();
        // Only plasma is constrained; clots/essence absent
        assert!(can_afford(&resources, &ResourceCost::plasma(60.0)));
        assert!(!can_afford(&resources, &ResourceCost::plasma(60.1)));
        assert!(can_afford(&resources, &ResourceCost::default()));
    }

    #[test]
    fn test_spend_cost_debits_each_entry() {
        let mut resources = Resources::new();
        let cost = ResourceCost::plasma(20.0).and_essence(1.0);
        spend_cost(&mut resources, &cost);
        assert_eq!(resources.plasma, 40.0);
        assert_eq!(resources.essence, 1.0);
        assert_eq!(resources.clots, 25.0);
    }

    #[test]
    fn test_spend_energy_refuses_without_mutation() {
        let mut state = GameState::new();
        state.resources.energy = 1.5;
        assert!(!spend_energy(&mut state, 2.0));
        assert_eq!(state.resources.energy, 1.5);
        assert!(state.notices.last().is_some());
        assert!(spend_energy(&mut state, 1.0));
        assert_eq!(state.resources.energy, 0.5);
    }

    #[test]
    fn test_threat_clamps() {
        let mut resources = Resources::new();
        resources.raise_threat(500.0);
        assert_eq!(resources.threat, 100.0);
        resources.lower_threat(500.0);
        assert_eq!(resources.threat, 0.0);
    }
}
