//! Blueprint definitions for the three progression trees.
//!
//! Blueprints are immutable templates cloned into each new game; loaded
//! saves are merged back onto fresh clones so rebalanced costs and newly
//! added nodes always win over stale saved copies.

use super::types::ProgressionNode;
use crate::resources::ResourceCost;
use crate::stats::{EconomyEffects, StatEffects};

const DEFAULT_MAX_LEVEL: u32 = 3;

#[allow(clippy::too_many_arguments)]
fn node<E>(
    id: &str,
    name: &str,
    description: &str,
    cost: ResourceCost,
    upgrade_costs: Vec<ResourceCost>,
    effects: E,
    requires: &[&str],
) -> ProgressionNode<E> {
    ProgressionNode {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        upgrade_costs,
        effects,
        requires: requires.iter().map(|r| r.to_string()).collect(),
        unlocked: false,
        level: 0,
        max_level: DEFAULT_MAX_LEVEL,
    }
}

/// Two further levels beyond the first, at roughly 1.6x and 2.4x base cost.
fn cost_ladder(base: &ResourceCost) -> Vec<ResourceCost> {
    let scale = |cost: &ResourceCost, factor: f64| ResourceCost {
        clots: cost.clots.map(|v| (v * factor).round()),
        plasma: cost.plasma.map(|v| (v * factor).round()),
        essence: cost.essence.map(|v| (v * factor).round()),
    };
    vec![scale(base, 1.6), scale(base, 2.4)]
}

pub fn base_modules() -> Vec<ProgressionNode<StatEffects>> {
    let module = |id, name, description, cost: ResourceCost, effects, requires: &[&str]| {
        let ladder = cost_ladder(&cost);
        node(id, name, description, cost, ladder, effects, requires)
    };
    vec![
        module(
            "pulse-harvester",
            "Pulse Harvester",
            "Passively increases plasma intake.",
            ResourceCost::clots(12.0).and_plasma(40.0),
            StatEffects {
                plasma_rate: 1.4,
                ..StatEffects::default()
            },
            &[],
        ),
        module(
            "veil-shroud",
            "Veil Shroud",
            "Dampens threat growth and hardens concealment.",
            ResourceCost::essence(4.0).and_plasma(25.0),
            StatEffects {
                masking: 8.0,
                defense: 1.0,
                ..StatEffects::default()
            },
            &[],
        ),
        module(
            "hemo-arsenal",
            "Hemo Arsenal",
            "Sharpens combat pulses against intruders.",
            ResourceCost::clots(20.0).and_essence(6.0),
            StatEffects {
                attack: 3.0,
                ..StatEffects::default()
            },
            &[],
        ),
        module(
            "power-loop",
            "Power Loop",
            "Extends the energy reservoir.",
            ResourceCost::plasma(60.0).and_essence(3.0),
            StatEffects {
                energy: 2.0,
                ..StatEffects::default()
            },
            &[],
        ),
        module(
            "forge-core",
            "Forge Core",
            "Unlocks advanced synthesis and strengthens defense.",
            ResourceCost::clots(30.0).and_essence(10.0),
            StatEffects {
                defense: 2.0,
                plasma_rate: 0.8,
                ..StatEffects::default()
            },
            &["pulse-harvester"],
        ),
        module(
            "rally-node",
            "Rally Node",
            "Raises the citadel's maximum integrity.",
            ResourceCost::clots(28.0).and_essence(8.0),
            StatEffects {
                integrity: 8.0,
                ..StatEffects::default()
            },
            &["veil-shroud"],
        ),
        module(
            "clot-matrix",
            "Clot Matrix",
            "Reinforces combat tempo.",
            ResourceCost::clots(40.0).and_plasma(55.0),
            StatEffects {
                attack: 2.0,
                defense: 1.0,
                ..StatEffects::default()
            },
            &["hemo-arsenal"],
        ),
        module(
            "silent-veil",
            "Silent Veil",
            "Mutes threat growth outright.",
            ResourceCost::plasma(80.0).and_essence(10.0),
            StatEffects {
                masking: 12.0,
                ..StatEffects::default()
            },
            &["veil-shroud"],
        ),
    ]
}

pub fn base_doctrines() -> Vec<ProgressionNode<StatEffects>> {
    let doctrine = |id, name, description, cost: ResourceCost, effects| {
        let ladder = cost_ladder(&cost);
        node(id, name, description, cost, ladder, effects, &[])
    };
    vec![
        doctrine(
            "reaver",
            "Reaver Doctrine",
            "Aggression and pressure: growing damage and plasma.",
            ResourceCost::essence(6.0).and_plasma(40.0),
            StatEffects {
                attack: 2.0,
                plasma_rate: 0.8,
                ..StatEffects::default()
            },
        ),
        doctrine(
            "warden",
            "Warden Doctrine",
            "Survival and control: defense, masking, integrity.",
            ResourceCost::essence(6.0).and_clots(20.0),
            StatEffects {
                defense: 2.0,
                masking: 6.0,
                integrity: 6.0,
                ..StatEffects::default()
            },
        ),
        doctrine(
            "weaver",
            "Weaver Doctrine",
            "Energy and tempo: a faster economy and recovery.",
            ResourceCost::essence(5.0).and_plasma(30.0),
            StatEffects {
                energy: 1.0,
                plasma_rate: 1.1,
                ..StatEffects::default()
            },
        ),
    ]
}

pub fn base_resource_upgrades() -> Vec<ProgressionNode<EconomyEffects>> {
    let upgrade = |id, name, description, cost: ResourceCost, effects, requires: &[&str]| {
        let ladder = cost_ladder(&cost);
        node(id, name, description, cost, ladder, effects, requires)
    };
    vec![
        upgrade(
            "plasma-lattice",
            "Plasma Lattice",
            "Richer plasma harvests.",
            ResourceCost::clots(10.0).and_plasma(30.0),
            EconomyEffects {
                plasma_yield: 0.15,
                ..EconomyEffects::default()
            },
            &[],
        ),
        upgrade(
            "clot-press",
            "Clot Press",
            "Denser clot refinement batches.",
            ResourceCost::plasma(45.0).and_essence(2.0),
            EconomyEffects {
                clot_yield: 0.2,
                ..EconomyEffects::default()
            },
            &[],
        ),
        upgrade(
            "essence-still",
            "Essence Still",
            "Transmutation loses less essence to vapors.",
            ResourceCost::clots(25.0).and_essence(4.0),
            EconomyEffects {
                essence_yield: 0.2,
                ..EconomyEffects::default()
            },
            &["clot-press"],
        ),
        upgrade(
            "lean-synthesis",
            "Lean Synthesis",
            "Refinement consumes less plasma and fewer clots.",
            ResourceCost::plasma(70.0).and_essence(5.0),
            EconomyEffects {
                plasma_cost_reduction: 0.1,
                clot_cost_reduction: 0.05,
                ..EconomyEffects::default()
            },
            &["plasma-lattice"],
        ),
        upgrade(
            "veiled-channels",
            "Veiled Channels",
            "Supply lines leak less attention.",
            ResourceCost::essence(8.0),
            EconomyEffects {
                threat_shift: -0.1,
                ..EconomyEffects::default()
            },
            &[],
        ),
        upgrade(
            "mnemonic-weave",
            "Mnemonic Weave",
            "Every expedition teaches the citadel more.",
            ResourceCost::clots(35.0).and_essence(6.0),
            EconomyEffects {
                experience_bonus: 0.1,
                ..EconomyEffects::default()
            },
            &["essence-still"],
        ),
    ]
}
