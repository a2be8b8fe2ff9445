//! Versioned save payload and blueprint-merge hydration.
//!
//! Saves carry slim progress records keyed by id rather than full blueprint
//! copies. Loading clones fresh blueprints and merges the records onto them,
//! so renamed costs, effects, and new content flow into old saves while
//! records for removed content are silently dropped.

use crate::constants::SAVE_VERSION;
use crate::economy::HarvestMode;
use crate::encounter::{CombatFlags, Encounter};
use crate::log::EventLog;
use crate::map::base_nodes;
use crate::progression::ProgressionNode;
use crate::resources::Resources;
use crate::state::GameState;
use crate::stats::derived_stats;
use crate::tutorial::Tutorial;
use serde::{Deserialize, Serialize};

/// Slim per-node progress record for a progression tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub id: String,
    pub unlocked: bool,
    pub level: u32,
}

/// Slim per-node record for the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedNodeState {
    pub id: String,
    pub discovered: bool,
    pub cleared: bool,
}

/// Everything that survives a save. Notices are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePayload {
    pub version: u32,
    pub resources: Resources,
    pub modules: Vec<SavedProgress>,
    pub doctrines: Vec<SavedProgress>,
    pub resource_upgrades: Vec<SavedProgress>,
    pub nodes: Vec<SavedNodeState>,
    #[serde(default)]
    pub achievements: crate::achievements::Achievements,
    #[serde(default)]
    pub log: EventLog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Encounter>,
    #[serde(default)]
    pub combat: CombatFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_doctrine: Option<String>,
    #[serde(default)]
    pub tutorial_step: u32,
    #[serde(default)]
    pub harvest_mode: HarvestMode,
}

fn progress_records<E>(tree: &[ProgressionNode<E>]) -> Vec<SavedProgress> {
    tree.iter()
        .map(|node| SavedProgress {
            id: node.id.clone(),
            unlocked: node.unlocked,
            level: node.level,
        })
        .collect()
}

/// Snapshots the current state into a payload.
pub fn create_save_payload(state: &GameState) -> SavePayload {
    SavePayload {
        version: SAVE_VERSION,
        resources: state.resources.clone(),
        modules: progress_records(&state.modules),
        doctrines: progress_records(&state.doctrines),
        resource_upgrades: progress_records(&state.resource_upgrades),
        nodes: state
            .nodes
            .iter()
            .map(|node| SavedNodeState {
                id: node.id.clone(),
                discovered: node.discovered,
                cleared: node.cleared,
            })
            .collect(),
        achievements: state.achievements.clone(),
        log: state.log.clone(),
        encounter: state.encounter.clone(),
        combat: state.combat,
        selected_doctrine: state.selected_doctrine.clone(),
        tutorial_step: state.tutorial.step(),
        harvest_mode: state.harvest_mode,
    }
}

/// Merges saved records onto a fresh blueprint tree. Records whose id no
/// longer exists are dropped; blueprint entries with no record keep their
/// fresh defaults.
fn hydrate_tree<E>(tree: &mut [ProgressionNode<E>], records: &[SavedProgress]) {
    for node in tree.iter_mut() {
        let Some(record) = records.iter().find(|r| r.id == node.id) else {
            continue;
        };
        let mut level = record.level.min(node.max_level);
        if record.unlocked && level == 0 {
            level = 1;
        }
        node.level = level;
        node.unlocked = level > 0;
    }
}

/// Rebuilds state from a payload. Returns false (state untouched) on a
/// version mismatch; otherwise replaces the state wholesale.
pub fn apply_save_payload(state: &mut GameState, payload: &SavePayload) -> bool {
    if payload.version != SAVE_VERSION {
        return false;
    }

    let mut fresh = GameState::new();
    fresh.resources = payload.resources.clone();

    hydrate_tree(&mut fresh.modules, &payload.modules);
    hydrate_tree(&mut fresh.doctrines, &payload.doctrines);
    hydrate_tree(&mut fresh.resource_upgrades, &payload.resource_upgrades);

    fresh.nodes = base_nodes();
    for node in fresh.nodes.iter_mut() {
        let Some(record) = payload.nodes.iter().find(|r| r.id == node.id) else {
            continue;
        };
        node.cleared = record.cleared;
        // cleared implies discovered
        node.discovered = record.discovered || record.cleared;
    }

    fresh.achievements = payload.achievements.clone();
    fresh.log = payload.log.clone();
    fresh.combat = payload.combat;
    fresh.tutorial = Tutorial::from_step(payload.tutorial_step);
    fresh.harvest_mode = payload.harvest_mode;

    // Only a still-existing, unlocked doctrine may stay active
    fresh.selected_doctrine = payload.selected_doctrine.as_ref().and_then(|id| {
        fresh
            .doctrines
            .iter()
            .find(|d| &d.id == id && d.unlocked)
            .map(|d| d.id.clone())
    });

    // An encounter pointing at a removed or already-cleared node is dropped
    fresh.encounter = payload.encounter.clone().filter(|encounter| {
        fresh
            .nodes
            .iter()
            .any(|n| n.id == encounter.node_id && !n.cleared)
    });
    if fresh.encounter.is_none() {
        fresh.combat = CombatFlags::default();
    }
    if let Some(encounter) = &fresh.encounter {
        fresh.selected_node = Some(encounter.node_id.clone());
    }

    // Saved resources may exceed maxima the current blueprints allow
    let derived = derived_stats(&fresh);
    fresh.resources.energy = fresh.resources.energy.clamp(0.0, derived.max_energy);
    fresh.resources.integrity = fresh.resources.integrity.clamp(0.0, derived.max_integrity);
    fresh.resources.threat = fresh.resources.threat.clamp(0.0, 100.0);
    fresh.resources.masking = fresh.resources.masking.clamp(0.0, 100.0);

    fresh.log.push("Save loaded.");
    *state = fresh;
    true
}
