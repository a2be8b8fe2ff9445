//! Map node registry: discoverable, clearable locations and their rewards.

use crate::progression::force_unlock;
use crate::state::GameState;
use crate::stats::{economy_bonuses, gain_experience};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Harvest,
    Battle,
    Ruins,
    Forge,
    Boss,
    Sanctuary,
    Relay,
    Vault,
}

impl NodeType {
    /// Battle-like nodes spawn an encounter instead of clearing directly.
    pub fn is_battle(&self) -> bool {
        matches!(self, NodeType::Battle | NodeType::Boss)
    }
}

/// Reward granted exactly once, when a node transitions to cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeReward {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clots: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plasma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub essence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<f64>,
    /// Module granted for free at level 1 ("found", as opposed to bought).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

/// A map location. `cleared` implies `discovered`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameNode {
    pub id: String,
    pub name: String,
    pub kind: NodeType,
    pub difficulty: u32,
    pub discovered: bool,
    pub cleared: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<NodeReward>,
}

fn game_node(
    id: &str,
    name: &str,
    kind: NodeType,
    difficulty: u32,
    discovered: bool,
    reward: NodeReward,
) -> GameNode {
    GameNode {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        difficulty,
        discovered,
        cleared: false,
        reward: Some(reward),
    }
}

/// The fixed node roster; only the first node starts discovered.
pub fn base_nodes() -> Vec<GameNode> {
    vec![
        game_node(
            "n1",
            "Capillary Strait",
            NodeType::Harvest,
            1,
            true,
            NodeReward {
                plasma: Some(25.0),
                experience: Some(12.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n2",
            "Thrombocyte Junction",
            NodeType::Battle,
            2,
            false,
            NodeReward {
                clots: Some(10.0),
                essence: Some(2.0),
                experience: Some(26.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n3",
            "Marrow Rift",
            NodeType::Ruins,
            3,
            false,
            NodeReward {
                essence: Some(6.0),
                experience: Some(32.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n4",
            "Erythrocyte Forge",
            NodeType::Forge,
            3,
            false,
            NodeReward {
                module_id: Some("forge-core".to_string()),
                experience: Some(40.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n5",
            "Immune Patrol Storm",
            NodeType::Battle,
            4,
            false,
            NodeReward {
                clots: Some(18.0),
                essence: Some(4.0),
                experience: Some(46.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n6",
            "Neuro Sinus",
            NodeType::Relay,
            4,
            false,
            NodeReward {
                plasma: Some(45.0),
                essence: Some(3.0),
                experience: Some(50.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n7",
            "Basal Lowlands",
            NodeType::Harvest,
            5,
            false,
            NodeReward {
                plasma: Some(60.0),
                clots: Some(12.0),
                experience: Some(54.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n8",
            "Sanguine Ruins",
            NodeType::Ruins,
            5,
            false,
            NodeReward {
                essence: Some(10.0),
                experience: Some(60.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n9",
            "Lymph Gates",
            NodeType::Battle,
            6,
            false,
            NodeReward {
                clots: Some(28.0),
                essence: Some(6.0),
                experience: Some(70.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n10",
            "Plasmaline Sanctum",
            NodeType::Sanctuary,
            6,
            false,
            NodeReward {
                plasma: Some(90.0),
                essence: Some(5.0),
                experience: Some(76.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n11",
            "Synaptic Breach",
            NodeType::Forge,
            7,
            false,
            NodeReward {
                module_id: Some("rally-node".to_string()),
                experience: Some(84.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n12",
            "Cortex Atrium",
            NodeType::Boss,
            8,
            false,
            NodeReward {
                clots: Some(60.0),
                essence: Some(16.0),
                experience: Some(120.0),
                ..NodeReward::default()
            },
        ),
        game_node(
            "n13",
            "Hollow Vault",
            NodeType::Vault,
            8,
            false,
            NodeReward {
                clots: Some(40.0),
                plasma: Some(120.0),
                experience: Some(90.0),
                ..NodeReward::default()
            },
        ),
    ]
}

/// Marks the first undiscovered node (in definition order) as discovered.
/// Returns whether anything was newly discovered.
pub fn unlock_next_node(state: &mut GameState) -> bool {
    let Some(next) = state.nodes.iter_mut().find(|node| !node.discovered) else {
        return false;
    };
    next.discovered = true;
    let name = next.name.clone();
    state.log.push(format!("New sector discovered: {}.", name));
    let discovered = state.nodes.iter().filter(|n| n.discovered).count();
    let total = state.nodes.len();
    state.achievements.on_node_discovered(discovered, total);
    true
}

/// Grants a node reward: resources, experience (scaled by the experience
/// bonus), and any found module.
pub fn resolve_node_reward(state: &mut GameState, reward: &NodeReward) {
    if let Some(plasma) = reward.plasma {
        state.resources.plasma += plasma;
    }
    if let Some(clots) = reward.clots {
        state.resources.clots += clots;
    }
    if let Some(essence) = reward.essence {
        state.resources.essence += essence;
    }
    if let Some(experience) = reward.experience {
        let bonus = economy_bonuses(state).experience_bonus;
        gain_experience(state, experience * (1.0 + bonus), None);
    }
    if let Some(module_id) = &reward.module_id {
        if force_unlock(&mut state.modules, module_id) {
            let name = state
                .modules
                .iter()
                .find(|m| &m.id == module_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| module_id.clone());
            state.log.push(format!("Unique module found: {}.", name));
            state.achievements.on_module_unlocked();
        }
    }
}
