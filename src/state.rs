//! The aggregate game state. Owned exclusively by a [`GameEngine`];
//! external collaborators read it and call mutator operations, never write
//! fields directly.
//!
//! [`GameEngine`]: crate::engine::GameEngine

use crate::achievements::Achievements;
use crate::economy::HarvestMode;
use crate::encounter::{CombatFlags, Encounter};
use crate::log::{EventLog, NoticeBoard};
use crate::map::{base_nodes, GameNode};
use crate::progression::{base_doctrines, base_modules, base_resource_upgrades, ProgressionNode};
use crate::resources::Resources;
use crate::stats::{EconomyEffects, StatEffects};
use crate::tutorial::Tutorial;

#[derive(Debug, Clone)]
pub struct GameState {
    pub resources: Resources,
    pub modules: Vec<ProgressionNode<StatEffects>>,
    pub doctrines: Vec<ProgressionNode<StatEffects>>,
    pub resource_upgrades: Vec<ProgressionNode<EconomyEffects>>,
    /// Id of the active doctrine; at most one, and only unlocked doctrines
    /// may be active.
    pub selected_doctrine: Option<String>,
    pub nodes: Vec<GameNode>,
    /// Id of the node the caller currently has selected.
    pub selected_node: Option<String>,
    /// The live encounter, if any. At most one.
    pub encounter: Option<Encounter>,
    pub combat: CombatFlags,
    pub achievements: Achievements,
    pub tutorial: Tutorial,
    pub harvest_mode: HarvestMode,
    pub log: EventLog,
    /// Transient notices; never persisted.
    pub notices: NoticeBoard,
}

impl GameState {
    /// Fresh state cloned from the blueprint set.
    pub fn new() -> Self {
        let nodes = base_nodes();
        let selected_node = nodes.first().map(|node| node.id.clone());
        Self {
            resources: Resources::new(),
            modules: base_modules(),
            doctrines: base_doctrines(),
            resource_upgrades: base_resource_upgrades(),
            selected_doctrine: None,
            nodes,
            selected_node,
            encounter: None,
            combat: CombatFlags::default(),
            achievements: Achievements::new(),
            tutorial: Tutorial::new(),
            harvest_mode: HarvestMode::default(),
            log: EventLog::new(),
            notices: NoticeBoard::new(),
        }
    }

    /// The loss condition. Derived, never stored.
    pub fn is_game_over(&self) -> bool {
        self.resources.integrity <= 0.0
    }

    pub fn active_doctrine(&self) -> Option<&ProgressionNode<StatEffects>> {
        let id = self.selected_doctrine.as_deref()?;
        self.doctrines.iter().find(|d| d.id == id)
    }

    pub fn selected_node(&self) -> Option<&GameNode> {
        let id = self.selected_node.as_deref()?;
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn cleared_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.cleared).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
