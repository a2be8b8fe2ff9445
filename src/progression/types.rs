use crate::resources::ResourceCost;
use serde::{Deserialize, Serialize};

/// One node in a progression tree. The shape is shared by modules,
/// doctrines and resource upgrades; only the effect payload differs.
///
/// Invariants: `unlocked == (level > 0)`, `level <= max_level`, and a node
/// can only be unlocked once every id in `requires` is unlocked within the
/// same tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionNode<E> {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: ResourceCost,
    /// Cost of each level beyond the first; `upgrade_costs[level - 1]` is
    /// charged when moving from `level` to `level + 1`.
    pub upgrade_costs: Vec<ResourceCost>,
    pub effects: E,
    /// Prerequisite ids within the same tree.
    pub requires: Vec<String>,
    pub unlocked: bool,
    pub level: u32,
    pub max_level: u32,
}

impl<E> ProgressionNode<E> {
    pub fn at_max_level(&self) -> bool {
        self.level >= self.max_level
    }
}
