//! Unlock/upgrade rules shared by all three progression trees.

use super::types::ProgressionNode;
use crate::resources::{can_afford, spend_cost, Resources};

/// Why an unlock attempt did or did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    Unlocked,
    UnknownId,
    AlreadyUnlocked,
    MissingPrerequisite,
    CannotAfford,
}

/// Why an upgrade attempt did or did not go through. `Upgraded` carries the
/// new level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeOutcome {
    Upgraded(u32),
    UnknownId,
    Locked,
    MaxLevel,
    CannotAfford,
}

pub fn find_node<'a, E>(nodes: &'a [ProgressionNode<E>], id: &str) -> Option<&'a ProgressionNode<E>> {
    nodes.iter().find(|node| node.id == id)
}

/// Attempts to unlock `id`, debiting its cost on success. Prerequisites are
/// resolved within the same tree.
pub fn try_unlock<E>(
    nodes: &mut [ProgressionNode<E>],
    id: &str,
    resources: &mut Resources,
) -> UnlockOutcome {
    let Some(index) = nodes.iter().position(|node| node.id == id) else {
        return UnlockOutcome::UnknownId;
    };
    if nodes[index].unlocked {
        return UnlockOutcome::AlreadyUnlocked;
    }
    let prerequisites_met = nodes[index]
        .requires
        .clone()
        .iter()
        .all(|required| nodes.iter().any(|n| n.id == *required && n.unlocked));
    if !prerequisites_met {
        return UnlockOutcome::MissingPrerequisite;
    }
    if !can_afford(resources, &nodes[index].cost) {
        return UnlockOutcome::CannotAfford;
    }
    spend_cost(resources, &nodes[index].cost);
    nodes[index].unlocked = true;
    nodes[index].level = 1;
    UnlockOutcome::Unlocked
}

/// Attempts to raise `id` one level, debiting `upgrade_costs[level - 1]`.
pub fn try_upgrade<E>(
    nodes: &mut [ProgressionNode<E>],
    id: &str,
    resources: &mut Resources,
) -> UpgradeOutcome {
    let Some(node) = nodes.iter_mut().find(|node| node.id == id) else {
        return UpgradeOutcome::UnknownId;
    };
    if !node.unlocked {
        return UpgradeOutcome::Locked;
    }
    if node.at_max_level() {
        return UpgradeOutcome::MaxLevel;
    }
    let Some(cost) = node.upgrade_costs.get(node.level as usize - 1).cloned() else {
        return UpgradeOutcome::MaxLevel;
    };
    if !can_afford(resources, &cost) {
        return UpgradeOutcome::CannotAfford;
    }
    spend_cost(resources, &cost);
    node.level += 1;
    UpgradeOutcome::Upgraded(node.level)
}

/// Unlocks `id` at level 1 without charging cost or checking prerequisites.
/// Used for modules found as node rewards. Returns true if the node was
/// newly unlocked.
pub fn force_unlock<E>(nodes: &mut [ProgressionNode<E>], id: &str) -> bool {
    match nodes.iter_mut().find(|node| node.id == id) {
        Some(node) if !node.unlocked => {
            node.unlocked = true;
            node.level = 1;
            true
        }
        _ => false,
    }
}
