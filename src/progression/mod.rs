//! Progression graph: three structurally identical upgrade trees
//! (modules, doctrines, resource upgrades) with prerequisite-by-id edges.

mod data;
mod logic;
mod types;

pub use data::{base_doctrines, base_modules, base_resource_upgrades};
pub use logic::{find_node, force_unlock, try_unlock, try_upgrade, UnlockOutcome, UpgradeOutcome};
pub use types::ProgressionNode;
