//! The engine facade: owns the state, a persistence backend, and the rng.
//!
//! Every mutating operation is followed by a write-through persist. Storage
//! failures are logged and swallowed; gameplay never stalls on a bad disk.

use crate::codec::{decode_save, encode_save};
use crate::constants::STORAGE_KEY;
use crate::economy;
use crate::encounter;
use crate::map::GameNode;
use crate::progression::{try_unlock, try_upgrade, UnlockOutcome, UpgradeOutcome};
use crate::save::{apply_save_payload, create_save_payload, SavePayload};
use crate::state::GameState;
use crate::stats::{derived_stats, economy_bonuses, level_info, DerivedStats, EconomyBonuses, LevelInfo};
use crate::store::KvStore;
use crate::tick;
use crate::tutorial::TutorialStage;
use rand::Rng;

/// Which progression tree an unlock/upgrade call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tree {
    Module,
    Doctrine,
    ResourceUpgrade,
}

impl Tree {
    fn noun(&self) -> &'static str {
        match self {
            Tree::Module => "module",
            Tree::Doctrine => "doctrine",
            Tree::ResourceUpgrade => "upgrade",
        }
    }
}

pub struct GameEngine<S: KvStore, R: Rng> {
    state: GameState,
    store: S,
    rng: R,
}

impl<S: KvStore, R: Rng> GameEngine<S, R> {
    /// Loads the stored save if one exists and is readable; otherwise starts
    /// fresh. A corrupt or version-mismatched save is abandoned, not an error.
    pub fn new(store: S, rng: R) -> Self {
        let mut state = GameState::new();
        match store.get(STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<SavePayload>(&raw) {
                Ok(payload) => {
                    if !apply_save_payload(&mut state, &payload) {
                        tracing::warn!(version = payload.version, "stored save has a different version, starting fresh");
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "stored save is corrupt, starting fresh");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "could not read stored save, starting fresh");
            }
        }
        Self { state, store, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn derived(&self) -> DerivedStats {
        derived_stats(&self.state)
    }

    pub fn level(&self) -> LevelInfo {
        level_info(self.state.resources.experience)
    }

    pub fn economy(&self) -> EconomyBonuses {
        economy_bonuses(&self.state)
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn tutorial_hint(&self) -> Option<&'static str> {
        self.state.tutorial.hint()
    }

    /// Drains pending transient notices for display.
    pub fn take_notices(&mut self) -> Vec<crate::log::Notice> {
        self.state.notices.drain()
    }

    fn persist(&mut self) {
        let payload = create_save_payload(&self.state);
        match serde_json::to_string(&payload) {
            Ok(raw) => {
                if let Err(err) = self.store.set(STORAGE_KEY, &raw) {
                    tracing::warn!(error = %err, "failed to persist save");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize save payload");
            }
        }
    }

    // Economy

    pub fn gather_plasma(&mut self) {
        economy::gather_plasma(&mut self.state);
        self.persist();
    }

    pub fn refine_clots(&mut self) {
        economy::refine_clots(&mut self.state);
        self.persist();
    }

    pub fn transmute_essence(&mut self) {
        economy::transmute_essence(&mut self.state);
        self.persist();
    }

    pub fn reinforce_masking(&mut self) {
        economy::reinforce_masking(&mut self.state);
        self.persist();
    }

    pub fn scan_flow(&mut self) {
        economy::scan_flow(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn stabilize_core(&mut self) {
        economy::stabilize_core(&mut self.state);
        self.persist();
    }

    pub fn advance_front(&mut self) {
        economy::advance_front(&mut self.state);
        self.persist();
    }

    pub fn set_harvest_mode(&mut self, id: &str) {
        if economy::set_harvest_mode(&mut self.state, id) {
            self.persist();
        }
    }

    // Progression

    fn report_unlock(&mut self, tree: Tree, id: &str, outcome: UnlockOutcome) {
        let noun = tree.noun();
        match outcome {
            UnlockOutcome::Unlocked => {
                let name = self.tree_node_name(tree, id);
                self.state
                    .log
                    .push(format!("New {} online: {}.", noun, name));
            }
            UnlockOutcome::UnknownId => {
                self.state.notices.warn(format!("Unknown {}.", noun));
            }
            UnlockOutcome::AlreadyUnlocked => {
                self.state
                    .notices
                    .info(format!("That {} is already unlocked.", noun));
            }
            UnlockOutcome::MissingPrerequisite => {
                self.state
                    .notices
                    .warn(format!("A prerequisite {} is still locked.", noun));
            }
            UnlockOutcome::CannotAfford => {
                self.state
                    .notices
                    .warn(format!("Not enough resources for that {}.", noun));
            }
        }
    }

    fn report_upgrade(&mut self, tree: Tree, id: &str, outcome: UpgradeOutcome) {
        let noun = tree.noun();
        match outcome {
            UpgradeOutcome::Upgraded(level) => {
                let name = self.tree_node_name(tree, id);
                self.state
                    .log
                    .push(format!("{} reached level {}.", name, level));
            }
            UpgradeOutcome::UnknownId => {
                self.state.notices.warn(format!("Unknown {}.", noun));
            }
            UpgradeOutcome::Locked => {
                self.state
                    .notices
                    .warn(format!("That {} is not unlocked yet.", noun));
            }
            UpgradeOutcome::MaxLevel => {
                self.state
                    .notices
                    .info(format!("That {} is already at maximum level.", noun));
            }
            UpgradeOutcome::CannotAfford => {
                self.state
                    .notices
                    .warn(format!("Not enough resources to upgrade that {}.", noun));
            }
        }
    }

    fn tree_node_name(&self, tree: Tree, id: &str) -> String {
        let name = match tree {
            Tree::Module => self.state.modules.iter().find(|n| n.id == id).map(|n| &n.name),
            Tree::Doctrine => self.state.doctrines.iter().find(|n| n.id == id).map(|n| &n.name),
            Tree::ResourceUpgrade => self
                .state
                .resource_upgrades
                .iter()
                .find(|n| n.id == id)
                .map(|n| &n.name),
        };
        name.cloned().unwrap_or_else(|| id.to_string())
    }

    pub fn unlock_module(&mut self, id: &str) -> UnlockOutcome {
        let outcome = try_unlock(&mut self.state.modules, id, &mut self.state.resources);
        self.report_unlock(Tree::Module, id, outcome);
        if outcome == UnlockOutcome::Unlocked {
            self.state.achievements.on_module_unlocked();
            self.state.tutorial.advance_past(TutorialStage::UnlockModule);
        }
        self.persist();
        outcome
    }

    pub fn upgrade_module(&mut self, id: &str) -> UpgradeOutcome {
        let outcome = try_upgrade(&mut self.state.modules, id, &mut self.state.resources);
        self.report_upgrade(Tree::Module, id, outcome);
        self.persist();
        outcome
    }

    pub fn unlock_doctrine(&mut self, id: &str) -> UnlockOutcome {
        let outcome = try_unlock(&mut self.state.doctrines, id, &mut self.state.resources);
        self.report_unlock(Tree::Doctrine, id, outcome);
        self.persist();
        outcome
    }

    pub fn upgrade_doctrine(&mut self, id: &str) -> UpgradeOutcome {
        let outcome = try_upgrade(&mut self.state.doctrines, id, &mut self.state.resources);
        self.report_upgrade(Tree::Doctrine, id, outcome);
        self.persist();
        outcome
    }

    /// Makes an already-unlocked doctrine the active one.
    pub fn activate_doctrine(&mut self, id: &str) -> bool {
        let Some(doctrine) = self.state.doctrines.iter().find(|d| d.id == id && d.unlocked) else {
            self.state.notices.warn("That doctrine is not unlocked.");
            return false;
        };
        let name = doctrine.name.clone();
        self.state.selected_doctrine = Some(doctrine.id.clone());
        self.state.log.push(format!("Doctrine adopted: {}.", name));
        self.state.achievements.on_doctrine_activated();
        self.persist();
        true
    }

    pub fn unlock_resource_upgrade(&mut self, id: &str) -> UnlockOutcome {
        let outcome = try_unlock(
            &mut self.state.resource_upgrades,
            id,
            &mut self.state.resources,
        );
        self.report_unlock(Tree::ResourceUpgrade, id, outcome);
        self.persist();
        outcome
    }

    pub fn upgrade_resource_upgrade(&mut self, id: &str) -> UpgradeOutcome {
        let outcome = try_upgrade(
            &mut self.state.resource_upgrades,
            id,
            &mut self.state.resources,
        );
        self.report_upgrade(Tree::ResourceUpgrade, id, outcome);
        self.persist();
        outcome
    }

    // Map and encounters

    /// Selects a discovered node. Refused while an encounter is live.
    pub fn select_node(&mut self, id: &str) -> bool {
        if self.state.encounter.is_some() {
            self.state.notices.warn("Cannot move while in battle.");
            return false;
        }
        let known = self
            .state
            .nodes
            .iter()
            .any(|node| node.id == id && node.discovered);
        if !known {
            self.state.notices.warn("That sector is unknown.");
            return false;
        }
        self.state.selected_node = Some(id.to_string());
        true
    }

    pub fn selected_node(&self) -> Option<&GameNode> {
        self.state.selected_node()
    }

    pub fn explore_node(&mut self) {
        encounter::explore_node(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn attack_enemy(&mut self) {
        encounter::attack_enemy(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn burst(&mut self) {
        encounter::burst(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn focus(&mut self) {
        encounter::focus(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn guard(&mut self) {
        encounter::guard(&mut self.state, &mut self.rng);
        self.persist();
    }

    pub fn retreat(&mut self) {
        encounter::retreat(&mut self.state);
        self.persist();
    }

    pub fn close_encounter(&mut self) {
        encounter::close_encounter(&mut self.state);
        self.persist();
    }

    pub fn tick(&mut self) {
        tick::tick(&mut self.state);
        self.persist();
    }

    // Saves

    /// Portable share code for the current state. Empty on a serialization
    /// failure, which is logged.
    pub fn generate_save_code(&self) -> String {
        let payload = create_save_payload(&self.state);
        match encode_save(&payload) {
            Ok(code) => code,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode save code");
                String::new()
            }
        }
    }

    /// Loads state from a share code. On any decode or version failure the
    /// current state is left untouched and false is returned.
    pub fn load_from_code(&mut self, code: &str) -> bool {
        let payload = match decode_save(code) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "rejected save code");
                self.state.notices.warn("That save code is not valid.");
                return false;
            }
        };
        if !apply_save_payload(&mut self.state, &payload) {
            self.state
                .notices
                .warn("That save code is from an incompatible version.");
            return false;
        }
        self.persist();
        true
    }

    /// Discards all progress and starts a new cycle.
    pub fn reset_game(&mut self) {
        self.state = GameState::new();
        self.state.log.push("A new cycle begins.");
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn engine() -> GameEngine<MemoryStore, ChaCha8Rng> {
        GameEngine::new(MemoryStore::new(), ChaCha8Rng::seed_from_u64(99))
    }

    #[test]
    fn test_fresh_engine_starts_a_new_game() {
        let engine = engine();
        assert_eq!(engine.state().resources.day, 1);
        assert!(!engine.is_game_over());
        assert!(engine.tutorial_hint().is_some());
    }

    #[test]
    fn test_mutators_write_through_to_store() {
        let mut engine = engine();
        engine.gather_plasma();

        let raw = engine.store.get(STORAGE_KEY).unwrap().unwrap();
        let payload: SavePayload = serde_json::from_str(&raw).unwrap();
        assert_eq!(payload.resources.plasma, INITIAL_PLASMA + 14.0);
    }

    #[test]
    fn test_engine_resumes_from_stored_save() {
        let mut engine = engine();
        engine.gather_plasma();
        engine.tick();
        let day = engine.state().resources.day;
        let store = std::mem::take(&mut engine.store);

        let resumed = GameEngine::new(store, ChaCha8Rng::seed_from_u64(1));
        assert_eq!(resumed.state().resources.day, day);
    }

    #[test]
    fn test_corrupt_stored_save_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{ not json").unwrap();
        let engine = GameEngine::new(store, ChaCha8Rng::seed_from_u64(1));
        assert_eq!(engine.state().resources.day, 1);
        assert_eq!(engine.state().resources.plasma, INITIAL_PLASMA);
    }

    #[test]
    fn test_unlock_module_logs_and_advances_tutorial() {
        let mut engine = engine();
        engine.state.resources.clots = 500.0;
        engine.state.resources.plasma = 500.0;
        let outcome = engine.unlock_module("pulse-harvester");
        assert_eq!(outcome, UnlockOutcome::Unlocked);
        assert!(engine
            .state()
            .log
            .entries()
            .any(|e| e.message.contains("online")));
        assert!(engine
            .state()
            .achievements
            .is_unlocked(crate::achievements::AchievementId::FirstModule));
    }

    #[test]
    fn test_activate_doctrine_requires_unlock() {
        let mut engine = engine();
        assert!(!engine.activate_doctrine("reaver"));
        assert!(engine.state().selected_doctrine.is_none());

        engine.state.resources.clots = 500.0;
        engine.state.resources.plasma = 500.0;
        engine.state.resources.essence = 500.0;
        engine.unlock_doctrine("reaver");
        assert!(engine.activate_doctrine("reaver"));
        assert_eq!(engine.state().selected_doctrine.as_deref(), Some("reaver"));
        assert!(engine
            .state()
            .achievements
            .is_unlocked(crate::achievements::AchievementId::DoctrineAdopted));
    }

    #[test]
    fn test_select_node_refused_in_battle() {
        let mut engine = engine();
        engine.state.nodes[1].discovered = true;
        assert!(engine.select_node("n2"));
        engine.state.resources.energy = 10.0;
        engine.explore_node();
        assert!(engine.state().encounter.is_some());
        assert!(!engine.select_node("n1"));
    }

    #[test]
    fn test_save_code_round_trip_via_engine() {
        let mut engine = engine();
        engine.gather_plasma();
        engine.tick();
        let code = engine.generate_save_code();
        assert!(!code.is_empty());
        let plasma = engine.state().resources.plasma;

        let mut other = GameEngine::new(MemoryStore::new(), ChaCha8Rng::seed_from_u64(5));
        assert!(other.load_from_code(&code));
        assert_eq!(other.state().resources.plasma, plasma);
    }

    #[test]
    fn test_bad_save_code_leaves_state_untouched() {
        let mut engine = engine();
        engine.gather_plasma();
        let plasma = engine.state().resources.plasma;
        assert!(!engine.load_from_code("@@@not-a-code@@@"));
        assert_eq!(engine.state().resources.plasma, plasma);
    }

    #[test]
    fn test_reset_game_discards_progress() {
        let mut engine = engine();
        engine.gather_plasma();
        engine.tick();
        engine.reset_game();
        assert_eq!(engine.state().resources.day, 1);
        assert_eq!(engine.state().resources.plasma, INITIAL_PLASMA);

        let raw = engine.store.get(STORAGE_KEY).unwrap().unwrap();
        let payload: SavePayload = serde_json::from_str(&raw).unwrap();
        assert_eq!(payload.resources.day, 1);
    }
}
