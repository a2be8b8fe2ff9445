//! The passive day tick. The caller drives cadence; there is no internal
//! clock.

use crate::constants::*;
use crate::state::GameState;
use crate::stats::{aggregate_stats, derived_stats, economy_bonuses};

/// Advances one day: passive plasma and energy income, masking decay, threat
/// creep, and the threat storm. Refuses entirely once the game is over.
pub fn tick(state: &mut GameState) {
    if state.is_game_over() {
        return;
    }

    state.resources.day += 1;

    let derived = derived_stats(state);
    state.resources.plasma += derived.plasma_rate;
    state.resources.energy = (state.resources.energy + TICK_ENERGY_REGEN).min(derived.max_energy);
    state.resources.masking = (state.resources.masking - TICK_MASKING_DECAY).max(0.0);

    let masking_stat = aggregate_stats(state).masking;
    let creep =
        (TICK_BASE_THREAT_GAIN - masking_stat * TICK_MASKING_THREAT_SUPPRESSION).max(0.0);
    let shift = economy_bonuses(state).threat_shift;
    state.resources.threat = (state.resources.threat + creep + shift).clamp(0.0, THREAT_MAX);

    if state.resources.threat >= THREAT_STORM_THRESHOLD {
        state.resources.integrity = (state.resources.integrity - THREAT_STORM_DAMAGE).max(0.0);
        state.log.push("An immune storm batters the citadel.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_passive_income() {
        let mut state = GameState::new();
        state.resources.energy = 2.0;
        tick(&mut state);
        assert_eq!(state.resources.day, 2);
        assert_eq!(state.resources.plasma, INITIAL_PLASMA + 1.2);
        assert_eq!(state.resources.energy, 2.6);
        assert_eq!(state.resources.masking, INITIAL_MASKING - TICK_MASKING_DECAY);
        // Fresh masking stat is 0, so the full base creep applies
        assert_eq!(state.resources.threat, INITIAL_THREAT + TICK_BASE_THREAT_GAIN);
    }

    #[test]
    fn test_energy_caps_at_max() {
        let mut state = GameState::new();
        state.resources.energy = 5.9;
        tick(&mut state);
        assert_eq!(state.resources.energy, 6.0);
    }

    #[test]
    fn test_masking_stat_suppresses_threat_creep() {
        let mut state = GameState::new();
        let module = state
            .modules
            .iter_mut()
            .find(|m| m.effects.masking > 0.0)
            .unwrap();
        module.unlocked = true;
        module.level = 3;
        let masking_stat = module.effects.masking * 3.0;
        let expected =
            (TICK_BASE_THREAT_GAIN - masking_stat * TICK_MASKING_THREAT_SUPPRESSION).max(0.0);

        tick(&mut state);
        assert!((state.resources.threat - (INITIAL_THREAT + expected)).abs() < 1e-9);
    }

    #[test]
    fn test_threat_storm_damages_integrity() {
        let mut state = GameState::new();
        state.resources.threat = 95.0;
        tick(&mut state);
        assert_eq!(state.resources.integrity, INITIAL_INTEGRITY - THREAT_STORM_DAMAGE);
        assert!(state
            .log
            .entries()
            .any(|e| e.message.contains("immune storm")));
    }

    #[test]
    fn test_bounds_hold_under_repeated_ticks() {
        let mut state = GameState::new();
        state.resources.threat = 100.0;
        state.resources.masking = 0.1;
        for _ in 0..50 {
            tick(&mut state);
            if state.is_game_over() {
                break;
            }
            assert!(state.resources.threat <= THREAT_MAX);
            assert!(state.resources.masking >= 0.0);
            assert!(state.resources.integrity >= 0.0);
        }
        // Sustained max threat eventually breaks the citadel
        assert!(state.is_game_over());
    }

    #[test]
    fn test_tick_refuses_when_game_over() {
        let mut state = GameState::new();
        state.resources.integrity = 0.0;
        tick(&mut state);
        assert_eq!(state.resources.day, 1);
        assert_eq!(state.resources.plasma, INITIAL_PLASMA);
    }

    #[test]
    fn test_day_monotonic() {
        let mut state = GameState::new();
        for expected in 2..10 {
            tick(&mut state);
            assert_eq!(state.resources.day, expected);
        }
    }
}
