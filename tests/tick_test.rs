//! Passive tick integration: day advancement, regeneration, threat creep,
//! storms, and the game-over freeze.

use citadel::constants::*;
use citadel::state::GameState;
use citadel::tick::tick;

#[test]
fn test_single_tick_from_fresh_state() {
    let mut state = GameState::new();
    tick(&mut state);
    assert_eq!(state.resources.day, 2);
    assert_eq!(state.resources.plasma, INITIAL_PLASMA + 1.2);
    // Energy regenerates toward the cap of 6
    assert_eq!(state.resources.energy, 5.6);
    assert_eq!(state.resources.masking, INITIAL_MASKING - 0.4);
    assert_eq!(state.resources.threat, INITIAL_THREAT + 0.6);
    assert_eq!(state.resources.integrity, INITIAL_INTEGRITY);
}

#[test]
fn test_long_idle_stretch_keeps_bounds() {
    let mut state = GameState::new();
    for _ in 0..500 {
        tick(&mut state);
        assert!(state.resources.threat <= THREAT_MAX);
        assert!(state.resources.masking >= 0.0);
        assert!(state.resources.integrity >= 0.0);
        assert!(state.resources.energy <= 6.0);
        if state.is_game_over() {
            break;
        }
    }
    // With nothing done about threat, the citadel eventually falls
    assert!(state.is_game_over());
    let day_at_death = state.resources.day;
    tick(&mut state);
    assert_eq!(state.resources.day, day_at_death);
}

#[test]
fn test_storm_fires_only_above_threshold() {
    let mut state = GameState::new();
    state.resources.threat = THREAT_STORM_THRESHOLD - 1.0;
    tick(&mut state);
    assert_eq!(state.resources.integrity, INITIAL_INTEGRITY);

    state.resources.threat = THREAT_STORM_THRESHOLD;
    tick(&mut state);
    assert_eq!(state.resources.integrity, INITIAL_INTEGRITY - THREAT_STORM_DAMAGE);
}

#[test]
fn test_masking_modules_slow_threat_creep() {
    let mut reference = GameState::new();
    let mut shrouded = GameState::new();
    let module = shrouded
        .modules
        .iter_mut()
        .find(|m| m.id == "veil-shroud")
        .unwrap();
    module.unlocked = true;
    module.level = 1;

    tick(&mut reference);
    tick(&mut shrouded);
    assert!(shrouded.resources.threat < reference.resources.threat);
}

#[test]
fn test_threat_shift_upgrade_applies_each_tick() {
    let mut state = GameState::new();
    let upgrade = state
        .resource_upgrades
        .iter_mut()
        .find(|u| u.id == "veiled-channels")
        .unwrap();
    upgrade.unlocked = true;
    upgrade.level = 1;

    tick(&mut state);
    // 0.6 base creep, -0.1 shift
    assert!((state.resources.threat - (INITIAL_THREAT + 0.5)).abs() < 1e-9);
}

#[test]
fn test_tick_respects_raised_energy_cap() {
    let mut state = GameState::new();
    let module = state
        .modules
        .iter_mut()
        .find(|m| m.id == "power-loop")
        .unwrap();
    module.unlocked = true;
    module.level = 1;
    state.resources.energy = 7.5;

    tick(&mut state);
    // power-loop raises max energy from 6 to 8
    assert_eq!(state.resources.energy, 8.0);
}
