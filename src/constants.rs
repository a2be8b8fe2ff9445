// Starting resources for a fresh citadel
pub const INITIAL_CLOTS: f64 = 25.0;
pub const INITIAL_PLASMA: f64 = 60.0;
pub const INITIAL_ESSENCE: f64 = 2.0;
pub const INITIAL_ENERGY: f64 = 5.0;
pub const INITIAL_THREAT: f64 = 12.0;
pub const INITIAL_MASKING: f64 = 65.0;
pub const INITIAL_INTEGRITY: f64 = 100.0;

// Resource bounds
pub const THREAT_MAX: f64 = 100.0;
pub const MASKING_MAX: f64 = 100.0;

// Experience thresholds; level N requires LEVEL_THRESHOLDS[N-1] experience
pub const LEVEL_THRESHOLDS: [f64; 9] = [
    0.0, 60.0, 150.0, 280.0, 450.0, 650.0, 900.0, 1200.0, 1600.0,
];
pub const LEVEL_UP_INTEGRITY_BONUS: f64 = 6.0;

// Base derived stats before level/doctrine/module contributions
pub const BASE_MAX_ENERGY: f64 = 6.0;
pub const BASE_PLASMA_RATE: f64 = 1.2;
pub const BASE_ATTACK_POWER: f64 = 6.0;
pub const BASE_MAX_INTEGRITY: f64 = 100.0;

// Encounter constants
pub const EXPLORE_ENERGY_COST: f64 = 2.0;
pub const BATTLE_BASE_HP: f64 = 38.0;
pub const BOSS_BASE_HP: f64 = 80.0;
pub const ENEMY_HP_PER_DIFFICULTY: f64 = 8.0;
pub const ENEMY_BASE_ATTACK: f64 = 7.0;
pub const ENEMY_ATTACK_PER_DIFFICULTY: f64 = 2.4;
pub const BASE_CRIT_CHANCE: f64 = 0.10;
pub const CRIT_CHANCE_PER_LEVEL: f64 = 0.02;
pub const CRIT_MULTIPLIER: f64 = 1.8;
pub const FOCUS_MULTIPLIER: f64 = 1.35;
pub const GUARD_DAMAGE_FACTOR: f64 = 0.55;
pub const PIERCE_DEFENSE_FACTOR: f64 = 0.3;
pub const BURST_DAMAGE_BONUS: f64 = 12.0;
pub const BURST_CLOT_FEE: f64 = 6.0;
pub const RETREAT_THREAT_PENALTY: f64 = 8.0;
pub const ATTACK_KILL_XP: f64 = 24.0;
pub const BURST_KILL_XP: f64 = 30.0;
pub const NON_BATTLE_CLEAR_XP: f64 = 10.0;

// Passive tick constants
pub const TICK_ENERGY_REGEN: f64 = 0.6;
pub const TICK_MASKING_DECAY: f64 = 0.4;
pub const TICK_BASE_THREAT_GAIN: f64 = 0.6;
pub const TICK_MASKING_THREAT_SUPPRESSION: f64 = 0.05;
pub const THREAT_STORM_THRESHOLD: f64 = 90.0;
pub const THREAT_STORM_DAMAGE: f64 = 4.0;

// Economy constants
pub const GATHER_BASE_PLASMA: f64 = 14.0;
pub const GATHER_PLASMA_PER_RATE_STAT: f64 = 3.0;
pub const REFINE_PLASMA_COST: f64 = 18.0;
pub const REFINE_CLOT_OUTPUT: f64 = 6.0;
pub const TRANSMUTE_CLOT_COST: f64 = 12.0;
pub const TRANSMUTE_ESSENCE_OUTPUT: f64 = 3.0;
pub const REINFORCE_ESSENCE_COST: f64 = 2.0;
pub const REINFORCE_MASKING_GAIN: f64 = 6.0;
pub const REINFORCE_THREAT_DROP: f64 = 8.0;
pub const SCAN_THREAT_DROP: f64 = 6.0;
pub const SCAN_DISCOVERY_CHANCE: f64 = 0.3;
pub const STABILIZE_PLASMA_COST: f64 = 20.0;
pub const STABILIZE_ESSENCE_COST: f64 = 1.0;
pub const STABILIZE_INTEGRITY_GAIN: f64 = 10.0;
pub const ADVANCE_ESSENCE_COST: f64 = 4.0;
pub const ADVANCE_THREAT_GAIN: f64 = 6.0;

// Cost reductions from resource upgrades never exceed this fraction
pub const MAX_COST_REDUCTION: f64 = 0.5;

// Log and notice ring buffer capacities
pub const LOG_CAPACITY: usize = 40;
pub const NOTICE_CAPACITY: usize = 8;

// Save system constants
pub const SAVE_VERSION: u32 = 3;
pub const STORAGE_KEY: &str = "citadel_state_v3";
