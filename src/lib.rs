//! State-and-rules engine for a single-player incremental game: a living
//! citadel in a hostile bloodstream. Resources convert along a chain, three
//! progression trees grant passive power, map sectors are discovered and
//! cleared, battle sectors run a turn-based encounter, and the whole state
//! round-trips through versioned saves and portable share codes.
//!
//! There is no UI and no clock in here; a frontend owns both and drives the
//! engine through [`engine::GameEngine`].

pub mod achievements;
pub mod codec;
pub mod constants;
pub mod economy;
pub mod encounter;
pub mod engine;
pub mod log;
pub mod map;
pub mod progression;
pub mod resources;
pub mod save;
pub mod state;
pub mod stats;
pub mod store;
pub mod tick;
pub mod tutorial;

pub use engine::GameEngine;
pub use state::GameState;
pub use store::{FileStore, KvStore, MemoryStore};
