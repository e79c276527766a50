//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod actor;
pub mod bomb;
pub mod grid;
pub mod state;
pub mod tick;

pub use actor::{Actor, Direction, Mover};
pub use bomb::{Bomb, Detonation, Explosion, propagate};
pub use grid::{Grid, Tile};
pub use state::{COUPLET_COUNT, Enemy, GameEvent, GamePhase, GameState, Item, Player};
pub use tick::{TickInput, tick};
