//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ballistics;
pub mod collision;
pub mod deform;
pub mod snapshot;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod wind;

pub use collision::{Hit, check_collision};
pub use snapshot::Snapshot;
pub use state::{
    Aim, Arena, Explosion, GameEvent, GamePhase, MatchState, Player, PlayerSlot, Projectile,
    TRAIL_LENGTH, VictoryAnimation,
};
pub use terrain::Terrain;
pub use tick::{FireError, TickInput, fire, reset, set_aim, tick};
pub use wind::Wind;
