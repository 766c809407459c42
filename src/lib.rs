//! Tank Duel - A two-player artillery duel on destructible terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, wind, ballistics, collisions, turns)
//! - `runner`: Fixed-step scheduler decoupling host frames from sim ticks
//! - `audio`: Sound cues derived from simulation events
//! - `animation`: Optional cannon elevation observer
//! - `settings`: Player preferences
//! - `web`: Browser bindings (wasm32 only)

pub mod animation;
pub mod audio;
pub mod runner;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use runner::FixedStep;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Terrain sampling
    pub const TERRAIN_SPACING: f32 = 5.0;
    /// Base terrain line sits this far above the arena bottom
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Nothing (terrain or projectile) goes deeper than `height - GROUND_MARGIN`
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 0.3;
    /// Launch speed per power percent
    pub const POWER_TO_VELOCITY: f32 = 0.3;
    pub const PROJECTILE_RADIUS: f32 = 3.0;

    /// Wind
    pub const WIND_MAX_STRENGTH: f32 = 3.0;
    pub const WIND_FORCE_SCALE: f32 = 0.02;
    /// 5 seconds at 60 Hz
    pub const WIND_CHANGE_INTERVAL_TICKS: u32 = 5 * TICK_RATE;

    /// Collision thresholds
    pub const TERRAIN_HIT_DISTANCE: f32 = 10.0;
    pub const TERRAIN_HIT_TOLERANCE: f32 = 5.0;
    pub const PLAYER_HIT_DISTANCE: f32 = 30.0;
    pub const HIT_DAMAGE: u32 = 25;

    /// Crater carved by every impact
    pub const BLAST_RADIUS: f32 = 40.0;
    pub const CRATER_DEPTH_SCALE: f32 = 0.5;
    /// Share of the neighbour mean blended in by the smoothing pass
    pub const SMOOTHING_WEIGHT: f32 = 0.3;

    /// Tank defaults
    pub const MAX_HEALTH: u32 = 100;
    pub const PLAYER_INSET: f32 = 150.0;
    pub const PLAYER_START_OFFSET: f32 = 80.0;
    pub const TANK_WIDTH: f32 = 35.0;
    pub const TANK_HEIGHT: f32 = 18.0;
    pub const TURRET_RADIUS: f32 = 10.0;
    pub const CANNON_LENGTH: f32 = 35.0;
    pub const DEFAULT_ANGLE: f32 = 45.0;
    pub const DEFAULT_POWER: f32 = 50.0;
    pub const MAX_ANGLE: f32 = 180.0;
    pub const MAX_POWER: f32 = 100.0;

    /// Footing: horizontal half-window scanned beneath a tank
    pub const FOOTING_WINDOW: f32 = 20.0;
    pub const FOOTING_CLEARANCE: f32 = 5.0;
    /// Max fall per tick
    pub const FALL_SPEED: f32 = 2.0;

    /// Explosion visuals
    pub const EXPLOSION_MAX_RADIUS: f32 = 30.0;
    pub const EXPLOSION_GROWTH: f32 = 2.0;
    pub const EXPLOSION_LIFE_TICKS: u32 = 20;

    /// Victory sequence length
    pub const VICTORY_DURATION_TICKS: u32 = 300;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
