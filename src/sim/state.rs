//! Match state and core simulation types
//!
//! Everything the tick mutates hangs off [`MatchState`]; the component modules
//! are free functions over it.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use super::wind::Wind;
use crate::consts::*;

/// Which of the two tanks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    /// Index into `MatchState::players`
    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }

    /// The opponent
    #[inline]
    pub fn other(self) -> Self {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// 1-based player number, as shown to humans
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(PlayerSlot::One),
            2 => Some(PlayerSlot::Two),
            _ => None,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Turns alternate between the two tanks
    Playing,
    Player1Wins,
    Player2Wins,
}

impl GamePhase {
    /// Terminal phase won by `slot`
    pub fn won_by(slot: PlayerSlot) -> Self {
        match slot {
            PlayerSlot::One => GamePhase::Player1Wins,
            PlayerSlot::Two => GamePhase::Player2Wins,
        }
    }

    pub fn winner(self) -> Option<PlayerSlot> {
        match self {
            GamePhase::Playing => None,
            GamePhase::Player1Wins => Some(PlayerSlot::One),
            GamePhase::Player2Wins => Some(PlayerSlot::Two),
        }
    }

    #[inline]
    pub fn is_over(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Launch controls: angle in degrees (0 = toward the opponent, 90 = up) and
/// power in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub angle: f32,
    pub power: f32,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            angle: DEFAULT_ANGLE,
            power: DEFAULT_POWER,
        }
    }
}

impl Aim {
    /// Build an aim from raw control values, clamped into range.
    /// NaN falls back to the default for that control.
    pub fn clamped(angle: f32, power: f32) -> Self {
        let angle = if angle.is_nan() { DEFAULT_ANGLE } else { angle };
        let power = if power.is_nan() { DEFAULT_POWER } else { power };
        Self {
            angle: angle.clamp(0.0, MAX_ANGLE),
            power: power.clamp(0.0, MAX_POWER),
        }
    }

    pub fn is_valid(&self) -> bool {
        (0.0..=MAX_ANGLE).contains(&self.angle) && (0.0..=MAX_POWER).contains(&self.power)
    }
}

/// A tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub slot: PlayerSlot,
    /// Anchor point: x is fixed for the match, y follows the footing
    pub pos: Vec2,
    pub health: u32,
    /// 0xRRGGBB
    pub color: u32,
    pub width: f32,
    pub height: f32,
    pub turret_radius: f32,
    pub cannon_length: f32,
    /// Aim used for this player's previous shot, restored on their turn
    pub last_angle: f32,
    pub last_power: f32,
}

impl Player {
    pub fn new(slot: PlayerSlot, arena: Arena) -> Self {
        let x = match slot {
            PlayerSlot::One => PLAYER_INSET,
            PlayerSlot::Two => arena.width - PLAYER_INSET,
        };
        let color = match slot {
            PlayerSlot::One => 0x4a7c59,
            PlayerSlot::Two => 0x2d5016,
        };
        Self {
            slot,
            pos: Vec2::new(x, arena.height - PLAYER_START_OFFSET),
            health: MAX_HEALTH,
            color,
            width: TANK_WIDTH,
            height: TANK_HEIGHT,
            turret_radius: TURRET_RADIUS,
            cannon_length: CANNON_LENGTH,
            last_angle: DEFAULT_ANGLE,
            last_power: DEFAULT_POWER,
        }
    }

    /// Second player's controls are mirrored
    #[inline]
    pub fn is_second(&self) -> bool {
        self.slot == PlayerSlot::Two
    }

    pub fn remembered_aim(&self) -> Aim {
        Aim {
            angle: self.last_angle,
            power: self.last_power,
        }
    }

    pub fn remember_aim(&mut self, aim: Aim) {
        self.last_angle = aim.angle;
        self.last_power = aim.power;
    }

    /// Subtract damage, saturating at zero. Returns the remaining health.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// A shell in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub owner: PlayerSlot,
    /// 0xRRGGBB
    pub color: u32,
    /// Previous positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Projectile {
    /// Record current position to trail (call each tick before moving)
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}

/// Expanding fireball left behind by an impact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub life: u32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            radius: 0.0,
            max_radius: EXPLOSION_MAX_RADIUS,
            life: EXPLOSION_LIFE_TICKS,
        }
    }

    /// Grow and fade; returns false once burnt out
    pub fn update(&mut self) -> bool {
        self.radius = (self.radius + EXPLOSION_GROWTH).min(self.max_radius);
        self.life = self.life.saturating_sub(1);
        self.life > 0
    }
}

/// Presentational victory sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VictoryAnimation {
    pub active: bool,
    pub winner: Option<PlayerSlot>,
    pub timer: u32,
}

impl VictoryAnimation {
    pub fn start(&mut self, winner: PlayerSlot) {
        self.active = true;
        self.winner = Some(winner);
        self.timer = 0;
    }

    pub fn update(&mut self) {
        if self.active && self.timer < VICTORY_DURATION_TICKS {
            self.timer += 1;
        }
    }

    /// 0-1 progress through the sequence
    pub fn progress(&self) -> f32 {
        self.timer as f32 / VICTORY_DURATION_TICKS as f32
    }
}

/// Notifications for audio, animation and HUD collaborators.
/// The simulation never waits on any consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { slot: PlayerSlot, projectile_id: u32 },
    Explosion { pos: Vec2 },
    PlayerHit { slot: PlayerSlot, health: u32 },
    Victory { winner: PlayerSlot },
    WindChanged { strength: f32, direction: f32 },
    TurnChanged { active: PlayerSlot },
    AimChanged { slot: PlayerSlot, angle: f32 },
    MatchReset,
}

/// Playing field bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    /// Deepest y any terrain point may reach
    #[inline]
    pub fn ground_floor(&self) -> f32 {
        self.height - GROUND_MARGIN
    }

    /// Resting ground level assumed when no terrain lies beneath a tank
    #[inline]
    pub fn default_ground(&self) -> f32 {
        self.height - GROUND_HEIGHT
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y <= self.height
    }
}

/// Complete match state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub arena: Arena,
    pub terrain: Terrain,
    pub players: [Player; 2],
    /// In-flight shells (sorted by id)
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub wind: Wind,
    pub phase: GamePhase,
    pub active: PlayerSlot,
    /// Shared control surface, restored per player on each turn change
    pub aim: Aim,
    /// False while the active player's shot is in flight
    pub fire_enabled: bool,
    pub victory: VictoryAnimation,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending notifications, drained by the host
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl MatchState {
    /// Create a new match with the given seed in the default arena
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, Arena::default())
    }

    pub fn with_arena(seed: u64, arena: Arena) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::generate(arena.width, arena.height, &mut rng);
        let wind = Wind::roll(&mut rng);

        Self {
            seed,
            rng,
            arena,
            terrain,
            players: [
                Player::new(PlayerSlot::One, arena),
                Player::new(PlayerSlot::Two, arena),
            ],
            projectiles: Vec::new(),
            explosions: Vec::new(),
            wind,
            phase: GamePhase::Playing,
            active: PlayerSlot::One,
            aim: Aim::default(),
            fire_enabled: true,
            victory: VictoryAnimation::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn player(&self, slot: PlayerSlot) -> &Player {
        &self.players[slot.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut Player {
        &mut self.players[slot.index()]
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
