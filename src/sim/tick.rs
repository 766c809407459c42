//! Fixed timestep simulation tick
//!
//! Turn state machine plus the per-tick update order:
//! wind → shells (step, collide, resolve, advance turn) → explosions → footing
//! → victory timer. A shell removed during a tick is never stepped again.

use std::fmt;

use super::ballistics;
use super::collision::{Hit, check_collision, out_of_bounds};
use super::deform::{deform, settle_player};
use super::state::{
    Aim, Explosion, GameEvent, GamePhase, MatchState, Player, PlayerSlot, Projectile,
    VictoryAnimation,
};
use super::terrain::Terrain;
use super::wind::Wind;
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New control values for the active player (clamped on apply)
    pub aim: Option<Aim>,
    /// Fire request from a player (fire button)
    pub fire: Option<PlayerSlot>,
    /// Start a fresh match before this tick runs
    pub reset: bool,
}

/// Why a fire request was refused. Refusals never change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireError {
    /// A winner has been decided; only reset can resume play
    MatchOver,
    /// The requesting player is not the active one
    NotYourTurn(PlayerSlot),
    /// The active player's shell is still in the air
    ShotInFlight,
}

impl fmt::Display for FireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FireError::MatchOver => write!(f, "match is over"),
            FireError::NotYourTurn(slot) => write!(f, "not player {}'s turn", slot.number()),
            FireError::ShotInFlight => write!(f, "a shot is already in flight"),
        }
    }
}

impl std::error::Error for FireError {}

/// Advance the match by one fixed timestep
pub fn tick(state: &mut MatchState, input: &TickInput) {
    if input.reset {
        reset(state);
    }

    if let Some(aim) = input.aim {
        set_aim(state, aim.angle, aim.power);
    }

    if let Some(slot) = input.fire {
        if let Err(err) = fire(state, slot) {
            log::debug!("Fire from player {} ignored: {}", slot.number(), err);
        }
    }

    state.time_ticks += 1;

    if state.wind.tick(&mut state.rng) {
        log::debug!(
            "Wind changed: {:.2} {}",
            state.wind.strength,
            if state.wind.direction > 0.0 { "→" } else { "←" }
        );
        state.emit(GameEvent::WindChanged {
            strength: state.wind.strength,
            direction: state.wind.direction,
        });
    }

    update_projectiles(state);

    state.explosions.retain_mut(|e| e.update());

    settle_players(state);

    state.victory.update();
}

/// Update the shared controls for the active player.
/// Values are clamped into range; ignored once the match is over.
pub fn set_aim(state: &mut MatchState, angle: f32, power: f32) {
    if state.phase.is_over() {
        return;
    }
    let aim = Aim::clamped(angle, power);
    if aim == state.aim {
        return;
    }
    let angle_changed = aim.angle != state.aim.angle;
    state.aim = aim;
    if angle_changed {
        state.emit(GameEvent::AimChanged {
            slot: state.active,
            angle: aim.angle,
        });
    }
}

/// Fire the active player's cannon with the current aim.
/// Returns the new shell's id.
pub fn fire(state: &mut MatchState, slot: PlayerSlot) -> Result<u32, FireError> {
    if state.phase.is_over() {
        return Err(FireError::MatchOver);
    }
    if slot != state.active {
        return Err(FireError::NotYourTurn(slot));
    }
    if !state.fire_enabled {
        return Err(FireError::ShotInFlight);
    }

    let aim = state.aim;
    state.player_mut(slot).remember_aim(aim);

    let id = state.next_entity_id();
    let projectile = ballistics::launch(state.player(slot), aim, id);
    log::debug!(
        "Player {} fires #{} at {:.0}° / {:.0}%",
        slot.number(),
        id,
        aim.angle,
        aim.power
    );
    state.projectiles.push(projectile);
    state.fire_enabled = false;
    state.emit(GameEvent::Fired {
        slot,
        projectile_id: id,
    });

    Ok(id)
}

/// Start a fresh match: new terrain and wind, full health, default aims
pub fn reset(state: &mut MatchState) {
    let arena = state.arena;
    state.terrain = Terrain::generate(arena.width, arena.height, &mut state.rng);
    state.wind = Wind::roll(&mut state.rng);
    state.players = [
        Player::new(PlayerSlot::One, arena),
        Player::new(PlayerSlot::Two, arena),
    ];
    state.projectiles.clear();
    state.explosions.clear();
    state.phase = GamePhase::Playing;
    state.active = PlayerSlot::One;
    state.aim = state.player(PlayerSlot::One).remembered_aim();
    state.fire_enabled = true;
    state.victory = VictoryAnimation::default();

    log::info!("Match reset (wind {:.2})", state.wind.strength);
    state.emit(GameEvent::MatchReset);
}

/// Step every shell, resolve hits, and advance the turn once per removal
fn update_projectiles(state: &mut MatchState) {
    let in_flight = std::mem::take(&mut state.projectiles);
    let mut remaining = Vec::with_capacity(in_flight.len());

    for mut projectile in in_flight {
        ballistics::step(&mut projectile, &state.wind, GRAVITY);

        match check_collision(&projectile, &state.terrain, &state.players, &state.arena) {
            Some(hit) => {
                resolve_hit(state, &projectile, hit);
                advance_turn(state);
            }
            None if out_of_bounds(&projectile, &state.arena) => {
                log::debug!("Shell #{} left the arena", projectile.id);
                advance_turn(state);
            }
            None => remaining.push(projectile),
        }
    }

    debug_assert!(state.projectiles.is_empty());
    state.projectiles = remaining;
}

/// Apply the effects of a confirmed hit
fn resolve_hit(state: &mut MatchState, projectile: &Projectile, hit: Hit) {
    let pos = projectile.pos;
    state.explosions.push(Explosion::new(pos));
    state.emit(GameEvent::Explosion { pos });

    match hit {
        Hit::Terrain => {
            log::debug!("Shell #{} hit ground at ({:.0}, {:.0})", projectile.id, pos.x, pos.y);
            let floor = state.arena.ground_floor();
            deform(&mut state.terrain, pos, BLAST_RADIUS, floor);
            settle_players(state);
        }
        Hit::Player(slot) => damage_player(state, slot),
    }
}

fn damage_player(state: &mut MatchState, slot: PlayerSlot) {
    // Stray shells landing after the decision do nothing
    if !state.is_playing() {
        return;
    }

    let health = state.player_mut(slot).apply_damage(HIT_DAMAGE);
    log::info!("Player {} hit, health {}", slot.number(), health);
    state.emit(GameEvent::PlayerHit { slot, health });

    if health == 0 {
        declare_winner(state, slot.other());
    }
}

fn declare_winner(state: &mut MatchState, winner: PlayerSlot) {
    state.phase = GamePhase::won_by(winner);
    state.fire_enabled = false;
    state.victory.start(winner);
    log::info!("Player {} wins", winner.number());
    state.emit(GameEvent::Victory { winner });
}

/// Hand the turn to the other player after a shell is removed
fn advance_turn(state: &mut MatchState) {
    if !state.is_playing() {
        return;
    }
    state.active = state.active.other();
    state.aim = state.active_player().remembered_aim();
    state.fire_enabled = true;
    state.emit(GameEvent::TurnChanged {
        active: state.active,
    });
}

fn settle_players(state: &mut MatchState) {
    let ground = state.arena.default_ground();
    for player in &mut state.players {
        settle_player(player, &state.terrain, ground);
    }
}
