//! Read-only view of a match for renderers and HUDs

use serde::Serialize;

use super::state::{
    Aim, Arena, Explosion, GamePhase, MatchState, Player, PlayerSlot, Projectile, VictoryAnimation,
};
use super::terrain::Terrain;
use super::wind::Wind;

/// Everything a frame needs to draw, borrowed from the match
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    pub arena: Arena,
    pub phase: GamePhase,
    pub active: PlayerSlot,
    pub aim: Aim,
    pub fire_enabled: bool,
    pub terrain: &'a Terrain,
    pub players: &'a [Player; 2],
    pub projectiles: &'a [Projectile],
    pub explosions: &'a [Explosion],
    pub wind: Wind,
    pub victory: &'a VictoryAnimation,
    /// 0-1 through the victory sequence
    pub victory_progress: f32,
    /// HUD height of each tank, see [`Snapshot::player_altitude`]
    pub altitudes: [u32; 2],
}

/// Tank height above the base ground line, in HUD meters (10 px each)
fn altitude(arena: &Arena, player: &Player) -> u32 {
    let height = (arena.default_ground() - player.pos.y) / 10.0;
    height.round().max(0.0) as u32
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a MatchState) -> Self {
        Self {
            tick: state.time_ticks,
            arena: state.arena,
            phase: state.phase,
            active: state.active,
            aim: state.aim,
            fire_enabled: state.fire_enabled,
            terrain: &state.terrain,
            players: &state.players,
            projectiles: &state.projectiles,
            explosions: &state.explosions,
            wind: state.wind,
            victory: &state.victory,
            victory_progress: state.victory.progress(),
            altitudes: [
                altitude(&state.arena, &state.players[0]),
                altitude(&state.arena, &state.players[1]),
            ],
        }
    }

    /// HUD status line
    pub fn status_text(&self) -> String {
        match self.phase.winner() {
            Some(winner) => format!("Player {} Wins!", winner.number()),
            None => format!("Player {}'s Turn", self.active.number()),
        }
    }

    /// Tank height above the base ground line, in HUD meters (10 px each)
    pub fn player_altitude(&self, slot: PlayerSlot) -> u32 {
        self.altitudes[slot.index()]
    }
}
