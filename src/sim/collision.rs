//! Collision detection for shells against terrain and tanks
//!
//! Pure queries only; damage, deformation and turn changes are applied by the
//! tick. Checks run in a fixed order and the first positive wins, so a shell
//! that is simultaneously near the ground and near a tank always counts as a
//! terrain hit.

use glam::Vec2;

use super::state::{Arena, Player, PlayerSlot, Projectile};
use super::terrain::Terrain;
use crate::consts::*;

/// What a shell struck this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Ground contact (terrain sample or the arena floor)
    Terrain,
    /// Direct hit on a tank
    Player(PlayerSlot),
}

/// True if `pos` is close to a terrain sample and at or past its surface
pub fn hits_terrain(pos: Vec2, terrain: &Terrain) -> bool {
    terrain.points().iter().any(|point| {
        pos.distance(*point) < TERRAIN_HIT_DISTANCE && pos.y >= point.y - TERRAIN_HIT_TOLERANCE
    })
}

/// Safety net: nothing falls through the bottom of the arena
#[inline]
pub fn hits_ground_level(pos: Vec2, arena: &Arena) -> bool {
    pos.y >= arena.height - GROUND_MARGIN
}

/// First tank within blast range of `pos`, ignoring the shell's owner
pub fn hits_player(pos: Vec2, owner: PlayerSlot, players: &[Player]) -> Option<PlayerSlot> {
    players
        .iter()
        .filter(|p| p.slot != owner)
        .find(|p| pos.distance(p.pos) < PLAYER_HIT_DISTANCE)
        .map(|p| p.slot)
}

/// Test a shell against the world after it has moved this tick
pub fn check_collision(
    projectile: &Projectile,
    terrain: &Terrain,
    players: &[Player],
    arena: &Arena,
) -> Option<Hit> {
    if hits_terrain(projectile.pos, terrain) || hits_ground_level(projectile.pos, arena) {
        return Some(Hit::Terrain);
    }
    hits_player(projectile.pos, projectile.owner, players).map(Hit::Player)
}

/// Shell has left the arena through a side or the bottom
#[inline]
pub fn out_of_bounds(projectile: &Projectile, arena: &Arena) -> bool {
    !arena.contains(projectile.pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn shell_at(pos: Vec2, owner: PlayerSlot) -> Projectile {
        Projectile {
            id: 1,
            pos,
            vel: Vec2::ZERO,
            radius: PROJECTILE_RADIUS,
            owner,
            color: 0,
            trail: VecDeque::new(),
        }
    }

    fn setup() -> (Terrain, [Player; 2], Arena) {
        let arena = Arena::default();
        let terrain = Terrain::flat(arena.width, 500.0);
        let mut players = [
            Player::new(PlayerSlot::One, arena),
            Player::new(PlayerSlot::Two, arena),
        ];
        players[0].pos.y = 477.0;
        players[1].pos.y = 477.0;
        (terrain, players, arena)
    }

    #[test]
    fn test_miss_in_open_air() {
        let (terrain, players, arena) = setup();
        let shell = shell_at(Vec2::new(600.0, 200.0), PlayerSlot::One);
        assert_eq!(check_collision(&shell, &terrain, &players, &arena), None);
    }

    #[test]
    fn test_terrain_hit_requires_surface_contact() {
        let (terrain, players, arena) = setup();
        // 8px above a sample: inside the distance but not at the surface yet
        let above = shell_at(Vec2::new(600.0, 492.0), PlayerSlot::One);
        assert_eq!(check_collision(&above, &terrain, &players, &arena), None);

        let touching = shell_at(Vec2::new(600.0, 496.0), PlayerSlot::One);
        assert_eq!(
            check_collision(&touching, &terrain, &players, &arena),
            Some(Hit::Terrain)
        );
    }

    #[test]
    fn test_ground_level_safety_net() {
        let arena = Arena::default();
        let terrain = Terrain::flat(arena.width, 300.0);
        let players = [
            Player::new(PlayerSlot::One, arena),
            Player::new(PlayerSlot::Two, arena),
        ];
        // Far below the surface samples, beyond the proximity check
        let shell = shell_at(Vec2::new(600.0, arena.height - 5.0), PlayerSlot::One);
        assert_eq!(
            check_collision(&shell, &terrain, &players, &arena),
            Some(Hit::Terrain)
        );
    }

    #[test]
    fn test_player_hit() {
        let (terrain, players, arena) = setup();
        let target = players[1].pos;
        let shell = shell_at(target - Vec2::new(0.0, 20.0), PlayerSlot::One);
        assert_eq!(
            check_collision(&shell, &terrain, &players, &arena),
            Some(Hit::Player(PlayerSlot::Two))
        );
    }

    #[test]
    fn test_owner_is_immune() {
        let (terrain, players, arena) = setup();
        let shell = shell_at(players[0].pos - Vec2::new(0.0, 20.0), PlayerSlot::One);
        assert_eq!(check_collision(&shell, &terrain, &players, &arena), None);
    }

    #[test]
    fn test_terrain_wins_tie() {
        let (terrain, players, arena) = setup();
        // Within 30 of player 2's anchor and touching the ground
        let pos = Vec2::new(players[1].pos.x, 497.0);
        assert!(pos.distance(players[1].pos) < PLAYER_HIT_DISTANCE);
        let shell = shell_at(pos, PlayerSlot::One);
        assert_eq!(
            check_collision(&shell, &terrain, &players, &arena),
            Some(Hit::Terrain)
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let arena = Arena::default();
        assert!(out_of_bounds(&shell_at(Vec2::new(-1.0, 100.0), PlayerSlot::One), &arena));
        assert!(out_of_bounds(&shell_at(Vec2::new(1201.0, 100.0), PlayerSlot::One), &arena));
        assert!(out_of_bounds(&shell_at(Vec2::new(100.0, 601.0), PlayerSlot::One), &arena));
        // Above the top edge is still in play
        assert!(!out_of_bounds(&shell_at(Vec2::new(100.0, -500.0), PlayerSlot::One), &arena));
    }
}
