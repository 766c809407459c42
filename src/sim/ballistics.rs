//! Shell launch and flight
//!
//! Explicit Euler at the fixed tick: position first, then gravity and wind are
//! added to the velocity. Units are pixels and pixels/tick.

use std::collections::VecDeque;

use glam::Vec2;

use super::state::{Aim, Player, PlayerSlot, Projectile, TRAIL_LENGTH};
use super::wind::Wind;
use crate::consts::*;
use crate::deg_to_rad;

/// Shell colors, bright red for player 1 and bright green for player 2
fn shell_color(slot: PlayerSlot) -> u32 {
    match slot {
        PlayerSlot::One => 0xff4444,
        PlayerSlot::Two => 0x44ff44,
    }
}

/// Firing direction in radians (standard math orientation, y up).
/// The second player's angle is mirrored so 0° always points at the opponent.
#[inline]
pub fn launch_direction(angle_deg: f32, is_second: bool) -> f32 {
    let radians = deg_to_rad(angle_deg);
    if is_second {
        std::f32::consts::PI - radians
    } else {
        radians
    }
}

/// Create a shell leaving `player`'s cannon muzzle
pub fn launch(player: &Player, aim: Aim, id: u32) -> Projectile {
    debug_assert!(aim.is_valid(), "aim must be clamped before firing: {aim:?}");

    let direction = launch_direction(aim.angle, player.is_second());
    let speed = aim.power * POWER_TO_VELOCITY;
    // Screen y grows downward, so the vertical component is negated
    let heading = Vec2::new(direction.cos(), -direction.sin());

    Projectile {
        id,
        pos: player.pos + heading * player.cannon_length,
        vel: heading * speed,
        radius: PROJECTILE_RADIUS,
        owner: player.slot,
        color: shell_color(player.slot),
        trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
    }
}

/// Advance a shell by one tick
pub fn step(projectile: &mut Projectile, wind: &Wind, gravity: f32) {
    projectile.record_trail();
    projectile.pos += projectile.vel;
    projectile.vel.y += gravity;
    projectile.vel.x += wind.force();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;
    use proptest::prelude::*;

    fn player(slot: PlayerSlot) -> Player {
        Player::new(slot, Arena::default())
    }

    #[test]
    fn test_launch_speed_and_muzzle() {
        let p1 = player(PlayerSlot::One);
        let shell = launch(&p1, Aim { angle: 0.0, power: 100.0 }, 1);
        assert!((shell.vel.x - 30.0).abs() < 1e-4);
        assert!(shell.vel.y.abs() < 1e-4);
        assert!((shell.pos.x - (p1.pos.x + CANNON_LENGTH)).abs() < 1e-4);
        assert_eq!(shell.owner, PlayerSlot::One);
    }

    #[test]
    fn test_second_player_mirrored() {
        let p2 = player(PlayerSlot::Two);
        let shell = launch(&p2, Aim { angle: 30.0, power: 50.0 }, 1);
        // Player 2 fires toward the left and upward
        assert!(shell.vel.x < 0.0);
        assert!(shell.vel.y < 0.0);

        let p1 = player(PlayerSlot::One);
        let mirror = launch(&p1, Aim { angle: 30.0, power: 50.0 }, 2);
        assert!((shell.vel.x + mirror.vel.x).abs() < 1e-4);
        assert!((shell.vel.y - mirror.vel.y).abs() < 1e-4);
    }

    #[test]
    fn test_step_applies_gravity_and_wind() {
        let p1 = player(PlayerSlot::One);
        let mut shell = launch(&p1, Aim { angle: 90.0, power: 50.0 }, 1);
        let start = shell.pos;
        let wind = Wind {
            strength: 1.0,
            direction: 1.0,
            ticks_since_change: 0,
        };
        step(&mut shell, &wind, GRAVITY);
        assert_eq!(shell.trail.back().copied(), Some(start));
        assert!((shell.pos.y - (start.y - 15.0)).abs() < 1e-3);
        assert!((shell.vel.y - (-15.0 + GRAVITY)).abs() < 1e-3);
        assert!((shell.vel.x - wind.force()).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn step_is_deterministic(angle in 0.0f32..=180.0, power in 0.0f32..=100.0, strength in 0.0f32..3.0, left in any::<bool>(), ticks in 1usize..300) {
            let wind = Wind { strength, direction: if left { -1.0 } else { 1.0 }, ticks_since_change: 0 };
            let p2 = player(PlayerSlot::Two);
            let mut a = launch(&p2, Aim { angle, power }, 1);
            let mut b = a.clone();
            for _ in 0..ticks {
                step(&mut a, &wind, GRAVITY);
                step(&mut b, &wind, GRAVITY);
            }
            prop_assert_eq!(a.pos, b.pos);
            prop_assert_eq!(a.vel, b.vel);
            prop_assert!(a.trail.len() <= TRAIL_LENGTH);
        }
    }
}
