//! Crater carving and tank footing
//!
//! Impacts push terrain samples down, then a local smoothing pass rounds the
//! crater off. Terrain only ever moves down and never past the ground floor,
//! so tanks either fall onto lower ground or stay put.

use glam::Vec2;

use super::state::Player;
use super::terrain::Terrain;
use crate::consts::*;

/// Carve a crater centered on `center`.
///
/// Samples closer than `radius` sink by `(radius - distance) * CRATER_DEPTH_SCALE`,
/// capped at `floor`. The touched span plus one neighbour on each side is then
/// smoothed in place. Returns true if any sample was touched.
pub fn deform(terrain: &mut Terrain, center: Vec2, radius: f32, floor: f32) -> bool {
    let points = terrain.points_mut();
    let in_blast = |p: &Vec2| p.distance(center) < radius;

    let (Some(first), Some(last)) = (
        points.iter().position(in_blast),
        points.iter().rposition(in_blast),
    ) else {
        return false;
    };

    let start = first.saturating_sub(1);
    let end = (last + 1).min(points.len() - 1);
    let before: Vec<f32> = points[start..=end].iter().map(|p| p.y).collect();

    for point in &mut points[first..=last] {
        let distance = point.distance(center);
        if distance < radius {
            let lowered = point.y + (radius - distance) * CRATER_DEPTH_SCALE;
            point.y = lowered.min(floor.max(point.y));
        }
    }

    smooth_span(points, start, end, &before, floor);
    true
}

/// One neighbour-averaging pass over `points[start..=end]` (interior samples only).
/// `before` holds the pre-crater heights of the span; no sample rises above it.
fn smooth_span(points: &mut [Vec2], start: usize, end: usize, before: &[f32], floor: f32) {
    if points.len() < 3 {
        return;
    }
    let lo = start.max(1);
    let hi = end.min(points.len() - 2);

    for i in lo..=hi {
        let prev = points[i - 1].y;
        let current = points[i].y;
        let next = points[i + 1].y;

        let mean = (prev + current + next) / 3.0;
        let smoothed = current * (1.0 - SMOOTHING_WEIGHT) + mean * SMOOTHING_WEIGHT;

        let original = before[i - start];
        points[i].y = smoothed.max(original).min(floor.max(original));
    }
}

/// Resting y for a tank's anchor over the current terrain
pub fn footing_target(player: &Player, terrain: &Terrain, default_ground: f32) -> f32 {
    let ground = terrain
        .surface_near(player.pos.x, FOOTING_WINDOW)
        .unwrap_or(default_ground);
    ground - player.height - FOOTING_CLEARANCE
}

/// Move a tank toward its footing: fall gradually, snap up instantly
pub fn settle_player(player: &mut Player, terrain: &Terrain, default_ground: f32) {
    let target = footing_target(player, terrain, default_ground);
    if player.pos.y < target {
        player.pos.y = (player.pos.y + FALL_SPEED).min(target);
    } else if player.pos.y > target {
        player.pos.y = target;
    }
}
