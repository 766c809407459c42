//! Procedural heightmap terrain
//!
//! The ground is a row of samples at a fixed x-spacing. Explosions only ever
//! move samples down; the sample count and x positions never change.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// One sine layer of the generated profile
#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude: f32,
    frequency: f32,
    phase: f32,
}

impl Wave {
    fn random<R: Rng + ?Sized>(
        rng: &mut R,
        base_amplitude: f32,
        amplitude_spread: f32,
        base_frequency: f32,
        frequency_spread: f32,
    ) -> Self {
        Self {
            amplitude: base_amplitude + rng.random::<f32>() * amplitude_spread,
            frequency: base_frequency + rng.random::<f32>() * frequency_spread,
            phase: rng.random::<f32>() * 1000.0,
        }
    }

    #[inline]
    fn sample(&self, x: f32) -> f32 {
        ((x + self.phase) * self.frequency).sin() * self.amplitude
    }
}

/// Destructible ground heightmap (screen coordinates, y grows downward)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    points: Vec<Vec2>,
}

impl Terrain {
    /// Generate rolling hills across `width`.
    ///
    /// Three sine layers (broad swells, mid hills, small bumps) are summed with
    /// per-sample noise and a global vertical offset around a base line
    /// `GROUND_HEIGHT` above the bottom. Samples are clamped into
    /// `[0, height - GROUND_MARGIN]`.
    pub fn generate<R: Rng + ?Sized>(width: f32, height: f32, rng: &mut R) -> Self {
        let waves = [
            Wave::random(rng, 25.0, 50.0, 0.005, 0.01),
            Wave::random(rng, 15.0, 30.0, 0.02, 0.02),
            Wave::random(rng, 5.0, 15.0, 0.08, 0.04),
        ];
        let vertical_offset = -40.0 + rng.random::<f32>() * 80.0;

        let base = height - GROUND_HEIGHT;
        let floor = (height - GROUND_MARGIN).max(0.0);
        let count = (width / TERRAIN_SPACING).ceil().max(0.0) as usize;

        let points = (0..count)
            .map(|i| {
                let x = i as f32 * TERRAIN_SPACING;
                let noise = (rng.random::<f32>() - 0.5) * 8.0;
                let swell: f32 = waves.iter().map(|w| w.sample(x)).sum();
                let y = (base + swell + noise + vertical_offset).clamp(0.0, floor);
                Vec2::new(x, y)
            })
            .collect();

        Self { points }
    }

    /// Build terrain from explicit samples (x must be strictly increasing)
    pub fn from_points(points: Vec<Vec2>) -> Self {
        debug_assert!(
            points.windows(2).all(|w| w[0].x < w[1].x),
            "terrain x must be strictly increasing"
        );
        Self { points }
    }

    /// Flat ground at `y` across `width`
    pub fn flat(width: f32, y: f32) -> Self {
        let count = (width / TERRAIN_SPACING).ceil().max(0.0) as usize;
        Self {
            points: (0..count)
                .map(|i| Vec2::new(i as f32 * TERRAIN_SPACING, y))
                .collect(),
        }
    }

    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Mutable view of the samples; a slice so the count can't change
    #[inline]
    pub(crate) fn points_mut(&mut self) -> &mut [Vec2] {
        &mut self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest ground (smallest y) among samples strictly within `window` of `x`
    pub fn surface_near(&self, x: f32, window: f32) -> Option<f32> {
        self.points
            .iter()
            .filter(|p| (p.x - x).abs() < window)
            .map(|p| p.y)
            .reduce(f32::min)
    }
}
