//! Wind model
//!
//! A horizontal push applied to every shell each tick. Strength and direction
//! are frozen between rolls; a new roll happens on a fixed interval.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// 0 to `WIND_MAX_STRENGTH`
    pub strength: f32,
    /// -1.0 (blowing left) or 1.0 (blowing right)
    pub direction: f32,
    pub ticks_since_change: u32,
}

impl Default for Wind {
    fn default() -> Self {
        Self::calm()
    }
}

impl Wind {
    /// Fresh random wind, timer reset
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let strength = rng.random_range(0.0..WIND_MAX_STRENGTH);
        let direction = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        Self {
            strength,
            direction,
            ticks_since_change: 0,
        }
    }

    /// No wind at all
    pub fn calm() -> Self {
        Self {
            strength: 0.0,
            direction: 1.0,
            ticks_since_change: 0,
        }
    }

    /// Advance the change timer, re-rolling when the interval elapses.
    /// Returns true if the wind changed this tick.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        self.ticks_since_change += 1;
        if self.ticks_since_change >= WIND_CHANGE_INTERVAL_TICKS {
            *self = Self::roll(rng);
            true
        } else {
            false
        }
    }

    /// Horizontal velocity change per tick
    #[inline]
    pub fn force(&self) -> f32 {
        self.direction * self.strength * WIND_FORCE_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_ranges() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut saw_left = false;
        let mut saw_right = false;
        for _ in 0..200 {
            let wind = Wind::roll(&mut rng);
            assert!((0.0..WIND_MAX_STRENGTH).contains(&wind.strength));
            assert_eq!(wind.ticks_since_change, 0);
            if wind.direction < 0.0 {
                saw_left = true;
            } else {
                assert_eq!(wind.direction, 1.0);
                saw_right = true;
            }
        }
        assert!(saw_left && saw_right);
    }

    #[test]
    fn test_changes_on_interval() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut wind = Wind::roll(&mut rng);
        let initial = wind;

        for _ in 0..WIND_CHANGE_INTERVAL_TICKS - 1 {
            assert!(!wind.tick(&mut rng));
            assert_eq!(wind.strength, initial.strength);
            assert_eq!(wind.direction, initial.direction);
        }
        assert!(wind.tick(&mut rng));
        assert_eq!(wind.ticks_since_change, 0);
    }

    #[test]
    fn test_force() {
        let wind = Wind {
            strength: 2.0,
            direction: -1.0,
            ticks_since_change: 0,
        };
        assert!((wind.force() - (-0.04)).abs() < 1e-6);
        assert_eq!(Wind::calm().force(), 0.0);
    }
}
