//! Fixed-step scheduler
//!
//! Hosts call [`FixedStep::advance`] once per display frame with the elapsed
//! wall time; the runner converts it into whole simulation ticks so the sim
//! rate never depends on the display refresh rate.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{MatchState, TickInput, tick};

/// Longest frame gap honoured; anything beyond is dropped (tab switches etc.)
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    /// Input for the next tick; one-shot fields clear once consumed
    pub input: TickInput,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many ticks as `dt` seconds of wall time cover.
    /// Returns the number of ticks executed.
    pub fn advance(&mut self, state: &mut MatchState, dt: f32) -> u32 {
        // NaN would poison the accumulator for good
        if !dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {dt}");
            return 0;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = None;
            self.input.reset = false;
            self.input.aim = None;
        }

        if substeps == MAX_SUBSTEPS && self.accumulator >= SIM_DT {
            log::trace!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run exactly one tick regardless of wall time (headless driving)
    pub fn step(&mut self, state: &mut MatchState) {
        tick(state, &self.input);
        self.input = TickInput::default();
    }

    /// Forget any partially accumulated time
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }
}
