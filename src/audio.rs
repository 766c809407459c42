//! Audio cues
//!
//! The simulation only emits [`GameEvent`]s; this module decides which of them
//! make a sound. On wasm32 the cues are synthesized with Web Audio
//! oscillators and filtered noise, so no sample files are needed.

use crate::consts::WIND_MAX_STRENGTH;
use crate::sim::GameEvent;

/// Share of qualifying wind changes that actually get a gust
pub const WIND_CUE_CHANCE: f64 = 0.3;

/// Whether a wind cue fires for a uniform `roll` in `[0, 1)`.
/// Drawn from the host's RNG, never the match RNG, so audio can't perturb a replay.
#[inline]
pub fn wind_cue_plays(roll: f64) -> bool {
    roll < WIND_CUE_CHANCE
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Cannon fired - low sawtooth boom
    CannonFire,
    /// Shell detonated
    Explosion,
    /// Rising arpeggio when a tank is destroyed
    Victory,
    /// Gust after a wind change; `level` is 0-1 of maximum strength
    Wind { level: f32 },
}

impl SoundEffect {
    /// Cue for a simulation event, if it has one.
    /// Calm wind (strength below 1) stays silent.
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match *event {
            GameEvent::Fired { .. } => Some(SoundEffect::CannonFire),
            GameEvent::Explosion { .. } => Some(SoundEffect::Explosion),
            GameEvent::Victory { .. } => Some(SoundEffect::Victory),
            GameEvent::WindChanged { strength, .. } if strength >= 1.0 => {
                Some(SoundEffect::Wind {
                    level: (strength / WIND_MAX_STRENGTH).clamp(0.0, 1.0),
                })
            }
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web_audio::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web_audio {
    use web_sys::{
        AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType,
    };

    use super::{SoundEffect, wind_cue_plays};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        /// Output level from [`Settings::effective_volume`]; 0 when muted
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_volume(),
            }
        }

        /// Pick up changed preferences (mute toggle, volume sliders)
        pub fn apply(&mut self, settings: &Settings) {
            self.volume = settings.effective_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::CannonFire => self.play_cannon(ctx, vol),
                SoundEffect::Explosion => self.play_explosion(ctx, vol),
                SoundEffect::Victory => self.play_victory(ctx, vol),
                SoundEffect::Wind { level } => {
                    if wind_cue_plays(js_sys::Math::random()) {
                        self.play_wind(ctx, vol * level);
                    }
                }
            }
        }

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Cannon - sawtooth dropping 80 -> 20 Hz
        fn play_cannon(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 80.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * 0.8, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(80.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(40.0, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(20.0, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();

            // Muzzle crack
            if let Some((osc2, gain2)) = self.create_osc(ctx, 1200.0, OscillatorType::Square) {
                gain2.gain().set_value_at_time(vol * 0.4, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.2).ok();
            }
        }

        /// Explosion - square wave dropping 60 -> 15 Hz
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().linear_ramp_to_value_at_time(vol, t + 0.02).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.6)
                .ok();
            osc.frequency().set_value_at_time(60.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.1)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(15.0, t + 0.5)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.6).ok();

            // Debris rumble
            if let Some((osc2, gain2)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) {
                gain2.gain().set_value_at_time(vol * 0.6, t).ok();
                gain2
                    .gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                    .ok();
                osc2.frequency()
                    .exponential_ramp_to_value_at_time(120.0, t + 0.4)
                    .ok();
                osc2.start().ok();
                osc2.stop_with_when(t + 0.4).ok();
            }
        }

        /// Victory - C major arpeggio
        fn play_victory(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [261.63, 329.63, 392.0, 523.25].iter().enumerate() {
                let delay = i as f64 * 0.1;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(0.0, t).ok();
                    gain.gain()
                        .linear_ramp_to_value_at_time(vol * 0.3, t + 0.05)
                        .ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.8)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.8).ok();
                }
            }
        }

        /// Wind - two seconds of low-passed white noise at a flat level
        fn play_wind(&self, ctx: &AudioContext, vol: f32) {
            let rate = ctx.sample_rate();
            let Ok(buffer) = ctx.create_buffer(1, (rate * 2.0) as u32, rate) else {
                return;
            };
            let mut noise: Vec<f32> = (0..buffer.length())
                .map(|_| (js_sys::Math::random() as f32 * 2.0 - 1.0) * 0.1)
                .collect();
            if buffer.copy_to_channel(&mut noise, 0).is_err() {
                return;
            }

            let (Ok(source), Ok(filter), Ok(gain)) = (
                ctx.create_buffer_source(),
                ctx.create_biquad_filter(),
                ctx.create_gain(),
            ) else {
                return;
            };
            let t = ctx.current_time();

            source.set_buffer(Some(&buffer));
            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value_at_time(800.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.2, t).ok();

            if source.connect_with_audio_node(&filter).is_err()
                || filter.connect_with_audio_node(&gain).is_err()
                || gain.connect_with_audio_node(&ctx.destination()).is_err()
            {
                return;
            }

            source.start_with_when(t).ok();
            source.stop_with_when(t + 2.0).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayerSlot;
    use glam::Vec2;

    #[test]
    fn test_cue_mapping() {
        let fired = GameEvent::Fired {
            slot: PlayerSlot::One,
            projectile_id: 1,
        };
        assert_eq!(SoundEffect::for_event(&fired), Some(SoundEffect::CannonFire));
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Explosion { pos: Vec2::ZERO }),
            Some(SoundEffect::Explosion)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Victory {
                winner: PlayerSlot::Two
            }),
            Some(SoundEffect::Victory)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::MatchReset), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::TurnChanged {
                active: PlayerSlot::Two
            }),
            None
        );
    }

    #[test]
    fn test_wind_cue_threshold_and_level() {
        let calm = GameEvent::WindChanged {
            strength: 0.9,
            direction: 1.0,
        };
        assert_eq!(SoundEffect::for_event(&calm), None);

        let gusty = GameEvent::WindChanged {
            strength: 1.5,
            direction: -1.0,
        };
        assert_eq!(
            SoundEffect::for_event(&gusty),
            Some(SoundEffect::Wind { level: 0.5 })
        );
    }

    #[test]
    fn test_wind_cue_chance() {
        assert!(wind_cue_plays(0.0));
        assert!(wind_cue_plays(0.29));
        assert!(!wind_cue_plays(WIND_CUE_CHANCE));
        assert!(!wind_cue_plays(0.99));
    }
}
