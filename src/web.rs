//! Browser bindings
//!
//! The page owns the canvas and the `requestAnimationFrame` loop; it calls
//! [`WebMatch::frame`] once per frame and draws from `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::animation::{CannonRigs, ElevationInput};
use crate::audio::{AudioManager, SoundEffect};
use crate::runner::FixedStep;
use crate::settings::Settings;
use crate::sim::{self, MatchState, PlayerSlot, Snapshot};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Tank Duel starting...");
}

/// Elevation input backed by a JS callback
struct JsElevation(js_sys::Function);

impl ElevationInput for JsElevation {
    fn set_elevation(&mut self, elevation: f32) {
        if let Err(err) = self.0.call1(&JsValue::NULL, &JsValue::from_f64(elevation as f64)) {
            log::warn!("Could not update cannon elevation: {err:?}");
        }
    }
}

/// A match driven from JavaScript
#[wasm_bindgen]
pub struct WebMatch {
    state: MatchState,
    runner: FixedStep,
    settings: Settings,
    audio: AudioManager,
    rigs: CannonRigs,
    last_time: Option<f64>,
}

#[wasm_bindgen]
impl WebMatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebMatch {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Match initialized with seed: {}", seed);

        WebMatch {
            state: MatchState::new(seed),
            runner: FixedStep::new(),
            audio: AudioManager::new(&settings),
            settings,
            rigs: CannonRigs::new(),
            last_time: None,
        }
    }

    /// Advance by wall time; `time_ms` is the rAF timestamp.
    /// Returns the number of simulation ticks run.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time = Some(time_ms);

        let ticks = self.runner.advance(&mut self.state, dt);
        self.dispatch_events();
        ticks
    }

    /// Update the active player's angle (degrees) and power
    pub fn set_aim(&mut self, angle: f32, power: f32) {
        sim::set_aim(&mut self.state, angle, power);
        self.dispatch_events();
    }

    /// Fire for player 1 or 2. Returns false if the shot was refused.
    pub fn fire(&mut self, player: u8) -> bool {
        let Some(slot) = PlayerSlot::from_number(player) else {
            log::warn!("Unknown player {player}");
            return false;
        };
        self.audio.resume();
        let fired = match sim::fire(&mut self.state, slot) {
            Ok(_) => true,
            Err(err) => {
                log::debug!("Fire refused: {err}");
                false
            }
        };
        self.dispatch_events();
        fired
    }

    /// Start a fresh match with new terrain and wind
    pub fn reset(&mut self) {
        sim::reset(&mut self.state);
        self.runner.clear();
        self.dispatch_events();
    }

    /// Current frame as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Snapshot::capture(&self.state))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// HUD status line
    pub fn status_text(&self) -> String {
        Snapshot::capture(&self.state).status_text()
    }

    /// HUD height of a tank in meters above the base ground line
    pub fn player_altitude(&self, player: u8) -> u32 {
        PlayerSlot::from_number(player)
            .map(|slot| Snapshot::capture(&self.state).player_altitude(slot))
            .unwrap_or_default()
    }

    /// 0-1 through the victory sequence; 0 while playing
    pub fn victory_progress(&self) -> f32 {
        self.state.victory.progress()
    }

    /// Flip sound on/off and persist it. Returns the new state.
    pub fn toggle_sound(&mut self) -> bool {
        let enabled = self.settings.toggle_sound();
        self.audio.apply(&self.settings);
        self.settings.save();
        enabled
    }

    /// Route a tank's elevation changes to `callback(elevation)`
    pub fn set_elevation_callback(&mut self, player: u8, callback: js_sys::Function) -> bool {
        match PlayerSlot::from_number(player) {
            Some(slot) => {
                self.rigs.attach(slot, Box::new(JsElevation(callback)));
                true
            }
            None => false,
        }
    }

    pub fn clear_elevation_callback(&mut self, player: u8) {
        if let Some(slot) = PlayerSlot::from_number(player) {
            self.rigs.detach(slot);
        }
    }
}

impl Default for WebMatch {
    fn default() -> Self {
        Self::new()
    }
}

impl WebMatch {
    fn dispatch_events(&mut self) {
        let events = self.state.drain_events();
        if events.is_empty() {
            return;
        }
        for event in &events {
            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
        }
        self.rigs.observe(&events);
    }
}
