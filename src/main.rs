//! Tank Duel headless driver
//!
//! Reads one shot per stdin line (`ANGLE POWER`, or `reset`) for whichever
//! tank is up, flies it to completion and prints a JSON report per shot.
//! The browser build is driven through `tank_duel::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::BufRead;

    use serde::Serialize;

    use tank_duel::sim::{Aim, GameEvent, GamePhase, MatchState, PlayerSlot, Wind};
    use tank_duel::{FixedStep, Settings};

    /// Give up on a shell that is somehow still flying after this long
    const MAX_SHOT_TICKS: u32 = 5000;

    #[derive(Debug, Default)]
    pub struct Args {
        pub seed: Option<u64>,
        pub settings: Option<String>,
    }

    pub fn parse_args(args: &[String]) -> Result<Args, String> {
        let mut parsed = Args::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--seed" => {
                    let value = iter.next().ok_or("--seed needs a value")?;
                    let seed = value
                        .parse()
                        .map_err(|_| format!("invalid seed {value:?}"))?;
                    parsed.seed = Some(seed);
                }
                "--settings" => {
                    let value = iter.next().ok_or("--settings needs a path")?;
                    parsed.settings = Some(value.clone());
                }
                other => return Err(format!("unknown argument {other:?}")),
            }
        }
        Ok(parsed)
    }

    #[derive(Debug, PartialEq)]
    pub enum Command {
        Shot { angle: f32, power: f32 },
        Reset,
    }

    /// Parse one input line; blank lines and `#` comments yield `None`
    pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if line.eq_ignore_ascii_case("reset") {
            return Ok(Some(Command::Reset));
        }

        let mut parts = line.split_whitespace();
        let (Some(angle), Some(power), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("expected `ANGLE POWER` or `reset`, got {line:?}"));
        };
        let angle = angle
            .parse()
            .map_err(|_| format!("invalid angle {angle:?}"))?;
        let power = power
            .parse()
            .map_err(|_| format!("invalid power {power:?}"))?;
        Ok(Some(Command::Shot { angle, power }))
    }

    /// What one shot did
    #[derive(Debug, Serialize)]
    pub struct ShotReport {
        pub shooter: u8,
        pub aim: Aim,
        pub fired: bool,
        pub ticks: u32,
        pub explosions: Vec<[f32; 2]>,
        pub hits: Vec<u8>,
        pub health: [u32; 2],
        pub phase: GamePhase,
        pub next: u8,
        pub wind: Wind,
    }

    /// Fly one shot for the active tank until no shell remains
    pub fn play_shot(state: &mut MatchState, runner: &mut FixedStep, angle: f32, power: f32) -> ShotReport {
        let shooter = state.active;
        runner.input.aim = Some(Aim { angle, power });
        runner.input.fire = Some(shooter);
        runner.step(state);

        let mut events = state.drain_events();
        let fired = events.iter().any(|e| matches!(e, GameEvent::Fired { .. }));

        let mut ticks = 1;
        while !state.projectiles.is_empty() && ticks < MAX_SHOT_TICKS {
            runner.step(state);
            events.extend(state.drain_events());
            ticks += 1;
        }
        if !state.projectiles.is_empty() {
            log::warn!("Shell still airborne after {ticks} ticks");
        }

        let mut explosions = Vec::new();
        let mut hits = Vec::new();
        for event in &events {
            match event {
                GameEvent::Explosion { pos } => explosions.push([pos.x, pos.y]),
                GameEvent::PlayerHit { slot, health } => {
                    log::info!("Player {} hit, {} health left", slot.number(), health);
                    hits.push(slot.number());
                }
                GameEvent::Victory { winner } => {
                    log::info!("Player {} wins!", winner.number())
                }
                GameEvent::WindChanged {
                    strength,
                    direction,
                } => log::debug!("Wind now {strength:.2} toward {direction}"),
                other => log::trace!("{other:?}"),
            }
        }

        ShotReport {
            shooter: shooter.number(),
            aim: state.players[shooter.index()].remembered_aim(),
            fired,
            ticks,
            explosions,
            hits,
            health: [
                state.player(PlayerSlot::One).health,
                state.player(PlayerSlot::Two).health,
            ],
            phase: state.phase,
            next: state.active.number(),
            wind: state.wind,
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        let args = parse_args(&argv)?;

        let settings = match &args.settings {
            Some(path) => Settings::load_file(path).unwrap_or_else(|err| {
                log::warn!("{err}; using default settings");
                Settings::default()
            }),
            None => Settings::default(),
        };

        let seed = args.seed.or(settings.seed).unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Match initialized with seed: {}", seed);

        let mut state = MatchState::new(seed);
        let mut runner = FixedStep::new();
        state.drain_events();

        let stdin = std::io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            let line = line?;
            match parse_command(&line) {
                Ok(Some(Command::Reset)) => {
                    runner.input.reset = true;
                    runner.step(&mut state);
                    state.drain_events();
                    log::info!("Match reset");
                }
                Ok(Some(Command::Shot { angle, power })) => {
                    let report = play_shot(&mut state, &mut runner, angle, power);
                    println!("{}", serde_json::to_string(&report)?);
                }
                Ok(None) => {}
                Err(err) => log::warn!("line {}: {err}", number + 1),
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tank Duel (native) starting...");

    if let Err(err) = native::run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is tank_duel::web::wasm_main, this is just to satisfy the compiler
}
