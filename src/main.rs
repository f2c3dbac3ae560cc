//! Horde Survivor entry point
//!
//! Runs a headless session driven by a simple autopilot, which is handy for
//! balancing waves and for reproducing a seed from the command line:
//!
//! ```text
//! horde-survivor [SEED] [TUNING]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;

use horde_survivor::sim::{GameOverSummary, HudSummary, Snapshot, TickInput, UpgradeOption};
use horde_survivor::{Frontend, Session, Tuning};

/// Simulated frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Enemies closer than this trigger a dash
const PANIC_DISTANCE: f32 = 40.0;

/// Kites away from the nearest enemy and always takes the first upgrade
#[derive(Default)]
struct Autopilot {
    threat: Option<Vec2>,
    frames: u64,
    summary: Option<GameOverSummary>,
}

impl Frontend for Autopilot {
    fn acquire_surface(&mut self) -> Result<Vec2, String> {
        Ok(Vec2::new(1280.0, 720.0))
    }

    fn poll_input(&mut self) -> TickInput {
        match self.threat {
            Some(away) => TickInput {
                movement: away.normalize_or_zero(),
                dash: away.length() < PANIC_DISTANCE,
                pause: false,
            },
            None => TickInput::default(),
        }
    }

    fn present(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        let player = snapshot.player.pos;
        self.threat = snapshot
            .enemies
            .iter()
            .map(|e| player - e.pos)
            .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));
    }

    fn update_hud(&mut self, hud: &HudSummary) {
        // Once per simulated second
        if self.frames % 60 == 0 {
            log::debug!(
                "{} hp {:.0}/{:.0} lvl {} kills {}",
                hud.elapsed,
                hud.hp,
                hud.max_hp,
                hud.level,
                hud.kills
            );
        }
    }

    fn choose_upgrade(&mut self, options: &[UpgradeOption]) -> Option<usize> {
        (!options.is_empty()).then_some(0)
    }

    fn boss_spawned(&mut self) {
        log::warn!("The boss has arrived");
    }

    fn game_over(&mut self, summary: &GameOverSummary) {
        self.summary = Some(summary.clone());
    }
}

#[derive(Parser, Debug)]
#[command(name = "horde-survivor")]
#[command(about = "Headless autopilot run of the survival simulation")]
struct Cli {
    /// Run seed
    #[arg(default_value_t = 1)]
    seed: u64,
    /// JSON tuning file (defaults apply when omitted)
    tuning: Option<PathBuf>,
}

fn load_tuning(path: &Path) -> Result<Tuning, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    Tuning::from_json(&json).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let Cli { seed, tuning } = Cli::parse();
    let tuning = match tuning.as_deref().map(load_tuning) {
        Some(Ok(tuning)) => tuning,
        Some(Err(err)) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
        None => Tuning::default(),
    };

    log::info!("Horde Survivor (headless) starting, seed {seed}");
    let mut session = match Session::new(Autopilot::default(), &tuning, seed) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    while session.frame(FRAME_DT) {}

    match session.into_frontend().summary {
        Some(summary) => {
            println!(
                "{} after {}: {} kills, level {}",
                if summary.victory { "Victory" } else { "Defeat" },
                summary.formatted_time(),
                summary.kills,
                summary.level
            );
            ExitCode::SUCCESS
        }
        None => ExitCode::FAILURE,
    }
}
