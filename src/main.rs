//! Dodge the Box entry point
//!
//! Headless runner: plays the simulation with the autopilot at a fixed 60 Hz
//! cadence and logs (or prints as JSON) the event stream. Rendering, audio and
//! input binding live in the presentation layer, not here.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use dodge_the_box::autopilot;
use dodge_the_box::consts::{MAX_STAGE, SIM_DT};
use dodge_the_box::{GameEvent, RunState, Session, Settings};

#[derive(Parser, Debug)]
#[command(name = "dodge-the-box", version, about = "Run Dodge the Box headless with the autopilot")]
struct Args {
    /// RNG seed (overrides the settings file; random if neither is set)
    #[arg(long)]
    seed: Option<u64>,

    /// Stage to start from
    #[arg(long, default_value_t = 1)]
    stage: u32,

    /// Settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 60 * 60 * 30)]
    max_ticks: u64,

    /// Retries allowed after a game over before giving up
    #[arg(long, default_value_t = 3)]
    retries: u32,

    /// Print every event as a JSON line on stdout
    #[arg(long)]
    json: bool,
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = args
        .config
        .as_ref()
        .map(Settings::load)
        .unwrap_or_default();
    let seed = args.seed.or(settings.seed).unwrap_or_else(seed_from_clock);
    log::info!("Dodge the Box (headless) starting, seed={}", seed);

    let mut session = Session::with_settings(seed, settings);
    session.start_at(args.stage);

    let mut retries_left = args.retries;
    let mut best_stage = session.stage();
    let mut won = false;
    let mut ticks = 0u64;

    while ticks < args.max_ticks {
        ticks += 1;
        let intent = autopilot::steer(&session.snapshot());
        session.set_horizontal_intent(intent);

        for event in session.tick(SIM_DT) {
            if args.json {
                match serde_json::to_string(&event) {
                    Ok(line) => println!("{}", line),
                    Err(err) => log::error!("Could not encode {:?}: {}", event, err),
                }
            } else if event.is_terminal() {
                log::info!("{:?}", event);
            } else {
                log::debug!("{:?}", event);
            }

            if event == GameEvent::StageCleared100 {
                won = true;
            }
        }

        match session.run_state() {
            RunState::StageComplete if won => break,
            RunState::StageComplete => {
                session.advance_stage();
                best_stage = best_stage.max(session.stage());
            }
            RunState::GameOver if retries_left > 0 => {
                retries_left -= 1;
                log::info!("Retrying stage {} ({} retries left)", session.stage(), retries_left);
                session.retry_stage();
            }
            RunState::GameOver => break,
            RunState::Idle | RunState::Running | RunState::Paused => {}
        }
    }

    if won {
        log::info!("All {} stages cleared in {} ticks", MAX_STAGE, ticks);
    } else {
        log::info!(
            "Stopped after {} ticks on stage {} ({:?}), best stage {}",
            ticks,
            session.stage(),
            session.run_state(),
            best_stage
        );
    }
}
