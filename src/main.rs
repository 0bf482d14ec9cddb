//! Brick Break headless runner
//!
//! Plays the game at a simulated 60 fps with an autopilot pointer and
//! prints a summary. Sounds are routed to the log backend.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use brick_break::{QualityPreset, Settings};
use brick_break::audio::{AudioManager, LogBackend};
use brick_break::consts::{LEVEL_SIZE, SIM_DT};
use brick_break::engine::{Engine, InputState};
use brick_break::sim::Breakout;

/// Ticks between progress lines
const REPORT_INTERVAL: u64 = 600;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run Brick Break headless with an autopilot paddle", long_about = None)]
struct Args {
    /// Number of 60 Hz frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Override the settings seed
    #[arg(long)]
    seed: Option<u64>,
    /// Settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the quality preset (low, medium, high)
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
    /// Print the summary as JSON
    #[arg(long)]
    summary_json: bool,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{s}'"))
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("read settings {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("parse settings {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    Ok(settings)
}

/// Pointer for this frame: under the ball with a slow drift so hits land
/// off-centre, clicking whenever a serve is due
fn autopilot(engine: &Engine<Breakout>, frame: u64) -> InputState {
    let game = engine.game();
    let aim = (frame as f32 * 0.013).sin() * 2.0;
    match game.ball_state(engine.host()) {
        Some((pos, _)) => InputState::at_world(Vec2::new(pos.x + aim, 0.0)),
        None => InputState::at_world(Vec2::new(LEVEL_SIZE.x / 2.0, 0.0)).with_press(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = load_settings(&args)?;
    log::info!(
        "Brick Break starting: {} frames, seed {}, quality {}",
        args.frames,
        settings.seed,
        settings.quality.as_str()
    );

    let mut engine = Engine::new(Breakout::new(&settings), &settings);
    let audio = AudioManager::from_settings(&settings);
    let mut backend = LogBackend::default();
    let mut contacts = 0u64;
    let mut resolved = 0u64;

    for frame in 0..args.frames {
        let input = autopilot(&engine, frame);
        if engine.advance(SIM_DT, input) > 0 {
            let step = engine.host().last_step;
            contacts += u64::from(step.contacts);
            resolved += u64::from(step.resolved);
        }

        let cues = engine.drain_sounds();
        audio.play_all(&cues, &engine.host().camera, &mut backend);

        let host = engine.host();
        if host.tick > 0 && host.tick % REPORT_INTERVAL == 0 {
            let summary = engine.game().summary(host);
            log::info!(
                "tick {}: score {}, bricks {}/{}, balls lost {}, contacts {} ({} resolved)",
                summary.ticks,
                summary.score,
                summary.bricks_destroyed,
                engine.game().bricks_total(),
                summary.balls_lost,
                contacts,
                resolved
            );
        }
    }

    let summary = engine.game().summary(engine.host());
    log::info!(
        "{} sounds played, {} contacts ({} resolved)",
        backend.played,
        contacts,
        resolved
    );
    if args.summary_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Score:            {}", summary.score);
        println!("Bricks destroyed: {}", summary.bricks_destroyed);
        println!("Bricks remaining: {}", summary.bricks_remaining);
        println!("Balls served:     {}", summary.balls_served);
        println!("Balls lost:       {}", summary.balls_lost);
        println!("Paddle hits:      {}", summary.paddle_hits);
        if summary.cleared {
            println!("Field cleared");
        }
    }
    Ok(())
}
