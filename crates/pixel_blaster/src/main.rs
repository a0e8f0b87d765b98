//! Headless Pixel Blaster driver
//!
//! Runs the game under a scripted pilot at a fixed frame cadence, logs a
//! summary and optionally saves the last frame as a PNG.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use pixel_blaster::pilot::ScriptedPilot;
use pixel_blaster::{Game, GameConfig, SoundEvent};
use pixel_engine::audio::RecordingAudio;
use pixel_engine::config::Config;
use pixel_engine::foundation::logging;
use pixel_engine::render::PixelSurface;
use pixel_engine::Engine;
use std::path::{Path, PathBuf};

const DEFAULT_FRAMES: &str = "1800";
const DEFAULT_SEED: &str = "1";
const DEFAULT_SCALE: &str = "4";

/// A stalled frame takes this many frame intervals
const STALL_FACTOR: u32 = 3;

/// Load the game configuration and apply command line overrides
fn load_config(path: Option<&Path>, fps: Option<u32>, mute: bool) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })?;
    if let Some(fps) = fps {
        config.screen.target_fps = fps;
    }
    if mute {
        config.audio.enabled = false;
    }
    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn save_frame(surface: &PixelSurface, path: &Path, scale: u32) -> Result<()> {
    surface
        .save_png(path, scale)
        .with_context(|| format!("Failed to save frame to {}", path.display()))?;
    log::info!("Saved final frame to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("pixel_blaster")
        .about("Runs Pixel Blaster headless under a scripted pilot")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Game configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("frames")
                .short('n')
                .long("frames")
                .value_name("COUNT")
                .value_parser(value_parser!(u64))
                .default_value(DEFAULT_FRAMES)
                .help("Number of frame intervals to run"),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .value_parser(value_parser!(u64))
                .default_value(DEFAULT_SEED)
                .help("Random seed for asteroid spawns"),
        )
        .arg(
            Arg::new("fps")
                .long("fps")
                .value_name("FPS")
                .value_parser(value_parser!(u32))
                .help("Override the configured frame rate"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PNG")
                .value_parser(value_parser!(PathBuf))
                .help("Save the final frame to this file"),
        )
        .arg(
            Arg::new("scale")
                .long("scale")
                .value_name("FACTOR")
                .value_parser(value_parser!(u32))
                .default_value(DEFAULT_SCALE)
                .help("Integer upscale applied to the saved frame"),
        )
        .arg(
            Arg::new("stall-every")
                .long("stall-every")
                .value_name("FRAMES")
                .value_parser(value_parser!(u64))
                .help("Make every Nth frame arrive late to exercise frame skipping"),
        )
        .arg(
            Arg::new("mute")
                .long("mute")
                .action(ArgAction::SetTrue)
                .help("Disable sound effects"),
        )
        .get_matches();

    let config = load_config(
        matches.get_one::<PathBuf>("config").map(PathBuf::as_path),
        matches.get_one::<u32>("fps").copied(),
        matches.get_flag("mute"),
    )?;

    let frames = matches.get_one::<u64>("frames").copied().unwrap_or_default();
    let seed = matches.get_one::<u64>("seed").copied().unwrap_or_default();
    let scale = matches.get_one::<u32>("scale").copied().unwrap_or(1);
    let stall_every = matches.get_one::<u64>("stall-every").copied().filter(|&n| n > 0);

    let mut engine = Engine::new(config.engine_config()).context("Failed to create engine")?;
    engine.input_mut().set_bindings(config.controls.clone());
    let mut game = Game::new(config, seed, RecordingAudio::<SoundEvent>::new())
        .context("Failed to create game")?;
    let mut pilot = ScriptedPilot::new();

    log::info!("Running {} frames with seed {}", frames, seed);
    let interval = engine.pacer().interval();
    for frame in 1..=frames {
        pilot.drive(engine.input_mut());
        let elapsed = match stall_every {
            Some(n) if frame % n == 0 => interval * STALL_FACTOR,
            _ => interval,
        };
        engine
            .advance(&mut game, elapsed)
            .with_context(|| format!("Frame {frame} failed"))?;
    }

    let world = game.world();
    log::info!(
        "Finished in phase {:?} after {} game(s): score {}, lives {}, wave {}",
        game.phase(),
        game.games_started(),
        world.score(),
        world.lives(),
        world.wave()
    );
    log::info!(
        "Frames: {} simulated, {} skipped; sounds: {} fire, {} asteroid, {} ship",
        engine.frame_count(),
        engine.pacer().skipped(),
        game.audio().count(&SoundEvent::Fire),
        game.audio().count(&SoundEvent::AsteroidDestroyed),
        game.audio().count(&SoundEvent::ShipDestroyed)
    );

    if let Some(path) = matches.get_one::<PathBuf>("output") {
        save_frame(engine.surface(), path, scale)?;
    }

    Ok(())
}
