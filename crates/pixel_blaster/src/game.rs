//! The Pixel Blaster application
//!
//! Wraps a [`World`] in the screens around it: a title screen that waits
//! for any key, the game itself, and a game over screen that freezes the
//! last frame until a key returns to the title.

use crate::config::GameConfig;
use crate::events::{FrameResult, SoundEvent};
use crate::hud;
use crate::world::World;
use log::info;
use pixel_engine::audio::{play_or_ignore, AudioSink};
use pixel_engine::config::ConfigError;
use pixel_engine::input::InputState;
use pixel_engine::render::{Color, PixelSurface};
use pixel_engine::{AppError, Application};

/// Seconds the game over screen ignores keys, so a held key does not skip it
const GAME_OVER_LOCKOUT: f32 = 1.0;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a key
    Title,
    /// Simulation running
    Playing,
    /// Final frame on display
    GameOver,
}

/// Pixel Blaster game
pub struct Game<A> {
    config: GameConfig,
    seed: u64,
    games_started: u64,
    phase: Phase,
    phase_time: f32,
    world: World,
    audio: A,
    last_result: FrameResult,
}

impl<A: AudioSink<SoundEvent>> Game<A> {
    /// Create the game on its title screen
    pub fn new(config: GameConfig, seed: u64, audio: A) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            world: World::new(&config, seed),
            config,
            seed,
            games_started: 0,
            phase: Phase::Title,
            phase_time: 0.0,
            audio,
            last_result: FrameResult::default(),
        })
    }

    /// Current screen
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The world of the current or last game
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world, for scripted scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Outcome of the last simulated tick
    pub fn last_result(&self) -> &FrameResult {
        &self.last_result
    }

    /// Audio sink
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Configuration in use
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Games started since launch
    pub fn games_started(&self) -> u64 {
        self.games_started
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.phase_time = 0.0;
    }

    fn start_game(&mut self) {
        let seed = self.seed.wrapping_add(self.games_started);
        self.games_started += 1;
        self.world = World::new(&self.config, seed);
        self.last_result = FrameResult::default();
        info!("Game {} started", self.games_started);
        self.enter(Phase::Playing);
    }

    fn play_sounds(&mut self, result: &FrameResult) {
        if !self.config.audio.enabled {
            return;
        }
        for sound in result.sounds() {
            play_or_ignore(&mut self.audio, sound);
        }
    }
}

impl<A: AudioSink<SoundEvent>> Application for Game<A> {
    fn update(&mut self, input: &InputState, delta_time: f32) -> Result<(), AppError> {
        self.phase_time += delta_time;

        match self.phase {
            Phase::Title => {
                if input.any_key_pressed {
                    self.start_game();
                }
            }
            Phase::Playing => {
                let result = self.world.tick(delta_time, input.held);
                self.play_sounds(&result);
                if result.game_over {
                    info!("Game {} over: score {}", self.games_started, result.score);
                    self.enter(Phase::GameOver);
                }
                self.last_result = result;
            }
            Phase::GameOver => {
                if input.any_key_pressed && self.phase_time >= GAME_OVER_LOCKOUT {
                    self.enter(Phase::Title);
                }
            }
        }

        Ok(())
    }

    fn render(&mut self, surface: &mut PixelSurface) {
        surface.clear(Color::BLACK);
        let top = self.config.screen.hud_height as i32;

        match self.phase {
            Phase::Title => hud::draw_title(surface),
            Phase::Playing => {
                self.world.draw(surface, top);
                hud::draw_status(surface, self.world.score(), self.world.lives());
            }
            Phase::GameOver => {
                self.world.draw(surface, top);
                hud::draw_status(surface, self.world.score(), self.world.lives());
                hud::draw_game_over(surface);
            }
        }
    }
}
