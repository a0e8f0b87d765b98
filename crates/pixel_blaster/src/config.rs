//! Game configuration
//!
//! Loaded once at start-up through the engine's [`Config`] trait, so the
//! same struct can live in a `.toml` or `.ron` file. Every section falls
//! back to its defaults for missing keys.
//!
//! Rates are per second: the simulation accepts a variable `dt`.

use pixel_engine::config::{Config, ConfigError, Deserialize, Serialize};
use pixel_engine::foundation::math::Bounds2;
use pixel_engine::input::KeyBindings;
use pixel_engine::EngineConfig;

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen layout
    pub screen: ScreenConfig,

    /// Gameplay tuning
    pub gameplay: GameplayConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Key bindings
    pub controls: KeyBindings,
}

/// Screen layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Surface width in pixels
    pub width: u32,

    /// Surface height in pixels, HUD strip included
    pub height: u32,

    /// Height of the HUD strip at the top of the screen
    pub hud_height: u32,

    /// Frames per second the driver aims for
    pub target_fps: u32,
}

impl ScreenConfig {
    /// Size of the wrapped playfield below the HUD strip
    pub fn play_bounds(&self) -> Bounds2 {
        Bounds2::new(self.width as f32, self.height.saturating_sub(self.hud_height) as f32)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 192,
            height: 160,
            hud_height: 15,
            target_fps: 60,
        }
    }
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Lives at the start of a game
    pub starting_lives: u32,

    /// Lives can never exceed this
    pub max_lives: u32,

    /// Score saturates here
    pub max_score: u32,

    /// Asteroids in the first wave
    pub initial_asteroids: u32,

    /// Speed multiplier added per wave
    pub wave_speed_step: f32,

    /// Ship turn rate in radians per second
    pub ship_rotation_speed: f32,

    /// Ship acceleration in pixels per second squared
    pub ship_thrust: f32,

    /// Fraction of ship velocity kept after one second of coasting
    pub ship_friction: f32,

    /// Ship speed cap in pixels per second
    pub ship_max_speed: f32,

    /// Ship collision radius
    pub ship_radius: f32,

    /// Seconds between a crash and the respawn
    pub respawn_delay: f32,

    /// Seconds of invulnerability after a respawn
    pub invulnerability_time: f32,

    /// Seconds per blink while invulnerable
    pub blink_period: f32,

    /// Projectile speed in pixels per second
    pub projectile_speed: f32,

    /// Projectile time-to-live in seconds
    pub projectile_lifetime: f32,

    /// Projectile collision radius
    pub projectile_radius: f32,

    /// Minimum seconds between shots
    pub fire_cooldown: f32,

    /// Longest step the simulation takes in one tick
    pub max_frame_time: f32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            max_lives: 99,
            max_score: 999_999,
            initial_asteroids: 5,
            wave_speed_step: 0.15,
            ship_rotation_speed: 300_f32.to_radians(),
            ship_thrust: 180.0,
            ship_friction: 0.74,
            ship_max_speed: 120.0,
            ship_radius: 2.5,
            respawn_delay: 1.5,
            invulnerability_time: 2.0,
            blink_period: 0.2,
            projectile_speed: 120.0,
            projectile_lifetime: 1.0,
            projectile_radius: 0.5,
            fire_cooldown: 0.25,
            max_frame_time: 1.0 / 15.0,
        }
    }
}

/// Audio settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Play sound effects at all
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config for GameConfig {}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

impl GameConfig {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let screen = &self.screen;
        if screen.width == 0 {
            return Err(ConfigError::Invalid {
                field: "screen.width",
                reason: "must be positive".to_string(),
            });
        }
        if screen.hud_height >= screen.height {
            return Err(ConfigError::Invalid {
                field: "screen.hud_height",
                reason: format!("leaves no playfield in a {} pixel tall screen", screen.height),
            });
        }
        if screen.target_fps == 0 {
            return Err(ConfigError::Invalid {
                field: "screen.target_fps",
                reason: "must be positive".to_string(),
            });
        }

        let g = &self.gameplay;
        if g.starting_lives == 0 || g.starting_lives > g.max_lives {
            return Err(ConfigError::Invalid {
                field: "gameplay.starting_lives",
                reason: format!("must lie in [1, {}], got {}", g.max_lives, g.starting_lives),
            });
        }
        if g.initial_asteroids == 0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.initial_asteroids",
                reason: "a wave needs at least one asteroid".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&g.ship_friction) {
            return Err(ConfigError::Invalid {
                field: "gameplay.ship_friction",
                reason: format!("must lie in [0, 1], got {}", g.ship_friction),
            });
        }
        if g.wave_speed_step.is_nan() || g.wave_speed_step < 0.0 {
            return Err(ConfigError::Invalid {
                field: "gameplay.wave_speed_step",
                reason: format!("must not be negative, got {}", g.wave_speed_step),
            });
        }

        positive("gameplay.ship_rotation_speed", g.ship_rotation_speed)?;
        positive("gameplay.ship_thrust", g.ship_thrust)?;
        positive("gameplay.ship_max_speed", g.ship_max_speed)?;
        positive("gameplay.ship_radius", g.ship_radius)?;
        positive("gameplay.respawn_delay", g.respawn_delay)?;
        positive("gameplay.invulnerability_time", g.invulnerability_time)?;
        positive("gameplay.blink_period", g.blink_period)?;
        positive("gameplay.projectile_speed", g.projectile_speed)?;
        positive("gameplay.projectile_lifetime", g.projectile_lifetime)?;
        positive("gameplay.projectile_radius", g.projectile_radius)?;
        positive("gameplay.fire_cooldown", g.fire_cooldown)?;
        positive("gameplay.max_frame_time", g.max_frame_time)?;
        Ok(())
    }

    /// Engine settings matching this game
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            width: self.screen.width,
            height: self.screen.height,
            target_fps: self.screen.target_fps,
            max_frame_time: self.gameplay.max_frame_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixel_engine::input::KeyCode;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();

        let bounds = config.screen.play_bounds();
        assert_eq!(bounds.width, 192.0);
        assert_eq!(bounds.height, 145.0);
    }

    #[test]
    fn test_engine_config_follows_screen() {
        let mut config = GameConfig::default();
        config.screen.target_fps = 30;
        let engine = config.engine_config();
        assert_eq!((engine.width, engine.height), (192, 160));
        assert_eq!(engine.target_fps, 30);
        assert_eq!(engine.max_frame_time, config.gameplay.max_frame_time);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.gameplay.projectile_radius = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gameplay.projectile_radius", .. })
        ));

        let mut config = GameConfig::default();
        config.screen.hud_height = 160;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.gameplay.ship_friction = 1.5;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.gameplay.respawn_delay = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_waves() {
        let mut config = GameConfig::default();
        config.gameplay.initial_asteroids = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "gameplay.initial_asteroids", .. })
        ));

        config.gameplay.initial_asteroids = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel_blaster.toml");

        let mut config = GameConfig::default();
        config.gameplay.starting_lives = 7;
        config.audio.enabled = false;
        config.controls.fire = vec![KeyCode::X];
        config.save_to_file(&path).unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[gameplay]\nstarting_lives = 5\n").unwrap();

        let loaded = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.gameplay.starting_lives, 5);
        assert_eq!(loaded.gameplay.max_lives, 99);
        assert_eq!(loaded.screen, ScreenConfig::default());
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel_blaster.ron");

        let mut config = GameConfig::default();
        config.screen.target_fps = 50;
        config.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), config);
    }
}
