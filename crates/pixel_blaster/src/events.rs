//! What happened during a tick

use crate::asteroid::AsteroidTier;

/// Sound effects the game asks the platform to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEvent {
    /// A shot left the ship
    Fire,
    /// A projectile hit an asteroid
    AsteroidDestroyed,
    /// The ship crashed
    ShipDestroyed,
}

/// Notable things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The ship fired a projectile
    ProjectileFired,
    /// An asteroid broke into two smaller ones
    AsteroidSplit {
        /// Tier of the asteroid that was hit
        tier: AsteroidTier,
        /// Points awarded
        points: u32,
    },
    /// A small asteroid was destroyed outright
    AsteroidDestroyed {
        /// Tier of the asteroid that was hit
        tier: AsteroidTier,
        /// Points awarded
        points: u32,
    },
    /// The ship crashed into an asteroid
    ShipDestroyed {
        /// Lives left after the crash
        lives_left: u32,
    },
    /// The ship came back after a crash
    ShipRespawned,
    /// A fresh wave of asteroids spawned
    WaveStarted {
        /// Wave number, starting at 1
        wave: u32,
    },
    /// The last life is gone
    GameOver,
}

impl GameEvent {
    /// Sound effect for this event, if any
    pub fn sound(&self) -> Option<SoundEvent> {
        match self {
            Self::ProjectileFired => Some(SoundEvent::Fire),
            Self::AsteroidSplit { .. } | Self::AsteroidDestroyed { .. } => {
                Some(SoundEvent::AsteroidDestroyed)
            }
            Self::ShipDestroyed { .. } => Some(SoundEvent::ShipDestroyed),
            Self::ShipRespawned | Self::WaveStarted { .. } | Self::GameOver => None,
        }
    }

    /// Points this event scored
    pub fn points(&self) -> u32 {
        match self {
            Self::AsteroidSplit { points, .. } | Self::AsteroidDestroyed { points, .. } => *points,
            _ => 0,
        }
    }
}

/// Outcome of one [`World::tick`](crate::world::World::tick)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameResult {
    /// Events in the order they happened
    pub events: Vec<GameEvent>,
    /// Score after the tick
    pub score: u32,
    /// Lives after the tick
    pub lives: u32,
    /// Asteroids alive after the tick
    pub asteroid_count: usize,
    /// Whether the game has ended
    pub game_over: bool,
}

impl FrameResult {
    /// Sound effects to play for this tick
    pub fn sounds(&self) -> impl Iterator<Item = SoundEvent> + '_ {
        self.events.iter().filter_map(GameEvent::sound)
    }

    /// Check if an event of the given shape happened
    pub fn has(&self, predicate: impl Fn(&GameEvent) -> bool) -> bool {
        self.events.iter().any(predicate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds_follow_events() {
        let result = FrameResult {
            events: vec![
                GameEvent::WaveStarted { wave: 2 },
                GameEvent::ProjectileFired,
                GameEvent::AsteroidSplit {
                    tier: AsteroidTier::Large,
                    points: 20,
                },
                GameEvent::ShipDestroyed { lives_left: 0 },
                GameEvent::GameOver,
            ],
            ..FrameResult::default()
        };

        let sounds: Vec<_> = result.sounds().collect();
        assert_eq!(
            sounds,
            vec![SoundEvent::Fire, SoundEvent::AsteroidDestroyed, SoundEvent::ShipDestroyed]
        );
        assert!(result.has(|e| matches!(e, GameEvent::GameOver)));
        assert_eq!(result.events.iter().map(GameEvent::points).sum::<u32>(), 20);
    }
}
