//! Scripted key presses for running the game without a keyboard

use pixel_engine::input::{InputManager, KeyCode};

/// Frames between taps of the menu key
const MENU_PERIOD: u64 = 300;

/// Frames spent turning in one direction before switching
const SWEEP_PERIOD: u64 = 120;

/// Thrust for this many frames out of every [`THRUST_PERIOD`]
const THRUST_FRAMES: u64 = 20;
const THRUST_PERIOD: u64 = 240;

/// Deterministic pilot that sweeps the gun back and forth while firing
///
/// It also taps Enter now and then, which leaves the title and game over
/// screens.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPilot {
    frame: u64,
}

impl ScriptedPilot {
    /// Create a pilot at frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames driven so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Feed this frame's key events into `input`
    pub fn drive(&mut self, input: &mut InputManager) {
        let frame = self.frame;
        self.frame += 1;

        input.handle_key_input(KeyCode::Enter, frame % MENU_PERIOD == 0);

        let sweep_left = (frame / SWEEP_PERIOD) % 2 == 0;
        input.handle_key_input(KeyCode::Left, sweep_left);
        input.handle_key_input(KeyCode::Right, !sweep_left);

        input.handle_key_input(KeyCode::Up, frame % THRUST_PERIOD < THRUST_FRAMES);
        input.handle_key_input(KeyCode::Space, true);
    }
}
