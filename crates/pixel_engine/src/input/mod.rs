//! Input management system
//!
//! The platform layer feeds raw key press/release events into the
//! [`InputManager`]; the game only ever sees a once-per-frame
//! [`InputState`] snapshot of logical [`Controls`], so it stays agnostic to
//! the physical key mapping.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

bitflags::bitflags! {
    /// Logical controls held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Controls: u8 {
        /// Turn counter-clockwise
        const ROTATE_LEFT = 1 << 0;
        /// Turn clockwise
        const ROTATE_RIGHT = 1 << 1;
        /// Accelerate along the heading
        const THRUST = 1 << 2;
        /// Shoot
        const FIRE = 1 << 3;
    }
}

/// Snapshot of the input handed to the application once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Controls currently held
    pub held: Controls,
    /// Whether any key went down since the previous frame
    pub any_key_pressed: bool,
}

impl InputState {
    /// Snapshot with the given controls held and no new key presses
    pub fn holding(held: Controls) -> Self {
        Self { held, any_key_pressed: false }
    }

    /// Check whether a control is held
    pub fn is_held(&self, control: Controls) -> bool {
        self.held.contains(control)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// S key
    S,
    /// W key
    W,
    /// X key
    X,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mapping from physical keys to logical controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Keys that rotate left
    pub rotate_left: Vec<KeyCode>,
    /// Keys that rotate right
    pub rotate_right: Vec<KeyCode>,
    /// Keys that thrust
    pub thrust: Vec<KeyCode>,
    /// Keys that fire
    pub fire: Vec<KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            rotate_left: vec![KeyCode::Left, KeyCode::A],
            rotate_right: vec![KeyCode::Right, KeyCode::D],
            thrust: vec![KeyCode::Up, KeyCode::W],
            fire: vec![KeyCode::Space],
        }
    }
}

impl KeyBindings {
    /// Controls triggered by a key
    pub fn controls_for(&self, key: KeyCode) -> Controls {
        let mut controls = Controls::empty();
        if self.rotate_left.contains(&key) {
            controls |= Controls::ROTATE_LEFT;
        }
        if self.rotate_right.contains(&key) {
            controls |= Controls::ROTATE_RIGHT;
        }
        if self.thrust.contains(&key) {
            controls |= Controls::THRUST;
        }
        if self.fire.contains(&key) {
            controls |= Controls::FIRE;
        }
        controls
    }
}

/// Input manager
///
/// Tracks which keys are held. Key repeat events from the platform are
/// harmless: pressing an already-held key is not a new press.
#[derive(Debug, Clone, Default)]
pub struct InputManager {
    bindings: KeyBindings,
    held_keys: HashSet<KeyCode>,
    pressed_since_snapshot: bool,
}

impl InputManager {
    /// Create a new input manager with the given bindings
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held_keys: HashSet::new(),
            pressed_since_snapshot: false,
        }
    }

    /// Replace the key bindings
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held_keys.insert(key) {
                log::trace!("Key down: {:?}", key);
                self.pressed_since_snapshot = true;
            }
        } else if self.held_keys.remove(&key) {
            log::trace!("Key up: {:?}", key);
        }
    }

    /// Release every key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.held_keys.clear();
    }

    /// Check if a physical key is held
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.held_keys.contains(&key)
    }

    /// Take the per-frame snapshot and reset edge-triggered state
    pub fn snapshot(&mut self) -> InputState {
        let held = self
            .held_keys
            .iter()
            .fold(Controls::empty(), |acc, &key| acc | self.bindings.controls_for(key));
        let state = InputState {
            held,
            any_key_pressed: self.pressed_since_snapshot,
        };
        self.pressed_since_snapshot = false;
        state
    }
}
