//! Input state tracking and the per-tick snapshot consumed by the simulation.
//!
//! `InputState` accumulates raw key and mouse transitions between ticks:
//!
//! - **Level-triggered (held):** `is_held(key)` is true every tick the key is
//!   down. Movement and jump read this.
//! - **Edge-triggered (just_pressed / just_released):** true only for the tick
//!   the transition happened, cleared by `end_frame()`. Pause, reload and menu
//!   clicks read these.
//!
//! The simulation never sees `InputState` directly. Each tick the caller takes
//! an `InputSnapshot`, which folds the arrow keys and WASD onto the three
//! logical actions and carries at most one click point.

use std::collections::HashSet;

use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    A,
    S,
    D,
    P,
    R,
    Escape,
    Enter,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseBtn {
    Left,
    Right,
    Middle,
}

/// Logical actions the player controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

impl Action {
    /// Physical keys bound to this action.
    pub fn keys(self) -> &'static [Key] {
        match self {
            Self::MoveLeft => &[Key::Left, Key::A],
            Self::MoveRight => &[Key::Right, Key::D],
            Self::Jump => &[Key::Up, Key::W],
        }
    }
}

/// What the simulation reads each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    /// Point of a primary-button release this tick, in screen coordinates.
    pub click: Option<Vec2>,
}

impl InputSnapshot {
    pub fn held(self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left,
            Action::MoveRight => self.move_right,
            Action::Jump => self.jump,
        }
    }
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,

    mouse_held: HashSet<MouseBtn>,
    mouse_just_pressed: HashSet<MouseBtn>,
    mouse_just_released: HashSet<MouseBtn>,

    typed: String,

    pub mouse_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            mouse_held: HashSet::new(),
            mouse_just_pressed: HashSet::new(),
            mouse_just_released: HashSet::new(),
            typed: String::new(),
            mouse_position: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn mouse_down(&mut self, btn: MouseBtn) {
        if self.mouse_held.insert(btn) {
            self.mouse_just_pressed.insert(btn);
        }
    }

    pub fn mouse_up(&mut self, btn: MouseBtn) {
        if self.mouse_held.remove(&btn) {
            self.mouse_just_released.insert(btn);
        }
    }

    /// Record text typed this tick (for the name entry field).
    pub fn text_input(&mut self, text: &str) {
        self.typed.push_str(text);
    }

    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn is_mouse_held(&self, btn: MouseBtn) -> bool {
        self.mouse_held.contains(&btn)
    }

    pub fn is_mouse_just_pressed(&self, btn: MouseBtn) -> bool {
        self.mouse_just_pressed.contains(&btn)
    }

    pub fn is_mouse_just_released(&self, btn: MouseBtn) -> bool {
        self.mouse_just_released.contains(&btn)
    }

    pub fn is_action_held(&self, action: Action) -> bool {
        action.keys().iter().any(|key| self.is_held(*key))
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let click = if self.is_mouse_just_released(MouseBtn::Left) {
            Some(Vec2::new(
                self.mouse_position.0 as f32,
                self.mouse_position.1 as f32,
            ))
        } else {
            None
        };
        InputSnapshot {
            move_left: self.is_action_held(Action::MoveLeft),
            move_right: self.is_action_held(Action::MoveRight),
            jump: self.is_action_held(Action::Jump),
            click,
        }
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.mouse_just_pressed.clear();
        self.mouse_just_released.clear();
        self.typed.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        assert!(input.is_held(Key::A));
        assert!(input.is_just_pressed(Key::A));
    }

    #[test]
    fn test_key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::P);
        input.key_up(Key::P);
        assert!(!input.is_held(Key::P));
        assert!(input.is_just_released(Key::P));
    }

    #[test]
    fn test_key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::R);
        assert!(!input.is_just_released(Key::R));
        assert!(!input.is_held(Key::R));
    }

    #[test]
    fn test_end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::Right);
        input.text_input("ab");
        input.end_frame();
        assert!(!input.is_just_pressed(Key::Right));
        assert!(input.is_held(Key::Right));
        assert_eq!(input.typed_text(), "");
    }

    #[test]
    fn test_arrows_and_wasd_map_to_same_action() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        assert!(input.snapshot().move_left);
        input.key_up(Key::A);
        input.key_down(Key::Left);
        assert!(input.snapshot().move_left);

        input.key_down(Key::W);
        assert!(input.snapshot().jump);
        input.key_up(Key::W);
        assert!(!input.snapshot().jump);
        input.key_down(Key::Up);
        assert!(input.snapshot().held(Action::Jump));
    }

    #[test]
    fn test_snapshot_reports_click_on_release_only() {
        let mut input = InputState::new();
        input.mouse_position = (120.0, 64.0);
        input.mouse_down(MouseBtn::Left);
        assert!(input.snapshot().click.is_none());

        input.mouse_up(MouseBtn::Left);
        assert_eq!(input.snapshot().click, Some(Vec2::new(120.0, 64.0)));

        input.end_frame();
        assert!(input.snapshot().click.is_none());
    }

    #[test]
    fn test_right_button_is_not_a_click() {
        let mut input = InputState::new();
        input.mouse_down(MouseBtn::Right);
        input.mouse_up(MouseBtn::Right);
        assert!(input.is_mouse_just_released(MouseBtn::Right));
        assert!(input.snapshot().click.is_none());
    }

    #[test]
    fn test_default_state_is_empty() {
        let input = InputState::default();
        assert_eq!(input.snapshot(), InputSnapshot::default());
        assert!(!input.is_mouse_held(MouseBtn::Left));
        assert!(!input.is_mouse_just_pressed(MouseBtn::Middle));
    }
}
