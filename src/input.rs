use macroquad::prelude::*;

use crate::direction::Dir4;

const REPEAT_DELAY: f32 = 0.5;
const REPEAT_RATE: f32 = 0.05;

/// A parsed keyboard action for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Input {
    Move(Dir4),
    Undo,
    Redo,
    Confirm,
    Cancel,
    Digit(u8),
    Backspace,
    ToggleProfile,
}

/// Tracks held keys so movement and undo repeat while held.
pub(crate) struct InputState {
    held_move: [f32; 4],
    held_undo: f32,
    held_redo: f32,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self {
            held_move: [0.0; 4],
            held_undo: 0.0,
            held_redo: 0.0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.held_move = [0.0; 4];
        self.held_undo = 0.0;
        self.held_redo = 0.0;
    }

    /// Poll the keyboard for inputs this frame.
    pub(crate) fn poll(&mut self, dt: f32) -> Vec<Input> {
        let mut inputs = Vec::new();

        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
            inputs.push(Input::Confirm);
        }
        if is_key_pressed(KeyCode::Escape) {
            inputs.push(Input::Cancel);
        }
        if is_key_pressed(KeyCode::O) {
            inputs.push(Input::ToggleProfile);
        }
        if is_key_pressed(KeyCode::Backspace) {
            inputs.push(Input::Backspace);
        }

        for (digit, key, kp_key) in [
            (0, KeyCode::Key0, KeyCode::Kp0),
            (1, KeyCode::Key1, KeyCode::Kp1),
            (2, KeyCode::Key2, KeyCode::Kp2),
            (3, KeyCode::Key3, KeyCode::Kp3),
            (4, KeyCode::Key4, KeyCode::Kp4),
            (5, KeyCode::Key5, KeyCode::Kp5),
            (6, KeyCode::Key6, KeyCode::Kp6),
            (7, KeyCode::Key7, KeyCode::Kp7),
            (8, KeyCode::Key8, KeyCode::Kp8),
            (9, KeyCode::Key9, KeyCode::Kp9),
        ] {
            if is_key_pressed(key) || is_key_pressed(kp_key) {
                inputs.push(Input::Digit(digit));
            }
        }

        if input_repeat(
            is_key_down(KeyCode::Z),
            is_key_pressed(KeyCode::Z),
            &mut self.held_undo,
            dt,
        ) {
            inputs.push(Input::Undo);
        }
        if input_repeat(
            is_key_down(KeyCode::Y),
            is_key_pressed(KeyCode::Y),
            &mut self.held_redo,
            dt,
        ) {
            inputs.push(Input::Redo);
        }

        for (key, dir, idx) in [
            (KeyCode::Up, Dir4::Up, 0),
            (KeyCode::Right, Dir4::Right, 1),
            (KeyCode::Down, Dir4::Down, 2),
            (KeyCode::Left, Dir4::Left, 3),
        ] {
            if input_repeat(
                is_key_down(key),
                is_key_pressed(key),
                &mut self.held_move[idx],
                dt,
            ) {
                inputs.push(Input::Move(dir));
            }
        }

        inputs
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

fn input_repeat(down: bool, pressed: bool, held: &mut f32, dt: f32) -> bool {
    if down {
        *held += dt;
        pressed || (*held > REPEAT_DELAY && *held % REPEAT_RATE < dt)
    } else {
        *held = 0.0;
        false
    }
}
