use crate::config::{MAX_LIVES, NEW_LIFE_EVERY_POINTS};
use crate::engine::{is_player_dead, is_success};
use crate::grid::Grid;

/// Which full-screen view the app is presenting. The level-play payload
/// (snapshot, queue, undo history) lives in the app, not here; these tags
/// plus the small data they carry are the whole state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    Title,
    UsePasswordQuery,
    PasswordInput { input: String },
    Level,
    RetryQuery,
    LevelComplete { previous_score: u32, new_score: u32 },
    GameOver { password: String },
    GameComplete { score: u32 },
}

/// Where a level stands once its transition queue has fully drained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LevelOutcome {
    Playing,
    GameOver,
    Retry,
    Complete,
}

/// Evaluated in this priority order: an out-of-lives death is game over even
/// though the player is also absent from the grid.
pub(crate) fn level_outcome(grid: &Grid, lives: u32) -> LevelOutcome {
    if lives == 0 {
        LevelOutcome::GameOver
    } else if is_player_dead(grid) {
        LevelOutcome::Retry
    } else if is_success(grid) {
        LevelOutcome::Complete
    } else {
        LevelOutcome::Playing
    }
}

/// A bonus life arrives whenever the running score crosses a 10000-point
/// boundary, capped at 99.
pub(crate) fn lives_after_level_gain(lives: u32, previous_score: u32, new_score: u32) -> u32 {
    let crossed = previous_score / NEW_LIFE_EVERY_POINTS < new_score / NEW_LIFE_EVERY_POINTS;
    (lives + u32::from(crossed)).min(MAX_LIVES)
}

/// Append a digit to a six-character access code, replacing the last slot
/// when the code is already full.
pub(crate) fn push_password_digit(input: &mut String, digit: u8) {
    input.truncate(5);
    input.push(char::from(b'0' + digit));
}

/// Cycle the final digit of the code up or down, treating an empty slot as 0.
pub(crate) fn cycle_password_digit(input: &mut String, up: bool) {
    let last = input.pop().and_then(|c| c.to_digit(10)).unwrap_or(0);
    let next = (last + if up { 1 } else { 9 }) % 10;
    input.push(char::from(b'0' + next as u8));
}
