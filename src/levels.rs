use std::sync::LazyLock;

use serde::Deserialize;

use crate::grid::Grid;

#[derive(Deserialize)]
struct LevelFile {
    original: Vec<Vec<String>>,
    custom: Vec<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LevelType {
    Original,
    Custom,
}

impl LevelType {
    pub(crate) fn key(self) -> &'static str {
        match self {
            LevelType::Original => "original",
            LevelType::Custom => "custom",
        }
    }
}

pub(crate) struct Level {
    pub(crate) grid: Grid,
    pub(crate) level_type: LevelType,
    pub(crate) stage: u32,
    pub(crate) password: String,
}

static LEVELS: LazyLock<Vec<Level>> = LazyLock::new(|| {
    let file: LevelFile = serde_json::from_str(include_str!("../assets/levels.json"))
        .expect("invalid levels.json");

    let mut levels = Vec::new();
    for (level_type, lists) in [
        (LevelType::Original, file.original),
        (LevelType::Custom, file.custom),
    ] {
        for (index, rows) in lists.into_iter().enumerate() {
            let grid = Grid::from_rows(&rows);
            let mut password = derive_password(&grid);
            while levels.iter().any(|l: &Level| l.password == password) {
                password = bump_password(&password);
            }
            levels.push(Level {
                grid,
                level_type,
                stage: index as u32 + 1,
                password,
            });
        }
    }
    levels
});

/// Hash the level's serialized rows down to a 6-digit access code: a 31-based
/// rolling hash over the JSON text, seeded so short levels still produce six
/// characters, keeping the last six of its decimal form. Hashing the parsed
/// grid's own row form keeps codes independent of file formatting quirks.
fn derive_password(grid: &Grid) -> String {
    let serialized = serde_json::to_string(&grid.to_rows()).expect("rows are valid JSON");
    let hash = serialized
        .chars()
        .fold(123_456_i32, |hash, c| {
            hash.wrapping_mul(31).wrapping_add(c as i32)
        })
        .to_string();
    last_six(&hash)
}

/// On a collision, step to the numerically next code, zero-padded back to
/// six characters.
fn bump_password(password: &str) -> String {
    let bumped = password
        .parse::<i64>()
        .expect("passwords are decimal")
        .wrapping_add(1)
        .to_string();
    format!("{:0>6}", last_six(&bumped))
}

fn last_six(s: &str) -> String {
    s[s.len().saturating_sub(6)..].to_string()
}

pub(crate) fn find_by_password(level_type: LevelType, password: &str) -> Option<&'static Level> {
    LEVELS
        .iter()
        .find(|l| l.level_type == level_type && l.password == password)
}

pub(crate) fn find_by_stage(level_type: LevelType, stage: u32) -> Option<&'static Level> {
    LEVELS
        .iter()
        .find(|l| l.level_type == level_type && l.stage == stage)
}

pub(crate) fn first_level(level_type: LevelType) -> &'static Level {
    find_by_stage(level_type, 1).expect("level file has no first level")
}

/// The most recent stage whose password the player is entitled to. With a
/// spacing of 10 that is stage 10 for stages 10..=19, and always at least 1.
pub(crate) fn checkpoint_stage(stage: u32, password_every: u32) -> u32 {
    ((stage / password_every) * password_every).max(1)
}

pub(crate) fn checkpoint_password(
    level_type: LevelType,
    stage: u32,
    password_every: u32,
) -> &'static str {
    let checkpoint = checkpoint_stage(stage, password_every);
    find_by_stage(level_type, checkpoint)
        .unwrap_or_else(|| first_level(level_type))
        .password
        .as_str()
}
