use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::GameProfile;
use crate::levels::LevelType;

/// Everything that survives a restart: per-level best bonuses keyed by access
/// code, best total scores keyed by level type, the last checkpoint code, and
/// the selected rule profile.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct SavedData {
    best_bonus: HashMap<String, u32>,
    best_total: HashMap<String, u32>,
    last_password: Option<String>,
    profile: GameProfile,
}

impl SavedData {
    pub(crate) fn best_bonus(&self, password: &str) -> u32 {
        self.best_bonus.get(password).copied().unwrap_or(0)
    }

    pub(crate) fn record_bonus(&mut self, password: &str, bonus: u32) {
        let best = self.best_bonus.entry(password.to_string()).or_insert(0);
        *best = (*best).max(bonus);
    }

    pub(crate) fn best_total_score(&self, level_type: LevelType) -> u32 {
        self.best_total
            .get(level_type.key())
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn record_total_score(&mut self, level_type: LevelType, score: u32) {
        let best = self
            .best_total
            .entry(level_type.key().to_string())
            .or_insert(0);
        *best = (*best).max(score);
    }

    pub(crate) fn last_password(&self) -> Option<&str> {
        self.last_password.as_deref()
    }

    pub(crate) fn set_last_password(&mut self, password: &str) {
        self.last_password = Some(password.to_string());
    }

    pub(crate) fn profile(&self) -> GameProfile {
        self.profile
    }

    pub(crate) fn toggle_profile(&mut self) {
        self.profile = self.profile.toggled();
    }
}

pub(crate) use backend::save;

pub(crate) fn load() -> SavedData {
    backend::try_load().unwrap_or_default()
}

macro_rules! warn_err {
    ($expr:expr, $($arg:tt)+) => {
        $expr.map_err(|e| log::warn!($($arg)+, e)).ok()
    };
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use super::*;

    const STORAGE_KEY: &str = "mordicus_save";

    pub(crate) fn save(data: &SavedData) {
        let json = serde_json::to_string(data).unwrap();
        quad_storage::STORAGE
            .lock()
            .unwrap()
            .set(STORAGE_KEY, &json);
    }

    pub(super) fn try_load() -> Option<SavedData> {
        let s = quad_storage::STORAGE.lock().unwrap().get(STORAGE_KEY)?;
        warn_err!(serde_json::from_str(&s), "Failed to parse {}: {}", s)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use super::*;
    use std::fs::{create_dir_all, read_to_string, write};
    use std::path::PathBuf;

    pub(crate) fn save(data: &SavedData) {
        if let Some(path) = save_path() {
            if let Some(parent) = path.parent() {
                let _ = create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string(data) {
                let _ = write(path, json);
            }
        }
    }

    pub(super) fn try_load() -> Option<SavedData> {
        let path = save_path()?;
        let s = warn_err!(
            read_to_string(&path),
            "Failed to read {}: {}",
            path.display()
        )?;
        warn_err!(
            serde_json::from_str(&s),
            "Failed to parse {}: {}",
            path.display()
        )
    }

    fn save_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "Mordicus")?;
        Some(dirs.data_dir().join("save.json"))
    }
}
