use serde::{Deserialize, Serialize};

pub(crate) const START_BONUS: u32 = 1000;
pub(crate) const POINTS_PER_LEVEL: u32 = 1000;
pub(crate) const START_LIVES: u32 = 5;
pub(crate) const NEW_LIFE_EVERY_POINTS: u32 = 10_000;
pub(crate) const MAX_LIVES: u32 = 99;

/// Seconds per animated transition. The player's own step plays fast; hazard
/// waves linger so each one reads distinctly.
pub(crate) const ACTIVE_MOVE_DURATION: f32 = 0.17;
pub(crate) const PASSIVE_MOVE_DURATION: f32 = 0.35;

pub(crate) const ACTIVE_MOVE_EASING: Easing = Easing::new(0.3, 0.0, 0.9, 1.0);
pub(crate) const PASSIVE_MOVE_EASING: Easing = Easing::new(0.16, 1.0, 0.3, 1.0);

/// Which rule profile the player has selected on the title screen. The
/// selection persists across sessions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum GameProfile {
    /// Password after every level, undo/redo available.
    #[default]
    Remake,
    /// Passwords only every tenth level and no undo, as the arcade had it.
    Original,
}

impl GameProfile {
    pub(crate) fn password_every(self) -> u32 {
        match self {
            GameProfile::Remake => 1,
            GameProfile::Original => 10,
        }
    }

    pub(crate) fn undo_enabled(self) -> bool {
        matches!(self, GameProfile::Remake)
    }

    pub(crate) fn toggled(self) -> Self {
        match self {
            GameProfile::Remake => GameProfile::Original,
            GameProfile::Original => GameProfile::Remake,
        }
    }
}

/// A cubic bezier timing curve with fixed endpoints (0,0) and (1,1), the same
/// parametrization CSS `cubic-bezier` uses.
#[derive(Clone, Copy)]
pub(crate) struct Easing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Easing {
    pub(crate) const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn component(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    /// Map elapsed fraction `x` in [0, 1] to eased progress. Solves the
    /// parameter by bisection; x(t) is monotone for control points in [0, 1].
    pub(crate) fn apply(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        for _ in 0..24 {
            let mid = (lo + hi) / 2.0;
            if Self::component(self.x1, self.x2, mid) < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Self::component(self.y1, self.y2, (lo + hi) / 2.0)
    }
}
