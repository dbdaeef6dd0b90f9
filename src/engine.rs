//! The puzzle resolution engine.
//!
//! Pure and synchronous: every entry point maps a [`LevelSnapshot`] (plus a
//! requested direction for active moves) to new state, never mutating its
//! input. The orchestration layer owns the authoritative snapshot and drains
//! the returned transition queue one animated step at a time.

use crate::direction::Dir4;
use crate::grid::{Cell, Grid, Move};

mod active;
mod arrow;
mod gorilla;

#[cfg(test)]
mod tests;

/// The complete mutable state the engine operates on. Score, stage, password
/// and screen identity are orchestration-layer concerns layered on top.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LevelSnapshot {
    pub(crate) grid: Grid,
    pub(crate) bonus: u32,
    pub(crate) lives: u32,
}

/// A snapshot plus the moves that produced it, so the animator knows which
/// cells to interpolate between frames.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct StateTransition {
    pub(crate) snapshot: LevelSnapshot,
    pub(crate) moves: Vec<Move>,
}

pub(crate) fn is_player_dead(grid: &Grid) -> bool {
    grid.find_player().is_none()
}

/// True iff the player exists, no pickups of either kind remain, and no
/// attacker sits on one of the player's occupied neighbors.
pub(crate) fn is_success(grid: &Grid) -> bool {
    let Some(player) = grid.find_player() else {
        return false;
    };
    !grid
        .neighboring_cells(player)
        .iter()
        .any(|cell| cell.is_attacker())
        && grid.find_cells(Cell::is_pickup).next().is_none()
}

impl LevelSnapshot {
    /// Everything one player input sets in motion: the active move followed
    /// by the passive turns it triggers. Empty when the move is illegal.
    pub(crate) fn move_queue(&self, dir: Dir4) -> Vec<StateTransition> {
        let Some(active) = self.active_move_result(dir) else {
            return Vec::new();
        };

        let resolved = active.snapshot.resolved_state_results();
        let mut queue = vec![active];
        queue.extend(resolved);
        queue
    }

    /// One passive turn: gorilla advances (blue first, then red) and arrow
    /// drift, computed against the turn's starting grid and applied as a
    /// single batch in that concatenation order.
    pub(crate) fn passive_moves_result(&self) -> StateTransition {
        let mut moves = gorilla::gorilla_moves(&self.grid, Cell::BlueGorilla);
        moves.extend(gorilla::gorilla_moves(&self.grid, Cell::RedGorilla));
        moves.extend(arrow::free_arrow_moves(&self.grid));

        StateTransition {
            snapshot: LevelSnapshot {
                grid: self.grid.apply_moves(&moves),
                bonus: self.bonus,
                lives: self.lives,
            },
            moves,
        }
    }

    /// Chain passive turns until the grid stabilizes or a terminal condition
    /// fires, one transition per turn so each wave animates distinctly.
    ///
    /// A success state enters the queue exactly once, via the post-loop
    /// check; the loop condition keeps it from being pushed twice. Losing
    /// the player appends one final transition with a life deducted — the
    /// only place lives decreases.
    pub(crate) fn resolved_state_results(&self) -> Vec<StateTransition> {
        let mut queue = Vec::new();

        if is_success(&self.grid) {
            return queue;
        }

        let mut previous = self.grid.clone();
        let mut next = self.passive_moves_result();
        while next.snapshot.grid != previous
            && !is_success(&next.snapshot.grid)
            && !is_player_dead(&next.snapshot.grid)
        {
            previous = next.snapshot.grid.clone();
            let following = next.snapshot.passive_moves_result();
            queue.push(next);
            next = following;
        }

        if is_player_dead(&next.snapshot.grid) {
            next.snapshot.lives = next.snapshot.lives.saturating_sub(1);
            queue.push(next);
        } else if is_success(&next.snapshot.grid) {
            queue.push(next);
        }

        queue
    }
}
