use crate::direction::Dir4;
use crate::grid::{Cell, Grid, Move};
use crate::position::Position;

use super::{LevelSnapshot, StateTransition};

/// Bonus cost of each step the player takes, floored at zero.
const MOVE_COST: u32 = 5;

impl LevelSnapshot {
    /// Resolve the player's requested step. `None` means the move is illegal
    /// and the world is untouched.
    pub(crate) fn active_move_result(&self, dir: Dir4) -> Option<StateTransition> {
        let player = self.require_player();

        match self.grid.cell_forward(player, dir, 1) {
            Some(Cell::Coin | Cell::Empty) => Some(self.free_move_result(dir)),
            Some(cell) if cell.is_movable() => self.push_move_result(dir),
            _ => None,
        }
    }

    /// The caller must guarantee a live player; a snapshot without one is a
    /// programming defect, not a recoverable condition.
    fn require_player(&self) -> Position {
        self.grid
            .find_player()
            .expect("invalid grid, no player cell found")
    }

    fn free_move_result(&self, dir: Dir4) -> StateTransition {
        let player = self.require_player();
        let m = Move::step(player, Grid::forward(player, dir, 1));

        StateTransition {
            snapshot: LevelSnapshot {
                grid: self.grid.apply_move(&m),
                bonus: self.bonus.saturating_sub(MOVE_COST),
                lives: self.lives,
            },
            moves: vec![m],
        }
    }

    fn push_move_result(&self, dir: Dir4) -> Option<StateTransition> {
        let player = self.require_player();

        let mut pushed = Vec::new();
        let mut forward = Grid::forward(player, dir, 1);
        let mut ahead = self.grid.at(forward);
        while ahead.is_some_and(Cell::is_movable) {
            pushed.push(forward);
            forward = Grid::forward(forward, dir, 1);
            ahead = self.grid.at(forward);
        }

        // The chain must end on a cell that accepts it: the boundary and
        // push-blockers refuse.
        if pushed.is_empty() || ahead.is_none_or(Cell::blocks_push) {
            return None;
        }

        // Furthest-first, so no cell is overwritten before it is read.
        let moves: Vec<Move> = pushed
            .iter()
            .rev()
            .map(|&pos| Move::step(pos, Grid::forward(pos, dir, 1)))
            .collect();

        let after_push = LevelSnapshot {
            grid: self.grid.apply_moves(&moves),
            bonus: self.bonus,
            lives: self.lives,
        };
        let free = after_push.free_move_result(dir);

        // Player's move leads the list; the animator plays it with the chain.
        let mut all_moves = free.moves;
        all_moves.extend(moves);

        Some(StateTransition {
            snapshot: free.snapshot,
            moves: all_moves,
        })
    }
}
