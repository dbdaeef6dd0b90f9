use crate::direction::Dir4;
use crate::grid::{Cell, Grid, Move};

/// Drift every arrow whose forward cell is empty one step along its bound
/// direction. Arrows evaluate against the turn's starting grid only, which
/// is what delays an arrow freed by the player's own move until the next
/// passive turn.
///
/// Collisions: when two distinct arrows target the same destination, every
/// move sharing that destination deposits an inert red block instead of the
/// arrow itself.
pub(super) fn free_arrow_moves(grid: &Grid) -> Vec<Move> {
    let mut moves = Vec::new();
    for dir in Dir4::ALL {
        for (pos, _) in grid.find_cells(|cell| cell == Cell::Arrow(dir)) {
            if grid.cell_forward(pos, dir, 1) == Some(Cell::Empty) {
                moves.push(Move::step(pos, Grid::forward(pos, dir, 1)));
            }
        }
    }

    let destinations: Vec<_> = moves.iter().map(|m| m.to[0]).collect();
    for (i, m) in moves.iter_mut().enumerate() {
        let collided = destinations
            .iter()
            .enumerate()
            .any(|(j, &dest)| j != i && dest == m.to[0]);
        if collided {
            m.replace_with = Some(Cell::RedBlock);
        }
    }

    moves
}
