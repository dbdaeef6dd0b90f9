use crate::grid::{Cell, Grid, Move};

/// Advance every gorilla of the given color onto all of its qualifying
/// neighbors at once — the player and bananas lure gorillas, coins do not.
/// One source with N qualifying neighbors yields one move with N
/// destinations, duplicating the gorilla; `apply_move` clears the source.
///
/// Blue gorillas arrive satiated and never move again; red gorillas arrive
/// unchanged and stay dangerous.
pub(super) fn gorilla_moves(grid: &Grid, gorilla: Cell) -> Vec<Move> {
    let replace_with = match gorilla {
        Cell::BlueGorilla => Some(Cell::SatiatedGorilla),
        _ => None,
    };

    grid.find_cells(|cell| cell == gorilla)
        .map(|(pos, _)| Move {
            from: pos,
            to: grid
                .neighbor_positions(pos)
                .into_iter()
                .filter(|&dest| matches!(grid.at(dest), Some(Cell::Player | Cell::Banana)))
                .collect(),
            replace_with,
        })
        .filter(|m| !m.to.is_empty())
        .collect()
}
