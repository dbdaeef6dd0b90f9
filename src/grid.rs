use crate::direction::Dir4;
use crate::position::Position;

mod parse;

/// The closed set of cell types a grid square can hold.
///
/// The taxonomy subsets the rules engine consults (attackers, blockers,
/// movables, pickups) live here as predicate methods so no cell-type logic
/// leaks anywhere else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Cell {
    Empty,
    Player,
    Coin,
    Banana,
    RedGorilla,
    BlueGorilla,
    SatiatedGorilla,
    GreenBlock,
    RedBlock,
    Arrow(Dir4),
}

impl Cell {
    /// Captures the player when adjacent; advances each passive turn.
    pub(crate) fn is_attacker(self) -> bool {
        matches!(self, Cell::RedGorilla | Cell::BlueGorilla)
    }

    /// Cannot be pushed and blocks the player's own step.
    pub(crate) fn blocks_move(self) -> bool {
        matches!(self, Cell::RedBlock | Cell::SatiatedGorilla)
    }

    /// Stops a push chain dead even though it is not itself being pushed.
    pub(crate) fn blocks_push(self) -> bool {
        self.blocks_move() || self.is_attacker()
    }

    /// Pushable by the player and draggable by passive hazard logic.
    pub(crate) fn is_movable(self) -> bool {
        matches!(self, Cell::Arrow(_) | Cell::Banana | Cell::GreenBlock)
    }

    /// Counts toward the clear-the-level goal.
    pub(crate) fn is_pickup(self) -> bool {
        matches!(self, Cell::Coin | Cell::Banana)
    }
}

/// A relocation directive: one source, one or more destinations (plural
/// supports an attacker duplicating onto several qualifying neighbors in the
/// same turn), and an optional replacement overriding "copy the source cell".
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Move {
    pub(crate) from: Position,
    pub(crate) to: Vec<Position>,
    pub(crate) replace_with: Option<Cell>,
}

impl Move {
    pub(crate) fn step(from: Position, to: Position) -> Self {
        Self {
            from,
            to: vec![to],
            replace_with: None,
        }
    }
}

/// A rectangular field of cells. The engine never mutates a grid in place:
/// `apply_move`/`apply_moves` return fresh copies.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Grid {
    cells: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Grid {
    pub(crate) fn new(cells: Vec<Vec<Cell>>) -> Self {
        let height = cells.len();
        let width = cells.first().map(|r| r.len()).unwrap_or(0);
        for row in &cells {
            assert_eq!(row.len(), width);
        }
        Self {
            cells,
            width,
            height,
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn height(&self) -> usize {
        self.height
    }

    pub(crate) fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Cell at `pos`, or `None` out of bounds. Never panics.
    pub(crate) fn at(&self, pos: Position) -> Option<Cell> {
        pos.in_bounds(self.bounds())
            .then(|| self.cells[pos.y as usize][pos.x as usize])
    }

    /// Coordinate arithmetic only; the result may be out of bounds.
    pub(crate) fn forward(from: Position, dir: Dir4, n: i32) -> Position {
        from + dir.delta().scaled(n)
    }

    pub(crate) fn cell_forward(&self, from: Position, dir: Dir4, n: i32) -> Option<Cell> {
        self.at(Self::forward(from, dir, n))
    }

    /// Row-major iteration (top-to-bottom, left-to-right). This order is
    /// observable wherever a scan feeds into move construction.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (Position, Cell)> {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, &cell)| (Position::new(x, y), cell))
        })
    }

    pub(crate) fn find_cells<F: FnMut(Cell) -> bool>(
        &self,
        mut f: F,
    ) -> impl Iterator<Item = (Position, Cell)> + use<'_, F> {
        self.entries().filter(move |&(_, cell)| f(cell))
    }

    /// First player cell in row-major order. At most one exists on any
    /// stable grid; absence means the player has been captured.
    pub(crate) fn find_player(&self) -> Option<Position> {
        self.find_cells(|cell| cell == Cell::Player)
            .next()
            .map(|(pos, _)| pos)
    }

    /// The up-to-4 occupied in-bounds neighbors of `from`, in `Dir4::ALL`
    /// order. Empty squares are valid grid content but not "occupied".
    pub(crate) fn neighbor_positions(&self, from: Position) -> Vec<Position> {
        Dir4::ALL
            .iter()
            .map(|&dir| Self::forward(from, dir, 1))
            .filter(|&pos| self.at(pos).is_some_and(|cell| cell != Cell::Empty))
            .collect()
    }

    /// De-duplicated cell types among the occupied neighbors of `from`.
    pub(crate) fn neighboring_cells(&self, from: Position) -> Vec<Cell> {
        let mut seen = Vec::new();
        for pos in self.neighbor_positions(from) {
            let cell = self.at(pos).unwrap();
            if !seen.contains(&cell) {
                seen.push(cell);
            }
        }
        seen
    }

    /// Copy the grid, write every destination (the replacement cell if given,
    /// otherwise the source cell as it reads in the copy), then clear the
    /// source — even when the source doubles as a destination elsewhere.
    pub(crate) fn apply_move(&self, m: &Move) -> Grid {
        let mut copy = self.clone();
        for &dest in &m.to {
            let cell = m
                .replace_with
                .unwrap_or(copy.cells[m.from.y as usize][m.from.x as usize]);
            copy.cells[dest.y as usize][dest.x as usize] = cell;
        }
        copy.cells[m.from.y as usize][m.from.x as usize] = Cell::Empty;
        copy
    }

    /// Left fold of `apply_move` in list order. Order matters when moves
    /// share cells: a square vacated by one move can be a later move's
    /// destination within the same batch.
    pub(crate) fn apply_moves(&self, moves: &[Move]) -> Grid {
        moves.iter().fold(self.clone(), |grid, m| grid.apply_move(m))
    }
}
