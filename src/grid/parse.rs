use csv::ReaderBuilder;

use crate::direction::Dir4;

use super::{Cell, Grid};

impl Cell {
    pub(crate) fn from_symbol(symbol: char) -> Cell {
        match symbol {
            'M' => Cell::Player,
            'o' => Cell::Coin,
            'b' => Cell::Banana,
            'G' => Cell::RedGorilla,
            'g' => Cell::BlueGorilla,
            's' => Cell::SatiatedGorilla,
            '=' => Cell::GreenBlock,
            '#' => Cell::RedBlock,
            '^' => Cell::Arrow(Dir4::Up),
            '>' => Cell::Arrow(Dir4::Right),
            'v' => Cell::Arrow(Dir4::Down),
            '<' => Cell::Arrow(Dir4::Left),
            _ => Cell::Empty,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'M',
            Cell::Coin => 'o',
            Cell::Banana => 'b',
            Cell::RedGorilla => 'G',
            Cell::BlueGorilla => 'g',
            Cell::SatiatedGorilla => 's',
            Cell::GreenBlock => '=',
            Cell::RedBlock => '#',
            Cell::Arrow(Dir4::Up) => '^',
            Cell::Arrow(Dir4::Right) => '>',
            Cell::Arrow(Dir4::Down) => 'v',
            Cell::Arrow(Dir4::Left) => '<',
        }
    }
}

impl Grid {
    /// Parse a comma-separated grid of cell symbols, one row per line.
    pub(crate) fn from_csv(csv_str: &str) -> Self {
        let mut cells: Vec<Vec<Cell>> = Vec::new();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(csv_str.as_bytes());

        for result in reader.records() {
            let record = result.expect("invalid CSV");
            let row = record
                .iter()
                .map(|field| {
                    let mut chars = field.trim().chars();
                    let symbol = chars.next().unwrap_or('.');
                    Cell::from_symbol(symbol)
                })
                .collect();
            cells.push(row);
        }

        Grid::new(cells)
    }

    /// Parse the level-file form: one string of symbols per row.
    pub(crate) fn from_rows(rows: &[String]) -> Self {
        let cells = rows
            .iter()
            .map(|row| row.chars().map(Cell::from_symbol).collect())
            .collect();
        Grid::new(cells)
    }

    /// Inverse of `from_rows`; also the stable form passwords are derived
    /// from, so the symbol set must not change behind saved passwords.
    pub(crate) fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn csv_and_rows_forms_agree() {
        let csv = Grid::from_csv("M,o,b\nG,g,s\n=,#,^\n>,v,<");
        let rows: Vec<String> = ["Mob", "Ggs", "=#^", ">v<"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(csv, Grid::from_rows(&rows));
        assert_eq!(csv.to_rows(), rows);
    }

    #[test]
    fn unknown_symbols_parse_as_empty() {
        let grid = Grid::from_rows(&["M?".to_string()]);
        assert_eq!(grid.at(Position::new(1, 0)), Some(Cell::Empty));
    }
}
