//! Game board representation and collision detection
//!
//! The grid only stores the 20 visible rows. Everything at y >= 20 is the
//! above-field staging area: never occupied, never written, but a piece
//! locking there is the game-over signal (handled by the session).

use crate::tetromino::TetrominoType;

/// Board dimensions
pub const BOARD_WIDTH: i32 = 10;
pub const BOARD_HEIGHT: i32 = 20;

/// A cell on the board - empty or settled with the kind of piece that
/// locked there (the occupant reference renderers color by)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(TetrominoType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
///
/// Stored as [row][col], row 0 at the bottom. Coordinates are (x, y) with
/// y increasing upward.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
        }
    }

    /// Empty every cell (session start)
    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    }

    /// Whether a settled block occupies (x, y). Always false above the
    /// field (y >= BOARD_HEIGHT) and outside the grid.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
            return false;
        }
        self.cells[y as usize][x as usize].is_filled()
    }

    /// Get the cell at (x, y), None outside the stored grid
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || x >= BOARD_WIDTH || y < 0 || y >= BOARD_HEIGHT {
            return None;
        }
        Some(self.cells[y as usize][x as usize])
    }

    /// Whether a single target cell is valid for a moving piece: inside the
    /// side walls, above the floor, and unoccupied when inside the field.
    /// Cells above the field are exempt from occupancy checks but still
    /// bounded by the walls.
    pub fn position_valid(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH || y < 0 {
            return false;
        }
        if y >= BOARD_HEIGHT {
            return true;
        }
        self.cells[y as usize][x as usize].is_empty()
    }

    /// Whether every cell of a piece placement is valid
    pub fn positions_valid(&self, positions: &[(i32, i32)]) -> bool {
        positions.iter().all(|&(x, y)| self.position_valid(x, y))
    }

    /// Settle pre-validated cells onto the board. The caller guarantees
    /// 0 <= x < BOARD_WIDTH and 0 <= y < BOARD_HEIGHT for every cell.
    pub fn commit(&mut self, positions: &[(i32, i32)], kind: TetrominoType) {
        for &(x, y) in positions {
            debug_assert!(x >= 0 && x < BOARD_WIDTH && y >= 0 && y < BOARD_HEIGHT);
            self.cells[y as usize][x as usize] = Cell::Filled(kind);
        }
    }

    /// Whether every column of row y is occupied
    pub fn is_row_full(&self, y: i32) -> bool {
        debug_assert!(y >= 0 && y < BOARD_HEIGHT);
        self.cells[y as usize].iter().all(|cell| cell.is_filled())
    }

    /// Empty row y, releasing its occupants
    pub fn clear_row(&mut self, y: i32) {
        debug_assert!(y >= 0 && y < BOARD_HEIGHT);
        self.cells[y as usize] = [Cell::Empty; BOARD_WIDTH as usize];
    }

    /// Shift every occupied row above y down by one. Must be called once
    /// per cleared row, topmost cleared row first, so simultaneous clears
    /// collapse without double-shifting.
    pub fn collapse_above(&mut self, y: i32) {
        debug_assert!(y >= 0 && y < BOARD_HEIGHT);
        for i in (y + 1)..BOARD_HEIGHT {
            self.cells[(i - 1) as usize] = self.cells[i as usize];
            self.cells[i as usize] = [Cell::Empty; BOARD_WIDTH as usize];
        }
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Snapshot of all settled cells, bottom to top (for board-changed
    /// notifications)
    pub fn occupied_cells(&self) -> Vec<(i32, i32, TetrominoType)> {
        let mut out = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Cell::Filled(kind) = cell {
                    out.push((x as i32, y as i32, *kind));
                }
            }
        }
        out
    }

    /// Iterate rows bottom to top
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[Cell; BOARD_WIDTH as usize])> {
        self.cells
            .iter()
            .enumerate()
            .map(|(y, row)| (y as i32, row))
    }
}
