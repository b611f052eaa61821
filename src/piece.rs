//! Active falling piece logic
//!
//! Every transform follows attempt → validate → commit-or-revert, and
//! validation never mutates the board.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH, Board};
use crate::tetromino::{Rotation, RotationDirection, TetrominoType};

/// Spawn anchor: top center, two rows above the visible field
pub const SPAWN_X: i32 = BOARD_WIDTH / 2;
pub const SPAWN_Y: i32 = BOARD_HEIGHT + 2;

/// An active falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current rotation state
    pub rotation: Rotation,
    /// Pivot position on the lattice, y increasing upward
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn spawn(kind: TetrominoType) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Absolute positions of all 4 blocks
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.kind
            .cells(self.rotation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Blocks inside the visible field; blocks at y >= BOARD_HEIGHT are
    /// hidden from renderers
    pub fn visible_cells(&self) -> Vec<(i32, i32)> {
        self.cells()
            .into_iter()
            .filter(|&(_, y)| y < BOARD_HEIGHT)
            .collect()
    }

    /// Whether the piece sits entirely on valid cells
    pub fn is_valid(&self, board: &Board) -> bool {
        board.positions_valid(&self.cells())
    }

    /// Try to translate by (dx, dy), reverting on collision.
    /// Returns true if the move stuck.
    pub fn try_move(&mut self, dx: i32, dy: i32, board: &Board) -> bool {
        self.x += dx;
        self.y += dy;
        if self.is_valid(board) {
            true
        } else {
            self.x -= dx;
            self.y -= dy;
            false
        }
    }

    /// Try to rotate about the pivot, reverting on collision. No wall
    /// kicks: the rotation either fits in place or is rejected.
    pub fn try_rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let previous = self.rotation;
        self.rotation = match direction {
            RotationDirection::Clockwise => self.rotation.cw(),
            RotationDirection::CounterClockwise => self.rotation.ccw(),
        };
        if self.is_valid(board) {
            true
        } else {
            self.rotation = previous;
            false
        }
    }
}
