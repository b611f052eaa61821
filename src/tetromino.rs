//! Tetromino definitions and shapes
//!
//! All 7 classic tetrominoes. Rotation is a plain pivot rotation in 90°
//! steps applied to the base offsets; there is no kick table and the O
//! piece is not special-cased, so rotating it swings it around its pivot
//! just like the other pieces.

use serde::{Deserialize, Serialize};

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // long bar
    O, // square
    T, // T-shape
    S, // S-shape
    Z, // Z-shape
    J, // J-shape
    L, // L-shape
}

impl TetrominoType {
    /// Get all tetromino types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// Base block offsets relative to the pivot, at spawn rotation.
    /// x increases rightward, y increases upward.
    fn base_offsets(&self) -> [(i32, i32); 4] {
        match self {
            TetrominoType::I => [(-1, 0), (0, 0), (1, 0), (2, 0)],
            TetrominoType::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            TetrominoType::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
            TetrominoType::S => [(-1, 0), (0, 0), (0, 1), (1, 1)],
            TetrominoType::Z => [(1, 0), (0, 0), (0, 1), (-1, 1)],
            TetrominoType::J => [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            TetrominoType::L => [(1, 1), (-1, 0), (0, 0), (1, 0)],
        }
    }

    /// Block offsets at a given rotation, relative to the pivot
    pub fn cells(&self, rotation: Rotation) -> [(i32, i32); 4] {
        self.base_offsets()
            .map(|offset| rotation.apply(offset.0, offset.1))
    }
}

/// Rotation states, clockwise from spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North, // Spawn state
    East,  // Clockwise from North
    South, // 180 from North
    West,  // Counter-clockwise from North
}

impl Rotation {
    /// Rotate clockwise: North → East → South → West → North
    pub fn cw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise: North → West → South → East → North
    pub fn ccw(&self) -> Rotation {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Quarter-turn index, 0..4
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate an offset about the pivot. One clockwise quarter turn maps
    /// (x, y) to (y, -x) in a y-up frame.
    fn apply(&self, x: i32, y: i32) -> (i32, i32) {
        match self {
            Rotation::North => (x, y),
            Rotation::East => (y, -x),
            Rotation::South => (-x, -y),
            Rotation::West => (-y, x),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}
