//! Outbound notifications for the presentation layer
//!
//! The session accumulates events as transitions happen inside a tick; the
//! frontend drains them afterwards and renders whatever changed. The core
//! never calls out.

use serde::{Deserialize, Serialize};

use crate::tetromino::{Rotation, TetrominoType};

/// A settled cell, as rendered state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub x: i32,
    pub y: i32,
    pub kind: TetrominoType,
}

/// Notifications emitted by the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Settled cells changed (lock, clear, collapse, session reset)
    BoardChanged { cells: Vec<CellView> },
    /// The active piece spawned or transformed
    PieceMoved {
        kind: TetrominoType,
        rotation: Rotation,
        x: i32,
        y: i32,
    },
    /// Rows cleared this lock, with the score after the award
    LinesCleared { rows: Vec<i32>, score: u64 },
    /// Terminal state; the final score stays on display
    GameOver { score: u64 },
    /// The upcoming-piece preview changed (Easy mode)
    NextQueueChanged { preview: Vec<TetrominoType> },
}
