//! Tetris84 gameplay core
//!
//! Pure state + transition logic for a falling-block puzzle game: board
//! occupancy, piece movement and collision, fall/lock/DAS timing, line
//! clearing, scoring and session flow. No rendering, no input devices, no
//! clock of its own - the embedding frontend delivers discrete input
//! events plus a fixed-step `tick(dt)` and drains [`GameEvent`]s to render.
//!
//! ```
//! use tetris84::{Difficulty, Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default()).unwrap();
//! game.select_difficulty(Difficulty::Hard);
//! game.tick(1.0 / 60.0);
//! for event in game.drain_events() {
//!     // hand to the renderer
//!     let _ = event;
//! }
//! ```

pub mod board;
pub mod config;
pub mod events;
pub mod game;
pub mod piece;
pub mod queue;
pub mod scheduler;
pub mod score;
pub mod tetromino;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
pub use config::{ConfigError, GameConfig};
pub use events::{CellView, GameEvent};
pub use game::{Difficulty, Game, GameState};
pub use piece::Piece;
pub use queue::NextQueue;
pub use score::Score;
pub use tetromino::{Rotation, RotationDirection, TetrominoType};
