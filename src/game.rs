//! Session orchestration
//!
//! Owns the board, the single active piece, the timers and the score, and
//! drives every state transition from explicit inbound events plus
//! `tick(dt)`. Everything happens synchronously inside the calling tick;
//! the frontend drains the resulting notifications afterwards.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::board::{BOARD_HEIGHT, Board};
use crate::config::{ConfigError, GameConfig};
use crate::events::{CellView, GameEvent};
use crate::piece::Piece;
use crate::queue::NextQueue;
use crate::scheduler::Scheduler;
use crate::score::Score;
use crate::tetromino::{RotationDirection, TetrominoType};

/// Session state. MainMenu is only ever the starting state: a restart
/// after game over re-enters Playing with the previous difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    MainMenu,
    Playing,
    GameOver,
}

/// Difficulty, chosen once from the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Hard,
}

/// One game session
pub struct Game {
    config: GameConfig,
    state: GameState,
    difficulty: Option<Difficulty>,
    board: Board,
    piece: Option<Piece>,
    queue: NextQueue,
    score: Score,
    scheduler: Scheduler,
    /// Current fall interval; Hard mode rederives it from the base on
    /// every speed-up
    fall_interval: f64,
    /// Monotonic session clock, accumulated from tick(dt)
    clock: f64,
    events: Vec<GameEvent>,
    /// Seeds each session's piece stream
    rng: ChaCha8Rng,
}

impl Game {
    /// Create a session in the main menu. Fails fast on a configuration
    /// the game cannot run on.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::random())
    }

    /// Seeded variant: the whole piece stream is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let queue = NextQueue::with_seed(config.pieces.clone(), 0, rng.next_u64());
        let scheduler = Scheduler::new(
            config.das_delay,
            config.das_speed,
            config.lock_delay,
            config.soft_drop_divisor,
        );
        let fall_interval = config.hard_fall_interval;
        Ok(Self {
            config,
            state: GameState::MainMenu,
            difficulty: None,
            board: Board::new(),
            piece: None,
            queue,
            score: Score::new(),
            scheduler,
            fall_interval,
            clock: 0.0,
            events: Vec::new(),
            rng,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn fall_interval(&self) -> f64 {
        self.fall_interval
    }

    /// Upcoming pieces shown to the player (empty in Hard mode)
    pub fn preview(&self) -> Vec<TetrominoType> {
        self.queue.preview(self.config.preview_count)
    }

    /// Hand accumulated notifications to the frontend
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Pick a difficulty from the main menu and start playing
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        if self.state != GameState::MainMenu {
            return;
        }
        self.start_session(difficulty);
    }

    /// Start over after game over, keeping the previous difficulty
    pub fn restart(&mut self) {
        if self.state != GameState::GameOver {
            return;
        }
        let Some(difficulty) = self.difficulty else {
            return;
        };
        self.start_session(difficulty);
    }

    fn start_session(&mut self, difficulty: Difficulty) {
        self.difficulty = Some(difficulty);
        self.score = Score::new();
        self.fall_interval = match difficulty {
            Difficulty::Easy => self.config.easy_fall_interval,
            Difficulty::Hard => self.config.hard_fall_interval,
        };
        self.board.clear();
        let lookahead = match difficulty {
            Difficulty::Easy => self.config.easy_lookahead,
            Difficulty::Hard => 0,
        };
        self.queue =
            NextQueue::with_seed(self.config.pieces.clone(), lookahead, self.rng.next_u64());
        self.state = GameState::Playing;
        self.push_board_changed();
        info!(?difficulty, fall_interval = self.fall_interval, "session started");
        self.spawn_next();
    }

    /// Advance the session by one fixed step
    pub fn tick(&mut self, dt: f64) {
        self.clock += dt;
        if self.state != GameState::Playing {
            return;
        }

        // Horizontal auto-repeat, left and right independently
        if self.scheduler.repeat_left_due(self.clock) {
            self.shift_piece(-1);
        }
        if self.scheduler.repeat_right_due(self.clock) {
            self.shift_piece(1);
        }

        // Gravity
        if self.scheduler.gravity_due(self.clock, self.fall_interval) {
            if let Some(piece) = self.piece.as_mut() {
                let descended = piece.try_move(0, -1, &self.board);
                let moved = descended.then(|| piece_moved(piece));
                self.scheduler.gravity_applied(self.clock, descended);
                if let Some(event) = moved {
                    self.events.push(event);
                }
            }
        }

        // Lock expiry
        if self.scheduler.lock_expired(self.clock) {
            self.lock_piece();
        }
    }

    /// Left key edge: true on key-down (moves immediately and starts
    /// auto-repeat), false on release
    pub fn input_move_left(&mut self, down: bool) {
        if !down {
            self.scheduler.release_left();
            return;
        }
        if self.state != GameState::Playing {
            return;
        }
        self.shift_piece(-1);
        self.scheduler.press_left(self.clock);
    }

    /// Right key edge, mirror of [`Self::input_move_left`]
    pub fn input_move_right(&mut self, down: bool) {
        if !down {
            self.scheduler.release_right();
            return;
        }
        if self.state != GameState::Playing {
            return;
        }
        self.shift_piece(1);
        self.scheduler.press_right(self.clock);
    }

    /// Rotate the active piece clockwise; rejected rotations revert
    /// silently and leave the lock timer alone
    pub fn input_rotate(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(piece) = self.piece.as_mut() else {
            return;
        };
        if piece.try_rotate(RotationDirection::Clockwise, &self.board) {
            let event = piece_moved(piece);
            self.scheduler.transform_applied();
            self.events.push(event);
        }
    }

    /// Soft drop is a held state: gravity runs at the divided interval
    /// while down
    pub fn input_soft_drop(&mut self, down: bool) {
        self.scheduler.set_soft_drop(down);
    }

    fn shift_piece(&mut self, dx: i32) {
        let Some(piece) = self.piece.as_mut() else {
            return;
        };
        if piece.try_move(dx, 0, &self.board) {
            let event = piece_moved(piece);
            self.scheduler.transform_applied();
            self.events.push(event);
        }
    }

    fn spawn_next(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let kind = self.queue.next();
        if self.difficulty == Some(Difficulty::Easy) {
            self.events.push(GameEvent::NextQueueChanged {
                preview: self.preview(),
            });
        }
        let piece = Piece::spawn(kind);
        self.scheduler.reset_for_spawn(self.clock);
        if !piece.is_valid(&self.board) {
            // Overlapping spawn: settle what fits, then end the session
            self.settle(&piece);
            return;
        }
        self.events.push(piece_moved(&piece));
        self.piece = Some(piece);
    }

    /// Commit the piece's in-bounds cells. Cells above the field are
    /// discarded and end the session.
    fn settle(&mut self, piece: &Piece) {
        let mut committed = Vec::with_capacity(4);
        let mut above_field = false;
        for (x, y) in piece.cells() {
            if y >= BOARD_HEIGHT {
                above_field = true;
            } else {
                committed.push((x, y));
            }
        }
        self.board.commit(&committed, piece.kind);
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "piece settled");
        self.push_board_changed();
        if above_field {
            self.game_over();
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };
        self.settle(&piece);
        if self.state == GameState::GameOver {
            return;
        }
        self.check_for_lines();
        self.spawn_next();
    }

    fn check_for_lines(&mut self) {
        let full_rows: Vec<i32> = (0..BOARD_HEIGHT)
            .filter(|&y| self.board.is_row_full(y))
            .collect();
        if full_rows.is_empty() {
            return;
        }

        self.score.add_clear(full_rows.len());
        if self.difficulty == Some(Difficulty::Hard) && self.score.update_speed_level() {
            self.fall_interval =
                Score::fall_interval(self.config.hard_fall_interval, self.score.speed_level);
            debug!(
                speed_level = self.score.speed_level,
                fall_interval = self.fall_interval,
                "speed up"
            );
        }

        for &y in &full_rows {
            self.board.clear_row(y);
        }
        // Topmost cleared row first, so lower clears see already-settled
        // rows above them
        for &y in full_rows.iter().rev() {
            self.board.collapse_above(y);
        }

        info!(rows = ?full_rows, score = self.score.points, "lines cleared");
        self.events.push(GameEvent::LinesCleared {
            rows: full_rows,
            score: self.score.points,
        });
        self.push_board_changed();
    }

    fn game_over(&mut self) {
        self.state = GameState::GameOver;
        self.piece = None;
        info!(score = self.score.points, "game over");
        self.events.push(GameEvent::GameOver {
            score: self.score.points,
        });
    }

    fn push_board_changed(&mut self) {
        let cells = self
            .board
            .occupied_cells()
            .into_iter()
            .map(|(x, y, kind)| CellView { x, y, kind })
            .collect();
        self.events.push(GameEvent::BoardChanged { cells });
    }
}

fn piece_moved(piece: &Piece) -> GameEvent {
    GameEvent::PieceMoved {
        kind: piece.kind,
        rotation: piece.rotation,
        x: piece.x,
        y: piece.y,
    }
}
