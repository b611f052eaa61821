//! Session configuration
//!
//! All gameplay tunables in one TOML-loadable struct. Defaults match the
//! classic tuning; a config that cannot support a session (empty
//! piece catalog, degenerate timings) is a fatal startup error, never a
//! degraded run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tetromino::TetrominoType;

/// Fatal configuration problems detected before a session starts
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("piece catalog is empty; nothing can spawn")]
    EmptyPieceCatalog,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("soft drop divisor must be greater than 1, got {0}")]
    SoftDropDivisor(f64),
    #[error("easy lookahead must be at least 2, got {0}")]
    LookaheadTooShallow(usize),
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Gameplay tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grace period after the piece bottoms out, in seconds
    pub lock_delay: f64,
    /// Held-key delay before horizontal auto-repeat kicks in
    pub das_delay: f64,
    /// Interval between auto-repeated horizontal moves
    pub das_speed: f64,
    /// Base fall interval per difficulty, in seconds
    pub easy_fall_interval: f64,
    pub hard_fall_interval: f64,
    /// Soft drop falls this many times faster than gravity
    pub soft_drop_divisor: f64,
    /// Easy-mode lookahead depth (Hard mode has none)
    pub easy_lookahead: usize,
    /// Upcoming pieces shown to the player
    pub preview_count: usize,
    /// Spawnable piece kinds
    pub pieces: Vec<TetrominoType>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lock_delay: 0.5,
            das_delay: 0.3,
            das_speed: 0.1,
            easy_fall_interval: 1.2,
            hard_fall_interval: 0.8,
            soft_drop_divisor: 10.0,
            easy_lookahead: 3,
            preview_count: 2,
            pieces: TetrominoType::all().to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse overrides from a TOML string; unset fields keep their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations a session cannot run on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pieces.is_empty() {
            return Err(ConfigError::EmptyPieceCatalog);
        }
        for (name, value) in [
            ("lock_delay", self.lock_delay),
            ("das_delay", self.das_delay),
            ("das_speed", self.das_speed),
            ("easy_fall_interval", self.easy_fall_interval),
            ("hard_fall_interval", self.hard_fall_interval),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if !(self.soft_drop_divisor > 1.0) {
            return Err(ConfigError::SoftDropDivisor(self.soft_drop_divisor));
        }
        if self.easy_lookahead < 2 {
            return Err(ConfigError::LookaheadTooShallow(self.easy_lookahead));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_empty_catalog_is_fatal() {
        let config = GameConfig {
            pieces: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyPieceCatalog));
    }

    #[test]
    fn test_nonpositive_interval_is_fatal() {
        let config = GameConfig {
            hard_fall_interval: 0.0,
            ..GameConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "hard_fall_interval", .. })
        ));
    }

    #[test]
    fn test_shallow_lookahead_is_fatal() {
        let config = GameConfig {
            easy_lookahead: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::LookaheadTooShallow(1)));
    }

    #[test]
    fn test_toml_overrides_keep_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
            lock_delay = 0.8
            pieces = ["I", "O", "T"]
            "#,
        )
        .unwrap();
        assert_eq!(config.lock_delay, 0.8);
        assert_eq!(config.pieces.len(), 3);
        // Untouched fields fall back to the defaults
        assert_eq!(config.das_delay, 0.3);
        assert_eq!(config.easy_lookahead, 3);
    }

    #[test]
    fn test_toml_with_empty_catalog_rejected() {
        let result = GameConfig::from_toml_str("pieces = []");
        assert_eq!(result.unwrap_err(), ConfigError::EmptyPieceCatalog);
    }

    #[test]
    fn test_garbage_toml_rejected() {
        assert!(matches!(
            GameConfig::from_toml_str("lock_delay = \"soon\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
