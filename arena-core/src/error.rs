use core::fmt;

use crate::geometry::Axis;

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidBounds { axis: Axis, min: f64, max: f64 },
    NoPlayers,
    LengthMismatch { what: &'static str, expected: usize, actual: usize },
    InvalidStat { player: usize, stat: &'static str, value: f64 },
    InvalidField { width: f64, height: f64 },
    InvalidBulletSpeed { speed: f64 },
    InvalidRefreshRate,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBounds { axis, min, max } => {
                write!(f, "invalid {axis} bounds: min {min} is greater than max {max}")
            }
            Self::NoPlayers => write!(f, "a match needs at least one player"),
            Self::LengthMismatch {
                what,
                expected,
                actual,
            } => write!(
                f,
                "{what} list has {actual} entries, expected one per player ({expected})"
            ),
            Self::InvalidStat {
                player,
                stat,
                value,
            } => write!(f, "player {player}: {stat} out of range: {value}"),
            Self::InvalidField { width, height } => {
                write!(f, "field must have positive size, got {width}x{height}")
            }
            Self::InvalidBulletSpeed { speed } => {
                write!(f, "bullet speed must be positive, got {speed}")
            }
            Self::InvalidRefreshRate => write!(f, "refresh rate must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}
