//! Construction-time match configuration.
//!
//! Everything here is validated before a [`crate::sim::Game`] is built; a bad
//! config never produces a partially initialised world.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BULLET_SPEED, DEFAULT_DAMAGE, DEFAULT_FIRERATE, DEFAULT_MAX_HEALTH,
    DEFAULT_NUM_PLAYERS, DEFAULT_SPEED, FIELD_HEIGHT, FIELD_WIDTH, PLAYER_RADIUS, REFRESH_RATE,
};
use crate::entities::PlayerId;
use crate::error::ConfigError;
use crate::strategy::{PatrolAim, Strategy, StrategyKind};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub damage: u32,
    /// Pixels per second.
    pub speed: f64,
    pub max_health: u32,
    /// Shots per second.
    pub firerate: f64,
    pub radius: f64,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            damage: DEFAULT_DAMAGE,
            speed: DEFAULT_SPEED,
            max_health: DEFAULT_MAX_HEALTH,
            firerate: DEFAULT_FIRERATE,
            radius: PLAYER_RADIUS,
        }
    }
}

impl PlayerStats {
    fn validate(&self, player: usize) -> Result<(), ConfigError> {
        let invalid = |stat: &'static str, value: f64| ConfigError::InvalidStat {
            player,
            stat,
            value,
        };
        if self.max_health == 0 {
            return Err(invalid("max_health", 0.0));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(invalid("speed", self.speed));
        }
        if !(self.firerate.is_finite() && self.firerate > 0.0) {
            return Err(invalid("firerate", self.firerate));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid("radius", self.radius));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StrategyChoice {
    Idle,
    External,
    Bounce {
        #[serde(default)]
        aim: PatrolAim,
    },
    SemiSmart,
    Smart,
}

impl StrategyChoice {
    pub fn build(&self, player_id: PlayerId) -> Strategy {
        let kind = match *self {
            Self::Idle => StrategyKind::Idle,
            Self::External => StrategyKind::external(),
            Self::Bounce { aim } => StrategyKind::bounce(aim),
            Self::SemiSmart => StrategyKind::semi_smart(player_id),
            Self::Smart => StrategyKind::Smart,
        };
        Strategy::new(player_id, kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub num_players: usize,
    pub stats: Vec<PlayerStats>,
    pub strategies: Vec<StrategyChoice>,
    pub field: FieldConfig,
    pub bullet_speed: f64,
    /// Presentation cadence in frames per second. Not used by the simulation.
    pub refresh_rate: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_players: DEFAULT_NUM_PLAYERS,
            stats: vec![PlayerStats::default(); DEFAULT_NUM_PLAYERS],
            strategies: vec![
                StrategyChoice::SemiSmart,
                StrategyChoice::Bounce {
                    aim: PatrolAim::default(),
                },
            ],
            field: FieldConfig::default(),
            bullet_speed: DEFAULT_BULLET_SPEED,
            refresh_rate: REFRESH_RATE,
        }
    }
}

impl MatchConfig {
    /// Config with default stats for every seat of `lineup`.
    pub fn with_lineup(lineup: Vec<StrategyChoice>) -> Self {
        Self {
            num_players: lineup.len(),
            stats: vec![PlayerStats::default(); lineup.len()],
            strategies: lineup,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.stats.len() != self.num_players {
            return Err(ConfigError::LengthMismatch {
                what: "stats",
                expected: self.num_players,
                actual: self.stats.len(),
            });
        }
        if self.strategies.len() != self.num_players {
            return Err(ConfigError::LengthMismatch {
                what: "strategies",
                expected: self.num_players,
                actual: self.strategies.len(),
            });
        }
        let FieldConfig { width, height } = self.field;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidField { width, height });
        }
        if !(self.bullet_speed.is_finite() && self.bullet_speed > 0.0) {
            return Err(ConfigError::InvalidBulletSpeed {
                speed: self.bullet_speed,
            });
        }
        if self.refresh_rate == 0 {
            return Err(ConfigError::InvalidRefreshRate);
        }
        for (index, stats) in self.stats.iter().enumerate() {
            stats.validate(index)?;
        }
        Ok(())
    }
}
