pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod sim;
pub mod snapshot;
pub mod strategy;

pub use config::{FieldConfig, MatchConfig, PlayerStats, StrategyChoice};
pub use entities::{Bullet, Circle, Player, PlayerId, Rgba};
pub use error::ConfigError;
pub use geometry::{Axis, Bounds, Direction, Vector};
pub use sim::{FrameReport, Game, HitEvent};
pub use snapshot::{BulletInformation, GameInformation, PlayerInformation};
pub use strategy::{Intent, PatrolAim, RawInput, Strategy, StrategyKind};
