//! Project-wide tuning values.

use crate::entities::Rgba;

// Field
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 800.0;

// Presentation cadence (frames drawn per second); does not affect simulation.
pub const REFRESH_RATE: u32 = 60;

// Players
pub const PLAYER_RADIUS: f64 = 15.0;
pub const DEFAULT_NUM_PLAYERS: usize = 2;
pub const DEFAULT_DAMAGE: u32 = 10;
pub const DEFAULT_SPEED: f64 = 400.0;
pub const DEFAULT_MAX_HEALTH: u32 = 100;
pub const DEFAULT_FIRERATE: f64 = 4.0;

// Bullets
pub const BULLET_RADIUS: f64 = 5.0;
pub const DEFAULT_BULLET_SPEED: f64 = 600.0;
// Gap between the shooter's edge and a freshly spawned bullet's edge.
pub const BULLET_SPAWN_GAP: f64 = 1.0;

// Strategies
pub const PATROL_EDGE_MARGIN: f64 = 15.0;
pub const DODGE_MARGIN: f64 = 100.0;

// Colors
pub const PLAYER_BASE_COLOR: Rgba = Rgba::new(255, 248, 220, 255); // cornsilk
pub const PLAYER_HURT_COLOR: Rgba = Rgba::new(205, 92, 92, 255); // indianred
pub const BULLET_COLOR: Rgba = Rgba::new(240, 128, 128, 255); // lightcoral
