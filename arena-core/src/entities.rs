//! Live, mutable simulation objects. Owned by [`crate::sim::Game`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::PlayerStats;
use crate::constants::{
    BULLET_COLOR, BULLET_RADIUS, BULLET_SPAWN_GAP, PLAYER_BASE_COLOR, PLAYER_HURT_COLOR,
};
use crate::geometry::{Bounds, Vector};
use crate::strategy::Strategy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `from + t * (to - from)` per channel, truncated.
    pub fn lerp(from: Self, to: Self, t: f64) -> Self {
        let channel = |a: u8, b: u8| (f64::from(a) + t * (f64::from(b) - f64::from(a))) as u8;
        Self {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: channel(from.a, to.a),
        }
    }
}

/// What a renderer needs to draw an entity as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub center: (i64, i64),
    pub radius: f64,
    pub color: Rgba,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    position: Vector,
    direction: Vector,
    damage: u32,
    speed: f64,
}

impl Bullet {
    pub fn new(origin: Vector, direction: Vector, damage: u32, speed: f64) -> Self {
        Self {
            position: origin,
            direction: direction.normalize(),
            damage,
            speed,
        }
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn radius(&self) -> f64 {
        BULLET_RADIUS
    }

    pub fn advance(&mut self, dt: f64) {
        self.position += self.direction * (self.speed * dt);
    }

    /// Bullets leaving `[0, width] x [0, height]` are despawned, never bounced.
    pub fn out_of_bounds(&self, width: f64, height: f64) -> bool {
        let x_out = self.position.x > width || self.position.x < 0.0;
        let y_out = self.position.y > height || self.position.y < 0.0;
        x_out || y_out
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position.rounded(),
            radius: BULLET_RADIUS,
            color: BULLET_COLOR,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    position: Vector,
    bounds: Bounds,
    radius: f64,
    damage: u32,
    speed: f64,
    max_health: u32,
    health: u32,
    firerate: f64,
    last_shot_time: f64,
    strategy: Strategy,
    color: Rgba,
}

impl Player {
    pub fn new(id: PlayerId, stats: &PlayerStats, strategy: Strategy) -> Self {
        Self {
            id,
            position: Vector::ZERO,
            bounds: Bounds::unbounded(),
            radius: stats.radius,
            damage: stats.damage,
            speed: stats.speed,
            max_health: stats.max_health,
            health: stats.max_health,
            firerate: stats.firerate,
            last_shot_time: 0.0,
            strategy,
            color: PLAYER_BASE_COLOR,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn position(&self) -> Vector {
        self.position
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn firerate(&self) -> f64 {
        self.firerate
    }

    pub fn last_shot_time(&self) -> f64 {
        self.last_shot_time
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut Strategy {
        &mut self.strategy
    }

    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.position = self.clamped(self.position);
    }

    pub fn set_position(&mut self, position: Vector) {
        self.position = self.clamped(position);
    }

    /// `position` clamped so the player's circle stays inside its bounds.
    pub fn clamped(&self, position: Vector) -> Vector {
        let mut out = position;
        self.bounds.bound_position(&mut out, self.radius);
        out
    }

    pub fn displacement(&self, direction: Vector, dt: f64) -> Vector {
        direction.normalize() * (self.speed * dt)
    }

    pub fn move_in(&mut self, direction: Vector, dt: f64) {
        let displacement = self.displacement(direction, dt);
        self.translate(displacement);
    }

    pub fn translate(&mut self, displacement: Vector) {
        self.set_position(self.position + displacement);
    }

    /// Fires along `direction` if the cooldown measured on `now` (seconds) has elapsed.
    pub fn shoot(&mut self, direction: Vector, now: f64, bullet_speed: f64) -> Option<Bullet> {
        let direction = direction.normalize();
        if direction.is_zero() || now < self.last_shot_time + 1.0 / self.firerate {
            return None;
        }

        self.last_shot_time = now;
        let origin = self.position + direction * (self.radius + BULLET_RADIUS + BULLET_SPAWN_GAP);
        Some(Bullet::new(origin, direction, self.damage, bullet_speed))
    }

    pub fn hit(&mut self, bullet: &Bullet) {
        self.health = self.health.saturating_sub(bullet.damage());
        let health_fraction = if self.max_health == 0 {
            0.0
        } else {
            f64::from(self.health) / f64::from(self.max_health)
        };
        self.color = Rgba::lerp(PLAYER_HURT_COLOR, PLAYER_BASE_COLOR, health_fraction);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn overlaps(&self, position: Vector, radius: f64) -> bool {
        self.position.distance(position) <= self.radius + radius
    }

    pub fn circle(&self) -> Circle {
        Circle {
            center: self.position.rounded(),
            radius: self.radius,
            color: self.color,
        }
    }
}
