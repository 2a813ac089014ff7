//! 2D vector algebra and axis-aligned clamping.
//!
//! Screen coordinates: `+x` points east, `+y` points south.

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or the zero vector for a zero input.
    pub fn normalize(self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Self::ZERO
        } else {
            self / magnitude
        }
    }

    /// Caps the magnitude at `limit` without changing direction.
    pub fn seminormalize(self, limit: f64) -> Self {
        let magnitude = self.magnitude();
        if magnitude > limit {
            self * (limit / magnitude)
        } else {
            self
        }
    }

    pub fn rounded(self) -> (i64, i64) {
        (self.x.round() as i64, self.y.round() as i64)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Component-wise product.
impl Mul for Vector {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Cardinal aim directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const fn vector(self) -> Vector {
        match self {
            Self::North => Vector::new(0.0, -1.0),
            Self::South => Vector::new(0.0, 1.0),
            Self::East => Vector::new(1.0, 0.0),
            Self::West => Vector::new(-1.0, 0.0),
        }
    }
}

/// Optional per-axis limits. An unset limit leaves that side unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Bounds {
    x_min: Option<f64>,
    x_max: Option<f64>,
    y_min: Option<f64>,
    y_max: Option<f64>,
}

impl Bounds {
    pub fn new(
        x_min: Option<f64>,
        x_max: Option<f64>,
        y_min: Option<f64>,
        y_max: Option<f64>,
    ) -> Result<Self, ConfigError> {
        check_axis(Axis::X, x_min, x_max)?;
        check_axis(Axis::Y, y_min, y_max)?;
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub const fn unbounded() -> Self {
        Self {
            x_min: None,
            x_max: None,
            y_min: None,
            y_max: None,
        }
    }

    /// `[0, width] x [0, height]`.
    pub fn field(width: f64, height: f64) -> Result<Self, ConfigError> {
        Self::new(Some(0.0), Some(width), Some(0.0), Some(height))
    }

    pub fn x_min(&self) -> Option<f64> {
        self.x_min
    }

    pub fn x_max(&self) -> Option<f64> {
        self.x_max
    }

    pub fn y_min(&self) -> Option<f64> {
        self.y_min
    }

    pub fn y_max(&self) -> Option<f64> {
        self.y_max
    }

    /// Clamps `position` in place so it stays `padding` away from every set limit.
    pub fn bound_position(&self, position: &mut Vector, padding: f64) {
        position.x = clamp_axis(position.x, self.x_min, self.x_max, padding);
        position.y = clamp_axis(position.y, self.y_min, self.y_max, padding);
    }
}

fn check_axis(axis: Axis, min: Option<f64>, max: Option<f64>) -> Result<(), ConfigError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(ConfigError::InvalidBounds { axis, min, max }),
        _ => Ok(()),
    }
}

fn clamp_axis(value: f64, min: Option<f64>, max: Option<f64>, padding: f64) -> f64 {
    let mut out = value;
    if let Some(min) = min {
        out = out.max(min + padding);
    }
    if let Some(max) = max {
        out = out.min(max - padding);
    }
    out
}
