//! smart: dodge the closest bullet that is closing in. Never shoots.

use super::Intent;
use crate::constants::DODGE_MARGIN;
use crate::geometry::Vector;
use crate::snapshot::{BulletInformation, GameInformation, PlayerInformation};

/// A bullet is dangerous when one unit step along its direction brings it closer.
pub fn is_dangerous(bullet: &BulletInformation, position: Vector) -> bool {
    (bullet.position + bullet.direction).distance(position) < bullet.position.distance(position)
}

pub fn closest_dangerous_bullet(
    position: Vector,
    bullets: &[BulletInformation],
) -> Option<&BulletInformation> {
    bullets
        .iter()
        .filter(|bullet| is_dangerous(bullet, position))
        .min_by(|a, b| {
            a.position
                .distance(position)
                .total_cmp(&b.position.distance(position))
        })
}

pub(super) fn next_move(me: &PlayerInformation, info: &GameInformation) -> Intent {
    let Some(bullet) = closest_dangerous_bullet(me.position, &info.bullets) else {
        return Intent::NONE;
    };

    let distance = bullet.position.distance(me.position);
    let projected = bullet.position + bullet.direction * distance;
    let margin = me.radius + bullet.radius + DODGE_MARGIN;

    let mut movement = Vector::ZERO;
    if (projected.x - me.position.x).abs() <= margin {
        // Step away from the projected point; level counts as above.
        movement.y += if projected.y <= me.position.y { 1.0 } else { -1.0 };
    }
    if (projected.y - me.position.y).abs() <= margin {
        movement.x += if projected.x <= me.position.x { 1.0 } else { -1.0 };
    }

    Intent::new(movement, Vector::ZERO)
}
