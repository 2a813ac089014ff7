//! semi-smart: line up with the nearest opponent and shoot straight at it.
//!
//! Movement is vertical only, aim is horizontal only.

use super::Intent;
use crate::entities::PlayerId;
use crate::geometry::Vector;
use crate::snapshot::{GameInformation, PlayerInformation};

#[derive(Clone, Debug)]
pub struct SemiSmart {
    target_id: PlayerId,
}

impl SemiSmart {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            target_id: player_id,
        }
    }

    /// Last chosen target; the player's own id until an opponent has been seen.
    pub fn target_id(&self) -> PlayerId {
        self.target_id
    }

    pub(super) fn next_move(
        &mut self,
        player_id: PlayerId,
        me: &PlayerInformation,
        info: &GameInformation,
    ) -> Intent {
        // Nearest opponent; `min_by` keeps the first (lowest id) on ties.
        let target = info
            .players
            .iter()
            .filter(|(id, _)| **id != player_id)
            .min_by(|(_, a), (_, b)| {
                a.position
                    .distance(me.position)
                    .total_cmp(&b.position.distance(me.position))
            });

        let Some((&target_id, target)) = target else {
            self.target_id = player_id;
            return Intent::NONE;
        };
        self.target_id = target_id;

        let movement = Vector::new(0.0, sign(target.position.y - me.position.y));
        let aim = Vector::new(sign(target.position.x - me.position.x), 0.0);
        Intent::new(movement, aim)
    }
}

fn sign(delta: f64) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else {
        0.0
    }
}
