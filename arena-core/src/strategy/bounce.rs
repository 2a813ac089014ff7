//! bounce: patrol the field vertically, firing sideways.
//!
//! Two states. The edge check runs before the intent is emitted, so the frame
//! that reaches an edge already moves the other way.

use serde::{Deserialize, Serialize};

use super::Intent;
use crate::constants::PATROL_EDGE_MARGIN;
use crate::geometry::{Direction, Vector};
use crate::snapshot::PlayerInformation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PatrolState {
    GoingDown,
    GoingUp,
}

/// Which way to fire on each leg of the patrol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolAim {
    pub descending: Direction,
    pub ascending: Direction,
}

impl Default for PatrolAim {
    fn default() -> Self {
        Self {
            descending: Direction::East,
            ascending: Direction::West,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Bounce {
    state: PatrolState,
    aim: PatrolAim,
}

impl Bounce {
    pub fn new(aim: PatrolAim) -> Self {
        Self {
            state: PatrolState::GoingDown,
            aim,
        }
    }

    pub fn state(&self) -> PatrolState {
        self.state
    }

    pub fn aim(&self) -> PatrolAim {
        self.aim
    }

    pub(super) fn next_move(&mut self, me: &PlayerInformation) -> Intent {
        let y = me.position.y;
        // Positions clamp at one radius from the edge, so the flip line can't sit outside it.
        let margin = PATROL_EDGE_MARGIN.max(me.radius);
        let top = me.bounds.y_min().unwrap_or(0.0) + margin;
        let bottom = me.bounds.y_max().map_or(f64::INFINITY, |max| max - margin);

        // At most one flip per frame, even on fields too short to patrol.
        match self.state {
            PatrolState::GoingDown if y >= bottom => self.state = PatrolState::GoingUp,
            PatrolState::GoingUp if y <= top => self.state = PatrolState::GoingDown,
            _ => {}
        }

        match self.state {
            PatrolState::GoingDown => {
                Intent::new(Vector::new(0.0, 1.0), self.aim.descending.vector())
            }
            PatrolState::GoingUp => Intent::new(Vector::new(0.0, -1.0), self.aim.ascending.vector()),
        }
    }
}
