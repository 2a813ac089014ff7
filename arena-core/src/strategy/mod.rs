//! Per-player decision making.
//!
//! Every strategy reads only the frozen [`GameInformation`] it was handed for
//! the current frame and answers with an [`Intent`]. Scaling intents into
//! displacements and shots is the simulation loop's job.

pub mod bounce;
pub mod semi_smart;
pub mod smart;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entities::PlayerId;
use crate::geometry::{Direction, Vector};
use crate::snapshot::GameInformation;

pub use bounce::{Bounce, PatrolAim, PatrolState};
pub use semi_smart::SemiSmart;

/// Movement and aim directions for one frame. A zero `aim` means hold fire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Intent {
    pub movement: Vector,
    pub aim: Vector,
}

impl Intent {
    pub const NONE: Self = Self {
        movement: Vector::ZERO,
        aim: Vector::ZERO,
    };

    pub const fn new(movement: Vector, aim: Vector) -> Self {
        Self { movement, aim }
    }

    pub fn fires(&self) -> bool {
        !self.aim.is_zero()
    }
}

/// One frame of input for an externally driven player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    pub movement: Vector,
    pub aim: Option<Direction>,
}

#[derive(Clone, Debug, Default)]
pub struct ExternalControl {
    pending: RawInput,
}

impl ExternalControl {
    pub fn pending(&self) -> RawInput {
        self.pending
    }

    fn intent(&self) -> Intent {
        Intent::new(
            self.pending.movement.seminormalize(1.0),
            self.pending.aim.map_or(Vector::ZERO, Direction::vector),
        )
    }
}

#[derive(Clone, Debug)]
pub enum StrategyKind {
    Idle,
    External(ExternalControl),
    Bounce(Bounce),
    SemiSmart(SemiSmart),
    Smart,
}

impl StrategyKind {
    pub fn external() -> Self {
        Self::External(ExternalControl::default())
    }

    pub fn bounce(aim: PatrolAim) -> Self {
        Self::Bounce(Bounce::new(aim))
    }

    pub fn semi_smart(player_id: PlayerId) -> Self {
        Self::SemiSmart(SemiSmart::new(player_id))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::External(_) => "external",
            Self::Bounce(_) => "bounce",
            Self::SemiSmart(_) => "semi-smart",
            Self::Smart => "smart",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Strategy {
    player_id: PlayerId,
    info: Arc<GameInformation>,
    kind: StrategyKind,
}

impl Strategy {
    pub fn new(player_id: PlayerId, kind: StrategyKind) -> Self {
        Self {
            player_id,
            info: Arc::default(),
            kind,
        }
    }

    pub fn idle(player_id: PlayerId) -> Self {
        Self::new(player_id, StrategyKind::Idle)
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn kind(&self) -> &StrategyKind {
        &self.kind
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn is_external(&self) -> bool {
        matches!(self.kind, StrategyKind::External(_))
    }

    pub fn info(&self) -> &GameInformation {
        &self.info
    }

    pub fn update_info(&mut self, info: Arc<GameInformation>) {
        self.info = info;
    }

    /// Stores `input` for an external strategy. Returns `false` for every other kind.
    pub fn feed(&mut self, input: RawInput) -> bool {
        match &mut self.kind {
            StrategyKind::External(control) => {
                control.pending = input;
                true
            }
            _ => false,
        }
    }

    pub fn get_move(&mut self) -> Intent {
        let Some(me) = self.info.player(self.player_id) else {
            return Intent::NONE;
        };

        match &mut self.kind {
            StrategyKind::Idle => Intent::NONE,
            StrategyKind::External(control) => control.intent(),
            StrategyKind::Bounce(bounce) => bounce.next_move(me),
            StrategyKind::SemiSmart(semi) => semi.next_move(self.player_id, me, &self.info),
            StrategyKind::Smart => smart::next_move(me, &self.info),
        }
    }

    pub fn decide(&mut self, info: Arc<GameInformation>) -> Intent {
        self.update_info(info);
        self.get_move()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::entities::PlayerId;
    use crate::geometry::{Bounds, Vector};
    use crate::snapshot::{BulletInformation, GameInformation, PlayerInformation};

    pub(crate) fn world(players: &[(u32, Vector)], bullets: &[(Vector, Vector)]) -> GameInformation {
        let bounds = Bounds::field(800.0, 800.0).expect("valid field");
        GameInformation {
            players: players
                .iter()
                .map(|&(id, position)| {
                    (
                        PlayerId(id),
                        PlayerInformation {
                            radius: 15.0,
                            position,
                            bounds,
                        },
                    )
                })
                .collect(),
            bullets: bullets
                .iter()
                .map(|&(position, direction)| BulletInformation {
                    radius: 5.0,
                    position,
                    direction: direction.normalize(),
                })
                .collect(),
        }
    }
}
