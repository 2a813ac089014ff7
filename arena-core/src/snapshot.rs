//! Read-only value copies of the live world, handed to strategies once per frame.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::entities::{Bullet, Player, PlayerId};
use crate::geometry::{Bounds, Vector};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerInformation {
    pub radius: f64,
    pub position: Vector,
    pub bounds: Bounds,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BulletInformation {
    pub radius: f64,
    pub position: Vector,
    pub direction: Vector,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GameInformation {
    pub players: BTreeMap<PlayerId, PlayerInformation>,
    pub bullets: Vec<BulletInformation>,
}

impl GameInformation {
    pub fn capture<'a>(
        players: impl IntoIterator<Item = &'a Player>,
        bullets: impl IntoIterator<Item = &'a Bullet>,
    ) -> Self {
        Self {
            players: players
                .into_iter()
                .map(|player| (player.id(), PlayerInformation::from(player)))
                .collect(),
            bullets: bullets.into_iter().map(BulletInformation::from).collect(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerInformation> {
        self.players.get(&id)
    }
}

impl From<&Player> for PlayerInformation {
    fn from(player: &Player) -> Self {
        Self {
            radius: player.radius(),
            position: player.position(),
            bounds: *player.bounds(),
        }
    }
}

impl From<&Bullet> for BulletInformation {
    fn from(bullet: &Bullet) -> Self {
        Self {
            radius: bullet.radius(),
            position: bullet.position(),
            direction: bullet.direction(),
        }
    }
}
