//! The per-frame simulation loop.
//!
//! A frame runs in a fixed order: snapshot, decide, move, shoot, advance
//! bullets, register hits, prune. Every strategy decides from the same frozen
//! snapshot before any entity is touched.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{FieldConfig, MatchConfig};
use crate::entities::{Bullet, Circle, Player, PlayerId};
use crate::error::ConfigError;
use crate::geometry::{Bounds, Vector};
use crate::rng::SeededRng;
use crate::snapshot::GameInformation;
use crate::strategy::{Intent, RawInput};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HitEvent {
    pub victim: PlayerId,
    pub damage: u32,
    pub remaining_health: u32,
}

/// What happened during one call to [`Game::update`].
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub clock: f64,
    pub shots: Vec<PlayerId>,
    pub blocked_moves: Vec<PlayerId>,
    pub hits: Vec<HitEvent>,
    pub eliminated: Vec<PlayerId>,
    pub expired_bullets: usize,
}

#[derive(Clone, Debug)]
pub struct Game {
    field: FieldConfig,
    bullet_speed: f64,
    players: Vec<Player>,
    bullets: Vec<Bullet>,
    clock: f64,
    frame: u64,
}

impl Game {
    /// Validates `config` and spawns its players at seeded random positions.
    pub fn new(config: &MatchConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;

        let field = config.field;
        let bounds = Bounds::field(field.width, field.height)?;
        let mut rng = SeededRng::new(seed);
        let players = config
            .stats
            .iter()
            .zip(&config.strategies)
            .zip(1u32..)
            .map(|((stats, choice), raw_id)| {
                let id = PlayerId(raw_id);
                let mut player = Player::new(id, stats, choice.build(id));
                player.set_bounds(bounds);
                let x = rng.next_coordinate(field.width);
                let y = rng.next_coordinate(field.height);
                player.set_position(Vector::new(x, y));
                player
            })
            .collect();

        Ok(Self::from_parts(field, players, config.bullet_speed))
    }

    /// Builds a world from already placed players. Their bounds are left as given.
    pub fn from_parts(field: FieldConfig, players: Vec<Player>, bullet_speed: f64) -> Self {
        Self {
            field,
            bullet_speed,
            players,
            bullets: Vec::new(),
            clock: 0.0,
            frame: 0,
        }
    }

    pub fn field(&self) -> FieldConfig {
        self.field
    }

    pub fn bullet_speed(&self) -> f64 {
        self.bullet_speed
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn insert_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    /// Seconds of simulated time, the sum of every `dt` seen so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_over(&self) -> bool {
        self.players.len() <= 1
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.players.as_slice() {
            [last] => Some(last.id()),
            _ => None,
        }
    }

    pub fn external_players(&self) -> usize {
        self.players
            .iter()
            .filter(|player| player.strategy().is_external())
            .count()
    }

    pub fn snapshot(&self) -> GameInformation {
        GameInformation::capture(&self.players, &self.bullets)
    }

    /// Draw list: players first, then bullets.
    pub fn circles(&self) -> Vec<Circle> {
        self.players
            .iter()
            .map(Player::circle)
            .chain(self.bullets.iter().map(Bullet::circle))
            .collect()
    }

    /// Advances the world by `dt` seconds. `inputs[k]` drives the k-th external
    /// player in list order; missing entries count as no input.
    pub fn update(&mut self, dt: f64, inputs: &[RawInput]) -> FrameReport {
        self.clock += dt;
        self.frame += 1;
        let mut report = FrameReport {
            frame: self.frame,
            clock: self.clock,
            ..FrameReport::default()
        };

        self.feed_inputs(inputs);

        let snapshot = Arc::new(self.snapshot());
        let intents: Vec<Intent> = self
            .players
            .iter_mut()
            .map(|player| player.strategy_mut().decide(Arc::clone(&snapshot)))
            .collect();

        for (index, intent) in intents.into_iter().enumerate() {
            if self.apply_movement(index, intent.movement, dt) {
                report.blocked_moves.push(self.players[index].id());
            }

            if intent.fires() {
                let player = &mut self.players[index];
                if let Some(bullet) = player.shoot(intent.aim, self.clock, self.bullet_speed) {
                    debug!(player = %player.id(), aim = %intent.aim, "shot fired");
                    report.shots.push(player.id());
                    self.bullets.push(bullet);
                }
            }
        }

        for bullet in &mut self.bullets {
            bullet.advance(dt);
        }

        self.register_hits(&mut report);
        self.register_dead(&mut report);
        report
    }

    fn feed_inputs(&mut self, inputs: &[RawInput]) {
        let mut remaining = inputs.iter();
        for player in &mut self.players {
            if player.strategy().is_external() {
                let input = remaining.next().copied().unwrap_or_default();
                player.strategy_mut().feed(input);
            }
        }
    }

    /// Moves player `index`, or pushes it back the other way if the move would
    /// overlap a peer. Returns whether the move was blocked.
    ///
    /// The push-back is a separation heuristic, not collision response: in
    /// crowded spots it can itself end in an overlap.
    fn apply_movement(&mut self, index: usize, direction: Vector, dt: f64) -> bool {
        let player = &self.players[index];
        let displacement = player.displacement(direction, dt);
        let prospective = player.clamped(player.position() + displacement);

        let blocked = self
            .players
            .iter()
            .enumerate()
            .any(|(other, peer)| other != index && peer.overlaps(prospective, player.radius()));

        let player = &mut self.players[index];
        if blocked {
            player.translate(-displacement);
        } else {
            player.set_position(prospective);
        }
        blocked
    }

    fn register_hits(&mut self, report: &mut FrameReport) {
        let FieldConfig { width, height } = self.field;
        let players = &mut self.players;
        let mut expired = 0;

        self.bullets.retain(|bullet| {
            if bullet.out_of_bounds(width, height) {
                expired += 1;
                return false;
            }
            let Some(victim) = players
                .iter_mut()
                .find(|player| player.overlaps(bullet.position(), bullet.radius()))
            else {
                return true;
            };

            victim.hit(bullet);
            debug!(
                victim = %victim.id(),
                damage = bullet.damage(),
                health = victim.health(),
                "player hit"
            );
            report.hits.push(HitEvent {
                victim: victim.id(),
                damage: bullet.damage(),
                remaining_health: victim.health(),
            });
            false
        });

        report.expired_bullets = expired;
    }

    fn register_dead(&mut self, report: &mut FrameReport) {
        let frame = self.frame;
        self.players.retain(|player| {
            if player.is_dead() {
                info!(player = %player.id(), frame, "player eliminated");
                report.eliminated.push(player.id());
                false
            } else {
                true
            }
        });
    }
}

#[cfg(test)]
mod tests;
