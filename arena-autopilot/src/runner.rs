use crate::roster::strategy_id;
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use arena_core::{Circle, Game, MatchConfig, PlayerId, PlayerStats, RawInput, StrategyChoice};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    pub max_frames: u64,
    /// Seconds per frame.
    pub dt: f64,
    pub record_trace: bool,
}

impl RunOptions {
    /// One frame per refresh of `config`.
    pub fn for_config(config: &MatchConfig, max_frames: u64) -> Self {
        Self {
            max_frames,
            dt: 1.0 / f64::from(config.refresh_rate),
            record_trace: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PlayerOutcome {
    pub id: PlayerId,
    pub strategy: String,
    pub max_health: u32,
    pub final_health: u32,
    pub shots_fired: u32,
    pub hits_taken: u32,
    pub damage_taken: u32,
    pub eliminated_frame: Option<u64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub seed: u32,
    pub max_frames: u64,
    pub dt: f64,
    pub frame_count: u64,
    pub clock: f64,
    pub finished: bool,
    pub winner: Option<PlayerId>,
    pub survivors: Vec<PlayerId>,
    pub total_shots: u32,
    pub total_hits: u32,
    pub expired_bullets: u64,
    pub blocked_moves: u64,
    pub players: Vec<PlayerOutcome>,
}

impl RunMetrics {
    pub fn winner_strategy(&self) -> Option<&str> {
        let winner = self.winner?;
        self.players
            .iter()
            .find(|player| player.id == winner)
            .map(|player| player.strategy.as_str())
    }
}

/// Draw list for one frame, taken after the update.
#[derive(Clone, Debug, Serialize)]
pub struct TraceFrame {
    pub frame: u64,
    pub clock: f64,
    pub circles: Vec<Circle>,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    pub trace: Vec<TraceFrame>,
}

/// `base` with its lineup replaced. Stats are kept when the seat count matches.
pub fn config_for_lineup(base: &MatchConfig, lineup: &[StrategyChoice]) -> MatchConfig {
    let mut config = base.clone();
    if config.stats.len() != lineup.len() {
        config.stats = vec![PlayerStats::default(); lineup.len()];
    }
    config.num_players = lineup.len();
    config.strategies = lineup.to_vec();
    config
}

/// Plays one match until a single player is left or `max_frames` elapse.
/// `inputs[frame]` feeds the external players on that frame.
pub fn run_match(
    config: &MatchConfig,
    seed: u32,
    options: RunOptions,
    inputs: &[Vec<RawInput>],
) -> Result<RunArtifact> {
    if options.max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    if !(options.dt.is_finite() && options.dt > 0.0) {
        return Err(anyhow!("dt must be a positive number of seconds, got {}", options.dt));
    }

    let mut game = Game::new(config, seed).context("invalid match config")?;
    let externals = game.external_players();
    if externals == 0 && !inputs.is_empty() {
        warn!(frames = inputs.len(), "inputs given but no player is external; ignoring");
    }

    let mut outcomes: BTreeMap<PlayerId, PlayerOutcome> = game
        .players()
        .iter()
        .zip(&config.strategies)
        .map(|(player, choice)| {
            let outcome = PlayerOutcome {
                id: player.id(),
                strategy: strategy_id(choice).to_string(),
                max_health: player.max_health(),
                final_health: player.health(),
                shots_fired: 0,
                hits_taken: 0,
                damage_taken: 0,
                eliminated_frame: None,
            };
            (player.id(), outcome)
        })
        .collect();

    let mut trace = Vec::new();
    let mut expired_bullets = 0u64;
    let mut blocked_moves = 0u64;
    let mut warned_extra_inputs = false;

    while game.frame() < options.max_frames && !game.is_over() {
        let frame_inputs = inputs
            .get(game.frame() as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if externals > 0 && frame_inputs.len() > externals && !warned_extra_inputs {
            warn!(
                frame = game.frame(),
                given = frame_inputs.len(),
                externals,
                "more inputs than external players; extras are ignored"
            );
            warned_extra_inputs = true;
        }

        let report = game.update(options.dt, frame_inputs);

        for shooter in &report.shots {
            if let Some(outcome) = outcomes.get_mut(shooter) {
                outcome.shots_fired += 1;
            }
        }
        for hit in &report.hits {
            if let Some(outcome) = outcomes.get_mut(&hit.victim) {
                outcome.hits_taken += 1;
                outcome.damage_taken += hit.damage;
            }
        }
        for victim in &report.eliminated {
            if let Some(outcome) = outcomes.get_mut(victim) {
                outcome.eliminated_frame = Some(report.frame);
            }
        }
        expired_bullets += report.expired_bullets as u64;
        blocked_moves += report.blocked_moves.len() as u64;

        if options.record_trace {
            trace.push(TraceFrame {
                frame: report.frame,
                clock: report.clock,
                circles: game.circles(),
            });
        }
    }

    for outcome in outcomes.values_mut() {
        outcome.final_health = game.player(outcome.id).map_or(0, |player| player.health());
    }
    let players: Vec<PlayerOutcome> = outcomes.into_values().collect();
    let metrics = RunMetrics {
        seed,
        max_frames: options.max_frames,
        dt: options.dt,
        frame_count: game.frame(),
        clock: game.clock(),
        finished: game.is_over(),
        winner: game.winner(),
        survivors: game.players().iter().map(|player| player.id()).collect(),
        total_shots: players.iter().map(|player| player.shots_fired).sum(),
        total_hits: players.iter().map(|player| player.hits_taken).sum(),
        expired_bullets,
        blocked_moves,
        players,
    };

    info!(
        seed = %seed_to_hex(seed),
        frames = metrics.frame_count,
        winner = ?metrics.winner,
        survivors = metrics.survivors.len(),
        "match finished"
    );

    Ok(RunArtifact { metrics, trace })
}
