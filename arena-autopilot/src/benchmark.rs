use crate::roster::lineup_label;
use crate::runner::{config_for_lineup, run_match, RunMetrics, RunOptions};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use arena_core::{MatchConfig, StrategyChoice};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    /// Stats, field and bullet speed shared by every lineup.
    pub base: MatchConfig,
    pub lineups: Vec<Vec<StrategyChoice>>,
    pub seeds: Vec<u32>,
    pub max_frames: u64,
    pub dt: f64,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    pub lineup: String,
    pub seed: u32,
    pub seed_hex: String,
    pub frame_count: u64,
    pub finished: bool,
    pub winner_seat: Option<usize>,
    pub winner_strategy: Option<String>,
    pub survivors: usize,
    pub total_shots: u32,
    pub total_hits: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineupAggregate {
    pub lineup: String,
    pub runs: usize,
    pub decided_rate: f64,
    pub avg_frames: f64,
    /// Win rate of each seat, in lineup order.
    pub seat_win_rates: Vec<f64>,
    pub avg_shots: f64,
    pub avg_hits: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyAggregate {
    pub strategy: String,
    pub appearances: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub survival_rate: f64,
    pub avg_shots: f64,
    pub avg_damage_taken: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_frames: u64,
    pub dt: f64,
    pub jobs: Option<usize>,
    pub lineups: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub strategy_rankings: Vec<StrategyAggregate>,
    pub lineup_rankings: Vec<LineupAggregate>,
    pub runs: Vec<RunRecord>,
}

#[derive(Clone, Debug)]
struct InternalRun {
    lineup: String,
    seats: usize,
    metrics: RunMetrics,
}

impl InternalRun {
    fn winner_seat(&self) -> Option<usize> {
        let winner = self.metrics.winner?;
        self.metrics
            .players
            .iter()
            .position(|player| player.id == winner)
    }
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.lineups.is_empty() {
        return Err(anyhow!("benchmark requires at least one lineup"));
    }
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
        }
    }

    // Aggregates are keyed by label, so a repeated lineup is only run once.
    let mut seen_labels = BTreeSet::new();
    let mut match_configs: Vec<(String, MatchConfig)> = Vec::with_capacity(config.lineups.len());
    for lineup in &config.lineups {
        let label = lineup_label(lineup);
        if !seen_labels.insert(label.clone()) {
            warn!(lineup = %label, "duplicate lineup skipped");
            continue;
        }
        let match_config = config_for_lineup(&config.base, lineup);
        match_config
            .validate()
            .with_context(|| format!("invalid lineup {label}"))?;
        match_configs.push((label, match_config));
    }

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let run_jobs: Vec<(&str, &MatchConfig, u32)> = match_configs
        .iter()
        .flat_map(|(label, match_config)| {
            config
                .seeds
                .iter()
                .map(move |seed| (label.as_str(), match_config, *seed))
        })
        .collect();

    let options = RunOptions {
        max_frames: config.max_frames,
        dt: config.dt,
        record_trace: false,
    };
    let run_one = |job: &(&str, &MatchConfig, u32)| -> Result<InternalRun> {
        let (label, match_config, seed) = *job;
        let artifact = run_match(match_config, seed, options, &[])
            .with_context(|| format!("benchmark run failed for lineup={label} seed={seed:#x}"))?;
        Ok(InternalRun {
            lineup: label.to_string(),
            seats: match_config.num_players,
            metrics: artifact.metrics,
        })
    };

    let run_results: Vec<Result<InternalRun>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| run_jobs.par_iter().map(run_one).collect())
    } else {
        run_jobs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let strategy_rankings = rank_strategies(&runs);
    let lineup_rankings = rank_lineups(&runs);
    let run_records: Vec<RunRecord> = runs
        .iter()
        .map(|run| RunRecord {
            lineup: run.lineup.clone(),
            seed: run.metrics.seed,
            seed_hex: seed_to_hex(run.metrics.seed),
            frame_count: run.metrics.frame_count,
            finished: run.metrics.finished,
            winner_seat: run.winner_seat(),
            winner_strategy: run.metrics.winner_strategy().map(str::to_string),
            survivors: run.metrics.survivors.len(),
            total_shots: run.metrics.total_shots,
            total_hits: run.metrics.total_hits,
        })
        .collect();

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_frames: config.max_frames,
        dt: config.dt,
        jobs: config.jobs,
        lineups: match_configs.into_iter().map(|(label, _)| label).collect(),
        seeds: config.seeds,
        run_count: run_records.len(),
        strategy_rankings,
        lineup_rankings,
        runs: run_records,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;
    info!(runs = report.run_count, out = %report_path.display(), "benchmark written");

    Ok(report)
}

fn rank_strategies(runs: &[InternalRun]) -> Vec<StrategyAggregate> {
    #[derive(Default)]
    struct Tally {
        appearances: usize,
        wins: usize,
        survived: usize,
        shots: u64,
        damage_taken: u64,
    }

    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for run in runs {
        for player in &run.metrics.players {
            let tally = tallies.entry(player.strategy.as_str()).or_default();
            tally.appearances += 1;
            tally.shots += u64::from(player.shots_fired);
            tally.damage_taken += u64::from(player.damage_taken);
            if player.eliminated_frame.is_none() {
                tally.survived += 1;
            }
            if run.metrics.winner == Some(player.id) {
                tally.wins += 1;
            }
        }
    }

    let mut rankings: Vec<StrategyAggregate> = tallies
        .into_iter()
        .map(|(strategy, tally)| {
            let n = tally.appearances as f64;
            StrategyAggregate {
                strategy: strategy.to_string(),
                appearances: tally.appearances,
                wins: tally.wins,
                win_rate: tally.wins as f64 / n,
                survival_rate: tally.survived as f64 / n,
                avg_shots: tally.shots as f64 / n,
                avg_damage_taken: tally.damage_taken as f64 / n,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.survival_rate.total_cmp(&a.survival_rate))
            .then_with(|| a.avg_damage_taken.total_cmp(&b.avg_damage_taken))
    });
    rankings
}

fn rank_lineups(runs: &[InternalRun]) -> Vec<LineupAggregate> {
    let mut grouped: BTreeMap<&str, Vec<&InternalRun>> = BTreeMap::new();
    for run in runs {
        grouped.entry(run.lineup.as_str()).or_default().push(run);
    }

    let mut rankings: Vec<LineupAggregate> = grouped
        .into_iter()
        .map(|(lineup, lineup_runs)| {
            let n = lineup_runs.len() as f64;
            let seats = lineup_runs.first().map_or(0, |run| run.seats);
            let mut seat_wins = vec![0usize; seats];
            for seat in lineup_runs.iter().filter_map(|run| run.winner_seat()) {
                if let Some(wins) = seat_wins.get_mut(seat) {
                    *wins += 1;
                }
            }
            let decided = lineup_runs
                .iter()
                .filter(|run| run.metrics.winner.is_some())
                .count();

            LineupAggregate {
                lineup: lineup.to_string(),
                runs: lineup_runs.len(),
                decided_rate: decided as f64 / n,
                avg_frames: lineup_runs
                    .iter()
                    .map(|run| run.metrics.frame_count as f64)
                    .sum::<f64>()
                    / n,
                seat_win_rates: seat_wins.iter().map(|wins| *wins as f64 / n).collect(),
                avg_shots: lineup_runs
                    .iter()
                    .map(|run| f64::from(run.metrics.total_shots))
                    .sum::<f64>()
                    / n,
                avg_hits: lineup_runs
                    .iter()
                    .map(|run| f64::from(run.metrics.total_hits))
                    .sum::<f64>()
                    / n,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.decided_rate
            .total_cmp(&a.decided_rate)
            .then_with(|| a.avg_frames.total_cmp(&b.avg_frames))
    });
    rankings
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv = String::from(
        "lineup,seed_hex,seed,frame_count,finished,winner_seat,winner_strategy,survivors,total_shots,total_hits\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "\"{}\",{},{},{},{},{},{},{},{},{}\n",
            row.lineup,
            row.seed_hex,
            row.seed,
            row.frame_count,
            row.finished,
            row.winner_seat.map(|seat| seat.to_string()).unwrap_or_default(),
            row.winner_strategy.as_deref().unwrap_or_default(),
            row.survivors,
            row.total_shots,
            row.total_hits
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
