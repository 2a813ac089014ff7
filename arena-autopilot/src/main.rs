use anyhow::{Context, Result};
use arena_autopilot::benchmark::{run_benchmark, BenchmarkConfig};
use arena_autopilot::roster::{
    default_lineups, describe_strategies, lineup_label, parse_lineup, parse_lineups,
};
use arena_autopilot::runner::{config_for_lineup, run_match, RunOptions};
use arena_autopilot::util::{
    load_config, load_inputs, parse_seed, resolve_seeds, seed_to_hex, write_json, DEFAULT_SEED,
};
use arena_core::MatchConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Parser, Debug)]
#[command(name = "arena-autopilot")]
#[command(about = "Headless arena shooter matches and strategy benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available strategies
    ListStrategies,
    /// Print or write the default match config as JSON
    DefaultConfig {
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Play one headless match
    Run {
        /// JSON match config (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Comma-separated strategy ids, replacing the config's lineup
        #[arg(long)]
        lineup: Option<String>,
        #[arg(long)]
        seed: Option<String>,
        #[arg(long, default_value_t = 7_200)]
        max_frames: u64,
        /// Seconds per frame (defaults to 1 / refresh_rate)
        #[arg(long)]
        dt: Option<f64>,
        /// JSON array, per frame, of inputs for the external players
        #[arg(long)]
        inputs: Option<PathBuf>,
        /// Write per-frame draw circles as JSON
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Run lineups across many seeds in parallel
    Benchmark {
        #[arg(long)]
        config: Option<PathBuf>,
        /// Semicolon-separated lineups, e.g. "smart,bounce;semi-smart,smart"
        #[arg(long)]
        lineups: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long, default_value_t = 7_200)]
        max_frames: u64,
        #[arg(long)]
        dt: Option<f64>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Commands::ListStrategies => {
            for (id, description) in describe_strategies() {
                println!("{id:20} {description}");
            }
        }
        Commands::DefaultConfig { output } => {
            let config = MatchConfig::default();
            if let Some(path) = output {
                write_json(&path, &config)?;
                println!("wrote={}", path.display());
            } else {
                let encoded = serde_json::to_string_pretty(&config)
                    .context("failed to serialize default config")?;
                println!("{encoded}");
            }
        }
        Commands::Run {
            config,
            lineup,
            seed,
            max_frames,
            dt,
            inputs,
            trace,
        } => {
            let mut match_config = load_config(config.as_deref())?;
            if let Some(raw) = lineup {
                match_config = config_for_lineup(&match_config, &parse_lineup(&raw)?);
            }
            let seed = match seed {
                Some(raw) => parse_seed(&raw)?,
                None => DEFAULT_SEED,
            };
            let inputs = match inputs {
                Some(path) => load_inputs(&path)?,
                None => Vec::new(),
            };

            let mut options = RunOptions::for_config(&match_config, max_frames);
            if let Some(dt) = dt {
                options.dt = dt;
            }
            options.record_trace = trace.is_some();

            let artifact = run_match(&match_config, seed, options, &inputs)?;
            let metrics = &artifact.metrics;

            println!("lineup={}", lineup_label(&match_config.strategies));
            println!("seed={}", seed_to_hex(seed));
            println!("frames={}", metrics.frame_count);
            println!("clock={:.3}", metrics.clock);
            println!("finished={}", metrics.finished);
            println!(
                "winner={}",
                metrics
                    .winner
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            println!("shots={}", metrics.total_shots);
            println!("hits={}", metrics.total_hits);
            for player in &metrics.players {
                println!(
                    "player={} strategy={} health={}/{} shots={} hits_taken={} eliminated_frame={}",
                    player.id,
                    player.strategy,
                    player.final_health,
                    player.max_health,
                    player.shots_fired,
                    player.hits_taken,
                    player
                        .eliminated_frame
                        .map(|frame| frame.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            if let Some(path) = trace {
                write_json(&path, &artifact.trace)?;
                println!("trace={}", path.display());
            }
        }
        Commands::Benchmark {
            config,
            lineups,
            seeds,
            seed_file,
            seed_start,
            seed_count,
            max_frames,
            dt,
            out_dir,
            jobs,
        } => {
            let base = load_config(config.as_deref())?;
            let lineups = match lineups {
                Some(raw) => parse_lineups(&raw)?,
                None => default_lineups(),
            };
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;
            let dt = dt.unwrap_or_else(|| RunOptions::for_config(&base, max_frames).dt);
            let out_dir = out_dir
                .unwrap_or_else(|| PathBuf::from(format!("benchmarks/{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                base,
                lineups,
                seeds,
                max_frames,
                dt,
                out_dir: out_dir.clone(),
                jobs,
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("strategies:");
            for (idx, row) in report.strategy_rankings.iter().enumerate() {
                println!(
                    "  {}. {}  win_rate={:.0}% survival={:.0}% appearances={} avg_shots={:.1} avg_damage_taken={:.1}",
                    idx + 1,
                    row.strategy,
                    row.win_rate * 100.0,
                    row.survival_rate * 100.0,
                    row.appearances,
                    row.avg_shots,
                    row.avg_damage_taken,
                );
            }
            println!("lineups:");
            for row in &report.lineup_rankings {
                let seats = row
                    .seat_win_rates
                    .iter()
                    .map(|rate| format!("{:.0}%", rate * 100.0))
                    .collect::<Vec<_>>()
                    .join("/");
                println!(
                    "  {}  decided={:.0}% seat_wins={} avg_frames={:.1}",
                    row.lineup,
                    row.decided_rate * 100.0,
                    seats,
                    row.avg_frames,
                );
            }
        }
    }

    Ok(())
}

fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
