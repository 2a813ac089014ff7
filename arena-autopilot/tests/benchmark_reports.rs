use anyhow::Result;
use arena_autopilot::benchmark::{run_benchmark, BenchmarkConfig, BenchmarkReport};
use arena_autopilot::roster::{create_strategy, parse_lineups, strategy_ids};
use arena_autopilot::runner::{run_match, RunOptions};
use arena_autopilot::util::write_json;
use arena_core::{MatchConfig, StrategyChoice};
use std::fs;

#[test]
fn every_roster_strategy_plays_a_short_match() -> Result<()> {
    for id in strategy_ids() {
        let choice = create_strategy(id).expect("listed id resolves");
        let config = MatchConfig::with_lineup(vec![choice, StrategyChoice::Idle]);
        for seed in [0xDEAD_BEEF, 0xC0FF_EE11] {
            let artifact = run_match(&config, seed, RunOptions::for_config(&config, 300), &[])?;
            assert!(artifact.metrics.frame_count > 0, "strategy={id} seed={seed:#x}");
            assert_eq!(
                artifact.metrics.players[0].strategy, id,
                "strategy id mismatch for {id} seed={seed:#x}"
            );
        }
    }
    Ok(())
}

#[test]
fn benchmark_smoke_outputs_expected_metadata() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        base: MatchConfig::default(),
        lineups: parse_lineups("semi-smart,bounce;smart,bounce-reversed")?,
        seeds: vec![0xDEAD_BEEF, 0xC0FF_EE11, 7],
        max_frames: 900,
        dt: 1.0 / 60.0,
        out_dir: tmp.path().to_path_buf(),
        jobs: Some(2),
    })?;

    assert_eq!(report.run_count, 6);
    assert_eq!(report.lineup_rankings.len(), 2);
    assert_eq!(report.lineups, vec!["semi-smart,bounce", "smart,bounce-reversed"]);
    let strategies: Vec<&str> = report
        .strategy_rankings
        .iter()
        .map(|row| row.strategy.as_str())
        .collect();
    for expected in ["semi-smart", "bounce", "smart", "bounce-reversed"] {
        assert!(strategies.contains(&expected), "missing {expected}: {strategies:?}");
    }
    for row in &report.strategy_rankings {
        assert_eq!(row.appearances, 3);
        assert!((0.0..=1.0).contains(&row.win_rate));
    }
    for row in &report.lineup_rankings {
        assert_eq!(row.seat_win_rates.len(), 2);
        assert!(row.seat_win_rates.iter().sum::<f64>() <= 1.0 + 1e-9);
    }
    for run in &report.runs {
        assert!(run.frame_count <= 900);
        assert_eq!(run.finished, run.winner_seat.is_some() || run.survivors == 0);
    }

    assert!(tmp.path().join("runs.csv").exists());
    let raw = fs::read_to_string(tmp.path().join("summary.json"))?;
    let parsed: BenchmarkReport = serde_json::from_str(&raw)?;
    assert_eq!(parsed.run_count, report.run_count);
    assert_eq!(parsed.seeds, report.seeds);

    Ok(())
}

#[test]
fn benchmark_is_reproducible_across_thread_counts() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let run = |jobs: Option<usize>, dir: &str| {
        run_benchmark(BenchmarkConfig {
            base: MatchConfig::default(),
            lineups: vec![vec![StrategyChoice::SemiSmart, StrategyChoice::Smart]],
            seeds: vec![1, 2, 3, 4],
            max_frames: 600,
            dt: 1.0 / 60.0,
            out_dir: tmp.path().join(dir),
            jobs,
        })
    };

    let single = run(Some(1), "single")?;
    let pooled = run(None, "pooled")?;
    let frames = |report: &BenchmarkReport| {
        report
            .runs
            .iter()
            .map(|row| (row.seed, row.frame_count, row.winner_seat, row.total_shots))
            .collect::<Vec<_>>()
    };
    assert_eq!(frames(&single), frames(&pooled));
    Ok(())
}

#[test]
fn benchmark_rejects_bad_requests() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = || BenchmarkConfig {
        base: MatchConfig::default(),
        lineups: vec![vec![StrategyChoice::Smart, StrategyChoice::Idle]],
        seeds: vec![1],
        max_frames: 10,
        dt: 1.0 / 60.0,
        out_dir: tmp.path().to_path_buf(),
        jobs: None,
    };

    assert!(run_benchmark(BenchmarkConfig {
        seeds: Vec::new(),
        ..config()
    })
    .is_err());
    assert!(run_benchmark(BenchmarkConfig {
        lineups: Vec::new(),
        ..config()
    })
    .is_err());
    assert!(run_benchmark(BenchmarkConfig {
        jobs: Some(0),
        ..config()
    })
    .is_err());
    Ok(())
}

#[test]
fn repeated_lineups_are_run_once() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let report = run_benchmark(BenchmarkConfig {
        base: MatchConfig::default(),
        lineups: parse_lineups("smart,bounce;smart,bounce;semi-smart,smart")?,
        seeds: vec![1, 2],
        max_frames: 120,
        dt: 1.0 / 60.0,
        out_dir: tmp.path().to_path_buf(),
        jobs: Some(1),
    })?;

    assert_eq!(report.lineups, vec!["smart,bounce", "semi-smart,smart"]);
    assert_eq!(report.run_count, 4);
    assert_eq!(report.lineup_rankings.len(), 2);
    for row in &report.lineup_rankings {
        assert_eq!(row.runs, 2, "{}", row.lineup);
    }
    Ok(())
}

#[test]
fn trace_json_lists_players_then_bullets() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = MatchConfig::default();
    let options = RunOptions {
        record_trace: true,
        ..RunOptions::for_config(&config, 120)
    };
    let artifact = run_match(&config, 5, options, &[])?;
    let path = tmp.path().join("nested").join("trace.json");
    write_json(&path, &artifact.trace)?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let frames = value.as_array().expect("trace is an array");
    assert_eq!(frames.len() as u64, artifact.metrics.frame_count);
    let first = &frames[0];
    assert_eq!(first["frame"], 1);
    let circles = first["circles"].as_array().expect("circles array");
    assert!(circles.len() >= 2);
    assert_eq!(circles[0]["radius"], 15.0);
    Ok(())
}
