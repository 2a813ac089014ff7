use anyhow::{anyhow, Context, Result};
use arena_core::{MatchConfig, RawInput};
use std::fs;
use std::path::Path;

pub const DEFAULT_SEED: u32 = 0xA57E_0001;

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let mut seeds = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        seeds.push(parse_seed(token)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("no seeds parsed from --seeds"));
    }
    Ok(seeds)
}

pub fn parse_seed_file(path: &Path) -> Result<Vec<u32>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading seed file {}", path.display()))?;
    let mut seeds = Vec::new();
    for line in data.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        seeds.push(parse_seed(trimmed)?);
    }
    if seeds.is_empty() {
        return Err(anyhow!("seed file {} had no seeds", path.display()));
    }
    Ok(seeds)
}

/// Seed list precedence: file, then CSV, then an LCG sequence from `seed_start`.
pub fn resolve_seeds(
    seeds: Option<&str>,
    seed_file: Option<&Path>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u32>> {
    if let Some(path) = seed_file {
        return parse_seed_file(path);
    }
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    if seed_count == 0 {
        return Err(anyhow!("--seed-count must be >= 1"));
    }

    let mut cur = match seed_start {
        Some(start) => parse_seed(start)?,
        None => DEFAULT_SEED,
    };
    let mut out = Vec::with_capacity(seed_count as usize);
    for _ in 0..seed_count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    Ok(out)
}

/// Reads a JSON match config, or the default one when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<MatchConfig> {
    let config = match path {
        None => MatchConfig::default(),
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed reading config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed parsing config {}", path.display()))?
        }
    };
    config.validate().context("invalid match config")?;
    Ok(config)
}

/// Per-frame external inputs: a JSON array of arrays of `RawInput`.
pub fn load_inputs(path: &Path) -> Result<Vec<Vec<RawInput>>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading inputs {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed parsing inputs {}", path.display()))
}

pub fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed creating directory {}", parent.display()))?;
    }
    let encoded = serde_json::to_vec_pretty(value).context("failed to serialize json")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
