use anyhow::{anyhow, Result};
use arena_core::{Direction, PatrolAim, PlayerId, StrategyChoice};

#[derive(Clone, Copy, Debug)]
pub struct RosterEntry {
    pub id: &'static str,
    pub description: &'static str,
    pub choice: StrategyChoice,
    /// Plays without external input.
    pub autonomous: bool,
}

const REVERSED_AIM: PatrolAim = PatrolAim {
    descending: Direction::West,
    ascending: Direction::East,
};

fn roster() -> [RosterEntry; 6] {
    [
        RosterEntry {
            id: "idle",
            description: "Never moves, never shoots",
            choice: StrategyChoice::Idle,
            autonomous: true,
        },
        RosterEntry {
            id: "external",
            description: "Driven by per-frame inputs (keyboard, scripts, --inputs files)",
            choice: StrategyChoice::External,
            autonomous: false,
        },
        RosterEntry {
            id: "bounce",
            description: "Patrols top to bottom, firing east going down and west going up",
            choice: StrategyChoice::Bounce {
                aim: PatrolAim::default(),
            },
            autonomous: true,
        },
        RosterEntry {
            id: "bounce-reversed",
            description: "Patrols top to bottom, firing west going down and east going up",
            choice: StrategyChoice::Bounce { aim: REVERSED_AIM },
            autonomous: true,
        },
        RosterEntry {
            id: "semi-smart",
            description: "Tracks the nearest opponent's row and fires toward its side",
            choice: StrategyChoice::SemiSmart,
            autonomous: true,
        },
        RosterEntry {
            id: "smart",
            description: "Dodges the closest incoming bullet, never shoots",
            choice: StrategyChoice::Smart,
            autonomous: true,
        },
    ]
}

pub fn strategy_ids() -> Vec<&'static str> {
    roster().iter().map(|entry| entry.id).collect()
}

pub fn describe_strategies() -> Vec<(&'static str, &'static str)> {
    roster()
        .iter()
        .map(|entry| (entry.id, entry.description))
        .collect()
}

pub fn create_strategy(id: &str) -> Option<StrategyChoice> {
    roster()
        .into_iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.choice)
}

/// Roster id for `choice`; configs with a custom patrol aim fall back to the
/// strategy's own label.
pub fn strategy_id(choice: &StrategyChoice) -> &'static str {
    roster()
        .into_iter()
        .find(|entry| entry.choice == *choice)
        .map(|entry| entry.id)
        .unwrap_or_else(|| choice.build(PlayerId(0)).label())
}

/// Every unordered pair of distinct self-driving strategies, excluding idle.
pub fn default_lineups() -> Vec<Vec<StrategyChoice>> {
    let fighters: Vec<StrategyChoice> = roster()
        .into_iter()
        .filter(|entry| entry.autonomous && entry.choice != StrategyChoice::Idle)
        .map(|entry| entry.choice)
        .collect();

    let mut lineups = Vec::new();
    for (idx, first) in fighters.iter().enumerate() {
        for second in &fighters[idx + 1..] {
            lineups.push(vec![*first, *second]);
        }
    }
    lineups
}

/// Comma-separated roster ids, one per seat.
pub fn parse_lineup(raw: &str) -> Result<Vec<StrategyChoice>> {
    let mut lineup = Vec::new();
    for token in raw.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let choice = create_strategy(token).ok_or_else(|| {
            let available = strategy_ids().join(", ");
            anyhow!("unknown strategy '{token}'. available: {available}")
        })?;
        lineup.push(choice);
    }
    if lineup.is_empty() {
        return Err(anyhow!("lineup resolved to empty list"));
    }
    Ok(lineup)
}

/// Semicolon-separated lineups, e.g. `smart,bounce;semi-smart,smart`.
pub fn parse_lineups(raw: &str) -> Result<Vec<Vec<StrategyChoice>>> {
    let lineups = raw
        .split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(parse_lineup)
        .collect::<Result<Vec<_>>>()?;
    if lineups.is_empty() {
        return Err(anyhow!("--lineups resolved to empty list"));
    }
    Ok(lineups)
}

pub fn lineup_label(lineup: &[StrategyChoice]) -> String {
    lineup
        .iter()
        .map(strategy_id)
        .collect::<Vec<_>>()
        .join(",")
}
