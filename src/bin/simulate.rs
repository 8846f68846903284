//! Headless simulator.
//!
//! Plays `COLLECTOR_SIM_GAMES` games per level with the greedy autoplayer and
//! prints a JSON summary to stdout. Logs go to stderr.

use anyhow::Result;
use serde::Serialize;

use tile_collector::adapter::AppConfig;
use tile_collector::core::{play_greedy, Session, SimpleRng};
use tile_collector::types::{GameStatus, Level};

/// Upper bound on selections per game; a board never needs more than its size.
const MAX_MOVES: usize = 1024;

#[derive(Debug, Serialize)]
struct LevelSummary {
    level: u8,
    games: usize,
    wins: usize,
    losses: usize,
    unfinished: usize,
    /// Mean share of tiles cleared per game.
    avg_cleared_ratio: f64,
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u32,
    levels: Vec<LevelSummary>,
}

fn simulate_level(level: Level, games: usize, rng: &mut SimpleRng) -> LevelSummary {
    let mut summary = LevelSummary {
        level: level.number(),
        games,
        wins: 0,
        losses: 0,
        unfinished: 0,
        avg_cleared_ratio: 0.0,
    };
    let mut ratio_sum = 0.0;

    for game in 0..games {
        let mut session = Session::new(level, rng.next_u32());
        let status = play_greedy(&mut session, rng, MAX_MOVES);
        match status {
            GameStatus::Won => summary.wins += 1,
            GameStatus::Lost => summary.losses += 1,
            GameStatus::Playing => summary.unfinished += 1,
        }
        ratio_sum += session.cleared_count() as f64 / session.tile_count().max(1) as f64;
        tracing::debug!(
            level = level.number(),
            game,
            status = status.as_str(),
            cleared = session.cleared_count(),
            "game finished"
        );
    }

    if games > 0 {
        summary.avg_cleared_ratio = ratio_sum / games as f64;
    }
    summary
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    let seed = config.seed_or_time();
    let mut rng = SimpleRng::new(seed);
    tracing::info!(seed, games = config.sim_games, "simulating");

    let levels = [Level::One, Level::Two]
        .into_iter()
        .map(|level| simulate_level(level, config.sim_games, &mut rng))
        .collect();

    let summary = Summary { seed, levels };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
