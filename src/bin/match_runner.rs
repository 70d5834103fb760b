//! Headless Match Runner
//!
//! Plays full matches with a scripted controlled side against the built-in
//! opposing AI and prints a JSON (or text) summary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use tacticmoji::board::Board;
use tacticmoji::combat::{is_in_range, reachable_cells};
use tacticmoji::core::config::MatchConfig;
use tacticmoji::core::error::Result;
use tacticmoji::core::types::{Side, Timestamp};
use tacticmoji::roster::MatchLayout;
use tacticmoji::turn::{nearest_target, Match, MatchOutcome};

/// How the controlled side picks its clicks
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    /// Attack the nearest enemy if possible, otherwise close in
    Greedy,
    /// Seeded random clicks anywhere on (and just off) the board
    Random,
}

/// Headless Match Runner - scripted player vs the opposing AI
#[derive(Parser, Debug)]
#[command(name = "match_runner")]
#[command(about = "Play tactics matches headlessly and print a summary")]
struct Args {
    /// Controlled-side strategy
    #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
    strategy: Strategy,

    /// Maximum number of full rounds before giving up
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Clicks per turn for the random strategy
    #[arg(long, default_value_t = 40)]
    clicks: u32,

    /// Optional match config (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Optional starting layout (TOML)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every match event to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunSummary {
    match_id: String,
    strategy: Strategy,
    seed: u64,
    rounds: u32,
    outcome: Option<MatchOutcome>,
    score: u32,
    controlled_remaining: usize,
    opposing_remaining: usize,
    elapsed_ms: Timestamp,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    let layout = match &args.layout {
        Some(path) => MatchLayout::load(path, &Board::new(config.grid_size))?,
        None => MatchLayout::classic(),
    };
    let interval = config.opposing_action_interval_ms;
    let mut game = Match::new(config, &layout)?;

    let mut now: Timestamp = 0;
    let mut rounds = 0;

    while !game.is_finished() && rounds < args.max_rounds {
        match args.strategy {
            Strategy::Greedy => play_greedy(&mut game),
            Strategy::Random => play_random(&mut game, &mut rng, args.clicks),
        }
        if game.active_side() == Some(Side::Controlled) {
            game.end_turn();
        }

        while game.active_side() == Some(Side::Opposing) {
            now += interval;
            game.tick(now);
        }

        rounds += 1;
        if args.verbose {
            for event in game.drain_events() {
                eprintln!("  [{}] {}", event.at, event.description);
            }
        } else {
            game.drain_events();
        }
    }

    let summary = RunSummary {
        match_id: game.id().0.to_string(),
        strategy: args.strategy,
        seed,
        rounds,
        outcome: game.outcome(),
        score: game.score(),
        controlled_remaining: game.rosters().controlled.len(),
        opposing_remaining: game.rosters().opposing.len(),
        elapsed_ms: now,
    };

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== Match {} ===", summary.match_id);
        println!("Strategy: {:?} (seed {})", summary.strategy, summary.seed);
        println!("Rounds: {}", summary.rounds);
        println!("Outcome: {:?}", summary.outcome);
        println!("Score: {}", summary.score);
        println!(
            "Remaining: {} controlled, {} opposing",
            summary.controlled_remaining, summary.opposing_remaining
        );
    }

    Ok(())
}

/// Each unit attacks its nearest enemy when in reach, else moves as close
/// to it as the highlighted cells allow
fn play_greedy(game: &mut Match) {
    let ids = game.rosters().controlled.ids();

    for id in ids {
        if game.active_side() != Some(Side::Controlled) {
            return;
        }
        let Some(unit) = game.rosters().get(Side::Controlled, id) else {
            continue;
        };
        let Some(target) = nearest_target(unit, game.rosters().opposing.iter()) else {
            return;
        };

        let from = unit.position;
        let goal = target.position;
        let click = if is_in_range(unit, target) {
            Some(goal)
        } else {
            reachable_cells(game.board(), game.rosters(), unit)
                .into_iter()
                .filter(|cell| cell.distance(&goal) < from.distance(&goal))
                .min_by_key(|cell| cell.distance(&goal))
        };

        let Some(click) = click else {
            continue;
        };
        game.handle_cell(from);
        if !game.handle_cell(click).is_applied() {
            game.cancel_selection();
        }
    }
}

/// Random clicks over the board plus a one-cell margin
fn play_random(game: &mut Match, rng: &mut ChaCha8Rng, clicks: u32) {
    let size = game.board().size;
    for _ in 0..clicks {
        if game.active_side() != Some(Side::Controlled) {
            return;
        }
        let x = rng.gen_range(-1..=size);
        let y = rng.gen_range(-1..=size);
        game.handle_cell(tacticmoji::core::types::Coord::new(x, y));
    }
}
