//! Tacticmoji - Entry Point
//!
//! Terminal front-end for the tactics engine. Renders the board as text,
//! forwards clicks as cell coordinates and drives the clock by hand so the
//! opposing turn can be stepped through.

use std::io::{self, Write};
use std::path::PathBuf;

use tacticmoji::core::config::MatchConfig;
use tacticmoji::core::error::Result;
use tacticmoji::core::types::{Coord, Side, Timestamp};
use tacticmoji::interaction::ActionResult;
use tacticmoji::roster::MatchLayout;
use tacticmoji::turn::{Match, TickResult};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut game = load_match()?;
    let mut now: Timestamp = 0;
    let interval = game.config().opposing_action_interval_ms;

    println!("\n=== TACTICMOJI ===");
    print_help();

    loop {
        display_board(&game);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let words: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = words.first() else {
            continue;
        };

        match command {
            "quit" | "q" => break,
            "help" | "h" => print_help(),
            "click" | "c" => match parse_pair(&words[1..]) {
                Some((x, y)) => report(game.handle_cell(Coord::new(x as i32, y as i32))),
                None => println!("Usage: click <x> <y>"),
            },
            "px" => match parse_pair(&words[1..]) {
                Some((x, y)) => report(game.handle_pointer_at(x, y)),
                None => println!("Usage: px <pixel-x> <pixel-y>"),
            },
            "tick" | "t" => {
                let step = words
                    .get(1)
                    .and_then(|w| w.parse::<Timestamp>().ok())
                    .unwrap_or(interval);
                now += step;
                match game.tick(now) {
                    TickResult::Idle => println!("Clock at {} ms, nothing due.", now),
                    other => println!("{:?}", other),
                }
            }
            "wait" | "w" => {
                while game.active_side() == Some(Side::Opposing) {
                    now += interval;
                    game.tick(now);
                }
                println!("Clock at {} ms.", now);
            }
            "end" | "e" => {
                if !game.end_turn() {
                    println!("Not your turn.");
                }
            }
            "cancel" | "x" => {
                if !game.cancel_selection() {
                    println!("Nothing selected.");
                }
            }
            "status" | "s" => display_status(&game),
            "json" => println!("{}", serde_json::to_string_pretty(&game.snapshot())?),
            _ => println!("Unknown command '{}'. Type 'help'.", command),
        }

        for event in game.drain_events() {
            println!("  [{}] {}", event.at, event.description);
        }

        if let Some(outcome) = game.outcome() {
            display_board(&game);
            println!("Match over: {:?} with score {}", outcome, game.score());
            break;
        }
    }

    Ok(())
}

/// Build the match from optional `TACTICMOJI_CONFIG` / `TACTICMOJI_LAYOUT` files
fn load_match() -> Result<Match> {
    let config = match std::env::var_os("TACTICMOJI_CONFIG").map(PathBuf::from) {
        Some(path) => MatchConfig::load(&path)?,
        None => MatchConfig::default(),
    };

    let layout = match std::env::var_os("TACTICMOJI_LAYOUT").map(PathBuf::from) {
        Some(path) => {
            let board = tacticmoji::board::Board::new(config.grid_size);
            MatchLayout::load(&path, &board)?
        }
        None => MatchLayout::classic(),
    };

    Match::new(config, &layout)
}

fn parse_pair(words: &[&str]) -> Option<(f32, f32)> {
    match words {
        [x, y, ..] => Some((x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

fn report(result: ActionResult) {
    if !result.is_applied() {
        println!("Nothing happened.");
    }
}

fn print_help() {
    println!("Commands:");
    println!("  click <x> <y>   - Select a unit, or act with the selected one");
    println!("  px <x> <y>      - Same as click, in pixels");
    println!("  tick [ms]       - Advance the clock (default: one action interval)");
    println!("  wait            - Advance the clock until the enemy is done");
    println!("  end             - End your turn now");
    println!("  cancel          - Drop the current selection");
    println!("  status / s      - Show unit details");
    println!("  json            - Dump the current snapshot");
    println!("  quit / q        - Exit");
    println!();
}

fn display_board(game: &Match) {
    let snapshot = game.snapshot();
    println!();
    print!("{}", snapshot.render_text());
    let turn = match snapshot.active_side {
        Some(Side::Controlled) => "your turn",
        Some(Side::Opposing) => "enemy turn",
        None => "finished",
    };
    println!("Score: {} | {}", snapshot.score, turn);
}

fn display_status(game: &Match) {
    let snapshot = game.snapshot();
    println!("\n--- Your units ---");
    for unit in &snapshot.controlled {
        println!(
            "  {} {:<8} at {} hp {:>3}{}",
            unit.symbol,
            unit.name,
            unit.position,
            unit.health,
            if unit.has_acted { " (done)" } else { "" }
        );
    }
    println!("--- Enemies ---");
    for unit in &snapshot.opposing {
        println!("  {} {:<8} at {} hp {:>3}", unit.symbol, unit.name, unit.position, unit.health);
    }
    if let Some(id) = snapshot.selected {
        println!("Selected: {} ({} reachable cells)", id, snapshot.highlighted.len());
    }
}
