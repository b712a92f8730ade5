//! Ludo match simulator.
//!
//! Plays seeded matches between random players and prints the finishing
//! order and turn count of each. Set `RUST_LOG=ludo_engine=debug` to trace
//! every roll, move and capture.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ludo_engine::{DiceRng, LudoMatch, MatchBuilder, RuleConfig};

/// Turns after which a match is abandoned.
const TURN_LIMIT: u32 = 20_000;

#[derive(Parser, Debug)]
#[command(name = "ludo-sim", about = "Simulate seeded Ludo matches")]
struct Args {
    /// Number of seated colors (2-4)
    #[arg(short, long, default_value_t = 4)]
    players: usize,

    /// Seed of the first match; match i uses seed + i
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Number of matches to play
    #[arg(short, long, default_value_t = 1)]
    games: u64,

    /// JSON rule configuration file
    #[arg(short, long)]
    rules: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.rules {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading rules from {}", path.display()))?;
            RuleConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RuleConfig::default(),
    };

    info!(players = args.players, games = args.games, "starting simulation");

    let mut total_turns = 0u64;
    for i in 0..args.games {
        let seed = args.seed.wrapping_add(i);
        let game = MatchBuilder::new()
            .player_count(args.players)
            .rules(config.clone())
            .build(seed)?;

        let (game, turns) = play_out(game, seed)?;
        total_turns += u64::from(turns);

        let result = game
            .result()
            .context("match ended without a result")?;
        let winner = result.winner().map(|c| c.name()).unwrap_or("none");
        println!("game {i} seed {seed}: {turns} turns, winner {winner}, result {result:?}");
    }

    if args.games > 0 {
        println!("average turns: {:.1}", total_turns as f64 / args.games as f64);
    }
    Ok(())
}

/// Play a match to the end with uniformly random token choices.
fn play_out(mut game: LudoMatch, seed: u64) -> Result<(LudoMatch, u32)> {
    // Players choose with their own stream so the dice stay untouched
    let mut chooser = DiceRng::new(!seed);
    let mut turns = 0;

    while !game.is_over() {
        if turns >= TURN_LIMIT {
            bail!("match with seed {seed} exceeded {TURN_LIMIT} turns");
        }
        game.play_turn(|movable| movable[chooser.pick(movable.len())])?;
        turns += 1;
    }
    Ok((game, turns))
}
