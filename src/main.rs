//! Maze Race headless runner
//!
//! Plays a match without a display: both players stand still while the shared
//! slow-motion intent pulses, so every round exercises the timers, the wall
//! phases and the reset path.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use maze_race::sim::{MatchSession, RoundOutcome, TickInput};
use maze_race::{PlayerNames, RaceConfig};

/// Slow-motion is held for one phase period out of every four
const SLOW_MOTION_CYCLE: u64 = 480;
const SLOW_MOTION_HELD: u64 = 120;

#[derive(Parser, Debug)]
#[command(name = "maze-race", about = "Headless maze race simulation")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Rounds to play
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// JSON race configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Player 1 display name
    #[arg(long, default_value = "p1")]
    p1: String,

    /// Player 2 display name
    #[arg(long, default_value = "p2")]
    p2: String,

    /// Print the first maze as ASCII
    #[arg(long)]
    print_maze: bool,

    /// Print the round summaries as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct RoundSummary {
    round: u32,
    outcome: RoundOutcome,
    banner: String,
    ticks: u64,
    p1_score: u32,
    p2_score: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match RaceConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Bad config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => RaceConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("Maze Race (headless) starting with seed {}", seed);

    let names = PlayerNames::new(&args.p1, &args.p2);
    let mut session = match MatchSession::new(config, names, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start match: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.print_maze {
        print!("{}", session.round().grid);
    }

    let summaries = play(&mut session, args.rounds);

    if args.json {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Could not encode summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for s in &summaries {
            println!(
                "round {:>3}: {:<20} after {:>6} ticks  [{} - {}]",
                s.round, s.banner, s.ticks, s.p1_score, s.p2_score
            );
        }
        let scores = session.scores();
        let leader = match scores.leader() {
            Some(player) => format!("{} leads", session.names().name(player)),
            None => "level".to_string(),
        };
        println!(
            "{} rounds, {} draws: {}",
            scores.rounds_played(),
            scores.draws,
            leader
        );
    }

    ExitCode::SUCCESS
}

/// Run whole rounds with idle players
fn play(session: &mut MatchSession, rounds: u32) -> Vec<RoundSummary> {
    let mut summaries = Vec::with_capacity(rounds as usize);
    let mut ticks = 0u64;

    while summaries.len() < rounds as usize {
        let input = TickInput {
            slow_motion: ticks % SLOW_MOTION_CYCLE < SLOW_MOTION_HELD,
            ..Default::default()
        };
        let round = session.round_number();
        ticks += 1;

        if let Some(outcome) = session.tick(&input) {
            let scores = session.scores();
            summaries.push(RoundSummary {
                round,
                outcome,
                banner: outcome.banner(session.names()),
                ticks,
                p1_score: scores.player1,
                p2_score: scores.player2,
            });
            ticks = 0;
        }
    }

    summaries
}
