//! Plays seeded practice sessions to the end, always taking a best discard,
//! and reports how often the hand was completed along the way.
//!
//! Usage: `cargo run --release --example practice_demo [config.json]`

use std::time::Instant;

use anyhow::Result;
use zshanten_core::{AppConfig, PracticeSession, PracticeState};
use zshanten_engine::{format_tiles, TileKind};

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig {
            seed: Some(42),
            ..AppConfig::default()
        },
    };
    let engine = config.engine();
    let mut seeds = config.seed_sequence();
    let sessions = 20;

    let start = Instant::now();
    let mut wins = 0;
    let mut rounds = 0;
    for i in 0..sessions {
        let mut rng = seeds.next_rng();
        let hand = config.deal(&mut rng);
        let mut session = PracticeSession::new(&engine, hand, config.practice_rounds, &mut rng)?;
        if i == 0 {
            println!("first hand: {}", format_tiles(session.current().hand()));
        }

        while session.can_discard() {
            if session.state() == PracticeState::Win {
                wins += 1;
                break;
            }
            let Some(kind) = TileKind::iter_mask(session.best_kinds()).next() else {
                break;
            };
            session.select_kind(kind);
            session.select_kind(kind);
            rounds += 1;
        }
    }
    let elapsed = start.elapsed();

    println!("=== PRACTICE ({sessions} sessions, {} rounds each) ===", config.practice_rounds);
    println!("Time:             {elapsed:.2?}");
    println!("Rounds played:    {rounds}");
    println!("Completed hands:  {wins}");
    println!(
        "Rounds/sec:       {:.1}",
        rounds as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
