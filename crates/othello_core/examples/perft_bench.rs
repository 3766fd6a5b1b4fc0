//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p othello_core -- [depth] [board]
//!
//! The optional board is a 64-cell diagram as accepted by `Board::from_str`,
//! for example "---------------------------OX------XO--------------------------- white".

use othello_core::{perft, Board};
use std::env;
use std::time::Instant;

fn main() {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(9);

    let mut board = match args.get(2) {
        Some(diagram) => match diagram.parse::<Board>() {
            Ok(board) => board,
            Err(err) => {
                eprintln!("invalid board: {err}");
                std::process::exit(2);
            }
        },
        None => Board::startpos(),
    };

    println!("{board}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&mut board, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(&mut board, depth);
    let elapsed = start.elapsed();

    let nps = if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    };

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {nps:.0}");
}
