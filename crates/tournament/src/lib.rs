//! Tournament runner for the Othello engines
//!
//! This crate provides:
//! - A factory that builds the engine for each difficulty tier
//! - A match runner for games between tiers
//! - JSON match reports
//!
//! # Usage
//!
//! ```bash
//! # Hard against Normal, 20 games, 200 ms per move
//! cargo run -p tournament -- match hard normal --games 20 --move-time-ms 200
//!
//! # Best move for a position given as a move list
//! cargo run -p tournament -- bestmove --difficulty extreme --moves "f5 d6 c3"
//! ```

mod factory;
mod match_runner;
mod results;

pub use factory::*;
pub use match_runner::*;
pub use results::*;
