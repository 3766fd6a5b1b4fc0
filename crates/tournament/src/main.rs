//! Tournament CLI
//!
//! Play matches between difficulty tiers, pick moves for single positions,
//! inspect opening books and run perft.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use othello_core::{
    parse_move, perft, Board, BookConfig, Difficulty, EngineConfig, OpeningBook, SearchLimits,
};
use tournament::{create_engine, load_book, MatchConfig, MatchRunner};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tournament", about = "Othello engine driver", version)]
struct Cli {
    /// Engine settings (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a match between two difficulty tiers
    Match(MatchArgs),
    /// Choose a move for one position
    Bestmove(BestMoveArgs),
    /// Load an opening book and print what it knows
    Book(BookArgs),
    /// Count leaf positions to a fixed depth
    Perft(PerftArgs),
}

/// A position: a text diagram, or moves played from the start.
#[derive(Args, Debug, Clone)]
struct PositionArgs {
    /// 64 cells (X black, O white, - empty) and an optional side to move
    #[arg(long, value_name = "DIAGRAM", conflicts_with = "moves")]
    board: Option<String>,
    /// Space separated moves from the start position, e.g. "f5 d6 c3"
    #[arg(long, value_name = "MOVES")]
    moves: Option<String>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// First engine (easy, normal, hard, extreme); takes black in game one
    engine1: Difficulty,
    /// Second engine
    engine2: Difficulty,
    #[arg(long, short = 'g', default_value_t = 10)]
    games: u32,
    /// Depth cap per move
    #[arg(long, short = 'd')]
    depth: Option<u8>,
    #[arg(long, value_name = "MS", default_value_t = 1_000)]
    move_time_ms: u64,
    #[arg(long, value_name = "N")]
    node_limit: Option<u64>,
    /// Random plies before the engines take over
    #[arg(long, default_value_t = 2)]
    opening_plies: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the full match report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BestMoveArgs {
    #[command(flatten)]
    position: PositionArgs,
    /// Overrides the configured difficulty
    #[arg(long)]
    difficulty: Option<Difficulty>,
    /// Overrides the configured move time
    #[arg(long, value_name = "MS")]
    move_time_ms: Option<u64>,
    #[arg(long, short = 'd')]
    depth: Option<u8>,
}

#[derive(Args, Debug)]
struct BookArgs {
    /// A database file or a directory of *.wtb files
    path: PathBuf,
    /// Added to row * 10 + col in move codes (standard WThor files use 11)
    #[arg(long)]
    code_offset: Option<u8>,
    #[command(flatten)]
    position: PositionArgs,
}

#[derive(Args, Debug)]
struct PerftArgs {
    #[arg(default_value_t = 6)]
    depth: u8,
    #[command(flatten)]
    position: PositionArgs,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Match(args) => run_match(&config, args),
        Commands::Bestmove(args) => best_move(config, args),
        Commands::Book(args) => show_book(&config, args),
        Commands::Perft(args) => run_perft(args),
    }
}

fn run_match(config: &EngineConfig, args: MatchArgs) -> Result<()> {
    let book = load_book(&config.book);
    let mut engine1 = create_engine(args.engine1, config, book.clone());
    let mut engine2 = create_engine(args.engine2, config, book);

    let match_config = MatchConfig {
        num_games: args.games,
        depth: args.depth.unwrap_or(u8::MAX),
        move_time_ms: Some(args.move_time_ms),
        node_limit: args.node_limit,
        opening_plies: args.opening_plies,
        alternate_colors: true,
        seed: args.seed,
    };
    info!(engine1 = %args.engine1, engine2 = %args.engine2, games = args.games, "starting match");

    let mut report = MatchRunner::new(match_config).run_match(engine1.as_mut(), engine2.as_mut());
    // Tier names read better than engine names when both sides share one.
    report.engine1 = args.engine1.to_string();
    report.engine2 = args.engine2.to_string();
    println!("{}", report.generate_report());

    if let Some(path) = args.json {
        report.save(&path)?;
        info!(path = %path.display(), "match report written");
    }
    Ok(())
}

fn best_move(mut config: EngineConfig, args: BestMoveArgs) -> Result<()> {
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(ms) = args.move_time_ms {
        config.move_time_ms = ms;
    }
    let board = parse_position(&args.position)?;
    println!("{board}\n");

    let book = load_book(&config.book);
    let mut engine = create_engine(config.difficulty, &config, book);
    let mut limits = config.search_limits();
    if let Some(depth) = args.depth {
        limits = limits.with_max_depth(depth);
    }

    let start = Instant::now();
    let result = engine.search(&board, limits);
    println!(
        "bestmove {} score {} depth {} nodes {} time {}ms{}",
        result.best_move,
        result.score,
        result.depth,
        result.nodes,
        start.elapsed().as_millis(),
        if result.from_book { " (book)" } else { "" }
    );
    Ok(())
}

fn show_book(config: &EngineConfig, args: BookArgs) -> Result<()> {
    let mut book_config: BookConfig = config.book.config.clone();
    if let Some(offset) = args.code_offset {
        book_config.code_offset = offset;
    }
    let mut book = OpeningBook::with_config(book_config);
    load_book_path(&mut book, &args.path)?;

    let stats = book.stats();
    println!(
        "games {}  positions {}  deepest line {} plies",
        stats.games, stats.positions, stats.max_depth
    );

    let board = parse_position(&args.position)?;
    println!("\n{board}\n");
    let ranked = book.ranked_moves(&board);
    if ranked.is_empty() {
        println!("position not in book");
    }
    for mv in ranked {
        println!(
            "{:<5} games {:>6}  +{} ={} -{}  win rate {:>5.1}%  score {:.3}",
            mv.mv,
            mv.games,
            mv.wins,
            mv.draws,
            mv.losses,
            mv.win_rate() * 100.0,
            mv.score()
        );
    }
    Ok(())
}

fn load_book_path(book: &mut OpeningBook, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("no book at {}", path.display());
    }
    book.load_path(path);
    if book.is_empty() {
        bail!("no games could be read from {}", path.display());
    }
    Ok(())
}

fn run_perft(args: PerftArgs) -> Result<()> {
    let mut board = parse_position(&args.position)?;
    for depth in 1..=args.depth {
        let start = Instant::now();
        let nodes = perft(&mut board, depth);
        let elapsed = start.elapsed().max(Duration::from_micros(1));
        println!(
            "perft({depth}) = {nodes} ({:.0} nodes/s)",
            nodes as f64 / elapsed.as_secs_f64()
        );
    }
    Ok(())
}

fn parse_position(args: &PositionArgs) -> Result<Board> {
    if let Some(diagram) = &args.board {
        return diagram.parse::<Board>().context("invalid board diagram");
    }
    let mut board = Board::startpos();
    if let Some(moves) = &args.moves {
        for text in moves.split_whitespace() {
            let mv = parse_move(text).ok_or_else(|| anyhow!("cannot parse move {text:?}"))?;
            if !board.play(mv) {
                bail!("illegal move {text} in\n{board}");
            }
        }
    }
    Ok(board)
}
