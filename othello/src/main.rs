mod game;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use game::Game;
use log::{info, LevelFilter};
use othello_agents::{
    Agent, Evaluator, MinimaxAgent, RandomAgent, SearchConfig, SearchEngine,
};
use othello_core::{perft, perft_divide, Board, Player, MAX_SIZE, MIN_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use render::{NullRenderer, Renderer, TerminalRenderer};
use std::time::{Duration, Instant};

#[derive(Debug, Parser)]
#[command(author, version, about = "Othello against a minimax search agent", long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Watch the search agent (Light) play a random opponent (Dark)
    Play(PlayArgs),
    /// Play many headless games and report win rate and search effort
    Bench(BenchArgs),
    /// Search one position and print the chosen move
    Search(SearchArgs),
    /// Count game-tree leaves to a fixed depth
    Perft(PerftArgs),
    /// Display a position with its legal moves and evaluation
    Show(PositionArgs),
}

fn parse_size(text: &str) -> Result<usize, String> {
    let size: usize = text.parse().map_err(|err| format!("{err}"))?;
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(format!("board size must be between {MIN_SIZE} and {MAX_SIZE}"))
    }
}

#[derive(Debug, Clone, clap::Args)]
struct EngineArgs {
    /// Board side length (even, 4 to 26)
    #[arg(long, default_value_t = 6, value_parser = parse_size)]
    size: usize,
    /// Search depth in plies
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,
    /// Disable alpha-beta pruning
    #[arg(long)]
    no_prune: bool,
}

impl EngineArgs {
    fn board(&self) -> anyhow::Result<Board> {
        Board::new(self.size).context("cannot set up the board")
    }

    fn search_config(&self, player: Player) -> anyhow::Result<SearchConfig> {
        Ok(SearchConfig::new(player, self.depth, !self.no_prune)?)
    }
}

#[derive(Debug, Clone, clap::Args)]
struct PlayArgs {
    #[command(flatten)]
    engine: EngineArgs,
    /// Seed for the opening side and the random opponent
    #[arg(long)]
    seed: Option<u64>,
    /// Pause after each half-move, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Play without drawing the board
    #[arg(long)]
    no_render: bool,
}

#[derive(Debug, Clone, clap::Args)]
struct BenchArgs {
    #[command(flatten)]
    engine: EngineArgs,
    /// Number of games to play
    #[arg(long, default_value_t = 150)]
    games: u32,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, clap::Args)]
struct PositionArgs {
    /// Board side length when no position is given (even, 4 to 26)
    #[arg(long, default_value_t = 6, value_parser = parse_size)]
    size: usize,
    /// Position in notation, rows split by '/': O light, X dark, . empty
    #[arg(long)]
    position: Option<String>,
}

impl PositionArgs {
    fn board(&self) -> anyhow::Result<Board> {
        match &self.position {
            Some(text) => {
                Board::from_notation(text).with_context(|| format!("cannot parse position {text:?}"))
            }
            None => Board::new(self.size).context("cannot set up the board"),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
struct SearchArgs {
    #[command(flatten)]
    engine: EngineArgs,
    /// Position in notation; the starting position when omitted
    #[arg(long)]
    position: Option<String>,
    /// Side to search for
    #[arg(long, value_enum, default_value_t = Side::Light)]
    side: Side,
}

#[derive(Debug, Clone, clap::Args)]
struct PerftArgs {
    /// Plies to count
    #[arg(value_parser = clap::value_parser!(u8).range(1..))]
    depth: u8,
    #[command(flatten)]
    position: PositionArgs,
    /// Side to move at the root
    #[arg(long, value_enum, default_value_t = Side::Light)]
    side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Light,
    Dark,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::Light => Player::Light,
            Side::Dark => Player::Dark,
        }
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn play(args: &PlayArgs) -> anyhow::Result<()> {
    let mut rng = rng_from(args.seed);
    let search = MinimaxAgent::new(args.engine.search_config(Player::Light)?);
    let opponent = RandomAgent::with_seed(Player::Dark, rng.gen());
    let mut game = Game::random_start(args.engine.board()?, search, Box::new(opponent), &mut rng)?;

    let mut renderer: Box<dyn Renderer> = if args.no_render {
        Box::new(NullRenderer)
    } else {
        Box::new(TerminalRenderer::stdout(true))
    };
    let delay = if args.no_render {
        Duration::ZERO
    } else {
        Duration::from_millis(args.delay_ms)
    };

    let report = game.play(renderer.as_mut(), delay)?;

    println!("\n{}", report.outcome);
    println!("Light: {}  Dark: {}", report.light_discs, report.dark_discs);
    println!("Moves: {}  Passes: {}", report.half_moves, report.passes);
    println!(
        "Searches: {}  Visited nodes: {}",
        report.searches, report.visited_nodes
    );

    Ok(())
}

fn bench(args: &BenchArgs) -> anyhow::Result<()> {
    let mut rng = rng_from(args.seed);
    let config = args.engine.search_config(Player::Light)?;
    let (mut wins, mut losses, mut draws) = (0u32, 0u32, 0u32);
    let mut visited_nodes = 0u64;
    let mut searches = 0u64;

    let start = Instant::now();
    for game_index in 1..=args.games {
        let opponent = RandomAgent::with_seed(Player::Dark, rng.gen());
        let mut game = Game::random_start(
            args.engine.board()?,
            MinimaxAgent::new(config),
            Box::new(opponent),
            &mut rng,
        )?;
        let report = game.play(&mut NullRenderer, Duration::ZERO)?;

        match report.outcome.winner() {
            Some(Player::Light) => wins += 1,
            Some(Player::Dark) => losses += 1,
            None => draws += 1,
        }
        visited_nodes += report.visited_nodes;
        searches += report.searches;

        info!(
            "game {game_index}: wins {:.1}%, losses {losses}, draws {draws}",
            f64::from(wins) * 100.0 / f64::from(game_index)
        );
    }
    let elapsed = start.elapsed();

    let games = f64::from(args.games.max(1));
    println!(
        "{} vs Random on {}x{}, {} games",
        MinimaxAgent::new(config).name(),
        args.engine.size,
        args.engine.size,
        args.games
    );
    println!(
        "Wins: {:.1}%  Losses: {:.1}%  Draws: {:.1}%",
        f64::from(wins) * 100.0 / games,
        f64::from(losses) * 100.0 / games,
        f64::from(draws) * 100.0 / games
    );
    println!("Mean visited nodes: {:.1} per game", visited_nodes as f64 / games);
    if searches > 0 {
        println!(
            "Mean visited nodes: {:.1} per search",
            visited_nodes as f64 / searches as f64
        );
    }
    println!("Time: {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn search(args: &SearchArgs) -> anyhow::Result<()> {
    let board = match &args.position {
        Some(text) => {
            Board::from_notation(text).with_context(|| format!("cannot parse position {text:?}"))?
        }
        None => args.engine.board()?,
    };
    let engine = SearchEngine::new(args.engine.search_config(args.side.into())?);

    TerminalRenderer::stdout(false).draw(&board)?;
    println!("Position: {}", board.to_notation());
    println!(
        "Searching for {} to depth {}...",
        engine.config().player,
        engine.config().depth
    );
    let weights = engine.evaluator().weights();
    info!(
        "weights: corners {}, coins {}, mobility {}",
        weights.corners, weights.coins, weights.mobility
    );

    let start = Instant::now();
    let result = engine.search(&board);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(best_move) => println!("\nBest move: {best_move}"),
        None => println!("\nNo legal moves available (pass)"),
    }
    println!("Score: {:.3}", result.score);
    println!("Depth: {}", result.depth);
    println!("Nodes: {}", result.nodes);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64().max(1e-9));

    Ok(())
}

fn run_perft(args: &PerftArgs) -> anyhow::Result<()> {
    let board = args.position.board()?;
    let player = Player::from(args.side);

    println!("Running perft({}) for {player}...", args.depth);
    println!("Position: {}", board.to_notation());

    if args.depth <= 3 {
        // Show move breakdown for shallow depths
        let results = perft_divide(&board, player, args.depth);
        let mut total = 0;

        for (mv, count) in &results {
            println!("{mv}: {count}");
            total += count;
        }

        if results.is_empty() {
            total = perft(&board, player, args.depth);
        }
        println!("\nTotal: {total}");
    } else {
        let start = Instant::now();
        let nodes = perft(&board, player, args.depth);
        let elapsed = start.elapsed();

        println!("Nodes: {nodes}");
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64().max(1e-9));
    }

    Ok(())
}

fn show(args: &PositionArgs) -> anyhow::Result<()> {
    let board = args.board()?;
    let evaluator = Evaluator::default();

    TerminalRenderer::stdout(false).draw(&board)?;
    println!("Position: {}", board.to_notation());

    for player in Player::ALL {
        let moves: Vec<String> = board
            .valid_moves(player)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!(
            "{player}: {} moves [{}], evaluation {:.3}",
            moves.len(),
            moves.join(" "),
            evaluator.evaluate(&board, player)
        );
    }

    if board.is_terminal() {
        println!("Game over: {}", board.winner());
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Play(args) => play(args),
        Command::Bench(args) => bench(args),
        Command::Search(args) => search(args),
        Command::Perft(args) => run_perft(args),
        Command::Show(args) => show(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_engine_defaults() {
        let cli = Cli::parse_from(["othello", "bench"]);
        let Command::Bench(args) = cli.command else {
            panic!("expected bench");
        };
        assert_eq!(args.engine.size, 6);
        assert_eq!(args.engine.depth, 3);
        assert!(!args.engine.no_prune);
        assert_eq!(args.games, 150);
    }

    #[test]
    fn test_zero_depth_rejected() {
        assert!(Cli::try_parse_from(["othello", "search", "--depth", "0"]).is_err());
    }

    #[test]
    fn test_size_bounds() {
        assert!(Cli::try_parse_from(["othello", "bench", "--size", "28"]).is_err());
        assert!(Cli::try_parse_from(["othello", "show", "--size", "2"]).is_err());
        assert!(Cli::try_parse_from(["othello", "perft", "1", "--size", "200"]).is_err());

        let cli = Cli::parse_from(["othello", "show", "--size", "26"]);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.board().unwrap().size(), 26);
    }

    #[test]
    fn test_zero_perft_depth_rejected() {
        assert!(Cli::try_parse_from(["othello", "perft", "0"]).is_err());
    }

    #[test]
    fn test_odd_size_reported() {
        let cli = Cli::parse_from(["othello", "play", "--size", "5", "--no-render"]);
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert!(args.engine.board().is_err());
    }

    #[test]
    fn test_position_args() {
        let cli = Cli::parse_from([
            "othello",
            "perft",
            "2",
            "--position",
            othello_core::positions::STARTING_8,
            "--side",
            "dark",
        ]);
        let Command::Perft(args) = cli.command else {
            panic!("expected perft");
        };
        let board = args.position.board().unwrap();
        assert_eq!(board.size(), 8);
        assert_eq!(perft(&board, args.side.into(), args.depth), 12);
    }
}
