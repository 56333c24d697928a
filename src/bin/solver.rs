use clap::Parser;
use pegsolitaire_solver::engine::{Board, Game};
use pegsolitaire_solver::solver::Strategy;
use pegsolitaire_solver::utils::board_from_line;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to the board file (one line of 7 comma-separated 7-character rows)
    #[clap(long)]
    input: PathBuf,

    /// Strategy selector: 1 iterative deepening, 2-5 the A* variants; 0 runs all
    #[clap(long, default_value_t = 0)]
    flag: u32,
}

fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read board file: {}", e))?;
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or_else(|| "Board file is empty".to_string())?;
    board_from_line(line).map_err(|e| format!("Invalid board format: {}", e))
}

fn run_strategy(strategy: Strategy, board: &Board) {
    let mut game = Game::new_with_board(board.clone());
    let start = Instant::now();
    strategy.run(&mut game);
    let elapsed = start.elapsed();

    println!("{}:", strategy.name());
    println!("Execution Time: {:.6}s", elapsed.as_secs_f64());
    println!("Nodes Expanded: {}", game.nodes_expanded());
    println!("Trace: {}\n", game.trace());
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match read_board_file(&args.input) {
        Ok(board) => board,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(1);
        }
    };

    println!("Loaded board from {}\n", args.input.display());
    println!("Initial board state:\n{}\n", board.to_grid_string());

    if args.flag == 0 {
        for strategy in Strategy::ALL {
            run_strategy(strategy, &board);
        }
    } else {
        match Strategy::from_flag(args.flag) {
            Some(strategy) => run_strategy(strategy, &board),
            None => {
                eprintln!("Unknown strategy flag {} (expected 0-5)", args.flag);
                process::exit(1);
            }
        }
    }
}
