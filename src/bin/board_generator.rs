use clap::Parser;
use pegsolitaire_solver::engine::Board;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of boards to generate
    #[clap(long, default_value_t = 10)]
    count: u32,

    /// Maximum number of backward jumps applied per board
    #[clap(long, default_value_t = 20)]
    max_steps: u32,

    /// RNG seed; omit for a different batch every run
    #[clap(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    // Scrambling runs backwards from the solved position, so every
    // emitted board is solvable.
    for _ in 0..args.count {
        let steps = rng.gen_range(1..=args.max_steps.max(1));
        let board = Board::scrambled(&mut rng, steps);
        println!("{}", board);
    }
}
