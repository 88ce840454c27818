//! Example demonstrating random board generation.
//!
//! This example shows how to:
//! - Create a `BoardGenerator` from command-line parameters
//! - Generate a random board, optionally from a fixed seed
//! - Display the board, its seed, and its solution count
//! - Sample for a board with a unique solution
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Generate a wrapping board with empties and loops:
//!
//! ```sh
//! cargo run --example generate_board -- --rows 6 --cols 8 --wrapping --nb-empty 4 --nb-extra 3
//! ```
//!
//! Reproduce a board from its seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed <64-hex-chars>
//! ```
//!
//! Sample boards until one has a unique solution (default budget 1000):
//!
//! ```sh
//! cargo run --example generate_board -- --unique --max-tries 1000
//! ```

use std::process;

use clap::Parser;
use pipenet_generator::{BoardGenerator, BoardSeed, GeneratedBoard, GeneratorParams};
use rayon::prelude::*;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board height.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    rows: usize,

    /// Board width.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    cols: usize,

    /// Use toroidal (wrapping) adjacency.
    #[arg(long)]
    wrapping: bool,

    /// Number of empty cells to request.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    nb_empty: usize,

    /// Number of loop edges beyond the spanning tree to request.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    nb_extra: usize,

    /// Generate from a fixed 64-hex-char seed instead of a random one.
    #[arg(long, value_name = "SEED", conflicts_with = "unique")]
    seed: Option<String>,

    /// Sample until a board with exactly one solution is found.
    #[arg(long)]
    unique: bool,

    /// Maximum boards to sample when filtering for uniqueness.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_tries: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.rows == 0 || args.cols == 0 {
        eprintln!("--rows and --cols must be at least 1.");
        process::exit(1);
    }

    let generator = BoardGenerator::new(GeneratorParams {
        rows: args.rows,
        cols: args.cols,
        wrapping: args.wrapping,
        nb_empty: args.nb_empty,
        nb_extra: args.nb_extra,
    });

    if let Some(seed) = &args.seed {
        let seed: BoardSeed = match seed.parse() {
            Ok(seed) => seed,
            Err(err) => {
                eprintln!("Invalid seed: {err}");
                process::exit(2);
            }
        };
        print_board(&generator.generate_with_seed(seed));
        return;
    }

    if !args.unique {
        print_board(&generator.generate());
        return;
    }

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let unique = (0..args.max_tries)
        .into_par_iter()
        .map(|_| generator.generate())
        .find_any(|generated| pipenet_solver::count_solutions(&generated.board) == 1);

    if let Some(generated) = unique {
        print_board(&generated);
        return;
    }

    eprintln!(
        "No unique-solution board found in {} tries.",
        args.max_tries
    );
    process::exit(1);
}

fn print_board(generated: &GeneratedBoard) {
    println!("Seed:");
    println!("  {}", generated.seed);
    println!();

    println!("Board:");
    for line in generated.board.to_string().lines() {
        println!("  |{line}|");
    }
    println!();

    let solutions = pipenet_solver::count_solutions(&generated.board);
    println!("Solutions:");
    println!("  {solutions}");
}
