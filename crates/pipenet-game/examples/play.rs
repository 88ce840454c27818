//! Terminal front end for a pipenet session.
//!
//! Drives the whole engine boundary from stdin: rotating pieces, undo,
//! redo, restart, solving, and the win check. This is presentation glue
//! only; every rule lives in the engine crates.
//!
//! # Usage
//!
//! Play the built-in 5x5 template:
//!
//! ```sh
//! cargo run --example play
//! ```
//!
//! Play a random board:
//!
//! ```sh
//! cargo run --example play -- --random --rows 6 --cols 6 --wrapping --nb-empty 3 --nb-extra 2
//! ```
//!
//! # Commands
//!
//! - `c <row> <col>` - rotate a piece clockwise
//! - `a <row> <col>` - rotate a piece counter-clockwise
//! - `v` - solve the board
//! - `z` / `y` - undo / redo
//! - `r` - restart from the initial scramble
//! - `h` - help, `q` - quit

use std::io::{self, BufRead as _, Write as _};

use clap::Parser;
use pipenet_game::Game;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Play a random board instead of the built-in template.
    #[arg(long)]
    random: bool,

    /// Board height for random boards.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    rows: usize,

    /// Board width for random boards.
    #[arg(long, value_name = "COUNT", default_value_t = 5)]
    cols: usize,

    /// Use toroidal (wrapping) adjacency for random boards.
    #[arg(long)]
    wrapping: bool,

    /// Number of empty cells to request for random boards.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    nb_empty: usize,

    /// Number of loop edges to request for random boards.
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    nb_extra: usize,
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = if args.random {
        Game::new_random(
            args.rows,
            args.cols,
            args.wrapping,
            args.nb_empty,
            args.nb_extra,
        )
    } else {
        Game::new_default()
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !game.is_won() {
        print_board(&game);
        print!("> ? [h for help] ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        if !dispatch(&mut game, &line?) {
            break;
        }
    }

    print_board(&game);
    if game.is_won() {
        println!("> Congratulations!");
    } else {
        println!("> Maybe next time.");
    }
    Ok(())
}

/// Executes one command line; `false` means quit.
fn dispatch(game: &mut Game, line: &str) -> bool {
    let mut words = line.split_whitespace();
    match words.next() {
        Some("h") => help(),
        Some("q") => return false,
        Some("v") => {
            if !game.solve() {
                println!("> This board has no solution.");
            }
        }
        Some("z") => {
            if !game.undo() {
                println!("> Nothing to undo.");
            }
        }
        Some("y") => {
            if !game.redo() {
                println!("> Nothing to redo.");
            }
        }
        Some("r") => game.restart(),
        Some(turn @ ("c" | "a")) => {
            let coords = (
                words.next().and_then(|w| w.parse().ok()),
                words.next().and_then(|w| w.parse().ok()),
            );
            let (Some(row), Some(col)) = coords else {
                println!("> Usage: {turn} <row> <col>");
                return true;
            };
            let delta = if turn == "c" { 1 } else { -1 };
            if game.play_move(row, col, delta).is_err() {
                println!(
                    "> ({row}, {col}) is outside the {}x{} board.",
                    game.nb_rows(),
                    game.nb_cols()
                );
            }
        }
        Some(_) | None => println!("> Unknown command; press 'h' for help."),
    }
    true
}

fn help() {
    println!("- press 'c <row> <col>' to rotate a piece clockwise");
    println!("- press 'a <row> <col>' to rotate a piece counter-clockwise");
    println!("- press 'v' to solve the board");
    println!("- press 'z' to undo");
    println!("- press 'y' to redo");
    println!("- press 'r' to restart from the initial scramble");
    println!("- press 'q' to quit");
}

fn print_board(game: &Game) {
    let cols = game.nb_cols();
    println!();
    print!("     ");
    for col in 0..cols {
        print!("{col} ");
    }
    println!();
    println!("     {}", "-".repeat(2 * cols));
    for (row, line) in game.board().to_string().lines().enumerate() {
        print!("  {row} |");
        for glyph in line.chars() {
            print!("{glyph} ");
        }
        println!("|");
    }
    println!("     {}", "-".repeat(2 * cols));
}
