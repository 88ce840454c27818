//! Random board generation for the pipenet puzzle.
//!
//! The generator builds a random spanning structure over the grid so that a
//! reachable solved state exists by construction, optionally adds loop
//! edges and empty cells, derives each cell's shape from its connection
//! degree, and finally scrambles every orientation. The solved layout is
//! recorded only implicitly: a [`GeneratedBoard`] carries the scrambled
//! board and the [`BoardSeed`] that reproduces it, never the solution.
//!
//! # Examples
//!
//! ```
//! use pipenet_generator::{BoardGenerator, GeneratorParams};
//!
//! let generator = BoardGenerator::new(GeneratorParams::default());
//! let generated = generator.generate();
//! assert_eq!(generated.board.rows(), 5);
//! assert_eq!(generated.board.cols(), 5);
//!
//! // The same seed reproduces the same board.
//! let again = generator.generate_with_seed(generated.seed);
//! assert_eq!(again.board, generated.board);
//! ```

pub use self::{
    generator::{BoardGenerator, GeneratedBoard, GeneratorParams},
    seed::{BoardSeed, ParseSeedError},
};

mod generator;
mod seed;
