//! Game sessions for the pipenet puzzle.
//!
//! A [`Game`] owns exactly one board and its move history, and exposes the
//! narrow operations a presentation layer drives: querying dimensions and
//! pieces, rotating a piece, checking the win condition, solving, and
//! undo/redo/restart. The engine is synchronous and single-owner: every
//! operation runs to completion, and nothing here performs I/O.

pub use self::{game::Game, history::Move};

mod game;
mod history;
