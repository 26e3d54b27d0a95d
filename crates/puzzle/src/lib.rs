#![warn(missing_docs)]
//! Puzzle progression for the echoing library.
//!
//! The player hunts for three hidden volumes, guided by one riddle at a time.
//!
//! - [`PuzzleState`] - single source of truth for progress
//! - [`PuzzleController`] - the only mutator; turns book activations into [`PuzzleSignal`]s
//! - [`PuzzleQuery`] - read-only projections polled by presentation code
//!
//! The crate knows nothing about entities, rendering or audio. Hosts bind
//! their own handle type to book identities through [`PuzzleController::bind_book`].

mod controller;
pub mod lore;
mod query;
mod state;

pub use controller::{BookBinding, PuzzleController, PuzzleSignal};
pub use lore::{BOOK_COUNT, LIBRARIAN_STORY, RIDDLES};
pub use query::PuzzleQuery;
pub use state::{PuzzleSnapshot, PuzzleState};
