//! Puzzle progress store.

use crate::lore::{BOOK_COUNT, RIDDLES};
use serde::Serialize;

/// Progress of one play session.
///
/// Created once when the scene starts and only mutated by
/// [`PuzzleController`](crate::PuzzleController). Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleState {
    pub(crate) riddle_index: usize,
    pub(crate) books_found: [bool; BOOK_COUNT],
    pub(crate) completed: bool,
}

impl Default for PuzzleState {
    fn default() -> Self {
        Self::new()
    }
}

impl PuzzleState {
    /// Fresh state: first riddle active, nothing found.
    pub fn new() -> Self {
        Self {
            riddle_index: 0,
            books_found: [false; BOOK_COUNT],
            completed: false,
        }
    }

    /// Index of the riddle currently presented.
    pub fn riddle_index(&self) -> usize {
        self.riddle_index
    }

    /// Found flag per book identity.
    pub fn books_found(&self) -> [bool; BOOK_COUNT] {
        self.books_found
    }

    /// Whether `book_index` has been found. Unknown indices report `false`.
    pub fn is_found(&self, book_index: usize) -> bool {
        self.books_found.get(book_index).copied().unwrap_or(false)
    }

    /// Whether every book has been found.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Number of books found so far.
    pub fn found_count(&self) -> usize {
        self.books_found.iter().filter(|found| **found).count()
    }

    /// Riddle text at the current index.
    pub fn active_riddle_text(&self) -> &'static str {
        RIDDLES[self.riddle_index]
    }

    /// Copy of the full progress for presentation collaborators.
    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            riddle_index: self.riddle_index,
            books_found: self.books_found,
            completed: self.completed,
            active_riddle_text: self.active_riddle_text(),
            found_count: self.found_count(),
            total_books: BOOK_COUNT,
        }
    }
}

/// Read-only copy of [`PuzzleState`] plus derived counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PuzzleSnapshot {
    /// Index of the active riddle.
    pub riddle_index: usize,
    /// Found flag per book identity.
    pub books_found: [bool; BOOK_COUNT],
    /// True once every book has been found.
    pub completed: bool,
    /// Text of the active riddle.
    pub active_riddle_text: &'static str,
    /// Number of books found.
    pub found_count: usize,
    /// Number of books in the puzzle.
    pub total_books: usize,
}
