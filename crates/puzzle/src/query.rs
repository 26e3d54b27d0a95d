//! Read-only projections for presentation code.

use crate::controller::PuzzleController;
use crate::lore::{BOOK_COUNT, LIBRARIAN_STORY};
use crate::state::PuzzleState;
use std::hash::Hash;

/// Pure queries polled by the overlay and audio cues once per frame.
pub trait PuzzleQuery {
    /// Index of the riddle currently presented.
    fn riddle_index(&self) -> usize;

    /// Current riddle string.
    fn active_riddle_text(&self) -> &'static str;

    /// `(found, total)` book counts.
    fn progress(&self) -> (usize, usize);

    /// Whether every book has been found.
    fn is_completed(&self) -> bool;

    /// The librarian's story. Callers decide whether to gate it on [`Self::is_completed`].
    fn story_text(&self) -> &'static str {
        LIBRARIAN_STORY
    }
}

impl PuzzleQuery for PuzzleState {
    fn riddle_index(&self) -> usize {
        PuzzleState::riddle_index(self)
    }

    fn active_riddle_text(&self) -> &'static str {
        PuzzleState::active_riddle_text(self)
    }

    fn progress(&self) -> (usize, usize) {
        (self.found_count(), BOOK_COUNT)
    }

    fn is_completed(&self) -> bool {
        self.completed()
    }
}

impl<K> PuzzleQuery for PuzzleController<K>
where
    K: Eq + Hash,
{
    fn riddle_index(&self) -> usize {
        self.state().riddle_index()
    }

    fn active_riddle_text(&self) -> &'static str {
        self.state().active_riddle_text()
    }

    fn progress(&self) -> (usize, usize) {
        PuzzleQuery::progress(self.state())
    }

    fn is_completed(&self) -> bool {
        self.state().completed()
    }
}
