//! Book activation handling.

use crate::lore::{self, BOOK_COUNT};
use crate::state::PuzzleState;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, info, warn};

/// Outbound notification for presentation collaborators.
///
/// Emitted in order; collaborators react fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "signal", content = "value", rename_all = "snake_case")]
pub enum PuzzleSignal {
    /// A book was found for the first time.
    BookOpened(usize),
    /// The next riddle became active.
    RiddleAdvanced(usize),
    /// The last book was found.
    PuzzleCompleted,
}

/// Typed record attached to a host handle that represents a hidden volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookBinding {
    /// Book identity in `0..BOOK_COUNT`.
    pub book_index: usize,
}

/// Sole mutator of [`PuzzleState`].
///
/// `K` is whatever opaque handle the host uses for interactive objects
/// (an ECS entity, an object id). Handles without a binding are ignored.
#[derive(Debug, Clone)]
pub struct PuzzleController<K> {
    state: PuzzleState,
    bindings: HashMap<K, BookBinding>,
}

impl<K> Default for PuzzleController<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PuzzleController<K>
where
    K: Eq + Hash,
{
    /// Controller over a fresh [`PuzzleState`] with no bindings.
    pub fn new() -> Self {
        Self {
            state: PuzzleState::new(),
            bindings: HashMap::new(),
        }
    }

    /// Read-only view of the progress.
    pub fn state(&self) -> &PuzzleState {
        &self.state
    }

    /// Associate `key` with a book identity.
    ///
    /// Returns the previous binding for `key`, or `None`. Indices outside
    /// `0..BOOK_COUNT` are refused and leave the table unchanged.
    pub fn bind_book(&mut self, key: K, book_index: usize) -> Option<BookBinding> {
        if book_index >= BOOK_COUNT {
            warn!(book = book_index, "refusing to bind unknown book identity");
            return None;
        }
        self.bindings.insert(key, BookBinding { book_index })
    }

    /// Binding for `key`, if any.
    pub fn binding(&self, key: &K) -> Option<BookBinding> {
        self.bindings.get(key).copied()
    }

    /// Number of bound handles.
    pub fn bound_count(&self) -> usize {
        self.bindings.len()
    }

    /// Resolve `key` and activate the book it stands for.
    pub fn activate(&mut self, key: &K) -> Vec<PuzzleSignal> {
        match self.binding(key) {
            Some(binding) => self.on_book_activated(binding.book_index),
            None => {
                debug!("activation on a handle with no book binding");
                Vec::new()
            }
        }
    }

    /// Record that `book_id` was activated.
    ///
    /// Unknown ids and books already found are no-ops returning no signals.
    /// A first activation marks the book found and emits [`PuzzleSignal::BookOpened`],
    /// followed by either [`PuzzleSignal::PuzzleCompleted`] when it was the last
    /// book or [`PuzzleSignal::RiddleAdvanced`] when another riddle remains.
    pub fn on_book_activated(&mut self, book_id: usize) -> Vec<PuzzleSignal> {
        if book_id >= BOOK_COUNT {
            debug!(book = book_id, "ignoring activation of unknown book");
            return Vec::new();
        }
        if self.state.books_found[book_id] {
            debug!(book = book_id, "book already found");
            return Vec::new();
        }

        self.state.books_found[book_id] = true;
        let mut signals = vec![PuzzleSignal::BookOpened(book_id)];
        info!(
            book = book_id,
            title = lore::book_title(book_id).unwrap_or_default(),
            found = self.state.found_count(),
            "book found"
        );

        if self.state.books_found.iter().all(|found| *found) {
            self.state.completed = true;
            info!("all books found, the librarian's story is revealed");
            signals.push(PuzzleSignal::PuzzleCompleted);
        } else if self.state.riddle_index < BOOK_COUNT - 1 {
            self.state.riddle_index += 1;
            info!(riddle = self.state.riddle_index, "advancing to next riddle");
            signals.push(PuzzleSignal::RiddleAdvanced(self.state.riddle_index));
        }

        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> PuzzleController<u32> {
        let mut controller = PuzzleController::new();
        for (key, book) in [(10, 0), (11, 1), (12, 2)] {
            controller.bind_book(key, book);
        }
        controller
    }

    #[test]
    fn first_activation_advances_riddle() {
        let mut controller = controller();
        let signals = controller.on_book_activated(1);
        assert_eq!(
            signals,
            vec![PuzzleSignal::BookOpened(1), PuzzleSignal::RiddleAdvanced(1)]
        );
        let state = controller.state();
        assert_eq!(state.books_found(), [false, true, false]);
        assert_eq!(state.riddle_index(), 1);
        assert!(!state.completed());
    }

    #[test]
    fn duplicate_activation_is_a_no_op() {
        let mut controller = controller();
        controller.on_book_activated(0);
        let after_first = controller.state().clone();
        assert!(controller.on_book_activated(0).is_empty());
        assert_eq!(controller.state(), &after_first);
    }

    #[test]
    fn completing_activation_keeps_riddle_index() {
        let mut controller = controller();
        controller.on_book_activated(0);
        controller.on_book_activated(1);
        assert_eq!(controller.state().riddle_index(), 2);

        let signals = controller.on_book_activated(2);
        assert_eq!(
            signals,
            vec![PuzzleSignal::BookOpened(2), PuzzleSignal::PuzzleCompleted]
        );
        assert_eq!(controller.state().books_found(), [true, true, true]);
        assert!(controller.state().completed());
        assert_eq!(controller.state().riddle_index(), 2);
    }

    #[test]
    fn unknown_book_id_changes_nothing() {
        let mut controller = controller();
        assert!(controller.on_book_activated(5).is_empty());
        assert_eq!(controller.state(), &PuzzleState::new());
    }

    #[test]
    fn activation_resolves_through_bindings() {
        let mut controller = controller();
        assert_eq!(controller.activate(&12)[0], PuzzleSignal::BookOpened(2));
        assert!(controller.activate(&99).is_empty());
        assert_eq!(controller.state().found_count(), 1);
    }

    #[test]
    fn out_of_range_bindings_are_refused() {
        let mut controller: PuzzleController<&str> = PuzzleController::new();
        assert!(controller.bind_book("shelf", 3).is_none());
        assert_eq!(controller.bound_count(), 0);
        assert!(controller.bind_book("book", 0).is_none());
        assert_eq!(
            controller.bind_book("book", 1),
            Some(BookBinding { book_index: 0 })
        );
        assert_eq!(controller.binding(&"book"), Some(BookBinding { book_index: 1 }));
    }
}
