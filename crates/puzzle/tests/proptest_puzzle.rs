//! Property-based tests for puzzle progression
//!
//! Validates progression invariants over arbitrary activation sequences:
//! - Completion holds exactly when every book was activated at least once
//! - Repeated activations are idempotent
//! - Unknown ids never change state
//! - The riddle index never decreases and stays in range

use library_puzzle::{PuzzleController, PuzzleQuery, PuzzleState, BOOK_COUNT, RIDDLES};
use proptest::prelude::*;

fn run(ids: &[usize]) -> PuzzleController<u32> {
    let mut controller = PuzzleController::new();
    for &id in ids {
        controller.on_book_activated(id);
    }
    controller
}

proptest! {
    /// Property: completed iff every identity appears in the sequence
    #[test]
    fn completion_matches_coverage(ids in prop::collection::vec(0usize..6, 0..24)) {
        let controller = run(&ids);
        let covered = (0..BOOK_COUNT).all(|book| ids.contains(&book));
        prop_assert_eq!(controller.state().completed(), covered);
        prop_assert_eq!(controller.is_completed(), controller.state().books_found().iter().all(|f| *f));
    }

    /// Property: doubling every activation yields the same state
    #[test]
    fn activation_is_idempotent(ids in prop::collection::vec(0usize..BOOK_COUNT, 0..12)) {
        let doubled: Vec<usize> = ids.iter().flat_map(|&id| [id, id]).collect();
        let (once, twice) = (run(&ids), run(&doubled));
        prop_assert_eq!(once.state(), twice.state());
    }

    /// Property: ids outside the book range leave every field untouched
    #[test]
    fn unknown_ids_are_ignored(
        prefix in prop::collection::vec(0usize..BOOK_COUNT, 0..4),
        unknown in BOOK_COUNT..1000usize,
    ) {
        let mut controller = run(&prefix);
        let before = controller.state().clone();
        let signals = controller.on_book_activated(unknown);
        prop_assert!(signals.is_empty());
        prop_assert_eq!(controller.state(), &before);
    }

    /// Property: riddle index is monotonic, bounded, and names the active riddle
    #[test]
    fn riddle_index_is_monotonic(ids in prop::collection::vec(0usize..6, 0..24)) {
        let mut controller: PuzzleController<u32> = PuzzleController::new();
        let mut last = controller.state().riddle_index();
        for id in ids {
            controller.on_book_activated(id);
            let state: &PuzzleState = controller.state();
            prop_assert!(state.riddle_index() >= last);
            prop_assert!(state.riddle_index() < BOOK_COUNT);
            prop_assert_eq!(state.active_riddle_text(), RIDDLES[state.riddle_index()]);
            last = state.riddle_index();
        }
    }
}
