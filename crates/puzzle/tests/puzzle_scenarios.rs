//! Scripted puzzle runs checked against the progression rules and a golden snapshot.

use library_core::SimTick;
use library_puzzle::{PuzzleController, PuzzleSignal, PuzzleState};
use library_testkit::{run_micro_worldtest, MicroWorldtestConfig};
use serde::Serialize;
use std::path::Path;

#[test]
fn start_then_second_book() {
    let mut controller: PuzzleController<u32> = PuzzleController::new();
    controller.on_book_activated(1);
    let snapshot = controller.state().snapshot();
    assert_eq!(snapshot.books_found, [false, true, false]);
    assert_eq!(snapshot.riddle_index, 1);
    assert!(!snapshot.completed);
}

#[test]
fn repeated_first_book_is_stable() {
    let mut controller: PuzzleController<u32> = PuzzleController::new();
    controller.on_book_activated(0);
    let once = controller.state().snapshot();
    controller.on_book_activated(0);
    assert_eq!(controller.state().snapshot(), once);
}

#[test]
fn all_books_in_order_complete_the_puzzle() {
    let mut controller: PuzzleController<u32> = PuzzleController::new();
    let mut signals = Vec::new();
    for book in 0..3 {
        signals.extend(controller.on_book_activated(book));
    }
    assert_eq!(
        signals,
        vec![
            PuzzleSignal::BookOpened(0),
            PuzzleSignal::RiddleAdvanced(1),
            PuzzleSignal::BookOpened(1),
            PuzzleSignal::RiddleAdvanced(2),
            PuzzleSignal::BookOpened(2),
            PuzzleSignal::PuzzleCompleted,
        ]
    );
    let snapshot = controller.state().snapshot();
    assert_eq!(snapshot.books_found, [true, true, true]);
    assert!(snapshot.completed);
    assert_eq!(snapshot.riddle_index, 2);
}

#[test]
fn invalid_id_on_fresh_state() {
    let mut controller: PuzzleController<u32> = PuzzleController::new();
    controller.on_book_activated(5);
    assert_eq!(controller.state(), &PuzzleState::new());
}

#[derive(Serialize)]
struct Frame {
    books_found: [bool; 3],
    riddle_index: usize,
    completed: bool,
    found_count: usize,
}

#[test]
fn out_of_order_hunt_micro_worldtest() {
    // One activation per tick, including a duplicate and an unknown id.
    let schedule = [2usize, 2, 7, 0, 1];
    let config = MicroWorldtestConfig {
        name: "out_of_order_hunt".to_string(),
        ticks: schedule.len() as u64,
        snapshot_path: Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/snapshots/out_of_order_hunt.json"),
    };

    run_micro_worldtest(
        config,
        PuzzleController::<u32>::new(),
        |tick: SimTick, controller| {
            controller.on_book_activated(schedule[tick.0 as usize]);
        },
        |_tick, controller| {
            let state = controller.state();
            Frame {
                books_found: state.books_found(),
                riddle_index: state.riddle_index(),
                completed: state.completed(),
                found_count: state.found_count(),
            }
        },
    )
    .expect("snapshot matches");
}
