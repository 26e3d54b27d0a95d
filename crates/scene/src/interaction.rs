//! Routing primary interactions into the puzzle.

use crate::layout::{SceneHandles, CENTRAL_BOOK_POSITION};
use bevy_ecs::entity::Entity;
use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res, ResMut, Resource};
use glam::Vec3;
use library_ecs::{Interactable, SceneLabel, Transform};
use library_puzzle::{PuzzleController, PuzzleQuery, PuzzleSignal};
use serde::Serialize;
use tracing::{debug, info};

/// The session's puzzle controller, keyed by scene entity.
#[derive(Resource, Debug)]
pub struct Puzzle(pub PuzzleController<Entity>);

/// Primary interactions delivered by the host since the last frame.
#[derive(Resource, Debug, Default)]
pub struct PointerEvents {
    pending: Vec<Entity>,
}

impl PointerEvents {
    /// Queue a primary interaction on `entity`.
    pub fn push(&mut self, entity: Entity) {
        self.pending.push(entity);
    }

    /// Number of interactions waiting for dispatch.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is waiting.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Something presentation collaborators should react to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    /// The central book was touched; whisper the current riddle.
    WhisperRequested {
        /// Riddle to whisper.
        riddle_index: usize,
        /// Where the whisper comes from.
        origin: Vec3,
    },
    /// The puzzle emitted a signal.
    Puzzle {
        /// The signal.
        signal: PuzzleSignal,
        /// Where the cue should play.
        origin: Vec3,
    },
}

/// Events produced during the most recent frame.
///
/// Cleared at the start of every dispatch, so hosts read it after the frame ran.
#[derive(Resource, Debug, Default)]
pub struct SceneEvents {
    events: Vec<SceneEvent>,
}

impl SceneEvents {
    /// Events from the last frame, in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneEvent> {
        self.events.iter()
    }

    /// Puzzle signals from the last frame.
    pub fn signals(&self) -> impl Iterator<Item = PuzzleSignal> + '_ {
        self.events.iter().filter_map(|event| match event {
            SceneEvent::Puzzle { signal, .. } => Some(*signal),
            SceneEvent::WhisperRequested { .. } => None,
        })
    }

    /// Number of events from the last frame.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the last frame produced nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Drain [`PointerEvents`] and turn each interaction into [`SceneEvent`]s.
pub fn dispatch_pointer_events(
    mut pointer: ResMut<PointerEvents>,
    mut puzzle: ResMut<Puzzle>,
    mut events: ResMut<SceneEvents>,
    handles: Res<SceneHandles>,
    targets: Query<(&Transform, Option<&SceneLabel>), With<Interactable>>,
) {
    events.events.clear();

    for entity in pointer.pending.drain(..) {
        let Ok((transform, label)) = targets.get(entity) else {
            debug!(?entity, "interaction on a non-interactive entity");
            continue;
        };

        if entity == handles.central_book {
            let riddle_index = puzzle.0.riddle_index();
            info!(riddle = riddle_index, "central book whispers");
            events.events.push(SceneEvent::WhisperRequested {
                riddle_index,
                origin: transform.translation,
            });
            continue;
        }

        let signals = puzzle.0.activate(&entity);
        if signals.is_empty() {
            debug!(label = ?label.map(SceneLabel::as_str), "interaction changed nothing");
        }
        for signal in signals {
            let origin = match signal {
                PuzzleSignal::PuzzleCompleted => CENTRAL_BOOK_POSITION,
                PuzzleSignal::BookOpened(_) | PuzzleSignal::RiddleAdvanced(_) => {
                    transform.translation
                }
            };
            events.events.push(SceneEvent::Puzzle { signal, origin });
        }
    }
}
