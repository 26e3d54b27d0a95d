#![warn(missing_docs)]
//! The gothic library scene.
//!
//! Builds the hall from fixed tables, routes primary interactions into the
//! puzzle and plays the cosmetic effects that follow.
//!
//! # Frame order
//!
//! 1. [`dispatch_pointer_events`] drains [`PointerEvents`] into [`SceneEvents`]
//! 2. [`play_puzzle_effects`] spawns effects for this frame's signals
//! 3. transient expiry from `library-ecs` despawns finished effects

mod effects;
mod interaction;
mod layout;
mod materials;

pub use effects::*;
pub use interaction::{dispatch_pointer_events, PointerEvents, Puzzle, SceneEvent, SceneEvents};
pub use layout::{
    build_library, find_by_label, layout_report, LayoutEntry, ObjectKind, SceneHandles, SceneSeed,
    CENTRAL_BOOK_POSITION, DUST_MOTES, KEY_BOOK_POSITIONS, WALL_SEGMENTS,
};
pub use materials::{MaterialKind, MaterialPalette, MaterialSpec, MaterialTag};

use bevy_ecs::schedule::{IntoSystemConfigs, Schedules};
use library_ecs::{CleanupSet, FrameSchedule};

/// Add the scene systems to the frame schedule.
pub fn register_systems(schedules: &mut Schedules) {
    if let Some(schedule) = schedules.get_mut(FrameSchedule) {
        schedule.add_systems(
            (dispatch_pointer_events, play_puzzle_effects)
                .chain()
                .before(CleanupSet),
        );
    }
}
