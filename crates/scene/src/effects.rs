//! Cosmetic reactions to puzzle signals.

use crate::interaction::SceneEvents;
use crate::layout::{ObjectKind, SceneHandles, SceneSeed};
use crate::materials::{MaterialKind, MaterialPalette};
use bevy_ecs::system::{Commands, Query, Res};
use glam::Vec3;
use library_core::scoped_rng;
use library_ecs::{CurrentTick, MeshShape, Transient, Transform};
use library_puzzle::PuzzleSignal;
use rand::Rng;
use std::f32::consts::TAU;

/// How far an opened book rises.
pub const BOOK_FLOAT_HEIGHT: f32 = 0.5;
/// Ghost particles released per opened book.
pub const GHOST_PARTICLES: usize = 5;
/// Lifetime of a ghost particle.
pub const GHOST_PARTICLE_MILLIS: u64 = 3000;
/// Runes circling an opened book.
pub const RUNES: usize = 8;
/// Radius of the rune ring.
pub const RUNE_RADIUS: f32 = 1.5;
/// Lifetime of a rune.
pub const RUNE_MILLIS: u64 = 4000;
/// Lifetime of the completion burst.
pub const STORY_BURST_MILLIS: u64 = 5000;
/// Central book height once it lies open.
pub const OPEN_BOOK_THICKNESS: f32 = 0.3;

/// Spawn effects for this frame's puzzle signals.
pub fn play_puzzle_effects(
    mut commands: Commands,
    events: Res<SceneEvents>,
    handles: Res<SceneHandles>,
    palette: Res<MaterialPalette>,
    seed: Res<SceneSeed>,
    tick: Res<CurrentTick>,
    mut transforms: Query<&mut Transform>,
) {
    let now = tick.0;
    for signal in events.signals() {
        match signal {
            PuzzleSignal::BookOpened(book_index) => {
                let Some(&book) = handles.key_books.get(book_index) else {
                    continue;
                };
                let Ok(mut transform) = transforms.get_mut(book) else {
                    continue;
                };
                transform.translation.y += BOOK_FLOAT_HEIGHT;
                let center = transform.translation;

                let mut rng = scoped_rng(seed.0, book.to_bits(), now);
                for _ in 0..GHOST_PARTICLES {
                    let offset = Vec3::new(
                        rng.gen_range(-1.0..1.0),
                        rng.gen_range(0.5..1.5),
                        rng.gen_range(-1.0..1.0),
                    );
                    commands.spawn((
                        ObjectKind::Effect,
                        Transform::new(center + offset, Vec3::splat(0.2)),
                        MeshShape::Sphere,
                        palette.get(MaterialKind::GhostParticle),
                        Transient::after_millis(now, GHOST_PARTICLE_MILLIS),
                    ));
                }

                for i in 0..RUNES {
                    let angle = i as f32 / RUNES as f32 * TAU;
                    let position = center
                        + Vec3::new(angle.cos() * RUNE_RADIUS, 0.5, angle.sin() * RUNE_RADIUS);
                    commands.spawn((
                        ObjectKind::Effect,
                        Transform::new(position, Vec3::splat(0.1)),
                        MeshShape::Box,
                        palette.get(MaterialKind::Rune),
                        Transient::after_millis(now, RUNE_MILLIS),
                    ));
                }
                tracing::debug!(book = book_index, "book opening effect spawned");
            }
            PuzzleSignal::PuzzleCompleted => {
                if let Ok(mut transform) = transforms.get_mut(handles.central_book) {
                    transform.scale.y = OPEN_BOOK_THICKNESS;
                }
                commands.spawn((
                    ObjectKind::Effect,
                    Transform::new(Vec3::new(0.0, 2.0, 0.0), Vec3::splat(2.0)),
                    MeshShape::Sphere,
                    palette.get(MaterialKind::StoryBurst),
                    Transient::after_millis(now, STORY_BURST_MILLIS),
                ));
                tracing::debug!("story burst spawned");
            }
            PuzzleSignal::RiddleAdvanced(_) => {}
        }
    }
}
