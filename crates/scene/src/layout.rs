//! Fixed literal layout of the gothic library.
//!
//! Coordinates are in meters with y up and the pedestal at the origin.

use crate::interaction::{PointerEvents, Puzzle, SceneEvents};
use crate::materials::{MaterialKind, MaterialPalette};
use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::system::Resource;
use bevy_ecs::world::World;
use glam::Vec3;
use library_core::{scoped_rng, SimTick};
use library_ecs::{Interactable, MeshShape, SceneLabel, Transform};
use library_puzzle::lore::{CENTRAL_BOOK_HOVER, KEY_BOOK_HOVER};
use library_puzzle::{PuzzleController, BOOK_COUNT};
use rand::Rng;
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, TAU};

/// Height of the outer wall ring.
pub const WALL_HEIGHT: f32 = 6.0;
/// Thickness of each wall segment.
pub const WALL_THICKNESS: f32 = 0.5;
/// Radius of the wall ring.
pub const WALL_RADIUS: f32 = 7.0;
/// Number of wall segments in the ring.
pub const WALL_SEGMENTS: usize = 16;

/// Where the central glowing book rests on the pedestal.
pub const CENTRAL_BOOK_POSITION: Vec3 = Vec3::new(0.0, 1.2, 0.0);

/// Hidden volumes, one per riddle: mid-height shelf on the left, low shelf
/// by the mushrooms, top shelf that requires looking up.
pub const KEY_BOOK_POSITIONS: [Vec3; BOOK_COUNT] = [
    Vec3::new(-5.0, 2.5, -2.0),
    Vec3::new(6.0, 1.0, -6.0),
    Vec3::new(2.0, 4.5, 5.0),
];

/// Number of dust motes scattered through the hall.
pub const DUST_MOTES: usize = 20;

/// Ground placement with a yaw in radians.
#[derive(Debug, Clone, Copy)]
struct Placement {
    x: f32,
    z: f32,
    yaw: f32,
}

const fn at(x: f32, z: f32, yaw: f32) -> Placement {
    Placement { x, z, yaw }
}

const SHELVES: [Placement; 8] = [
    at(-5.0, -2.0, 0.0),
    at(-2.0, -5.0, FRAC_PI_2),
    at(2.0, -5.0, FRAC_PI_2),
    at(5.0, -2.0, 0.0),
    at(5.0, 2.0, 0.0),
    at(2.0, 5.0, FRAC_PI_2),
    at(-2.0, 5.0, FRAC_PI_2),
    at(-5.0, 2.0, 0.0),
];

const CANDELABRAS: [Placement; 4] = [
    at(-3.0, -3.0, 0.0),
    at(3.0, -3.0, 0.0),
    at(3.0, 3.0, 0.0),
    at(-3.0, 3.0, 0.0),
];

const MUSHROOMS: [Placement; 3] = [at(-6.0, -6.0, 0.0), at(6.0, -6.0, 0.0), at(0.0, 6.0, 0.0)];

const SCATTERED_BOOKS: [Placement; 6] = [
    at(-4.0, -1.0, 0.3),
    at(2.0, -4.0, -0.2),
    at(4.0, 1.0, 0.5),
    at(-1.0, 4.0, -0.4),
    at(0.0, -2.0, 0.1),
    at(-3.0, 3.0, -0.3),
];

/// Seed domain for dust placement.
const DUST_DOMAIN: u64 = 0xD057;

/// What a scene entity represents.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// Circular floor.
    Floor,
    /// One segment of the outer wall ring.
    Wall,
    /// Domed ceiling.
    Ceiling,
    /// Bookshelf against the wall.
    Shelf,
    /// Stone pedestal in the middle of the hall.
    Pedestal,
    /// The glowing book that whispers riddles.
    CentralBook,
    /// Candle stand.
    Candelabra,
    /// Glowing mushroom.
    Mushroom,
    /// Decorative book lying on the floor.
    ScatteredBook,
    /// Floating dust mote.
    Dust,
    /// One of the hidden volumes.
    KeyBook,
    /// Short-lived visual effect.
    Effect,
}

/// Seed for every random choice the scene makes.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSeed(pub u64);

/// Entities other systems need to find directly.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneHandles {
    /// The glowing book on the pedestal.
    pub central_book: Entity,
    /// The pedestal under it.
    pub pedestal: Entity,
    /// Hidden volumes, indexed by book identity.
    pub key_books: [Entity; BOOK_COUNT],
}

/// Build the library into `world`, inserting every scene resource.
///
/// Returns the handles that are also stored as a [`SceneHandles`] resource.
pub fn build_library(world: &mut World, seed: u64) -> SceneHandles {
    let palette = MaterialPalette::spawn(world);
    let mut builder = Builder {
        world,
        palette: &palette,
    };

    builder.spawn(
        ObjectKind::Floor,
        SceneLabel::named("floor"),
        Transform::new(Vec3::ZERO, Vec3::new(14.0, 0.2, 14.0)),
        MeshShape::Cylinder,
        MaterialKind::Floor,
    );

    for i in 0..WALL_SEGMENTS {
        let angle = i as f32 / WALL_SEGMENTS as f32 * TAU;
        let position = Vec3::new(
            angle.cos() * WALL_RADIUS,
            WALL_HEIGHT / 2.0,
            angle.sin() * WALL_RADIUS,
        );
        builder.spawn(
            ObjectKind::Wall,
            SceneLabel::indexed("wall", i),
            Transform::new(position, Vec3::new(WALL_THICKNESS, WALL_HEIGHT, 1.5)).with_yaw(angle),
            MeshShape::Box,
            MaterialKind::Stone,
        );
    }

    builder.spawn(
        ObjectKind::Ceiling,
        SceneLabel::named("ceiling"),
        Transform::new(
            Vec3::new(0.0, WALL_HEIGHT + 1.0, 0.0),
            Vec3::new(15.0, 2.0, 15.0),
        ),
        MeshShape::Cylinder,
        MaterialKind::Stone,
    );

    for (i, shelf) in SHELVES.iter().enumerate() {
        builder.spawn(
            ObjectKind::Shelf,
            SceneLabel::indexed("shelf", i),
            Transform::new(Vec3::new(shelf.x, 3.0, shelf.z), Vec3::new(2.0, 4.0, 0.3))
                .with_yaw(shelf.yaw),
            MeshShape::Box,
            MaterialKind::MossyStone,
        );
    }

    let pedestal = builder.spawn(
        ObjectKind::Pedestal,
        SceneLabel::named("pedestal"),
        Transform::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(1.5, 1.0, 1.5)),
        MeshShape::Cylinder,
        MaterialKind::MossyStone,
    );

    let central_book = builder.spawn(
        ObjectKind::CentralBook,
        SceneLabel::named("central_book"),
        Transform::new(CENTRAL_BOOK_POSITION, Vec3::new(0.8, 0.1, 1.2)),
        MeshShape::Box,
        MaterialKind::Glowing,
    );
    builder
        .world
        .entity_mut(central_book)
        .insert(Interactable::new(CENTRAL_BOOK_HOVER));

    for (i, candelabra) in CANDELABRAS.iter().enumerate() {
        builder.spawn(
            ObjectKind::Candelabra,
            SceneLabel::indexed("candelabra", i),
            Transform::new(
                Vec3::new(candelabra.x, 0.5, candelabra.z),
                Vec3::new(0.3, 1.0, 0.3),
            ),
            MeshShape::Cylinder,
            MaterialKind::Stone,
        );
    }

    for (i, mushroom) in MUSHROOMS.iter().enumerate() {
        builder.spawn(
            ObjectKind::Mushroom,
            SceneLabel::indexed("mushroom", i),
            Transform::new(
                Vec3::new(mushroom.x, 0.3, mushroom.z),
                Vec3::new(0.8, 0.6, 0.8),
            ),
            MeshShape::Sphere,
            MaterialKind::Glowing,
        );
    }

    for (i, book) in SCATTERED_BOOKS.iter().enumerate() {
        builder.spawn(
            ObjectKind::ScatteredBook,
            SceneLabel::indexed("floor_book", i),
            Transform::new(Vec3::new(book.x, 0.05, book.z), Vec3::new(0.3, 0.05, 0.2))
                .with_yaw(book.yaw),
            MeshShape::Box,
            MaterialKind::Stone,
        );
    }

    let mut rng = scoped_rng(seed, DUST_DOMAIN, SimTick::ZERO);
    for i in 0..DUST_MOTES {
        let position = Vec3::new(
            rng.gen_range(-6.0..6.0),
            rng.gen_range(1.0..5.0),
            rng.gen_range(-6.0..6.0),
        );
        builder.spawn(
            ObjectKind::Dust,
            SceneLabel::indexed("dust", i),
            Transform::new(position, Vec3::splat(0.1)),
            MeshShape::Sphere,
            MaterialKind::Dust,
        );
    }

    let mut puzzle = PuzzleController::new();
    let key_books: [Entity; BOOK_COUNT] = std::array::from_fn(|i| {
        let book = builder.spawn(
            ObjectKind::KeyBook,
            SceneLabel::indexed("key_book", i),
            Transform::new(KEY_BOOK_POSITIONS[i], Vec3::new(0.4, 0.05, 0.3)),
            MeshShape::Box,
            MaterialKind::KeyBook,
        );
        builder
            .world
            .entity_mut(book)
            .insert(Interactable::new(KEY_BOOK_HOVER));
        puzzle.bind_book(book, i);
        book
    });

    let handles = SceneHandles {
        central_book,
        pedestal,
        key_books,
    };

    world.insert_resource(palette);
    world.insert_resource(SceneSeed(seed));
    world.insert_resource(handles);
    world.insert_resource(Puzzle(puzzle));
    world.init_resource::<PointerEvents>();
    world.init_resource::<SceneEvents>();

    tracing::info!(
        seed,
        entities = world.entities().len(),
        "library scene constructed"
    );
    handles
}

struct Builder<'w> {
    world: &'w mut World,
    palette: &'w MaterialPalette,
}

impl Builder<'_> {
    fn spawn(
        &mut self,
        kind: ObjectKind,
        label: SceneLabel,
        transform: Transform,
        mesh: MeshShape,
        material: MaterialKind,
    ) -> Entity {
        self.world
            .spawn((kind, label, transform, mesh, self.palette.get(material)))
            .id()
    }
}

/// One row of [`layout_report`].
#[derive(Debug, Clone, Serialize)]
pub struct LayoutEntry {
    /// Scene label.
    pub label: String,
    /// Object kind.
    pub kind: ObjectKind,
    /// Mesh primitive.
    pub mesh: MeshShape,
    /// Placement.
    pub transform: Transform,
    /// Whether the object accepts interactions.
    pub interactive: bool,
}

/// Every labeled object in the scene, sorted by label.
pub fn layout_report(world: &mut World) -> Vec<LayoutEntry> {
    let mut query = world.query::<(
        &SceneLabel,
        &ObjectKind,
        &MeshShape,
        &Transform,
        Option<&Interactable>,
    )>();
    let mut entries: Vec<LayoutEntry> = query
        .iter(world)
        .map(|(label, kind, mesh, transform, interactable)| LayoutEntry {
            label: label.0.clone(),
            kind: *kind,
            mesh: *mesh,
            transform: *transform,
            interactive: interactable.is_some(),
        })
        .collect();
    entries.sort_by(|a, b| a.label.cmp(&b.label));
    entries
}

/// Find the entity carrying `label`.
pub fn find_by_label(world: &mut World, label: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &SceneLabel)>();
    query
        .iter(world)
        .find(|(_, l)| l.as_str() == label)
        .map(|(entity, _)| entity)
}
