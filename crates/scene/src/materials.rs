//! Shared material entities.
//!
//! Every material is spawned once and referenced by [`MaterialRef`]; objects
//! never own a private copy.
//!
//! [`MaterialRef`]: library_ecs::MaterialRef

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use bevy_ecs::system::Resource;
use bevy_ecs::world::World;
use glam::{Vec3, Vec4};
use library_ecs::MaterialRef;
use serde::Serialize;
use std::collections::BTreeMap;

/// Every material the library uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Dark wall stone.
    Stone,
    /// Moss-covered stone for shelves and the pedestal.
    MossyStone,
    /// Violet glow of the central book and mushrooms.
    Glowing,
    /// Near-black floor slabs.
    Floor,
    /// Faint glow on the hidden volumes.
    KeyBook,
    /// Ghost particles released when a book opens.
    GhostParticle,
    /// Swirling runes around an opened book.
    Rune,
    /// Burst over the pedestal when the story is revealed.
    StoryBurst,
    /// Floating dust motes.
    Dust,
}

impl MaterialKind {
    /// All kinds in palette order.
    pub const ALL: [MaterialKind; 9] = [
        MaterialKind::Stone,
        MaterialKind::MossyStone,
        MaterialKind::Glowing,
        MaterialKind::Floor,
        MaterialKind::KeyBook,
        MaterialKind::GhostParticle,
        MaterialKind::Rune,
        MaterialKind::StoryBurst,
        MaterialKind::Dust,
    ];

    /// Surface description for this kind.
    pub fn spec(self) -> MaterialSpec {
        match self {
            MaterialKind::Stone => MaterialSpec::Pbr {
                albedo: Vec4::new(0.2, 0.2, 0.25, 1.0),
                metallic: 0.1,
                roughness: 0.8,
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                texture: Some("assets/textures/stone_wall.png"),
            },
            MaterialKind::MossyStone => MaterialSpec::Pbr {
                albedo: Vec4::new(0.15, 0.2, 0.1, 1.0),
                metallic: 0.05,
                roughness: 0.9,
                emissive: Vec3::new(0.0, 0.1, 0.0),
                emissive_intensity: 0.1,
                texture: Some("assets/textures/mossy_stone.png"),
            },
            MaterialKind::Glowing => MaterialSpec::Unlit {
                color: Vec4::new(0.8, 0.6, 1.0, 1.0),
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                texture: Some("assets/textures/ghostly_energy.png"),
            },
            MaterialKind::Floor => MaterialSpec::Pbr {
                albedo: Vec4::new(0.1, 0.1, 0.12, 1.0),
                metallic: 0.0,
                roughness: 0.9,
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                texture: None,
            },
            MaterialKind::KeyBook => MaterialSpec::Unlit {
                color: Vec4::new(0.6, 0.4, 0.8, 1.0),
                emissive: Vec3::new(0.1, 0.05, 0.2),
                emissive_intensity: 0.3,
                texture: None,
            },
            MaterialKind::GhostParticle => MaterialSpec::Unlit {
                color: Vec4::new(0.8, 0.6, 1.0, 0.6),
                emissive: Vec3::new(0.4, 0.2, 0.6),
                emissive_intensity: 1.0,
                texture: None,
            },
            MaterialKind::Rune => MaterialSpec::Unlit {
                color: Vec4::new(0.9, 0.7, 1.0, 0.8),
                emissive: Vec3::new(0.5, 0.3, 0.7),
                emissive_intensity: 1.2,
                texture: None,
            },
            MaterialKind::StoryBurst => MaterialSpec::Unlit {
                color: Vec4::new(1.0, 0.8, 1.0, 0.6),
                emissive: Vec3::new(0.6, 0.3, 0.8),
                emissive_intensity: 1.2,
                texture: None,
            },
            MaterialKind::Dust => MaterialSpec::Unlit {
                color: Vec4::new(0.8, 0.8, 0.9, 0.3),
                emissive: Vec3::ZERO,
                emissive_intensity: 0.0,
                texture: None,
            },
        }
    }
}

/// Surface parameters handed to the renderer.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum MaterialSpec {
    /// Physically based, lit surface.
    Pbr {
        /// Base color (rgba).
        albedo: Vec4,
        /// Metalness in `0..=1`.
        metallic: f32,
        /// Roughness in `0..=1`.
        roughness: f32,
        /// Emitted color.
        emissive: Vec3,
        /// Emission strength.
        emissive_intensity: f32,
        /// Optional albedo texture the author supplies.
        texture: Option<&'static str>,
    },
    /// Unlit, self-colored surface.
    Unlit {
        /// Diffuse color (rgba).
        color: Vec4,
        /// Emitted color.
        emissive: Vec3,
        /// Emission strength.
        emissive_intensity: f32,
        /// Optional texture the author supplies.
        texture: Option<&'static str>,
    },
}

impl MaterialSpec {
    /// Texture path, if the material uses one.
    pub fn texture(&self) -> Option<&'static str> {
        match self {
            MaterialSpec::Pbr { texture, .. } | MaterialSpec::Unlit { texture, .. } => *texture,
        }
    }

    /// Whether the surface is partially transparent.
    pub fn is_translucent(&self) -> bool {
        match self {
            MaterialSpec::Pbr { albedo, .. } => albedo.w < 1.0,
            MaterialSpec::Unlit { color, .. } => color.w < 1.0,
        }
    }
}

/// Kind tag on a material entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialTag(pub MaterialKind);

/// Lookup from [`MaterialKind`] to its shared material entity.
#[derive(Resource, Debug, Clone, Default)]
pub struct MaterialPalette {
    entries: BTreeMap<MaterialKind, Entity>,
}

impl MaterialPalette {
    /// Spawn one material entity per kind and return the palette.
    pub fn spawn(world: &mut World) -> Self {
        let entries = MaterialKind::ALL
            .into_iter()
            .map(|kind| (kind, world.spawn((MaterialTag(kind), kind.spec())).id()))
            .collect();
        Self { entries }
    }

    /// Material entity for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if the palette was not built with [`MaterialPalette::spawn`].
    pub fn get(&self, kind: MaterialKind) -> MaterialRef {
        MaterialRef(self.entries[&kind])
    }

    /// Number of materials in the palette.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Placeholder texture paths the author must supply, deduplicated.
    pub fn texture_manifest() -> Vec<&'static str> {
        let mut textures: Vec<_> = MaterialKind::ALL
            .into_iter()
            .filter_map(|kind| kind.spec().texture())
            .collect();
        textures.sort_unstable();
        textures.dedup();
        textures
    }
}
