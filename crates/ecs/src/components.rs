//! Renderable and interactive building blocks for scene entities.

use bevy_ecs::component::Component;
use bevy_ecs::entity::Entity;
use glam::{Quat, Vec3};
use serde::Serialize;
use std::fmt;

/// Placement of an entity in the scene.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    /// World-space position.
    pub translation: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Non-uniform scale applied to the unit mesh.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Unrotated transform at `translation` with `scale`.
    pub fn new(translation: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            scale,
            ..Default::default()
        }
    }

    /// Rotate about the vertical axis by `radians`.
    pub fn with_yaw(mut self, radians: f32) -> Self {
        self.rotation = Quat::from_rotation_y(radians);
        self
    }
}

/// Unit primitive the renderer draws, scaled by [`Transform::scale`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeshShape {
    /// Axis-aligned unit cube.
    Box,
    /// Unit cylinder standing on the y axis.
    Cylinder,
    /// Unit sphere.
    Sphere,
}

/// Shared material entity used to draw this entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialRef(pub Entity);

/// Stable human-readable name used by scripts and logs.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SceneLabel(pub String);

impl SceneLabel {
    /// Label without an index, e.g. `central_book`.
    pub fn named(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Label for the `index`th member of a group, e.g. `shelf_3`.
    pub fn indexed(group: &str, index: usize) -> Self {
        Self(format!("{group}_{index}"))
    }

    /// Label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marks an entity as accepting primary interactions.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Interactable {
    /// Prompt shown while the pointer hovers the entity.
    pub hover_text: String,
}

impl Interactable {
    /// Interactable with the given hover prompt.
    pub fn new(hover_text: impl Into<String>) -> Self {
        Self {
            hover_text: hover_text.into(),
        }
    }
}
