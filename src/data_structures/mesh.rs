//! Scene meshes and their handles.

use serde::Deserialize;

use crate::{
    data_structures::instance::Instance,
    resources::animation::{AnimatedProperty, AnimationTrack, AnimationValue},
};

/// Handle of a mesh inside a [`crate::data_structures::scene::Scene`].
///
/// Handles are never reused, so a handle of a disposed mesh stays dangling
/// instead of silently pointing at a newer mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub(crate) usize);

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const GREEN: Color3 = Color3::new(0.0, 1.0, 0.0);
    pub const WHITE: Color3 = Color3::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// A renderable node of the scene graph.
///
/// `rotation` holds euler angles in radians; the grid game only ever
/// animates `rotation.y`.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub name: String,
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Vector3<f32>,
    pub scaling: cgmath::Vector3<f32>,
    pub check_collisions: bool,
    pub receive_shadows: bool,
    /// Whether the node carries geometry or only groups children.
    pub has_geometry: bool,
    pub(crate) parent: Option<MeshId>,
    /// The playlist consumed by `Scene::begin_animation`.
    pub animations: Vec<AnimationTrack>,
}

impl Mesh {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            rotation: cgmath::Vector3::new(0.0, 0.0, 0.0),
            scaling: cgmath::Vector3::new(1.0, 1.0, 1.0),
            check_collisions: false,
            receive_shadows: false,
            has_geometry: false,
            parent: None,
            animations: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<MeshId> {
        self.parent
    }

    pub fn local_transform(&self) -> Instance {
        Instance::from_euler(self.position, self.rotation, self.scaling)
    }

    pub fn set_local_transform(&mut self, instance: &Instance) {
        self.position = instance.position;
        self.rotation = instance.euler_rotation();
        self.scaling = instance.scale;
    }

    /// Writes a sampled animation value onto the animated property.
    ///
    /// Mismatched value kinds are ignored with a warning.
    pub fn apply(&mut self, property: AnimatedProperty, value: AnimationValue) {
        match (property, value) {
            (AnimatedProperty::RotationY, AnimationValue::Float(y)) => self.rotation.y = y,
            (AnimatedProperty::Position, AnimationValue::Vector3(p)) => self.position = p,
            (property, value) => log::warn!(
                "Mesh {} cannot animate {:?} with value {:?}",
                self.name,
                property,
                value
            ),
        }
    }
}
