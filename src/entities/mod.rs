//! Level entities: the robot and the props it walks between.

use crate::data_structures::mesh::MeshId;

pub mod person;
pub mod prop;

/// Anything that is represented by one root mesh in the scene.
pub trait Entity {
    fn mesh(&self) -> MeshId;
}
