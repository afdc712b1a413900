//! Scene data structures: meshes, transforms, and the registries that
//! level objects sign up to.
//!
//! - `instance` holds position/rotation/scale transforms
//! - `mesh` contains scene meshes, handles and colors
//! - `scene` enables hierarchical scene organization and animation playback
//! - `shadow` registers shadow casters
//! - `highlight` registers outlined sub-meshes

pub mod highlight;
pub mod instance;
pub mod mesh;
pub mod scene;
pub mod shadow;

/// Meshes the character may collide with. Owned by the level and shared by
/// all props.
pub type Collidables = Vec<mesh::MeshId>;
