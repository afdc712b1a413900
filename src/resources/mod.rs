use std::future::Future;

use crate::{
    data_structures::{
        instance::Instance,
        mesh::{Mesh, MeshId},
        scene::Scene,
    },
    error::AssetError,
    resources::io::load_binary,
};

/**
 * This module contains all logic for loading meshes and animation data from external files.
 */
pub mod animation;
pub mod io;

/// Name of the synthetic node every import is parented to.
pub const ROOT_NODE_NAME: &str = "__root__";

/// One node of a loaded asset, detached from any scene.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub transform: Instance,
    /// Index of the parent inside the same load result.
    pub parent: Option<usize>,
    pub has_geometry: bool,
}

impl MeshData {
    pub fn root() -> Self {
        Self {
            name: ROOT_NODE_NAME.to_string(),
            transform: Instance::default(),
            parent: None,
            has_geometry: false,
        }
    }
}

/// Source of mesh hierarchies.
///
/// A load resolves to an ordered list: index 0 is the root node, further
/// indices are the asset's sub-meshes in depth-first order. Parents always
/// precede their children.
pub trait MeshLoader {
    fn load(
        &self,
        base: &str,
        file_name: &str,
    ) -> impl Future<Output = Result<Vec<MeshData>, AssetError>>;
}

/// Loads `.gltf`/`.glb` files through [`load_binary`].
#[derive(Clone, Debug, Default)]
pub struct GltfLoader;

impl MeshLoader for GltfLoader {
    async fn load(&self, base: &str, file_name: &str) -> Result<Vec<MeshData>, AssetError> {
        let path = format!("{}{}", base, file_name);
        let bytes = load_binary(&path)
            .await
            .map_err(|e| AssetError::unavailable(&path, e))?;
        parse_gltf(&path, &bytes)
    }
}

/// Flattens the node tree of a glTF/GLB document below a synthetic root.
pub fn parse_gltf(file_name: &str, bytes: &[u8]) -> Result<Vec<MeshData>, AssetError> {
    let gltf = gltf::Gltf::from_slice(bytes).map_err(|e| AssetError::parse(file_name, e))?;
    let scene = gltf
        .default_scene()
        .or_else(|| gltf.scenes().next())
        .ok_or_else(|| AssetError::parse(file_name, "document contains no scene"))?;

    let mut meshes = vec![MeshData::root()];
    for node in scene.nodes() {
        push_node(&node, 0, &mut meshes);
    }
    log::info!("Loaded {} nodes from {}", meshes.len() - 1, file_name);
    Ok(meshes)
}

fn push_node(node: &gltf::scene::Node, parent: usize, meshes: &mut Vec<MeshData>) {
    let (position, rotation, scale) = node.transform().decomposed();
    let name = node
        .name()
        .or_else(|| node.mesh().and_then(|m| m.name()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("node_{}", node.index()));
    let idx = meshes.len();
    meshes.push(MeshData {
        name,
        transform: Instance {
            position: position.into(),
            rotation: rotation.into(),
            scale: scale.into(),
        },
        parent: Some(parent),
        has_geometry: node.mesh().is_some(),
    });
    for child in node.children() {
        push_node(&child, idx, meshes);
    }
}

/// Loads `file_name` and inserts the result into `scene`.
///
/// The returned ids keep the loader's order, so `ids[0]` is the root.
pub async fn import_mesh<L: MeshLoader>(
    loader: &L,
    scene: &crate::data_structures::scene::SharedScene,
    base: &str,
    file_name: &str,
) -> Result<Vec<MeshId>, AssetError> {
    let data = loader.load(base, file_name).await?;
    if data.is_empty() {
        return Err(AssetError::parse(file_name, "asset produced no meshes"));
    }
    Ok(insert_meshes(&mut scene.borrow_mut(), data))
}

fn insert_meshes(scene: &mut Scene, data: Vec<MeshData>) -> Vec<MeshId> {
    let mut ids: Vec<MeshId> = Vec::with_capacity(data.len());
    for item in data {
        let mut mesh = Mesh::new(&item.name);
        mesh.set_local_transform(&item.transform);
        mesh.has_geometry = item.has_geometry;
        // Loaders guarantee parents come first; anything else is detached.
        let parent = item.parent.and_then(|p| ids.get(p).copied());
        ids.push(scene.add_mesh(mesh, parent));
    }
    ids
}
