//! Static level props such as the kettle.

use crate::{
    config::{GameConfig, PropConfig},
    data_structures::{
        Collidables, highlight::HighlightLayer, mesh::MeshId, scene::SharedScene,
        shadow::ShadowGenerator,
    },
    entities::Entity,
    error::AssetError,
    resources::{MeshLoader, import_mesh},
};

/// The level-owned registries a prop signs up to when it is loaded.
#[derive(Debug, Default)]
pub struct Registries {
    pub collidables: Collidables,
    pub shadows: ShadowGenerator,
    pub highlights: HighlightLayer,
}

/// A prop that is placed once and never moves.
#[derive(Clone, Debug)]
pub struct StaticProp {
    name: String,
    mesh: MeshId,
    sub_meshes: Vec<MeshId>,
    position: cgmath::Vector3<f32>,
}

impl StaticProp {
    /// Loads `config.file`, places its root and registers it for shadows,
    /// collisions and highlighting.
    ///
    /// Highlight indices refer to the loader's ordering (0 = root). If any of
    /// them is out of range the imported meshes are removed again and nothing
    /// is registered.
    pub async fn load<L: MeshLoader>(
        loader: &L,
        scene: &SharedScene,
        asset_base: &str,
        config: &PropConfig,
        registries: &mut Registries,
    ) -> Result<Self, AssetError> {
        let ids = import_mesh(loader, scene, asset_base, &config.file).await?;
        let mut scene = scene.borrow_mut();
        let root = ids[0];

        if let Some(&index) = config.highlight_indices.iter().find(|&&i| i >= ids.len()) {
            scene.dispose_mesh(root);
            return Err(AssetError::MissingSubMesh {
                file: config.file.clone(),
                index,
                available: ids.len(),
            });
        }

        let position: cgmath::Vector3<f32> = config.position.into();
        if let Some(mesh) = scene.mesh_mut(root) {
            let s = config.scaling;
            mesh.name = config.name.clone();
            mesh.scaling = cgmath::Vector3::new(s, s, s);
            mesh.position = position;
            mesh.receive_shadows = true;
        }
        registries.shadows.add_shadow_caster(&scene, root, true);
        registries.collidables.push(root);
        for &index in &config.highlight_indices {
            registries.highlights.add_mesh(
                ids[index],
                config.highlight_color,
                config.glow_emissive_only,
            );
        }
        log::info!(
            "Placed {} at {:?} with {} highlighted sub-meshes",
            config.name,
            position,
            config.highlight_indices.len()
        );

        Ok(Self {
            name: config.name.clone(),
            mesh: root,
            sub_meshes: ids,
            position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> cgmath::Vector3<f32> {
        self.position
    }

    /// All imported meshes in loader order, root first.
    pub fn sub_meshes(&self) -> &[MeshId] {
        &self.sub_meshes
    }
}

impl Entity for StaticProp {
    fn mesh(&self) -> MeshId {
        self.mesh
    }
}

/// The kettle of level 2: a [`StaticProp`] with the kettle preset.
#[derive(Clone, Debug)]
pub struct Kettle(StaticProp);

impl Kettle {
    pub async fn load<L: MeshLoader>(
        loader: &L,
        scene: &SharedScene,
        config: &GameConfig,
        registries: &mut Registries,
    ) -> Result<Self, AssetError> {
        StaticProp::load(loader, scene, &config.asset_base, &config.kettle, registries)
            .await
            .map(Self)
    }

    pub fn prop(&self) -> &StaticProp {
        &self.0
    }
}

impl Entity for Kettle {
    fn mesh(&self) -> MeshId {
        self.0.mesh
    }
}
