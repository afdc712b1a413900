//! Shadow caster registry.

use crate::data_structures::{mesh::MeshId, scene::Scene};

/// Meshes whose shadows the renderer has to compute.
#[derive(Debug, Default)]
pub struct ShadowGenerator {
    casters: Vec<MeshId>,
}

impl ShadowGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id`, and with `include_descendants` every mesh below it.
    /// Meshes that are not part of `scene` are skipped.
    pub fn add_shadow_caster(&mut self, scene: &Scene, id: MeshId, include_descendants: bool) {
        if !scene.contains(id) {
            log::warn!("Mesh {:?} is not in the scene and cannot cast shadows", id);
            return;
        }
        let mut ids = vec![id];
        if include_descendants {
            ids.extend(scene.descendants(id));
        }
        for mesh_id in ids {
            if !self.casters.contains(&mesh_id) {
                self.casters.push(mesh_id);
            }
        }
    }

    pub fn remove_shadow_caster(&mut self, id: MeshId) -> bool {
        let before = self.casters.len();
        self.casters.retain(|c| *c != id);
        before != self.casters.len()
    }

    pub fn is_caster(&self, id: MeshId) -> bool {
        self.casters.contains(&id)
    }

    pub fn casters(&self) -> &[MeshId] {
        &self.casters
    }
}
