use std::collections::BTreeMap;

use crate::data_structures::mesh::{Color3, MeshId};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub color: Color3,
    /// Outline only the emissive part instead of glowing the whole mesh.
    pub glow_emissive_only: bool,
}

/// Set of sub-meshes the renderer outlines.
#[derive(Debug, Default)]
pub struct HighlightLayer {
    meshes: BTreeMap<MeshId, Highlight>,
}

impl HighlightLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or re-colors `id`.
    pub fn add_mesh(&mut self, id: MeshId, color: Color3, glow_emissive_only: bool) {
        self.meshes.insert(
            id,
            Highlight {
                color,
                glow_emissive_only,
            },
        );
    }

    pub fn remove_mesh(&mut self, id: MeshId) -> Option<Highlight> {
        self.meshes.remove(&id)
    }

    pub fn has_mesh(&self, id: MeshId) -> bool {
        self.meshes.contains_key(&id)
    }

    pub fn get(&self, id: MeshId) -> Option<&Highlight> {
        self.meshes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}
