use std::{cell::RefCell, collections::HashMap, future::Future, task::Poll};

use gridbot::{
    data_structures::{
        instance::Instance,
        mesh::{Mesh, MeshId},
        scene::{Scene, SharedScene},
    },
    entities::person::{Movement, Person},
    error::AssetError,
    resources::{MeshData, MeshLoader},
};
use instant::Duration;

pub const TICK: Duration = Duration::from_millis(50);
pub const MAX_TICKS: usize = 1_000;

/// Loader serving prepared node lists by file name.
#[derive(Default)]
pub struct MockLoader {
    assets: HashMap<String, Vec<MeshData>>,
    requests: RefCell<Vec<String>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `file` as a root node followed by `children` flat below it.
    pub fn with_asset(mut self, file: &str, children: &[&str]) -> Self {
        let mut meshes = vec![MeshData::root()];
        meshes.extend(children.iter().map(|name| MeshData {
            name: name.to_string(),
            transform: Instance::default(),
            parent: Some(0),
            has_geometry: true,
        }));
        self.assets.insert(file.to_string(), meshes);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl MeshLoader for MockLoader {
    async fn load(&self, base: &str, file_name: &str) -> Result<Vec<MeshData>, AssetError> {
        let path = format!("{}{}", base, file_name);
        self.requests.borrow_mut().push(path.clone());
        self.assets
            .get(file_name)
            .cloned()
            .ok_or_else(|| AssetError::unavailable(&path, "not found"))
    }
}

/// The three meshes `kettle.glb` ships with: root, body and lid.
pub fn kettle_loader() -> MockLoader {
    MockLoader::new()
        .with_asset("kettle.glb", &["body", "lid"])
        .with_asset("robot.glb", &["chassis"])
}

/// A robot standing at the origin facing rotation 0.
pub fn robot_at_origin() -> (SharedScene, MeshId, Person) {
    let scene = Scene::shared(30.0);
    let id = scene.borrow_mut().add_mesh(Mesh::new("robot"), None);
    let person = Person::new(
        id,
        cgmath::Vector3::new(0.0, 0.0, 0.0),
        scene.clone(),
        Movement::default(),
    );
    (scene, id, person)
}

/// Resolves once the scene clock passed `at`.
pub fn scene_time(scene: &SharedScene, at: Duration) -> impl Future<Output = ()> + '_ {
    futures::future::poll_fn(move |_| {
        if scene.borrow().elapsed() >= at {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    })
}

pub fn assert_vec_eq(actual: cgmath::Vector3<f32>, expected: cgmath::Vector3<f32>) {
    let delta = actual - expected;
    assert!(
        delta.x.abs() < 1e-4 && delta.y.abs() < 1e-4 && delta.z.abs() < 1e-4,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}

pub fn assert_f32_eq(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {}, got {}",
        expected,
        actual
    );
}
