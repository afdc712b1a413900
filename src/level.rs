//! Level composition.
//!
//! A level owns the scene and the registries, and spawns the robot and the
//! props described by the [`GameConfig`].

use futures::try_join;

use crate::{
    config::GameConfig,
    data_structures::scene::{Scene, SharedScene},
    entities::{
        Entity,
        person::Person,
        prop::{Kettle, Registries},
    },
    error::AssetError,
    resources::MeshLoader,
};

pub struct Level {
    pub config: GameConfig,
    pub scene: SharedScene,
    pub registries: Registries,
    pub person: Person,
    pub kettle: Kettle,
}

impl Level {
    /// Loads all models of the level. Fails if any of them is unavailable.
    pub async fn load<L: MeshLoader>(loader: &L, config: GameConfig) -> Result<Self, AssetError> {
        let scene = Scene::shared(config.frame_rate);
        let mut registries = Registries::default();
        let (person, kettle) = try_join!(
            Person::spawn(loader, &scene, &config, config.person.spawn.into()),
            Kettle::load(loader, &scene, &config, &mut registries),
        )?;
        log::info!(
            "Level ready: {} meshes, {} collidables",
            scene.borrow().len(),
            registries.collidables.len()
        );
        Ok(Self {
            config,
            scene,
            registries,
            person,
            kettle,
        })
    }

    /// Root meshes of every entity in the level.
    pub fn entities(&self) -> Vec<&dyn Entity> {
        vec![&self.person as &dyn Entity, &self.kettle]
    }

    pub fn advance(&self, dt: instant::Duration) {
        self.scene.borrow_mut().advance(dt);
    }
}
