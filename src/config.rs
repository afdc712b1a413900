//! Game configuration.
//!
//! All tunables of the grid game live in [`GameConfig`]. The defaults
//! reproduce the shipped game; a JSON file may override any subset of them.

use std::f32::consts::PI;

use serde::Deserialize;

use crate::{data_structures::mesh::Color3, error::ConfigError, resources::io::load_string};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Directory the mesh loader resolves model file names against.
    pub asset_base: String,
    /// Edge length of one grid cell in world units.
    pub step_size: f32,
    /// Animation frames per second at speed 1.
    pub frame_rate: f32,
    /// Last keyframe of the rotation track.
    pub rotation_frames: f32,
    /// Last keyframe of the position track, also the playback end frame.
    pub move_frames: f32,
    /// Scene time to wait after a move animation ended before the move resolves.
    pub settle_delay_millis: u64,
    /// Real-time tick used by the native driver.
    pub tick_duration_millis: u64,
    pub person: PersonConfig,
    pub kettle: PropConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_base: "models/".to_string(),
            step_size: 2.0,
            frame_rate: 30.0,
            rotation_frames: 10.0,
            move_frames: 30.0,
            settle_delay_millis: 300,
            tick_duration_millis: 16,
            person: PersonConfig::default(),
            kettle: PropConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a JSON config through the same asset path as models.
    pub async fn load(file_name: &str) -> Result<Self, ConfigError> {
        let json = load_string(file_name).await?;
        Self::from_json(&json)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonConfig {
    pub file: String,
    pub spawn: [f32; 3],
    pub scaling: f32,
    /// Y-rotation the robot faces right after loading.
    pub initial_rotation: f32,
}

impl Default for PersonConfig {
    fn default() -> Self {
        Self {
            file: "robot.glb".to_string(),
            spawn: [0.0, 0.0, 0.0],
            scaling: 0.3,
            initial_rotation: -PI / 2.0,
        }
    }
}

/// Describes a static level prop: what to load, where to put it and which
/// of its sub-meshes get outlined.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropConfig {
    pub file: String,
    pub name: String,
    pub position: [f32; 3],
    pub scaling: f32,
    pub highlight_indices: Vec<usize>,
    pub highlight_color: Color3,
    pub glow_emissive_only: bool,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            file: "kettle.glb".to_string(),
            name: "kettle".to_string(),
            position: [4.0, 0.0, 4.0],
            scaling: 1.0,
            highlight_indices: vec![1, 2],
            highlight_color: Color3::GREEN,
            glow_emissive_only: true,
        }
    }
}
