//! The player controlled robot.
//!
//! Moves are animated: every move builds a fresh rotation track and a fresh
//! position track, plays them on the scene and resolves once the robot came
//! to rest. A robot runs at most one move at a time.

use std::{cell::Cell, f32::consts::PI};

use cgmath::InnerSpace;
use instant::Duration;

use crate::{
    config::GameConfig,
    data_structures::{mesh::MeshId, scene::SharedScene},
    entities::Entity,
    error::{AssetError, MoveError},
    resources::{
        MeshLoader,
        animation::{AnimatedProperty, AnimationTrack, AnimationValue, Keyframe},
        import_mesh,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
    Idle,
    Moving,
}

/// Grid direction relative to the level layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// Unit displacement of one grid step.
    pub fn unit(&self) -> cgmath::Vector3<f32> {
        match self {
            Direction::Forward => cgmath::Vector3::unit_z(),
            Direction::Back => -cgmath::Vector3::unit_z(),
            Direction::Left => cgmath::Vector3::unit_x(),
            Direction::Right => -cgmath::Vector3::unit_x(),
        }
    }

    /// Y-rotation the robot faces while walking this way.
    pub fn rotation(&self) -> f32 {
        match self {
            Direction::Forward => -PI / 2.0,
            Direction::Back => PI / 2.0,
            Direction::Left => 0.0,
            Direction::Right => -PI,
        }
    }
}

/// Everything a move needs besides the robot's current transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovePlan {
    pub displacement: cgmath::Vector3<f32>,
    pub target_rotation: f32,
    pub speed: f32,
}

impl MovePlan {
    pub fn new(direction: Direction, count: u32, step_size: f32) -> Self {
        let displacement = direction.unit() * (step_size * count as f32);
        Self {
            displacement,
            target_rotation: direction.rotation(),
            speed: playback_speed(count, displacement.magnitude()),
        }
    }

    pub fn distance(&self) -> f32 {
        self.displacement.magnitude()
    }
}

/// A single step always plays at speed 2; longer walks play at `distance / 2`
/// so they don't take proportionally longer.
pub fn playback_speed(count: u32, distance: f32) -> f32 {
    if count == 1 {
        2.0
    } else {
        distance / 2.0
    }
}

/// Movement tunables copied out of [`GameConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Movement {
    pub step_size: f32,
    pub rotation_frames: f32,
    pub move_frames: f32,
    pub settle_delay: Duration,
}

impl From<&GameConfig> for Movement {
    fn from(config: &GameConfig) -> Self {
        Self {
            step_size: config.step_size,
            rotation_frames: config.rotation_frames,
            move_frames: config.move_frames,
            settle_delay: Duration::from_millis(config.settle_delay_millis),
        }
    }
}

impl Default for Movement {
    fn default() -> Self {
        (&GameConfig::default()).into()
    }
}

/// Marks the robot as moving for as long as it lives.
struct MovingGuard<'a>(&'a Cell<MotionState>);

impl<'a> MovingGuard<'a> {
    fn enter(state: &'a Cell<MotionState>) -> Self {
        state.set(MotionState::Moving);
        Self(state)
    }
}

impl Drop for MovingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(MotionState::Idle);
    }
}

pub struct Person {
    mesh: MeshId,
    default_position: cgmath::Vector3<f32>,
    scene: SharedScene,
    state: Cell<MotionState>,
    movement: Movement,
}

impl Person {
    /// Loads the robot model and places it at `position`.
    ///
    /// Resolves once the model is in the scene; a failed load is returned
    /// instead of leaving a half initialised robot behind.
    pub async fn spawn<L: MeshLoader>(
        loader: &L,
        scene: &SharedScene,
        config: &GameConfig,
        position: cgmath::Vector3<f32>,
    ) -> Result<Self, AssetError> {
        let ids = import_mesh(loader, scene, &config.asset_base, &config.person.file).await?;
        let root = ids[0];
        if let Some(mesh) = scene.borrow_mut().mesh_mut(root) {
            let s = config.person.scaling;
            mesh.scaling = cgmath::Vector3::new(s, s, s);
            mesh.rotation.y = config.person.initial_rotation;
            mesh.position = position;
            mesh.check_collisions = true;
        }
        log::info!("Spawned robot {} at {:?}", config.person.file, position);
        Ok(Self::new(root, position, scene.clone(), config.into()))
    }

    /// Wraps a mesh that is already part of `scene`.
    pub fn new(
        mesh: MeshId,
        default_position: cgmath::Vector3<f32>,
        scene: SharedScene,
        movement: Movement,
    ) -> Self {
        Self {
            mesh,
            default_position,
            scene,
            state: Cell::new(MotionState::Idle),
            movement,
        }
    }

    pub fn state(&self) -> MotionState {
        self.state.get()
    }

    pub fn default_position(&self) -> cgmath::Vector3<f32> {
        self.default_position
    }

    pub fn movement(&self) -> &Movement {
        &self.movement
    }

    pub fn position(&self) -> Option<cgmath::Vector3<f32>> {
        self.scene.borrow().mesh(self.mesh).map(|m| m.position)
    }

    pub fn rotation_y(&self) -> Option<f32> {
        self.scene.borrow().mesh(self.mesh).map(|m| m.rotation.y)
    }

    /// Snaps back to the spawn position without animation.
    ///
    /// A move in flight is stopped first and resolves as interrupted.
    pub fn reset_position(&self) -> Result<(), MoveError> {
        let mut scene = self.scene.borrow_mut();
        scene.stop_animation(self.mesh);
        let mesh = scene.mesh_mut(self.mesh).ok_or(MoveError::MeshMissing)?;
        mesh.position = self.default_position;
        Ok(())
    }

    pub async fn move_forward(&self, count: u32) -> Result<(), MoveError> {
        self.move_with_animation(Direction::Forward, count).await
    }

    pub async fn move_back(&self, count: u32) -> Result<(), MoveError> {
        self.move_with_animation(Direction::Back, count).await
    }

    pub async fn move_left(&self, count: u32) -> Result<(), MoveError> {
        self.move_with_animation(Direction::Left, count).await
    }

    pub async fn move_right(&self, count: u32) -> Result<(), MoveError> {
        self.move_with_animation(Direction::Right, count).await
    }

    /// Walks `count` cells in `direction`. Zero cells is a no-op.
    pub async fn move_with_animation(
        &self,
        direction: Direction,
        count: u32,
    ) -> Result<(), MoveError> {
        if self.state.get() == MotionState::Moving {
            log::warn!("Rejected {:?} x{}: robot is still moving", direction, count);
            return Err(MoveError::Busy);
        }
        if count == 0 {
            return Ok(());
        }
        let plan = MovePlan::new(direction, count, self.movement.step_size);
        log::debug!("Moving {:?} x{}: {:?}", direction, count, plan);

        let done = {
            let mut scene = self.scene.borrow_mut();
            let mesh = scene.mesh_mut(self.mesh).ok_or(MoveError::MeshMissing)?;
            mesh.animations = self.tracks_for(mesh.position, mesh.rotation.y, &plan);
            scene
                .begin_animation(
                    self.mesh,
                    0.0,
                    self.movement.move_frames,
                    false,
                    plan.speed,
                    self.movement.settle_delay,
                )
                .ok_or(MoveError::MeshMissing)?
        };

        let _moving = MovingGuard::enter(&self.state);
        done.await.map_err(|_| MoveError::Interrupted)
    }

    fn tracks_for(
        &self,
        position: cgmath::Vector3<f32>,
        rotation_y: f32,
        plan: &MovePlan,
    ) -> Vec<AnimationTrack> {
        let rotation = AnimationTrack::new("rotation", AnimatedProperty::RotationY).with_keys(vec![
            Keyframe {
                frame: 0.0,
                value: AnimationValue::Float(rotation_y),
            },
            Keyframe {
                frame: self.movement.rotation_frames,
                value: AnimationValue::Float(plan.target_rotation),
            },
        ]);
        let translation = AnimationTrack::new("position", AnimatedProperty::Position).with_keys(vec![
            Keyframe {
                frame: 0.0,
                value: AnimationValue::Vector3(position),
            },
            Keyframe {
                frame: self.movement.move_frames,
                value: AnimationValue::Vector3(position + plan.displacement),
            },
        ]);
        vec![rotation, translation]
    }
}

impl Entity for Person {
    fn mesh(&self) -> MeshId {
        self.mesh
    }
}
