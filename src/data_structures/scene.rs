//! Scene graph and animation playback.
//!
//! The scene is an arena of meshes linked by parent handles. It does not
//! own a clock: whoever drives the game calls [`Scene::advance`] once per
//! frame, which moves every running playback forward and resolves the
//! completion futures handed out by [`Scene::begin_animation`].

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
use instant::Duration;

use crate::data_structures::{
    instance::Instance,
    mesh::{Mesh, MeshId},
};

/// The scene as shared by entities of one level.
///
/// Everything runs on one thread; borrows must not be held across `.await`.
pub type SharedScene = Rc<RefCell<Scene>>;

/// Resolves with `Ok(())` once a playback finished and settled, or with
/// `Err(Canceled)` if it was stopped, replaced or its mesh disposed.
pub type AnimationDone = oneshot::Receiver<()>;

struct Playback {
    mesh: MeshId,
    from: f32,
    to: f32,
    frame: f32,
    looping: bool,
    speed: f32,
    /// Remaining settle time once the end frame was reached.
    settling: Option<Duration>,
    settle: Duration,
    done: Option<oneshot::Sender<()>>,
}

impl Playback {
    fn is_finished(&self) -> bool {
        self.done.is_none()
    }
}

pub struct Scene {
    meshes: Vec<Option<Mesh>>,
    playbacks: Vec<Playback>,
    frame_rate: f32,
    elapsed: Duration,
}

impl Scene {
    /// Creates an empty scene whose animations run at `frame_rate` frames per second.
    pub fn new(frame_rate: f32) -> Self {
        Self {
            meshes: Vec::new(),
            playbacks: Vec::new(),
            frame_rate,
            elapsed: Duration::ZERO,
        }
    }

    pub fn shared(frame_rate: f32) -> SharedScene {
        Rc::new(RefCell::new(Self::new(frame_rate)))
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    /// Total scene time advanced so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn add_mesh(&mut self, mut mesh: Mesh, parent: Option<MeshId>) -> MeshId {
        mesh.parent = parent.filter(|p| self.mesh(*p).is_some());
        let id = MeshId(self.meshes.len());
        self.meshes.push(Some(mesh));
        id
    }

    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        self.meshes.get(id.0).and_then(Option::as_ref)
    }

    pub fn mesh_mut(&mut self, id: MeshId) -> Option<&mut Mesh> {
        self.meshes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: MeshId) -> bool {
        self.mesh(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.meshes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find_by_name(&self, name: &str) -> Option<MeshId> {
        self.meshes
            .iter()
            .position(|m| m.as_ref().is_some_and(|m| m.name == name))
            .map(MeshId)
    }

    pub fn children(&self, id: MeshId) -> Vec<MeshId> {
        self.meshes
            .iter()
            .enumerate()
            .filter(|(_, m)| m.as_ref().is_some_and(|m| m.parent == Some(id)))
            .map(|(idx, _)| MeshId(idx))
            .collect()
    }

    /// All descendants of `id` in depth-first order, excluding `id` itself.
    pub fn descendants(&self, id: MeshId) -> Vec<MeshId> {
        let mut result = Vec::new();
        let mut stack = self.children(id);
        stack.reverse();
        while let Some(next) = stack.pop() {
            result.push(next);
            let mut children = self.children(next);
            children.reverse();
            stack.extend(children);
        }
        result
    }

    /// Composes local transforms from the root down to `id`.
    pub fn world_transform(&self, id: MeshId) -> Option<Instance> {
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(mesh_id) = current {
            let mesh = self.mesh(mesh_id)?;
            chain.push(mesh.local_transform());
            current = mesh.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Instance::default(), |parent, local| &parent * local),
        )
    }

    /// Removes `id` and all its descendants. Running playbacks of removed
    /// meshes are dropped, which cancels their completion futures.
    pub fn dispose_mesh(&mut self, id: MeshId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for mesh_id in &doomed {
            self.meshes[mesh_id.0] = None;
        }
        self.playbacks.retain(|p| !doomed.contains(&p.mesh));
        true
    }

    /// Plays the animation playlist of `id` from frame `from` to `to`.
    ///
    /// `speed` scales the scene frame rate. A non-looping playback holds the
    /// final values for `settle` of scene time before the returned future
    /// resolves. A running playback of the same mesh is replaced.
    pub fn begin_animation(
        &mut self,
        id: MeshId,
        from: f32,
        to: f32,
        looping: bool,
        speed: f32,
        settle: Duration,
    ) -> Option<AnimationDone> {
        if !self.contains(id) {
            log::warn!("Cannot animate mesh {:?}, it is not in the scene", id);
            return None;
        }
        self.stop_animation(id);

        let (tx, rx) = oneshot::channel();
        let mut playback = Playback {
            mesh: id,
            from,
            to,
            frame: from,
            looping,
            speed,
            settling: None,
            settle,
            done: Some(tx),
        };
        if speed <= 0.0 || to <= from {
            log::warn!(
                "Playback of {:?} has no progress (speed {}, frames {}..{}), jumping to the end",
                id,
                speed,
                from,
                to
            );
            playback.frame = to;
            playback.looping = false;
        }
        self.apply_frame(id, playback.frame);
        self.playbacks.push(playback);
        Some(rx)
    }

    /// Stops the playback of `id`, leaving the mesh where it is.
    pub fn stop_animation(&mut self, id: MeshId) -> bool {
        let before = self.playbacks.len();
        self.playbacks.retain(|p| p.mesh != id);
        before != self.playbacks.len()
    }

    pub fn is_animating(&self, id: MeshId) -> bool {
        self.playbacks.iter().any(|p| p.mesh == id)
    }

    /// Moves every playback forward by `dt` of scene time.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed += dt;
        let mut playbacks = std::mem::take(&mut self.playbacks);
        for playback in playbacks.iter_mut() {
            self.step_playback(playback, dt);
        }
        playbacks.retain(|p| !p.is_finished());
        self.playbacks = playbacks;
    }

    fn step_playback(&mut self, playback: &mut Playback, dt: Duration) {
        if let Some(remaining) = playback.settling {
            let remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                finish(playback);
            } else {
                playback.settling = Some(remaining);
            }
            return;
        }

        if playback.looping || playback.frame < playback.to {
            playback.frame += dt.as_secs_f32() * self.frame_rate * playback.speed;
        }
        if playback.looping {
            let span = playback.to - playback.from;
            if playback.frame >= playback.to {
                playback.frame = playback.from + (playback.frame - playback.from) % span;
            }
        } else if playback.frame >= playback.to {
            // Time of this tick spent past the last frame already counts as settling.
            let rate = self.frame_rate * playback.speed;
            let overshoot = if rate > 0.0 {
                Duration::try_from_secs_f32((playback.frame - playback.to) / rate)
                    .unwrap_or(Duration::MAX)
            } else {
                Duration::ZERO
            };
            playback.frame = playback.to;
            self.apply_frame(playback.mesh, playback.frame);
            let remaining = playback.settle.saturating_sub(overshoot);
            if remaining.is_zero() {
                finish(playback);
            } else {
                playback.settling = Some(remaining);
            }
            return;
        }
        self.apply_frame(playback.mesh, playback.frame);
    }

    fn apply_frame(&mut self, id: MeshId, frame: f32) {
        if let Some(mesh) = self.mesh_mut(id) {
            let values: Vec<_> = mesh
                .animations
                .iter()
                .filter_map(|track| track.value_at(frame).map(|v| (track.property, v)))
                .collect();
            for (property, value) in values {
                mesh.apply(property, value);
            }
        }
    }
}

fn finish(playback: &mut Playback) {
    if let Some(done) = playback.done.take() {
        // The receiver may already be gone, nobody is waiting then.
        let _ = done.send(());
    }
}
