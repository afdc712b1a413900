use cgmath::VectorSpace;

/// The mesh property a track writes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatedProperty {
    RotationY,
    Position,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationValue {
    Float(f32),
    Vector3(cgmath::Vector3<f32>),
}

impl AnimationValue {
    fn lerp(self, other: AnimationValue, amount: f32) -> Option<AnimationValue> {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Some(Self::Float(a + (b - a) * amount)),
            (Self::Vector3(a), Self::Vector3(b)) => Some(Self::Vector3(a.lerp(b, amount))),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keyframe {
    pub frame: f32,
    pub value: AnimationValue,
}

/// A named property path with time-ordered keyframes.
///
/// Tracks are plain values: every move builds its own pair, so no two moves
/// ever share key storage.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationTrack {
    pub name: String,
    pub property: AnimatedProperty,
    keys: Vec<Keyframe>,
}

impl AnimationTrack {
    pub fn new(name: &str, property: AnimatedProperty) -> Self {
        Self {
            name: name.to_string(),
            property,
            keys: Vec::new(),
        }
    }

    /// Replaces all keys. Keys are kept sorted by frame.
    pub fn set_keys(&mut self, mut keys: Vec<Keyframe>) {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        self.keys = keys;
    }

    pub fn with_keys(mut self, keys: Vec<Keyframe>) -> Self {
        self.set_keys(keys);
        self
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn last_frame(&self) -> Option<f32> {
        self.keys.last().map(|k| k.frame)
    }

    /// Linearly interpolated value at `frame`.
    ///
    /// Frames before the first key hold the first value, frames after the last
    /// key hold the last value.
    pub fn value_at(&self, frame: f32) -> Option<AnimationValue> {
        let first = self.keys.first()?;
        if frame <= first.frame {
            return Some(first.value);
        }
        for window in self.keys.windows(2) {
            let (from, to) = (window[0], window[1]);
            if frame <= to.frame {
                let span = to.frame - from.frame;
                if span <= f32::EPSILON {
                    return Some(to.value);
                }
                let amount = (frame - from.frame) / span;
                return from.value.lerp(to.value, amount).or_else(|| {
                    log::warn!("Track {} mixes value kinds between keys", self.name);
                    Some(to.value)
                });
            }
        }
        self.keys.last().map(|k| k.value)
    }
}
