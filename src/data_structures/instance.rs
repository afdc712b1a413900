//! Transformation data for scene meshes.
//!
//! A mesh stores its local transform as editable euler rotation (the game
//! only ever turns around y); world transforms are composed from
//! [`Instance`]s which carry the rotation as a quaternion.

use std::ops::Mul;

use cgmath::{Euler, One, Rad};

/// Position, rotation (as quaternion) and scale.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Builds an instance from euler angles in radians.
    pub fn from_euler(
        position: cgmath::Vector3<f32>,
        rotation: cgmath::Vector3<f32>,
        scale: cgmath::Vector3<f32>,
    ) -> Self {
        let euler = Euler {
            x: Rad(rotation.x),
            y: Rad(rotation.y),
            z: Rad(rotation.z),
        };
        Self {
            position,
            rotation: euler.into(),
            scale,
        }
    }

    /// The rotation as euler angles in radians.
    pub fn euler_rotation(&self) -> cgmath::Vector3<f32> {
        let euler: Euler<Rad<f32>> = self.rotation.into();
        cgmath::Vector3::new(euler.x.0, euler.y.0, euler.z.0)
    }
}

impl<'a, 'b> Mul<&'b Instance> for &'a Instance {
    type Output = Instance;

    /// Applies `rhs` in the space of `self` (parent * child).
    fn mul(self, rhs: &'b Instance) -> Self::Output {
        let new_rotation = self.rotation * rhs.rotation;

        let new_scale = cgmath::Vector3::new(
            self.scale.x * rhs.scale.x,
            self.scale.y * rhs.scale.y,
            self.scale.z * rhs.scale.z,
        );
        let scaled_rhs_pos = cgmath::Vector3::new(
            self.scale.x * rhs.position.x,
            self.scale.y * rhs.position.y,
            self.scale.z * rhs.position.z,
        );
        let new_position = self.position + (self.rotation * scaled_rhs_pos);

        Instance {
            position: new_position,
            rotation: new_rotation,
            scale: new_scale,
        }
    }
}

impl From<cgmath::Vector3<f32>> for Instance {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}
