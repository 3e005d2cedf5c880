//! Quaternions for representing rotations in 3D space
//!
//! Components follow the Hamilton convention with the scalar first:
//! q = w + x*i + y*j + z*k
//!
//! Every orientation in fileorbit is a unit quaternion. The constructors that
//! produce rotations (`from_axis_angle`, `normalized`) guarantee unit norm, so
//! `inverse` can use the conjugate without dividing by the norm.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::mat4::Mat4;
use crate::Vec3;

/// Tolerance used by the debug-only unit norm check in [`Quaternion::inverse`]
const UNIT_TOLERANCE: f32 = 1e-3;

/// Quaternion with scalar part `w` and vector part `(x, y, z)`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component
    pub w: f32,
    /// i component
    pub x: f32,
    /// j component
    pub y: f32,
    /// k component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a quaternion from raw components (not normalized)
    #[inline]
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Create a rotation of `angle` radians about `axis`
    ///
    /// The axis is normalized first. A zero axis gives the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }

        let half = angle * 0.5;
        let sin_h = half.sin();
        Self {
            w: half.cos(),
            x: sin_h * axis.x,
            y: sin_h * axis.y,
            z: sin_h * axis.z,
        }
    }

    /// The vector part
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// 4D dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Compute the squared magnitude of the quaternion
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Compute the magnitude of the quaternion
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    ///
    /// A zero quaternion has no direction to keep, so it becomes the identity.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            Self {
                w: self.w * inv_mag,
                x: self.x * inv_mag,
                y: self.y * inv_mag,
                z: self.z * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Conjugate (negated vector part)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Inverse of a unit quaternion
    ///
    /// Only valid for unit input. All producers in this workspace normalize,
    /// so the check is a debug assertion and costs nothing in release builds.
    #[inline]
    pub fn inverse(&self) -> Self {
        debug_assert!(
            (self.magnitude_squared() - 1.0).abs() < UNIT_TOLERANCE,
            "inverse() of non-unit quaternion {:?}",
            self
        );
        self.conjugate()
    }

    /// Rotate a vector: v' = q * v * q⁻¹
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(u × v) + 2u × (u × v)
        let u = self.vector();
        let t = u.cross(v) * 2.0;
        v + t * self.w + u.cross(t)
    }

    /// Convert to a column-major 4x4 rotation matrix
    ///
    /// The 3x3 rotation sits in the upper-left block; the last row and column
    /// are those of the identity.
    pub fn to_rotation_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;

        [
            [
                1.0 - 2.0 * y * y - 2.0 * z * z,
                2.0 * x * y + 2.0 * w * z,
                2.0 * x * z - 2.0 * w * y,
                0.0,
            ],
            [
                2.0 * x * y - 2.0 * w * z,
                1.0 - 2.0 * x * x - 2.0 * z * z,
                2.0 * y * z + 2.0 * w * x,
                0.0,
            ],
            [
                2.0 * x * z + 2.0 * w * y,
                2.0 * y * z - 2.0 * w * x,
                1.0 - 2.0 * x * x - 2.0 * y * y,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`
impl std::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = self;
        let b = rhs;
        Self {
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
            z: a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
        }
    }
}
