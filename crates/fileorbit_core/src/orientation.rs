//! Orientation composer
//!
//! Every rotatable thing (the camera and each entity) carries three
//! quaternions:
//!
//! - `click` - handle where the current gesture started
//! - `drag` - handle where the current gesture is now
//! - `committed` - rotation baked in by earlier gestures
//!
//! The orientation shown on screen is always
//! `effective = drag * click⁻¹ * committed`: the live delta of the gesture
//! applied on top of the committed history. Manual arcball drags and the
//! orbit animation both go through this one rule.

use fileorbit_math::{Mat4, Quaternion};

/// Click/drag/committed orientation state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationState {
    click: Quaternion,
    drag: Quaternion,
    committed: Quaternion,
}

impl Default for OrientationState {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationState {
    /// Identity orientation with no gesture in progress
    pub const fn new() -> Self {
        Self {
            click: Quaternion::IDENTITY,
            drag: Quaternion::IDENTITY,
            committed: Quaternion::IDENTITY,
        }
    }

    /// State with a pre-existing committed rotation
    pub fn from_committed(committed: Quaternion) -> Self {
        Self {
            committed: committed.normalized(),
            ..Self::new()
        }
    }

    /// Handle at gesture start
    #[inline]
    pub fn click(&self) -> Quaternion {
        self.click
    }

    /// Handle at the current gesture position
    #[inline]
    pub fn drag(&self) -> Quaternion {
        self.drag
    }

    /// Rotation baked in by finished gestures
    #[inline]
    pub fn committed(&self) -> Quaternion {
        self.committed
    }

    /// Start a gesture: the delta begins at identity
    pub fn begin(&mut self, handle: Quaternion) {
        self.click = handle;
        self.drag = handle;
    }

    /// Move the current gesture; `click` stays where the gesture started
    pub fn drag_to(&mut self, handle: Quaternion) {
        self.drag = handle;
    }

    /// Rotation of the gesture in progress (`drag * click⁻¹`)
    #[inline]
    pub fn delta(&self) -> Quaternion {
        self.drag * self.click.inverse()
    }

    /// Orientation to present this frame
    #[inline]
    pub fn effective(&self) -> Quaternion {
        self.delta() * self.committed
    }

    /// Finish the gesture: bake the delta into `committed`
    ///
    /// The result is renormalized so that many small commits cannot drift
    /// away from unit length.
    pub fn commit(&mut self) {
        self.committed = self.effective().normalized();
        self.click = Quaternion::IDENTITY;
        self.drag = Quaternion::IDENTITY;
    }

    /// Forget all rotation, committed history included
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Effective orientation as a column-major rotation matrix
    pub fn rotation_matrix(&self) -> Mat4 {
        self.effective().to_rotation_matrix()
    }
}
