//! Arcball (virtual trackball) projection
//!
//! A pointer position inside the viewport is mapped onto a unit hemisphere
//! facing the viewer. The result is a pure quaternion (zero scalar part) whose
//! vector part is the point on the sphere: `x`, `y` span the screen and `z` is
//! the depth towards the viewer. Two such handles `a` and `b` give the
//! rotation `b * a⁻¹`, which turns twice the arc between them.
//!
//! Points outside the inscribed circle are pulled onto its rim, so dragging
//! in the corners rolls the scene about the view axis.

use serde::{Serialize, Deserialize};
use crate::Quaternion;

/// Size of the surface the pointer coordinates refer to, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Create a viewport. Both dimensions must be positive.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Pixel coordinates of the viewport centre
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

/// Project pointer coordinates (origin top-left, y down) onto the arcball
///
/// The returned handle always has unit length.
pub fn project(x: f32, y: f32, viewport: Viewport) -> Quaternion {
    debug_assert!(
        viewport.width > 0.0 && viewport.height > 0.0,
        "arcball projection needs a non-empty viewport, got {:?}",
        viewport
    );

    let mut nx = 2.0 * x / viewport.width - 1.0;
    // Flip so that up on screen is +y
    let mut ny = 2.0 * (viewport.height - y) / viewport.height - 1.0;

    let mag2 = nx * nx + ny * ny;
    let depth = if mag2 > 1.0 {
        let mag = mag2.sqrt();
        nx /= mag;
        ny /= mag;
        0.0
    } else {
        (1.0 - mag2).sqrt()
    };

    Quaternion::new(0.0, nx, ny, depth)
}
