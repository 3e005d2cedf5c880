//! Rotation math for fileorbit
//!
//! This crate provides the small set of 3D types the orientation model is
//! built from.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quaternion`] - unit quaternion rotations (Hamilton convention)
//! - [`Mat4`] - 4x4 column-major matrix consumed by the renderer
//!
//! ## Arcball
//!
//! - [`arcball::project`] - maps a pointer position onto the virtual trackball
//! - [`Viewport`] - pixel size of the surface the pointer lives on

mod vec3;
mod quaternion;
pub mod mat4;
pub mod arcball;

pub use vec3::Vec3;
pub use quaternion::Quaternion;
pub use mat4::Mat4;
pub use arcball::Viewport;
