//! Core types for fileorbit
//!
//! This crate holds everything that has state or algorithmic content:
//!
//! - [`OrientationState`] - click/drag/committed quaternion composer
//! - [`OrbitDriver`] - per-entity automatic spin feeding the composer
//! - [`fibonacci_sphere`] - golden-angle layout of N anchors on the unit sphere
//! - [`EntityRecord`] - one visualized directory entry
//! - [`DirectoryLister`] / [`FsLister`] - where entries come from
//! - [`Scene`] - owns the entity batch and the camera orientation

mod orientation;
mod orbit;
mod layout;
mod entity;
mod listing;
mod scene;

pub use orientation::OrientationState;
pub use orbit::{OrbitDriver, AxisPolicy, SpinDirection};
pub use layout::fibonacci_sphere;
pub use entity::{EntityRecord, EntryKind};
pub use listing::{DirectoryEntry, DirectoryLister, FsLister, ListingError, ViewFilter, PARENT_ENTRY};
pub use scene::{
    CameraView, DisplayFlags, MarkerView, Scene, SceneCommand, SceneSettings,
    LABEL_OFFSET, MARKER_STEP, RADIUS_STEP, SPEED_STEP, TRANSLATION_STEP,
};

// Re-export commonly used types from fileorbit_math for convenience
pub use fileorbit_math::{Quaternion, Vec3, Mat4, Viewport};
