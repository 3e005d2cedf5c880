//! Entity records
//!
//! An entity is one visualized directory entry: its name and kind, a fixed
//! anchor on the unit sphere, and the orientation state its orbit drives.

use rand::Rng;
use fileorbit_math::{Mat4, Vec3};
use crate::{AxisPolicy, OrbitDriver, OrientationState};

/// What an entry is on disk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    #[inline]
    pub fn is_directory(self) -> bool {
        self == EntryKind::Directory
    }
}

/// One visualized file or directory
///
/// Records are created in a batch when a directory is read and dropped in a
/// batch on the next reload.
#[derive(Clone, Debug)]
pub struct EntityRecord {
    /// Entry name as listed
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
    anchor: Vec3,
    orientation: OrientationState,
    orbit: OrbitDriver,
}

impl EntityRecord {
    /// Fresh record: identity orientation and a newly drawn orbit
    pub fn new<R: Rng + ?Sized>(
        name: impl Into<String>,
        kind: EntryKind,
        anchor: Vec3,
        policy: AxisPolicy,
        rng: &mut R,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            anchor,
            orientation: OrientationState::new(),
            orbit: OrbitDriver::randomized(policy, anchor, rng),
        }
    }

    /// Fixed position on the unit sphere
    #[inline]
    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    #[inline]
    pub fn orientation(&self) -> &OrientationState {
        &self.orientation
    }

    #[inline]
    pub fn orientation_mut(&mut self) -> &mut OrientationState {
        &mut self.orientation
    }

    #[inline]
    pub fn orbit(&self) -> &OrbitDriver {
        &self.orbit
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    /// Draw a new axis and direction and forget all rotation
    pub fn rerandomize<R: Rng + ?Sized>(&mut self, policy: AxisPolicy, rng: &mut R) {
        self.orbit = OrbitDriver::randomized(policy, self.anchor, rng);
        self.orientation.reset();
    }

    /// Advance the orbit by one tick
    pub fn tick(&mut self, speed: f32) {
        self.orbit.tick(speed, &mut self.orientation);
    }

    /// Effective rotation for presentation
    pub fn rotation_matrix(&self) -> Mat4 {
        self.orientation.rotation_matrix()
    }
}
