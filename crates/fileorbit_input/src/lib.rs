//! Pointer input for fileorbit
//!
//! This crate turns winit mouse events into arcball gestures on any
//! [`ArcballTarget`], normally the scene camera's `OrientationState`.

mod arcball_controller;

pub use arcball_controller::{ArcballController, ArcballEvent, ArcballTarget};
