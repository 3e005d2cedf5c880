//! Marker rendering for fileorbit
//!
//! This crate provides the wgpu-based renderer that draws a scene's
//! directory entries as markers on a sphere.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`mesh`] - unit cube, solid sphere and wire sphere geometry
//! - [`pipeline::MarkerPipeline`] - instanced drawing in solid, wire and overlay variants
//! - [`presentation::FrameBuilder`] - converts scene views into draw batches

pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod presentation;

pub use context::{ContextError, RenderContext};
pub use presentation::{DrawBatch, Frame, FrameBuilder, Palette};
