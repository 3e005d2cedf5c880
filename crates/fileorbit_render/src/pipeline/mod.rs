//! Rendering pipeline components
//!
//! This module contains the instanced marker pipeline and the GPU data
//! types it consumes.

pub mod types;
pub mod marker_pipeline;

// Re-export types
pub use types::{FrameUniforms, MarkerInstance, MarkerVertex};

// Re-export pipeline
pub use marker_pipeline::{perspective_matrix, MarkerPipeline, PipelineVariant};
