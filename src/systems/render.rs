//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Marker pipeline
//! - Scene to frame conversion and submission

use std::sync::Arc;
use winit::window::Window;
use fileorbit_core::Scene;
use fileorbit_render::{ContextError, FrameBuilder, RenderContext};
use fileorbit_render::pipeline::MarkerPipeline;
use crate::config::AppConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MarkerPipeline,
    frame_builder: FrameBuilder,
    background: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, config: &AppConfig) -> Result<Self, ContextError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, config.window.vsync))?;

        let mut pipeline = MarkerPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            pipeline,
            frame_builder: config.frame_builder(),
            background: clear_color(config.rendering.background_color),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), RenderError> {
        let frame = self.frame_builder.build(scene, self.context.aspect_ratio());

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(
            &self.context.device,
            &self.context.queue,
            &mut encoder,
            &view,
            &frame,
            self.background,
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        log::trace!("Rendered {} instances", frame.instance_count());
        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Convert an RGBA config color to a clear color
fn clear_color(rgba: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: rgba[0] as f64,
        g: rgba[1] as f64,
        b: rgba[2] as f64,
        a: rgba[3] as f64,
    }
}
