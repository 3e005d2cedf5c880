//! Application systems
//!
//! Each system owns one concern of the main loop:
//! - [`SimulationSystem`] - pointer input and fixed-rate orbit ticks
//! - [`WindowSystem`] - window creation and title
//! - [`RenderSystem`] - GPU context and frame submission

mod render;
mod simulation;
mod window;

pub use render::{RenderError, RenderSystem};
pub use simulation::SimulationSystem;
pub use window::{format_title, WindowError, WindowSystem};
