//! Input handling module
//!
//! Provides input mapping from raw key events to semantic actions. Pointer
//! input goes to the arcball controller in `fileorbit_input` instead.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
