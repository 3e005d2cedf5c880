//! fileorbit
//!
//! Shows the entries of a directory as markers on a sphere. The camera is
//! turned with an arcball and every marker can spin on its own orbit.

pub mod cli;
pub mod config;
pub mod input;
pub mod systems;
