pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scene;
pub mod types;

pub use camera::{Camera, CameraConvention, Projection};
pub use input::{InputDispatcher, KeyBinding, KeyPhase};
