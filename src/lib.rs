pub mod adapter;
pub mod animation;
pub mod camera;
pub mod cli;
pub mod input;
pub mod manipulator;
pub mod math;
pub mod types;

pub use camera::{Camera, Projection};
pub use input::{Action, Inputs, Mode};
pub use manipulator::CameraManipulator;
