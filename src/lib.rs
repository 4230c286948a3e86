pub mod cli;
pub mod config;
pub mod contrast;
pub mod display;
pub mod image5d;
pub mod model;
pub mod render;
pub mod stack;

pub use image5d::{Image5D, PositionChange, SharedImage5D};
