mod active;
mod lut;
mod state;

#[cfg(test)]
mod tests;

pub use active::ActiveView;
pub use lut::{Lut, hsb_to_rgb};
pub use state::{ChannelCalibration, ChannelDisplayState, DisplayMode, LutUpdateMode, Threshold};
