mod colorize;
mod overlay;


pub use colorize::{display_index, render_channel};
pub use overlay::OverlayCompositor;
