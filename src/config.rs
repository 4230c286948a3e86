mod error;
mod io;
mod layout;


pub use error::{ConfigError, Result};
pub use io::{load_layout, save_layout};
pub use layout::{ChannelSpec, LayoutSpec};
