mod backing;
mod index;
mod view;


pub use backing::BackingStore;
pub use index::{DimensionIndex, Position};
pub use view::ViewStack;
