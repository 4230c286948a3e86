mod channels;
mod container;
mod cursor;
mod dataset;
mod derive;
mod growth;
mod shared;

#[cfg(test)]
mod tests;

pub use container::Image5D;
pub use cursor::{PositionChange, PositionObserver};
pub use shared::SharedImage5D;
