use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::model::{Dimension, FillMode, PixelPlane, Result};
use crate::stack::Position;

use super::Image5D;

/// Cloneable handle serialising every access to one [`Image5D`].
///
/// A cursor move or a growth runs entirely under the lock, so other threads
/// never observe a half-rebuilt z-stack. Position observers are invoked
/// with the lock held and must not call back into the same handle.
#[derive(Debug, Clone)]
pub struct SharedImage5D {
    inner: Arc<Mutex<Image5D>>,
}

impl From<Image5D> for SharedImage5D {
    fn from(image: Image5D) -> Self {
        Self::new(image)
    }
}

impl SharedImage5D {
    pub fn new(image: Image5D) -> Self {
        Self {
            inner: Arc::new(Mutex::new(image)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, Image5D> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_position(&self, channel: usize, slice: usize, frame: usize) {
        self.lock().set_position(channel, slice, frame);
    }

    pub fn current_position(&self) -> Position {
        self.lock().current_position()
    }

    pub fn expand(&self, dimension: Dimension, new_size: usize, fill: FillMode) -> Result<bool> {
        self.lock().expand(dimension, new_size, fill)
    }

    pub fn pixels(&self, position: Position) -> Result<PixelPlane> {
        self.lock().pixels(position)
    }

    /// Unwraps the container when this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<Image5D, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex.into_inner().unwrap_or_else(PoisonError::into_inner)),
            Err(inner) => Err(Self { inner }),
        }
    }
}
