use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, PixelType, Result};

/// One 2-D plane of pixels in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    F32(Vec<f32>),
}

impl PixelBuffer {
    pub fn zeroed(pixel_type: PixelType, len: usize) -> Self {
        match pixel_type {
            PixelType::U8 => Self::U8(vec![0; len]),
            PixelType::U16 => Self::U16(vec![0; len]),
            PixelType::F32 => Self::F32(vec![0.0; len]),
        }
    }

    /// Converts `values` to `pixel_type`, rounding and saturating for the
    /// integer types.
    pub fn from_f32(pixel_type: PixelType, values: &[f32]) -> Self {
        match pixel_type {
            PixelType::U8 => Self::U8(values.iter().map(|v| v.round() as u8).collect()),
            PixelType::U16 => Self::U16(values.iter().map(|v| v.round() as u16).collect()),
            PixelType::F32 => Self::F32(values.to_vec()),
        }
    }

    pub fn pixel_type(&self) -> PixelType {
        match self {
            Self::U8(_) => PixelType::U8,
            Self::U16(_) => PixelType::U16,
            Self::F32(_) => PixelType::F32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::U8(values) => values.len(),
            Self::U16(values) => values.len(),
            Self::F32(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        match self {
            Self::U8(values) => values.get(index).map(|v| f64::from(*v)),
            Self::U16(values) => values.get(index).map(|v| f64::from(*v)),
            Self::F32(values) => values.get(index).map(|v| f64::from(*v)),
        }
    }

    /// Writes one element. Returns `false` when `index` is out of bounds.
    pub fn set_value(&mut self, index: usize, value: f64) -> bool {
        match self {
            Self::U8(values) => values
                .get_mut(index)
                .map(|slot| *slot = value.round() as u8)
                .is_some(),
            Self::U16(values) => values
                .get_mut(index)
                .map(|slot| *slot = value.round() as u16)
                .is_some(),
            Self::F32(values) => values
                .get_mut(index)
                .map(|slot| *slot = value as f32)
                .is_some(),
        }
    }

    pub fn to_f32_vec(&self) -> Vec<f32> {
        match self {
            Self::U8(values) => values.iter().map(|v| f32::from(*v)).collect(),
            Self::U16(values) => values.iter().map(|v| f32::from(*v)).collect(),
            Self::F32(values) => values.clone(),
        }
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = (0..self.len()).filter_map(|index| self.value(index));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), v| (min.min(v), max.max(v))))
    }

    /// Copies the `rect` region out of a plane that is `width` pixels wide.
    pub fn crop(&self, width: usize, rect: Rect) -> Result<Self> {
        let height = if width == 0 { 0 } else { self.len() / width };
        rect.check_within(width, height)?;
        fn rows<T: Copy>(values: &[T], width: usize, rect: Rect) -> Vec<T> {
            let mut out = Vec::with_capacity(rect.width * rect.height);
            for y in rect.y..rect.y + rect.height {
                let start = y * width + rect.x;
                out.extend_from_slice(&values[start..start + rect.width]);
            }
            out
        }
        Ok(match self {
            Self::U8(values) => Self::U8(rows(values, width, rect)),
            Self::U16(values) => Self::U16(rows(values, width, rect)),
            Self::F32(values) => Self::F32(rows(values, width, rect)),
        })
    }
}

impl From<Vec<u8>> for PixelBuffer {
    fn from(values: Vec<u8>) -> Self {
        Self::U8(values)
    }
}

impl From<Vec<u16>> for PixelBuffer {
    fn from(values: Vec<u16>) -> Self {
        Self::U16(values)
    }
}

impl From<Vec<f32>> for PixelBuffer {
    fn from(values: Vec<f32>) -> Self {
        Self::F32(values)
    }
}

/// Shared handle to one plane of the backing store.
///
/// Cloning the handle does not copy pixels: every clone refers to the same
/// buffer, and writes through one clone are visible through all others.
/// Use [`PixelPlane::ptr_eq`] to test whether two handles are the same plane.
#[derive(Debug, Clone)]
pub struct PixelPlane {
    inner: Arc<RwLock<PixelBuffer>>,
}

impl PixelPlane {
    pub fn new(buffer: PixelBuffer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(buffer)),
        }
    }

    pub fn zeroed(pixel_type: PixelType, len: usize) -> Self {
        Self::new(PixelBuffer::zeroed(pixel_type, len))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, PixelBuffer> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, PixelBuffer> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ptr_eq(&self, other: &PixelPlane) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn pixel_type(&self) -> PixelType {
        self.read().pixel_type()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new, unshared plane holding a copy of this plane's pixels.
    pub fn deep_copy(&self) -> Self {
        Self::new(self.read().clone())
    }
}

impl From<PixelBuffer> for PixelPlane {
    fn from(buffer: PixelBuffer) -> Self {
        Self::new(buffer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn check_within(&self, width: usize, height: usize) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::InvalidDimension(format!(
                "empty rectangle {}x{}",
                self.width, self.height
            )));
        }
        if self.x + self.width > width {
            return Err(CoreError::OutOfRange {
                axis: AxisKind::X,
                value: self.x + self.width,
                size: width,
            });
        }
        if self.y + self.height > height {
            return Err(CoreError::OutOfRange {
                axis: AxisKind::Y,
                value: self.y + self.height,
                size: height,
            });
        }
        Ok(())
    }
}
