use ndarray::ArrayD;

use super::{AxisKind, Metadata, PixelType, Result};

/// Dense n-dimensional export of image data, used to hand a whole container
/// to array-oriented code. Axis meaning comes from `metadata.dims`.
#[derive(Debug, Clone)]
pub struct Dataset<T> {
    pub data: ArrayD<T>,
    pub metadata: Metadata,
}

pub type DatasetF32 = Dataset<f32>;

impl<T> Dataset<T> {
    pub fn new(data: ArrayD<T>, metadata: Metadata) -> Result<Self> {
        metadata.validate_shape(data.shape())?;
        Ok(Self { data, metadata })
    }

    /// Wraps `data` with axes assigned in export order: time, z, channel,
    /// y, x.
    pub fn with_export_axes(data: ArrayD<T>, pixel_type: PixelType) -> Result<Self> {
        let metadata = Metadata::from_shape(data.shape(), pixel_type);
        Self::new(data, metadata)
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.metadata.axis_index(axis)
    }

    /// Extent along `axis`; absent axes have extent 1.
    pub fn axis_len(&self, axis: AxisKind) -> usize {
        self.axis_index(axis)
            .map(|index| self.data.len_of(ndarray::Axis(index)))
            .unwrap_or(1)
    }

    pub fn validate(&self) -> Result<()> {
        self.metadata.validate_shape(self.data.shape())
    }
}
