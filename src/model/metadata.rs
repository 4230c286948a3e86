use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AxisKind, CoreError, Dimension, PixelType, Result, default_axis_for_index};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dim {
    pub axis: AxisKind,
    pub size: usize,
    pub spacing: Option<f32>,
    pub unit: Option<String>,
}

impl Dim {
    pub fn new(axis: AxisKind, size: usize) -> Self {
        Self {
            axis,
            size,
            spacing: None,
            unit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub dims: Vec<Dim>,
    pub pixel_type: PixelType,
    pub channel_names: Vec<String>,
    pub title: Option<String>,
    pub extras: BTreeMap<String, serde_json::Value>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            dims: Vec::new(),
            pixel_type: PixelType::U8,
            channel_names: Vec::new(),
            title: None,
            extras: BTreeMap::new(),
        }
    }
}

impl Metadata {
    pub fn from_shape(shape: &[usize], pixel_type: PixelType) -> Self {
        let dims = shape
            .iter()
            .enumerate()
            .map(|(index, size)| Dim::new(default_axis_for_index(index), *size))
            .collect();
        Self {
            dims,
            pixel_type,
            ..Self::default()
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.size).collect()
    }

    pub fn axis_index(&self, axis: AxisKind) -> Option<usize> {
        self.dims.iter().position(|d| d.axis == axis)
    }

    /// Size along `axis`, or 1 when the axis is absent.
    pub fn axis_size(&self, axis: AxisKind) -> usize {
        self.axis_index(axis)
            .map(|index| self.dims[index].size)
            .unwrap_or(1)
    }

    pub fn validate_shape(&self, shape: &[usize]) -> Result<()> {
        if self.dims.len() != shape.len() {
            return Err(CoreError::DimensionalityMismatch {
                data_ndim: shape.len(),
                meta_ndim: self.dims.len(),
            });
        }
        for (axis, (dim, actual)) in self.dims.iter().zip(shape).enumerate() {
            if dim.size == 0 {
                return Err(CoreError::ZeroSizedDimension { axis });
            }
            if dim.size != *actual {
                return Err(CoreError::DimensionSizeMismatch {
                    axis,
                    data_size: *actual,
                    meta_size: dim.size,
                });
            }
        }
        let mut seen = Vec::with_capacity(self.dims.len());
        for dim in &self.dims {
            if dim.axis != AxisKind::Unknown && seen.contains(&dim.axis) {
                return Err(CoreError::InvalidMetadata(format!(
                    "axis {:?} appears more than once",
                    dim.axis
                )));
            }
            seen.push(dim.axis);
        }
        Ok(())
    }
}

/// Sizes of the five axes of an `Image5D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub slices: usize,
    pub frames: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize, channels: usize, slices: usize, frames: usize) -> Self {
        Self {
            width,
            height,
            channels,
            slices,
            frames,
        }
    }

    pub fn size(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
            Dimension::Channel => self.channels,
            Dimension::Slice => self.slices,
            Dimension::Frame => self.frames,
        }
    }

    pub fn plane_len(&self) -> usize {
        self.width * self.height
    }

    /// Only meaningful after [`Dimensions::validate`] has passed.
    pub fn plane_count(&self) -> usize {
        self.channels * self.slices * self.frames
    }

    pub fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            if self.size(dimension) == 0 {
                return Err(CoreError::InvalidDimension(format!(
                    "{dimension} size must be at least 1"
                )));
            }
        }
        if self.width.checked_mul(self.height).is_none()
            || self
                .channels
                .checked_mul(self.slices)
                .and_then(|planes| planes.checked_mul(self.frames))
                .is_none()
        {
            return Err(CoreError::InvalidDimension(format!(
                "{}x{} pixels in {}x{}x{} planes overflows",
                self.width, self.height, self.channels, self.slices, self.frames
            )));
        }
        if u32::try_from(self.width).is_err() || u32::try_from(self.height).is_err() {
            return Err(CoreError::InvalidDimension(format!(
                "plane size {}x{} exceeds 32-bit limits",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
