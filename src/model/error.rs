use thiserror::Error;

use super::{AxisKind, PixelType};

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{axis:?} coordinate {value} out of range 1..={size}")]
    OutOfRange {
        axis: AxisKind,
        value: usize,
        size: usize,
    },

    #[error("backing store offset {offset} out of range (len {len})")]
    OffsetOutOfRange { offset: usize, len: usize },

    #[error("pixel buffer size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("pixel type mismatch: expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        expected: PixelType,
        actual: PixelType,
    },

    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("display window bounds must be finite, got {min}..{max}")]
    InvalidWindow { min: f64, max: f64 },

    #[error("active view out of sync with channel {channel}: {detail}")]
    StateInconsistency { channel: usize, detail: String },

    #[error(
        "metadata dimensionality mismatch: data has {data_ndim} dimensions but metadata has {meta_ndim}"
    )]
    DimensionalityMismatch { data_ndim: usize, meta_ndim: usize },

    #[error(
        "dimension size mismatch at axis {axis}: data size {data_size} != metadata size {meta_size}"
    )]
    DimensionSizeMismatch {
        axis: usize,
        data_size: usize,
        meta_size: usize,
    },

    #[error("invalid dimension size 0 at axis {axis}")]
    ZeroSizedDimension { axis: usize },

    #[error("invalid metadata: {0}")]
    InvalidMetadata(String),
}
