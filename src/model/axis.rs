use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisKind {
    X,
    Y,
    Z,
    Channel,
    Time,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelType {
    #[default]
    U8,
    U16,
    F32,
}

impl PixelType {
    pub fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
            Self::F32 => 32,
        }
    }

    /// Display window a freshly created channel starts with.
    pub fn default_range(self) -> (f64, f64) {
        match self {
            Self::U8 => (0.0, 255.0),
            Self::U16 => (0.0, 65535.0),
            Self::F32 => (0.0, 1.0),
        }
    }
}

/// The five addressable axes of an `Image5D`, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Width,
    Height,
    Channel,
    Slice,
    Frame,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Self::Width,
        Self::Height,
        Self::Channel,
        Self::Slice,
        Self::Frame,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Width => "x",
            Self::Height => "y",
            Self::Channel => "ch",
            Self::Slice => "z",
            Self::Frame => "t",
        }
    }

    pub fn axis(self) -> AxisKind {
        match self {
            Self::Width => AxisKind::X,
            Self::Height => AxisKind::Y,
            Self::Channel => AxisKind::Channel,
            Self::Slice => AxisKind::Z,
            Self::Frame => AxisKind::Time,
        }
    }

    pub fn is_growable(self) -> bool {
        matches!(self, Self::Channel | Self::Slice | Self::Frame)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// How new planes are populated when a dimension grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Every new position receives its own zeroed plane.
    #[default]
    Zero,
    /// Every new position aliases one zeroed placeholder plane. Writing
    /// through such a plane changes all positions that share it.
    SharedDummy,
}

/// Axis order used when exporting to an ndarray dataset: the slowest
/// varying axis first, matching the backing store layout.
pub fn default_axis_for_index(index: usize) -> AxisKind {
    match index {
        0 => AxisKind::Time,
        1 => AxisKind::Z,
        2 => AxisKind::Channel,
        3 => AxisKind::Y,
        4 => AxisKind::X,
        _ => AxisKind::Unknown,
    }
}
