use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::PixelType;

use super::{ActiveView, Lut};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Threshold {
    #[default]
    None,
    Range {
        min: f64,
        max: f64,
    },
}

impl Threshold {
    pub fn range(min: f64, max: f64) -> Self {
        Self::Range {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            Self::None => false,
            Self::Range { min, max } => value >= *min && value <= *max,
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Range { .. })
    }
}

/// How a set threshold is shown when the channel is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LutUpdateMode {
    /// Thresholded pixels are painted red.
    #[default]
    RedLut,
    /// Thresholded pixels black, everything else white.
    BlackAndWhite,
    /// Threshold is kept but not shown.
    NoUpdate,
    /// Pixels below the threshold blue, above it green.
    OverUnder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    /// One channel at a time, every channel forced to the gray table.
    Gray,
    /// One channel at a time with its own table.
    #[default]
    Color,
    /// All channels flagged for the overlay blended together.
    Overlay,
}

/// Display settings of one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDisplayState {
    pub lut: Arc<Lut>,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub threshold: Threshold,
    #[serde(default)]
    pub lut_update: LutUpdateMode,
    #[serde(default)]
    pub displayed_gray: bool,
    #[serde(default = "default_in_overlay")]
    pub in_overlay: bool,
}

fn default_in_overlay() -> bool {
    true
}

impl Default for ChannelDisplayState {
    fn default() -> Self {
        Self::for_pixel_type(PixelType::default())
    }
}

impl ChannelDisplayState {
    pub fn for_pixel_type(pixel_type: PixelType) -> Self {
        let (min, max) = pixel_type.default_range();
        Self {
            lut: Lut::gray(),
            min,
            max,
            threshold: Threshold::None,
            lut_update: LutUpdateMode::default(),
            displayed_gray: false,
            in_overlay: default_in_overlay(),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.lut = Arc::new(Lut::from_color(color));
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Whether the gray table replaces this channel's own table.
    pub fn shows_gray(&self, display_all_gray: bool) -> bool {
        self.displayed_gray || display_all_gray
    }

    /// The active-view metadata this state projects to.
    pub fn view(&self, display_all_gray: bool) -> ActiveView {
        ActiveView {
            lut: if self.shows_gray(display_all_gray) {
                Lut::gray()
            } else {
                Arc::clone(&self.lut)
            },
            min: self.min,
            max: self.max,
            threshold: self.threshold,
            lut_update: self.lut_update,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelCalibration {
    pub label: String,
    #[serde(default)]
    pub value_unit: Option<String>,
}

impl ChannelCalibration {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value_unit: None,
        }
    }
}
