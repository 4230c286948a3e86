use serde::{Deserialize, Serialize};

use crate::display::DisplayMode;
use crate::model::{Dimensions, FillMode, PixelType};

use super::{ConfigError, Result};

/// Construction description of an `Image5D`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    #[serde(default)]
    pub title: String,
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub pixel_type: PixelType,
    #[serde(default = "one")]
    pub channels: usize,
    #[serde(default = "one")]
    pub slices: usize,
    #[serde(default = "one")]
    pub frames: usize,
    #[serde(default)]
    pub fill: FillMode,
    #[serde(default)]
    pub display_mode: DisplayMode,
    /// Spread channel colors evenly over the hue circle before applying
    /// `channel_settings`.
    #[serde(default)]
    pub default_colors: bool,
    #[serde(default)]
    pub channel_settings: Vec<ChannelSpec>,
}

/// Per-channel overrides, applied to channels in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<[u8; 3]>,
    #[serde(default)]
    pub range: Option<(f64, f64)>,
    #[serde(default)]
    pub displayed_gray: bool,
    #[serde(default = "yes")]
    pub in_overlay: bool,
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self {
            label: None,
            color: None,
            range: None,
            displayed_gray: false,
            in_overlay: true,
        }
    }
}

fn one() -> usize {
    1
}

fn yes() -> bool {
    true
}

impl LayoutSpec {
    pub fn new(title: impl Into<String>, dimensions: Dimensions, pixel_type: PixelType) -> Self {
        Self {
            title: title.into(),
            width: dimensions.width,
            height: dimensions.height,
            pixel_type,
            channels: dimensions.channels,
            slices: dimensions.slices,
            frames: dimensions.frames,
            fill: FillMode::default(),
            display_mode: DisplayMode::default(),
            default_colors: false,
            channel_settings: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.width,
            self.height,
            self.channels,
            self.slices,
            self.frames,
        )
    }

    pub fn validate(&self) -> Result<()> {
        self.dimensions().validate()?;
        if self.channel_settings.len() > self.channels {
            return Err(ConfigError::Invalid(format!(
                "{} channel settings given for {} channels",
                self.channel_settings.len(),
                self.channels
            )));
        }
        for (index, channel) in self.channel_settings.iter().enumerate() {
            let finite = channel
                .range
                .is_none_or(|(min, max)| min.is_finite() && max.is_finite());
            if !finite {
                return Err(ConfigError::Invalid(format!(
                    "channel {} has a non-finite display range",
                    index + 1
                )));
            }
        }
        Ok(())
    }
}
