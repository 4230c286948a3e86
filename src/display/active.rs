use std::sync::Arc;

use super::{ChannelDisplayState, Lut, LutUpdateMode, Threshold};

/// Display metadata attached to the plane currently shown.
///
/// Consumers (contrast sliders, LUT pickers) edit this directly. It belongs
/// to the container's current channel and is written back to that channel's
/// [`ChannelDisplayState`] whenever the cursor leaves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveView {
    pub lut: Arc<Lut>,
    pub min: f64,
    pub max: f64,
    pub threshold: Threshold,
    pub lut_update: LutUpdateMode,
}

impl Default for ActiveView {
    fn default() -> Self {
        ChannelDisplayState::default().view(false)
    }
}

impl ActiveView {
    pub fn set_min_and_max(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn set_threshold(&mut self, threshold: Threshold, mode: LutUpdateMode) {
        self.threshold = threshold;
        self.lut_update = mode;
    }

    pub fn reset_threshold(&mut self) {
        self.threshold = Threshold::None;
    }

    /// Copies this view into `state`. The table is left alone while the
    /// channel is shown in gray, so the gray table never overwrites the
    /// channel's own color.
    pub fn store_into(&self, state: &mut ChannelDisplayState, display_all_gray: bool) {
        if !state.shows_gray(display_all_gray) {
            state.lut = Arc::clone(&self.lut);
        }
        state.min = self.min;
        state.max = self.max;
        state.threshold = self.threshold;
        state.lut_update = self.lut_update;
    }

    pub fn restore_from(&mut self, state: &ChannelDisplayState, display_all_gray: bool) {
        *self = state.view(display_all_gray);
    }
}
