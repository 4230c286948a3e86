use std::sync::Arc;

use image::RgbImage;
use tracing::debug;

use crate::contrast::{ContrastSettings, HistogramStats};
use crate::display::{
    ActiveView, ChannelCalibration, ChannelDisplayState, DisplayMode, Lut, LutUpdateMode,
    Threshold, hsb_to_rgb,
};
use crate::model::{CoreError, Result};
use crate::render::{OverlayCompositor, render_channel};
use crate::stack::Position;

use super::Image5D;

impl Image5D {
    /// Snapshot of a channel's display state. For the current channel the
    /// active view is folded in first.
    pub fn display_state(&self, channel: usize) -> Result<ChannelDisplayState> {
        let index = self.check_channel(channel)?;
        let mut state = self.channels[index].clone();
        if index == self.view.channel() {
            self.active.store_into(&mut state, self.is_display_all_gray());
        }
        Ok(state)
    }

    pub fn set_display_state(&mut self, channel: usize, state: ChannelDisplayState) -> Result<()> {
        check_window(state.min, state.max)?;
        if let Threshold::Range { min, max } = state.threshold {
            check_window(min, max)?;
        }
        self.update_channel(channel, |current| *current = state)
    }

    pub fn set_channel_lut(&mut self, channel: usize, lut: impl Into<Arc<Lut>>) -> Result<()> {
        let lut = lut.into();
        self.update_channel(channel, |state| state.lut = lut)
    }

    pub fn set_channel_color(&mut self, channel: usize, color: [u8; 3]) -> Result<()> {
        self.set_channel_lut(channel, Lut::from_color(color))
    }

    /// Sets the display window. Bounds are stored as given, so `min > max`
    /// yields an inverted ramp; non-finite bounds are rejected.
    pub fn set_channel_min_max(&mut self, channel: usize, min: f64, max: f64) -> Result<()> {
        check_window(min, max)?;
        self.update_channel(channel, |state| {
            state.min = min;
            state.max = max;
        })
    }

    pub fn set_channel_threshold(
        &mut self,
        channel: usize,
        threshold: Threshold,
        mode: LutUpdateMode,
    ) -> Result<()> {
        if let Threshold::Range { min, max } = threshold {
            check_window(min, max)?;
        }
        self.update_channel(channel, |state| {
            state.threshold = threshold;
            state.lut_update = mode;
        })
    }

    pub fn set_displayed_gray(&mut self, channel: usize, gray: bool) -> Result<()> {
        self.update_channel(channel, |state| state.displayed_gray = gray)
    }

    pub fn set_displayed_in_overlay(&mut self, channel: usize, included: bool) -> Result<()> {
        self.update_channel(channel, |state| state.in_overlay = included)
    }

    /// Switches between gray, color and overlay display. The current
    /// channel's pending edits are kept across the switch.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if mode == self.display_mode {
            return;
        }
        let current = self.view.channel();
        self.sync_channel(current);
        self.display_mode = mode;
        self.load_channel(current);
        debug!(?mode, "display mode changed");
    }

    /// Gives channel `c` of `n` the hue `(c - 1) / n` at full saturation and
    /// brightness.
    pub fn set_default_colors(&mut self) {
        let count = self.channel_count();
        let increment = 1.0 / count as f32;
        self.edit_all_channels(|channel, state| {
            let color = hsb_to_rgb(increment * channel as f32, 1.0, 1.0);
            state.lut = Arc::new(Lut::from_color(color));
        });
    }

    /// Labels every channel "Ch-1", "Ch-2", ...
    pub fn set_default_channel_names(&mut self) {
        for (channel, calibration) in self.calibrations.iter_mut().enumerate() {
            calibration.label = format!("Ch-{}", channel + 1);
        }
    }

    pub fn channel_calibration(&self, channel: usize) -> Result<&ChannelCalibration> {
        let index = self.check_channel(channel)?;
        Ok(&self.calibrations[index])
    }

    pub fn set_channel_calibration(
        &mut self,
        channel: usize,
        calibration: ChannelCalibration,
    ) -> Result<()> {
        let index = self.check_channel(channel)?;
        self.calibrations[index] = calibration;
        Ok(())
    }

    pub fn channel_label(&self, channel: usize) -> Result<&str> {
        Ok(self.channel_calibration(channel)?.label.as_str())
    }

    pub fn set_channel_label(&mut self, channel: usize, label: impl Into<String>) -> Result<()> {
        let index = self.check_channel(channel)?;
        self.calibrations[index].label = label.into();
        Ok(())
    }

    pub fn active_view(&self) -> &ActiveView {
        &self.active
    }

    /// The display metadata of the current channel. Edits are written back
    /// to the channel when the cursor leaves it or it is stored.
    pub fn active_view_mut(&mut self) -> &mut ActiveView {
        &mut self.active
    }

    /// The metadata `channel` is rendered with: the active view for the
    /// current channel, its stored state otherwise.
    pub fn effective_view(&self, channel: usize) -> Result<ActiveView> {
        let index = self.check_channel(channel)?;
        if index == self.view.channel() {
            return Ok(self.active.clone());
        }
        Ok(self.channels[index].view(self.is_display_all_gray()))
    }

    /// Renders `channel` at the current slice and frame.
    pub fn render_channel(&self, channel: usize) -> Result<RgbImage> {
        let view = self.effective_view(channel)?;
        let position = Position::new(channel, self.current_slice(), self.current_frame());
        let plane = self.pixels(position)?;
        let buffer = plane.read();
        render_channel(&buffer, self.width_u32()?, self.height_u32()?, &view)
    }

    /// Additive blend of every channel flagged for the overlay, at the
    /// current slice and frame.
    pub fn render_overlay(&self) -> Result<RgbImage> {
        let channels = self.channel_count();
        let mut layers = Vec::with_capacity(channels);
        let mut included = Vec::with_capacity(channels);
        for channel in 1..=channels {
            let state = self.display_state(channel)?;
            included.push(state.in_overlay);
            layers.push(if state.in_overlay {
                self.render_channel(channel)?
            } else {
                RgbImage::new(self.width_u32()?, self.height_u32()?)
            });
        }
        OverlayCompositor::new(self.width_u32()?, self.height_u32()?).composite(&layers, &included)
    }

    /// What the display mode shows: the current channel, or the overlay.
    pub fn render(&self) -> Result<RgbImage> {
        match self.display_mode {
            DisplayMode::Gray | DisplayMode::Color => self.render_channel(self.current_channel()),
            DisplayMode::Overlay => self.render_overlay(),
        }
    }

    /// Sets the channel's window from the histogram of its plane at the
    /// current slice and frame. Returns `None` when the plane holds no finite
    /// value, leaving the window untouched.
    pub fn autostretch_channel(
        &mut self,
        channel: usize,
        settings: &ContrastSettings,
    ) -> Result<Option<HistogramStats>> {
        let position = Position::new(channel, self.current_slice(), self.current_frame());
        let plane = self.pixels(position)?;
        let stats = HistogramStats::compute(&plane.read(), settings);
        if let Some(stats) = &stats {
            self.set_channel_min_max(channel, stats.contrast_min, stats.contrast_max)?;
            debug!(
                channel,
                min = stats.contrast_min,
                max = stats.contrast_max,
                "autostretched channel"
            );
        }
        Ok(stats)
    }

    /// Applies `edit` to a channel's state, routing through the active view
    /// when the channel is current so both stay in step.
    fn update_channel<F>(&mut self, channel: usize, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ChannelDisplayState),
    {
        let index = self.check_channel(channel)?;
        let current = index == self.view.channel();
        if current {
            self.sync_channel(index);
        }
        edit(&mut self.channels[index]);
        if current {
            self.load_channel(index);
        }
        Ok(())
    }

    fn edit_all_channels<F>(&mut self, mut edit: F)
    where
        F: FnMut(usize, &mut ChannelDisplayState),
    {
        let current = self.view.channel();
        self.sync_channel(current);
        for (channel, state) in self.channels.iter_mut().enumerate() {
            edit(channel, state);
        }
        self.load_channel(current);
    }

    pub(super) fn width_u32(&self) -> Result<u32> {
        u32::try_from(self.width)
            .map_err(|_| CoreError::InvalidDimension(format!("width {} exceeds u32", self.width)))
    }

    pub(super) fn height_u32(&self) -> Result<u32> {
        u32::try_from(self.height).map_err(|_| {
            CoreError::InvalidDimension(format!("height {} exceeds u32", self.height))
        })
    }
}

fn check_window(min: f64, max: f64) -> Result<()> {
    if min.is_finite() && max.is_finite() {
        Ok(())
    } else {
        Err(CoreError::InvalidWindow { min, max })
    }
}
