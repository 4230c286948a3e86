use tracing::info;

use crate::display::{ChannelCalibration, ChannelDisplayState};
use crate::model::{CoreError, PixelPlane, Rect, Result};
use crate::stack::{BackingStore, DimensionIndex};

use super::Image5D;

impl Image5D {
    /// Independent copy with every plane duplicated. Channel display state,
    /// labels, display mode and the cursor position carry over.
    pub fn duplicate(&self) -> Result<Self> {
        let image = self.derived(
            self.width,
            self.height,
            self.index,
            self.store.deep_copy(),
            self.snapshot_states()?,
            self.calibrations.clone(),
        );
        info!(title = %image.title, "duplicated image5d");
        Ok(image)
    }

    /// Splits every plane into its left and right halves. Channel `c`
    /// becomes channels `2c - 1` (left) and `2c` (right); both inherit its
    /// display state. With an odd width the last column is dropped.
    pub fn split(&self) -> Result<Self> {
        if self.width < 2 {
            return Err(CoreError::InvalidDimension(format!(
                "cannot split an image {} pixel wide",
                self.width
            )));
        }
        let half = self.width / 2;
        let left = Rect::new(0, 0, half, self.height);
        let right = Rect::new(half, 0, half, self.height);
        let index = DimensionIndex::new(
            self.index.channels() * 2,
            self.index.slices(),
            self.index.frames(),
        )?;

        let mut planes = Vec::with_capacity(index.len());
        for plane in self.store.planes() {
            let buffer = plane.read();
            planes.push(PixelPlane::new(buffer.crop(self.width, left)?));
            planes.push(PixelPlane::new(buffer.crop(self.width, right)?));
        }
        let store = BackingStore::from_planes(self.pixel_type(), half * self.height, planes)?;

        let mut states = Vec::with_capacity(index.channels());
        let mut calibrations = Vec::with_capacity(index.channels());
        for (state, calibration) in self.snapshot_states()?.into_iter().zip(&self.calibrations) {
            for side in ["Left", "Right"] {
                states.push(state.clone());
                calibrations.push(ChannelCalibration {
                    label: format!("{}-{side}", calibration.label),
                    value_unit: calibration.value_unit.clone(),
                });
            }
        }

        let image = self.derived(half, self.height, index, store, states, calibrations);
        info!(title = %image.title, channels = image.channel_count(), "split image5d");
        Ok(image)
    }

    /// Copy with every plane cropped to `rect`.
    pub fn crop(&self, rect: Rect) -> Result<Self> {
        rect.check_within(self.width, self.height)?;
        let planes = self
            .store
            .planes()
            .iter()
            .map(|plane| Ok(PixelPlane::new(plane.read().crop(self.width, rect)?)))
            .collect::<Result<Vec<_>>>()?;
        let store =
            BackingStore::from_planes(self.pixel_type(), rect.width * rect.height, planes)?;
        let image = self.derived(
            rect.width,
            rect.height,
            self.index,
            store,
            self.snapshot_states()?,
            self.calibrations.clone(),
        );
        info!(title = %image.title, ?rect, "cropped image5d");
        Ok(image)
    }

    fn snapshot_states(&self) -> Result<Vec<ChannelDisplayState>> {
        (1..=self.channel_count())
            .map(|channel| self.display_state(channel))
            .collect()
    }

    fn derived(
        &self,
        width: usize,
        height: usize,
        index: DimensionIndex,
        store: BackingStore,
        states: Vec<ChannelDisplayState>,
        calibrations: Vec<ChannelCalibration>,
    ) -> Self {
        let mut image = Self::assemble(format!("{}-1", self.title), width, height, index, store);
        image.channels = states;
        image.calibrations = calibrations;
        image.display_mode = self.display_mode;
        image.load_channel(image.view.channel());
        image.reposition(self.current_position(), false);
        image
    }
}
