use tracing::info;

use crate::display::{ChannelCalibration, ChannelDisplayState};
use crate::model::{CoreError, Dimension, FillMode, Result};

use super::Image5D;

impl Image5D {
    /// Grows `dimension` to `new_size`, keeping every existing plane handle
    /// at its (channel, slice, frame).
    ///
    /// New planes are zeroed or, with [`FillMode::SharedDummy`], alias one
    /// placeholder plane. Returns `Ok(false)` without touching anything when
    /// `new_size` does not exceed the current size. New channels start with
    /// default display state. The cursor keeps its position and the z-stack
    /// is rebuilt against the new strides.
    pub fn expand(&mut self, dimension: Dimension, new_size: usize, fill: FillMode) -> Result<bool> {
        if !dimension.is_growable() {
            return Err(CoreError::InvalidDimension(format!(
                "{dimension} cannot grow after construction"
            )));
        }
        if new_size == 0 {
            return Err(CoreError::InvalidDimension(format!(
                "{dimension} size must be at least 1"
            )));
        }
        let old_size = self.dimension_size(dimension);
        if new_size <= old_size {
            return Ok(false);
        }

        let index = self.index.with_size(dimension, new_size)?;
        let (lower, higher) = self.index.run_sizes(dimension);
        let store = self
            .store
            .expanded(lower, old_size, new_size, higher, fill)?;
        debug_assert_eq!(store.len(), index.len());
        if dimension == Dimension::Channel {
            let added = new_size - old_size;
            let reserved = self
                .channels
                .try_reserve_exact(added)
                .and_then(|()| self.calibrations.try_reserve_exact(added));
            if reserved.is_err() {
                return Err(CoreError::InvalidDimension(format!(
                    "cannot hold display state for {new_size} channels"
                )));
            }
        }

        let position = self.current_position();
        self.sync_channel(self.view.channel());
        self.index = index;
        self.store = store;
        if dimension == Dimension::Channel {
            let state = ChannelDisplayState::for_pixel_type(self.pixel_type());
            self.channels.resize(new_size, state);
            self.calibrations
                .resize(new_size, ChannelCalibration::default());
        }
        self.reposition(position, true);

        info!(
            %dimension,
            old_size,
            new_size,
            ?fill,
            planes = self.store.len(),
            "expanded image5d"
        );
        Ok(true)
    }
}
