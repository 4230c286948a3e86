use std::fmt;

use tracing::debug;

use crate::config::LayoutSpec;
use crate::display::{ActiveView, ChannelCalibration, ChannelDisplayState, DisplayMode, Lut};
use crate::model::{
    CoreError, Dimension, Dimensions, FillMode, PixelBuffer, PixelPlane, PixelType, Result,
};
use crate::stack::{BackingStore, DimensionIndex, Position, ViewStack};

use super::PositionObserver;

/// A sequence of 2-D planes addressed by channel, slice and frame.
///
/// At any time the container exposes one z-stack, the [`ViewStack`] of the
/// current channel and frame, plus one [`ActiveView`] carrying the display
/// metadata of the current channel. Every other channel's display settings
/// live in its [`ChannelDisplayState`]. Moving the cursor writes the active
/// view back to the outgoing channel and loads the incoming one.
pub struct Image5D {
    pub(super) title: String,
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) index: DimensionIndex,
    pub(super) store: BackingStore,
    pub(super) view: ViewStack,
    pub(super) channels: Vec<ChannelDisplayState>,
    pub(super) calibrations: Vec<ChannelCalibration>,
    pub(super) active: ActiveView,
    pub(super) display_mode: DisplayMode,
    pub(super) observers: Vec<PositionObserver>,
}

impl fmt::Debug for Image5D {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Image5D")
            .field("title", &self.title)
            .field("dimensions", &self.dimensions())
            .field("pixel_type", &self.pixel_type())
            .field("position", &self.current_position())
            .field("display_mode", &self.display_mode)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Image5D {
    /// Allocates a container of the given size. Planes beyond the first are
    /// created by growing each axis in turn with `fill`.
    pub fn new(
        title: impl Into<String>,
        pixel_type: PixelType,
        dimensions: Dimensions,
        fill: FillMode,
    ) -> Result<Self> {
        dimensions.validate()?;
        let store = BackingStore::filled(pixel_type, dimensions.plane_len(), 1, FillMode::Zero);
        let mut image = Self::assemble(
            title.into(),
            dimensions.width,
            dimensions.height,
            DimensionIndex::new(1, 1, 1)?,
            store,
        );
        for dimension in [Dimension::Channel, Dimension::Slice, Dimension::Frame] {
            image.expand(dimension, dimensions.size(dimension), fill)?;
        }
        Ok(image)
    }

    /// Wraps existing planes, given in channel-fastest order.
    pub fn from_planes(
        title: impl Into<String>,
        dimensions: Dimensions,
        planes: Vec<PixelBuffer>,
    ) -> Result<Self> {
        dimensions.validate()?;
        if planes.len() != dimensions.plane_count() {
            return Err(CoreError::SizeMismatch {
                expected: dimensions.plane_count(),
                actual: planes.len(),
            });
        }
        let pixel_type = planes
            .first()
            .map(PixelBuffer::pixel_type)
            .unwrap_or_default();
        let store = BackingStore::from_planes(
            pixel_type,
            dimensions.plane_len(),
            planes.into_iter().map(PixelPlane::new).collect(),
        )?;
        let index = DimensionIndex::new(dimensions.channels, dimensions.slices, dimensions.frames)?;
        Ok(Self::assemble(
            title.into(),
            dimensions.width,
            dimensions.height,
            index,
            store,
        ))
    }

    /// Builds a container from a layout description, applying its channel
    /// labels and display settings.
    pub fn from_layout(layout: &LayoutSpec) -> Result<Self> {
        let mut image = Self::new(
            layout.title.clone(),
            layout.pixel_type,
            layout.dimensions(),
            layout.fill,
        )?;
        if layout.default_colors {
            image.set_default_colors();
        }
        for (channel, spec) in layout.channel_settings.iter().enumerate() {
            let channel = channel + 1;
            if channel > image.channel_count() {
                return Err(CoreError::OutOfRange {
                    axis: Dimension::Channel.axis(),
                    value: channel,
                    size: image.channel_count(),
                });
            }
            if let Some(label) = &spec.label {
                image.set_channel_label(channel, label.clone())?;
            }
            let mut state = image.display_state(channel)?;
            if let Some(color) = spec.color {
                state.lut = Lut::from_color(color).into();
            }
            if let Some((min, max)) = spec.range {
                state.min = min;
                state.max = max;
            }
            state.displayed_gray = spec.displayed_gray;
            state.in_overlay = spec.in_overlay;
            image.set_display_state(channel, state)?;
        }
        image.set_display_mode(layout.display_mode);
        Ok(image)
    }

    pub(super) fn assemble(
        title: String,
        width: usize,
        height: usize,
        index: DimensionIndex,
        store: BackingStore,
    ) -> Self {
        debug_assert_eq!(index.len(), store.len());
        let state = ChannelDisplayState::for_pixel_type(store.pixel_type());
        let active = state.view(false);
        let view = ViewStack::build(&index, 0, 0, 0);
        debug!(
            width,
            height,
            channels = index.channels(),
            slices = index.slices(),
            frames = index.frames(),
            "assembled image5d"
        );
        Self {
            title,
            width,
            height,
            channels: vec![state; index.channels()],
            calibrations: vec![ChannelCalibration::default(); index.channels()],
            index,
            store,
            view,
            active,
            display_mode: DisplayMode::default(),
            observers: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_type(&self) -> PixelType {
        self.store.pixel_type()
    }

    pub fn channel_count(&self) -> usize {
        self.index.channels()
    }

    pub fn slice_count(&self) -> usize {
        self.index.slices()
    }

    pub fn frame_count(&self) -> usize {
        self.index.frames()
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(
            self.width,
            self.height,
            self.index.channels(),
            self.index.slices(),
            self.index.frames(),
        )
    }

    pub fn dimension_size(&self, dimension: Dimension) -> usize {
        self.dimensions().size(dimension)
    }

    /// Number of planes across all channels, slices and frames.
    pub fn stack_size(&self) -> usize {
        self.store.len()
    }

    pub fn index(&self) -> &DimensionIndex {
        &self.index
    }

    pub fn store(&self) -> &BackingStore {
        &self.store
    }

    pub fn view_stack(&self) -> &ViewStack {
        &self.view
    }

    /// Plane handles of the current z-stack, in slice order.
    pub fn view_planes(&self) -> Vec<PixelPlane> {
        self.view
            .offsets()
            .iter()
            .map(|offset| self.store.planes()[*offset].clone())
            .collect()
    }

    pub fn offset(&self, position: Position) -> Result<usize> {
        self.index.offset(position)
    }

    pub fn current_offset(&self) -> usize {
        self.view.active_offset()
    }

    /// Handle to the plane at `position`; writes through it are visible to
    /// every holder of the same plane.
    pub fn pixels(&self, position: Position) -> Result<PixelPlane> {
        let offset = self.index.offset(position)?;
        Ok(self.store.get(offset)?.clone())
    }

    pub fn set_pixels(&mut self, position: Position, buffer: PixelBuffer) -> Result<PixelPlane> {
        let plane = PixelPlane::new(buffer);
        self.set_plane(position, plane.clone())?;
        Ok(plane)
    }

    /// Installs `plane` at `position` and returns the handle it replaced.
    pub fn set_plane(&mut self, position: Position, plane: PixelPlane) -> Result<PixelPlane> {
        let offset = self.index.offset(position)?;
        self.store.replace(offset, plane)
    }

    pub fn current_pixels(&self) -> PixelPlane {
        self.store.planes()[self.view.active_offset()].clone()
    }

    pub fn set_current_pixels(&mut self, buffer: PixelBuffer) -> Result<PixelPlane> {
        self.set_pixels(self.current_position(), buffer)
    }

    /// Whether `position` is backed by the shared placeholder plane.
    pub fn is_placeholder(&self, position: Position) -> Result<bool> {
        let offset = self.index.offset(position)?;
        Ok(self.store.is_placeholder(offset))
    }

    /// A zeroed plane of this container's type and size.
    pub fn create_empty_pixels(&self) -> PixelBuffer {
        PixelBuffer::zeroed(self.pixel_type(), self.store.plane_len())
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Whether every channel is currently forced to the gray table.
    pub fn is_display_all_gray(&self) -> bool {
        self.display_mode == DisplayMode::Gray
    }

    pub(super) fn check_channel(&self, channel: usize) -> Result<usize> {
        if channel == 0 || channel > self.index.channels() {
            return Err(CoreError::OutOfRange {
                axis: Dimension::Channel.axis(),
                value: channel,
                size: self.index.channels(),
            });
        }
        Ok(channel - 1)
    }
}
