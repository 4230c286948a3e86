use serde::{Deserialize, Serialize};

use crate::model::{AxisKind, CoreError, Dimension, Result};

/// A 1-based (channel, slice, frame) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub channel: usize,
    pub slice: usize,
    pub frame: usize,
}

impl Position {
    pub fn new(channel: usize, slice: usize, frame: usize) -> Self {
        Self {
            channel,
            slice,
            frame,
        }
    }

    pub fn origin() -> Self {
        Self::new(1, 1, 1)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::origin()
    }
}

/// Linear addressing for the channel/slice/frame planes of an `Image5D`.
///
/// Channel varies fastest, then slice, then frame:
/// `offset = frame * slices * channels + slice * channels + channel`
/// on 0-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionIndex {
    channels: usize,
    slices: usize,
    frames: usize,
}

impl DimensionIndex {
    pub fn new(channels: usize, slices: usize, frames: usize) -> Result<Self> {
        for (dimension, size) in [
            (Dimension::Channel, channels),
            (Dimension::Slice, slices),
            (Dimension::Frame, frames),
        ] {
            if size == 0 {
                return Err(CoreError::InvalidDimension(format!(
                    "{dimension} size must be at least 1"
                )));
            }
        }
        if channels
            .checked_mul(slices)
            .and_then(|planes| planes.checked_mul(frames))
            .is_none()
        {
            return Err(CoreError::InvalidDimension(format!(
                "{channels} channels x {slices} slices x {frames} frames overflows the plane count"
            )));
        }
        Ok(Self {
            channels,
            slices,
            frames,
        })
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn slices(&self) -> usize {
        self.slices
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn size(&self, dimension: Dimension) -> Option<usize> {
        match dimension {
            Dimension::Channel => Some(self.channels),
            Dimension::Slice => Some(self.slices),
            Dimension::Frame => Some(self.frames),
            Dimension::Width | Dimension::Height => None,
        }
    }

    /// Number of planes the backing store must hold. Cannot overflow;
    /// [`DimensionIndex::new`] rejects such sizes.
    pub fn len(&self) -> usize {
        self.channels * self.slices * self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel_stride(&self) -> usize {
        1
    }

    pub fn slice_stride(&self) -> usize {
        self.channels
    }

    pub fn frame_stride(&self) -> usize {
        self.channels * self.slices
    }

    /// Backing store offset of a 1-based position.
    pub fn offset(&self, position: Position) -> Result<usize> {
        self.check(position)?;
        Ok(self.offset_unchecked(
            position.channel - 1,
            position.slice - 1,
            position.frame - 1,
        ))
    }

    /// Inverse of [`DimensionIndex::offset`].
    pub fn position(&self, offset: usize) -> Result<Position> {
        if offset >= self.len() {
            return Err(CoreError::OffsetOutOfRange {
                offset,
                len: self.len(),
            });
        }
        let frame = offset / self.frame_stride();
        let within = offset % self.frame_stride();
        Ok(Position::new(
            within % self.channels + 1,
            within / self.channels + 1,
            frame + 1,
        ))
    }

    /// First offset of the z-run for a 1-based frame, at the first channel.
    pub fn slice_run_offset(&self, frame: usize) -> Result<usize> {
        check_axis(AxisKind::Time, frame, self.frames)?;
        Ok((frame - 1) * self.frame_stride())
    }

    /// Offsets of every slice of one 0-based (channel, frame) pair, in slice
    /// order.
    pub fn stack_offsets(&self, channel: usize, frame: usize) -> impl Iterator<Item = usize> {
        let base = frame * self.frame_stride() + channel * self.channel_stride();
        let stride = self.slice_stride();
        (0..self.slices).map(move |slice| base + slice * stride)
    }

    pub fn check(&self, position: Position) -> Result<()> {
        check_axis(AxisKind::Channel, position.channel, self.channels)?;
        check_axis(AxisKind::Z, position.slice, self.slices)?;
        check_axis(AxisKind::Time, position.frame, self.frames)
    }

    /// Clamps each 1-based coordinate into `1..=size`.
    pub fn clamp(&self, position: Position) -> Position {
        Position::new(
            position.channel.clamp(1, self.channels),
            position.slice.clamp(1, self.slices),
            position.frame.clamp(1, self.frames),
        )
    }

    /// The index after `dimension` has been resized to `size`.
    pub fn with_size(&self, dimension: Dimension, size: usize) -> Result<Self> {
        match dimension {
            Dimension::Channel => Self::new(size, self.slices, self.frames),
            Dimension::Slice => Self::new(self.channels, size, self.frames),
            Dimension::Frame => Self::new(self.channels, self.slices, size),
            Dimension::Width | Dimension::Height => Err(CoreError::InvalidDimension(format!(
                "{dimension} is fixed at construction"
            ))),
        }
    }

    /// Products of the sizes of the axes stored faster and slower than
    /// `dimension`. Used to re-stride the store on growth.
    pub(crate) fn run_sizes(&self, dimension: Dimension) -> (usize, usize) {
        match dimension {
            Dimension::Channel => (1, self.slices * self.frames),
            Dimension::Slice => (self.channels, self.frames),
            Dimension::Frame => (self.channels * self.slices, 1),
            Dimension::Width | Dimension::Height => (0, 0),
        }
    }

    pub(crate) fn offset_unchecked(&self, channel: usize, slice: usize, frame: usize) -> usize {
        debug_assert!(channel < self.channels && slice < self.slices && frame < self.frames);
        frame * self.frame_stride() + slice * self.slice_stride() + channel * self.channel_stride()
    }
}

fn check_axis(axis: AxisKind, value: usize, size: usize) -> Result<()> {
    if value == 0 || value > size {
        return Err(CoreError::OutOfRange { axis, value, size });
    }
    Ok(())
}
