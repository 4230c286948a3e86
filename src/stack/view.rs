use super::DimensionIndex;

/// The z-stack of one (channel, frame) pair, expressed as backing store
/// offsets rather than plane references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewStack {
    channel: usize,
    frame: usize,
    offsets: Vec<usize>,
    active: usize,
}

impl ViewStack {
    /// Builds the view for 0-based `channel`, `frame` and active `slice`.
    pub fn build(index: &DimensionIndex, channel: usize, frame: usize, slice: usize) -> Self {
        let offsets: Vec<usize> = index.stack_offsets(channel, frame).collect();
        let active = slice.min(offsets.len().saturating_sub(1));
        Self {
            channel,
            frame,
            offsets,
            active,
        }
    }

    pub fn channel(&self) -> usize {
        self.channel
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// 0-based slice currently shown.
    pub fn active_slice(&self) -> usize {
        self.active
    }

    pub fn active_offset(&self) -> usize {
        self.offsets[self.active]
    }

    pub fn offset_of(&self, slice: usize) -> Option<usize> {
        self.offsets.get(slice).copied()
    }

    pub(crate) fn set_active(&mut self, slice: usize) {
        debug_assert!(slice < self.offsets.len());
        self.active = slice.min(self.offsets.len().saturating_sub(1));
    }

    /// Whether the view still addresses the offsets `index` assigns to its
    /// (channel, frame).
    pub fn matches(&self, index: &DimensionIndex) -> bool {
        self.offsets.len() == index.slices()
            && self
                .offsets
                .iter()
                .copied()
                .eq(index.stack_offsets(self.channel, self.frame))
    }
}
