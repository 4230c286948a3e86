use crate::model::{CoreError, FillMode, PixelBuffer, PixelPlane, PixelType, Result};

/// Ordered arena of plane handles, one per (channel, slice, frame).
///
/// Every plane shares the store's pixel type and length. Planes are only
/// ever replaced whole; callers may still write through the handles they
/// receive. The one intentional alias is the placeholder plane created by
/// [`FillMode::SharedDummy`], which may back many slots at once.
#[derive(Debug, Clone)]
pub struct BackingStore {
    pixel_type: PixelType,
    plane_len: usize,
    planes: Vec<PixelPlane>,
    placeholder: Option<PixelPlane>,
}

impl BackingStore {
    pub fn new(pixel_type: PixelType, plane_len: usize) -> Self {
        Self {
            pixel_type,
            plane_len,
            planes: Vec::new(),
            placeholder: None,
        }
    }

    pub fn filled(pixel_type: PixelType, plane_len: usize, count: usize, fill: FillMode) -> Self {
        let mut store = Self::new(pixel_type, plane_len);
        store.planes.reserve(count);
        for _ in 0..count {
            let plane = store.new_plane(fill);
            store.planes.push(plane);
        }
        store
    }

    pub fn from_planes(
        pixel_type: PixelType,
        plane_len: usize,
        planes: Vec<PixelPlane>,
    ) -> Result<Self> {
        let mut store = Self::new(pixel_type, plane_len);
        for plane in &planes {
            store.check_plane(plane)?;
        }
        store.planes = planes;
        Ok(store)
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn plane_len(&self) -> usize {
        self.plane_len
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn planes(&self) -> &[PixelPlane] {
        &self.planes
    }

    pub fn get(&self, offset: usize) -> Result<&PixelPlane> {
        self.planes.get(offset).ok_or(CoreError::OffsetOutOfRange {
            offset,
            len: self.planes.len(),
        })
    }

    /// Installs `plane` at `offset`, returning the handle it displaced.
    pub fn replace(&mut self, offset: usize, plane: PixelPlane) -> Result<PixelPlane> {
        self.check_plane(&plane)?;
        let len = self.planes.len();
        let slot = self
            .planes
            .get_mut(offset)
            .ok_or(CoreError::OffsetOutOfRange { offset, len })?;
        Ok(std::mem::replace(slot, plane))
    }

    pub fn append(&mut self, plane: PixelPlane) -> Result<()> {
        self.check_plane(&plane)?;
        self.planes.push(plane);
        Ok(())
    }

    /// Whether the slot at `offset` is backed by the shared placeholder plane.
    pub fn is_placeholder(&self, offset: usize) -> bool {
        match (&self.placeholder, self.planes.get(offset)) {
            (Some(placeholder), Some(plane)) => placeholder.ptr_eq(plane),
            _ => false,
        }
    }

    pub fn check_plane(&self, plane: &PixelPlane) -> Result<()> {
        self.check_buffer(&plane.read())
    }

    pub fn check_buffer(&self, buffer: &PixelBuffer) -> Result<()> {
        if buffer.pixel_type() != self.pixel_type {
            return Err(CoreError::TypeMismatch {
                expected: self.pixel_type,
                actual: buffer.pixel_type(),
            });
        }
        if buffer.len() != self.plane_len {
            return Err(CoreError::SizeMismatch {
                expected: self.plane_len,
                actual: buffer.len(),
            });
        }
        Ok(())
    }

    /// Copy of the store with every plane duplicated; placeholder aliasing
    /// is preserved in the copy.
    pub fn deep_copy(&self) -> Self {
        let placeholder = self.placeholder.as_ref().map(PixelPlane::deep_copy);
        let planes = self
            .planes
            .iter()
            .map(|plane| match (&self.placeholder, &placeholder) {
                (Some(old), Some(new)) if old.ptr_eq(plane) => new.clone(),
                _ => plane.deep_copy(),
            })
            .collect();
        Self {
            pixel_type: self.pixel_type,
            plane_len: self.plane_len,
            planes,
            placeholder,
        }
    }

    /// Rebuilds the store for a grown axis.
    ///
    /// The store is viewed as `higher` runs of `lower * old_size` planes; each
    /// run keeps its planes and gains `lower * (new_size - old_size)` new ones
    /// at its end. Existing handles are carried across, never copied.
    ///
    /// Fails without side effects when the grown handle list cannot be
    /// sized or allocated.
    pub(crate) fn expanded(
        &self,
        lower: usize,
        old_size: usize,
        new_size: usize,
        higher: usize,
        fill: FillMode,
    ) -> Result<Self> {
        debug_assert_eq!(self.planes.len(), lower * old_size * higher);
        let too_large = || {
            CoreError::InvalidDimension(format!(
                "cannot hold {new_size} x {lower} x {higher} planes"
            ))
        };
        let new_run = lower.checked_mul(new_size).ok_or_else(too_large)?;
        let total = new_run.checked_mul(higher).ok_or_else(too_large)?;
        let mut planes = Vec::new();
        planes
            .try_reserve_exact(total)
            .map_err(|_| too_large())?;

        let mut grown = Self {
            pixel_type: self.pixel_type,
            plane_len: self.plane_len,
            planes,
            placeholder: self.placeholder.clone(),
        };
        let run = lower * old_size;
        for high in 0..higher {
            let base = high * run;
            grown
                .planes
                .extend_from_slice(&self.planes[base..base + run]);
            for _ in run..new_run {
                let plane = grown.new_plane(fill);
                grown.planes.push(plane);
            }
        }
        Ok(grown)
    }

    fn new_plane(&mut self, fill: FillMode) -> PixelPlane {
        match fill {
            FillMode::Zero => PixelPlane::zeroed(self.pixel_type, self.plane_len),
            FillMode::SharedDummy => {
                let (pixel_type, plane_len) = (self.pixel_type, self.plane_len);
                self.placeholder
                    .get_or_insert_with(|| PixelPlane::zeroed(pixel_type, plane_len))
                    .clone()
            }
        }
    }
}
