use image::RgbImage;
use rayon::prelude::*;

use crate::model::{CoreError, Result};

/// Additive blend of per-channel RGB renderings.
///
/// Each output component is the sum of that component over every included
/// layer, saturated at 255 once all layers are summed. Layers flagged as
/// excluded contribute nothing; with no included layer the result is black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayCompositor {
    width: u32,
    height: u32,
}

impl OverlayCompositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn composite(&self, layers: &[RgbImage], included: &[bool]) -> Result<RgbImage> {
        if layers.len() != included.len() {
            return Err(CoreError::SizeMismatch {
                expected: layers.len(),
                actual: included.len(),
            });
        }
        let active: Vec<&RgbImage> = layers
            .iter()
            .zip(included)
            .filter_map(|(layer, keep)| keep.then_some(layer))
            .collect();
        let expected = (self.width as usize) * (self.height as usize);
        for layer in &active {
            if layer.dimensions() != (self.width, self.height) {
                return Err(CoreError::SizeMismatch {
                    expected,
                    actual: (layer.width() as usize) * (layer.height() as usize),
                });
            }
        }

        let mut output = RgbImage::new(self.width, self.height);
        let row_len = self.width as usize * 3;
        if row_len == 0 || active.is_empty() {
            return Ok(output);
        }
        output
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| {
                let start = y * row_len;
                for (i, component) in row.iter_mut().enumerate() {
                    let sum: u32 = active
                        .iter()
                        .map(|layer| u32::from(layer.as_raw()[start + i]))
                        .sum();
                    *component = sum.min(255) as u8;
                }
            });
        Ok(output)
    }
}
