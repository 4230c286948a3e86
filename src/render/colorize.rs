use image::RgbImage;
use rayon::prelude::*;

use crate::display::{ActiveView, LutUpdateMode, Threshold};
use crate::model::{CoreError, PixelBuffer, PixelType, Result};

const RED: [u8; 3] = [255, 0, 0];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

/// Maps a raw pixel value onto the 8-bit display range `[min, max]`.
pub fn display_index(value: f64, min: f64, max: f64, pixel_type: PixelType) -> u8 {
    let scaled = match pixel_type {
        PixelType::U8 | PixelType::U16 => (value - min) * 256.0 / (max - min + 1.0),
        PixelType::F32 if max > min => (value - min) * 255.0 / (max - min) + 0.5,
        PixelType::F32 => {
            if value >= max {
                255.0
            } else {
                0.0
            }
        }
    };
    scaled.clamp(0.0, 255.0) as u8
}

/// Colors one plane through `view`'s window, table and threshold overlay.
pub fn render_channel(
    buffer: &PixelBuffer,
    width: u32,
    height: u32,
    view: &ActiveView,
) -> Result<RgbImage> {
    let row_len = width as usize;
    let expected = row_len * height as usize;
    if buffer.len() != expected {
        return Err(CoreError::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    let pixel_type = buffer.pixel_type();
    let mut image = RgbImage::new(width, height);
    if expected == 0 {
        return Ok(image);
    }
    image
        .par_chunks_mut(row_len * 3)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, rgb) in row.chunks_exact_mut(3).enumerate() {
                let value = buffer.value(y * row_len + x).unwrap_or_default();
                let color = threshold_color(value, view).unwrap_or_else(|| {
                    view.lut
                        .entry(display_index(value, view.min, view.max, pixel_type))
                });
                rgb.copy_from_slice(&color);
            }
        });
    Ok(image)
}

fn threshold_color(value: f64, view: &ActiveView) -> Option<[u8; 3]> {
    let Threshold::Range { min, max } = view.threshold else {
        return None;
    };
    match view.lut_update {
        LutUpdateMode::RedLut => view.threshold.contains(value).then_some(RED),
        LutUpdateMode::BlackAndWhite => Some(if view.threshold.contains(value) {
            BLACK
        } else {
            WHITE
        }),
        LutUpdateMode::NoUpdate => None,
        LutUpdateMode::OverUnder => {
            if value < min {
                Some(BLUE)
            } else if value > max {
                Some(GREEN)
            } else {
                None
            }
        }
    }
}
