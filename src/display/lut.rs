use std::sync::{Arc, LazyLock};

use serde::{Deserialize, Serialize};

use crate::model::CoreError;

pub const LUT_SIZE: usize = 256;

static GRAY: LazyLock<Arc<Lut>> = LazyLock::new(|| Arc::new(Lut::from_color([255, 255, 255])));

/// 256-entry color lookup table mapping an 8-bit display index to RGB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[u8; 3]>", into = "Vec<[u8; 3]>")]
pub struct Lut {
    entries: Vec<[u8; 3]>,
}

impl Lut {
    /// Linear ramp from black to `color`.
    pub fn from_color(color: [u8; 3]) -> Self {
        let entries = (0..LUT_SIZE)
            .map(|index| color.map(|c| ((index * usize::from(c)) / (LUT_SIZE - 1)) as u8))
            .collect();
        Self { entries }
    }

    /// The grayscale table shared by every container.
    pub fn gray() -> Arc<Lut> {
        Arc::clone(&GRAY)
    }

    pub fn entry(&self, index: u8) -> [u8; 3] {
        self.entries[usize::from(index)]
    }

    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }

    /// Color of the brightest entry.
    pub fn color(&self) -> [u8; 3] {
        self.entries[LUT_SIZE - 1]
    }

    pub fn is_gray(&self) -> bool {
        self.entries.iter().all(|[r, g, b]| r == g && g == b)
    }
}

impl TryFrom<Vec<[u8; 3]>> for Lut {
    type Error = CoreError;

    fn try_from(entries: Vec<[u8; 3]>) -> Result<Self, Self::Error> {
        if entries.len() != LUT_SIZE {
            return Err(CoreError::SizeMismatch {
                expected: LUT_SIZE,
                actual: entries.len(),
            });
        }
        Ok(Self { entries })
    }
}

impl From<Lut> for Vec<[u8; 3]> {
    fn from(lut: Lut) -> Self {
        lut.entries
    }
}

/// HSB to RGB with hue, saturation and brightness in `[0, 1]`.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [u8; 3] {
    let to_byte = |value: f32| (value * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
    if saturation <= 0.0 {
        let v = to_byte(brightness);
        return [v, v, v];
    }
    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));
    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };
    [to_byte(r), to_byte(g), to_byte(b)]
}
