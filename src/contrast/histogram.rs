use serde::{Deserialize, Serialize};

use crate::model::{PixelBuffer, PixelType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastSettings {
    /// Percentage of pixels ignored at each end of the histogram when
    /// choosing the contrast window.
    #[serde(default)]
    pub extrema_percentage: f64,
    #[serde(default = "default_bins")]
    pub bins: usize,
}

fn default_bins() -> usize {
    256
}

impl Default for ContrastSettings {
    fn default() -> Self {
        Self {
            extrema_percentage: 0.0,
            bins: default_bins(),
        }
    }
}

impl ContrastSettings {
    pub fn with_extrema_percentage(extrema_percentage: f64) -> Self {
        Self {
            extrema_percentage,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramStats {
    pub histogram: Vec<u64>,
    /// Value at the lower edge of bin 0.
    pub origin: f64,
    pub bin_width: f64,
    pub pixel_count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub contrast_min: f64,
    pub contrast_max: f64,
}

impl HistogramStats {
    /// Histogram and autostretch window of one plane, or `None` if the plane
    /// holds no finite value. NaN and infinite pixels are not counted.
    pub fn compute(buffer: &PixelBuffer, settings: &ContrastSettings) -> Option<Self> {
        let finite = || {
            (0..buffer.len())
                .filter_map(|index| buffer.value(index))
                .filter(|value| value.is_finite())
        };
        let (min, max) = finite().fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((value.min(min), value.max(max))),
        })?;
        let integral = matches!(buffer.pixel_type(), PixelType::U8 | PixelType::U16);
        let bins = settings.bins.max(1);
        let (origin, bin_width, bins) = match buffer.pixel_type() {
            PixelType::U8 | PixelType::U16 => {
                let range = 1_usize << buffer.pixel_type().bits();
                let width = (range / bins).max(1);
                (0.0, width as f64, range.div_ceil(width))
            }
            PixelType::F32 => {
                let span = max - min;
                let width = if span > 0.0 { span / bins as f64 } else { 1.0 };
                (min, width, bins)
            }
        };

        let mut histogram = vec![0_u64; bins];
        let mut sum = 0.0_f64;
        let mut sum_squared = 0.0_f64;
        let mut pixel_count = 0_usize;
        for value in finite() {
            pixel_count += 1;
            let bin = (((value - origin) / bin_width).floor().max(0.0) as usize).min(bins - 1);
            histogram[bin] += 1;
            sum += value;
            sum_squared += value * value;
        }
        let n = pixel_count as f64;
        let mean = sum / n;
        let std_dev = ((sum_squared / n) - mean * mean).max(0.0).sqrt();

        let percentage = settings.extrema_percentage.clamp(0.0, 50.0);
        let skip = n * 0.01 * percentage;
        let bin_bounds = |bin: usize| {
            let lower = (origin + bin as f64 * bin_width).max(min);
            let top_inset = if integral { 1.0 } else { 0.0 };
            let upper = (origin + (bin + 1) as f64 * bin_width - top_inset).min(max);
            (lower, upper.max(lower))
        };

        let mut contrast_min = min;
        let mut remaining = skip;
        for (bin, count) in histogram.iter().enumerate() {
            let count = *count as f64;
            if remaining >= count {
                remaining -= count;
                continue;
            }
            let (lower, upper) = bin_bounds(bin);
            contrast_min = lower + remaining / count * (upper - lower);
            break;
        }

        let mut contrast_max = max;
        let mut remaining = skip;
        for (bin, count) in histogram.iter().enumerate().rev() {
            let count = *count as f64;
            if remaining >= count {
                remaining -= count;
                continue;
            }
            let (lower, upper) = bin_bounds(bin);
            contrast_max = upper - remaining / count * (upper - lower);
            break;
        }

        if integral {
            contrast_min = contrast_min.floor();
            contrast_max = contrast_max.floor();
        }
        let contrast_max = contrast_max.max(contrast_min);

        Some(Self {
            histogram,
            origin,
            bin_width,
            pixel_count,
            min,
            max,
            mean,
            std_dev,
            contrast_min,
            contrast_max,
        })
    }
}
