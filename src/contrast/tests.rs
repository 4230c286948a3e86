use crate::model::PixelBuffer;

use super::{ContrastSettings, HistogramStats};

fn ramp_u8(count: u8) -> PixelBuffer {
    PixelBuffer::U8((0..count).collect())
}

#[test]
fn full_range_without_outlier_rejection() {
    let stats = HistogramStats::compute(&ramp_u8(100), &ContrastSettings::default())
        .expect("stats");
    assert_eq!(stats.histogram.len(), 256);
    assert_eq!(stats.pixel_count, 100);
    assert_eq!((stats.min, stats.max), (0.0, 99.0));
    assert_eq!((stats.contrast_min, stats.contrast_max), (0.0, 99.0));
    assert!((stats.mean - 49.5).abs() < 1e-9);
}

#[test]
fn extrema_percentage_trims_both_tails() {
    let settings = ContrastSettings::with_extrema_percentage(5.0);
    let stats = HistogramStats::compute(&ramp_u8(100), &settings).expect("stats");
    assert_eq!((stats.contrast_min, stats.contrast_max), (5.0, 94.0));
}

#[test]
fn single_outlier_is_rejected() {
    let mut values = vec![10_u16; 199];
    values.push(60000);
    let settings = ContrastSettings {
        extrema_percentage: 1.0,
        bins: 65536,
    };
    let stats = HistogramStats::compute(&PixelBuffer::U16(values), &settings).expect("stats");
    assert_eq!(stats.max, 60000.0);
    assert_eq!(stats.contrast_max, 10.0);
    assert_eq!(stats.contrast_min, 10.0);
}

#[test]
fn float_planes_bin_over_data_range() {
    let values: Vec<f32> = (0..=10).map(|v| v as f32 / 10.0).collect();
    let stats =
        HistogramStats::compute(&PixelBuffer::F32(values), &ContrastSettings::default())
            .expect("stats");
    assert_eq!(stats.origin, 0.0);
    assert!((stats.contrast_max - 1.0).abs() < 1e-6);
    assert_eq!(stats.contrast_min, 0.0);
    assert_eq!(stats.histogram.iter().sum::<u64>(), 11);
}

#[test]
fn empty_plane_has_no_statistics() {
    assert!(HistogramStats::compute(&PixelBuffer::U8(Vec::new()), &ContrastSettings::default())
        .is_none());
}

#[test]
fn non_finite_pixels_are_ignored() {
    let values = vec![f32::NAN, 0.25, f32::INFINITY, 0.75, f32::NEG_INFINITY];
    let stats = HistogramStats::compute(&PixelBuffer::F32(values), &ContrastSettings::default())
        .expect("stats");
    assert_eq!(stats.pixel_count, 2);
    assert_eq!((stats.min, stats.max), (0.25, 0.75));
    assert_eq!(stats.mean, 0.5);
    assert_eq!(stats.contrast_min, 0.25);
    assert!((stats.contrast_max - 0.75).abs() < 1e-9);
}

#[test]
fn plane_without_finite_values_has_no_statistics() {
    let masked = PixelBuffer::F32(vec![f32::NAN; 4]);
    assert!(HistogramStats::compute(&masked, &ContrastSettings::default()).is_none());
}
