use std::sync::Arc;

use crate::model::PixelType;

use super::{
    ActiveView, ChannelDisplayState, Lut, LutUpdateMode, Threshold, hsb_to_rgb,
};

#[test]
fn gray_table_is_shared() {
    let first = Lut::gray();
    let second = Lut::gray();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(first.is_gray());
    assert_eq!(first.entry(0), [0, 0, 0]);
    assert_eq!(first.entry(255), [255, 255, 255]);
}

#[test]
fn color_table_ramps_from_black() {
    let lut = Lut::from_color([255, 128, 0]);
    assert_eq!(lut.entry(0), [0, 0, 0]);
    assert_eq!(lut.color(), [255, 128, 0]);
    assert_eq!(lut.entry(51), [51, 25, 0]);
    assert!(!lut.is_gray());
}

#[test]
fn hsb_primaries() {
    assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), [255, 0, 0]);
    assert_eq!(hsb_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
    assert_eq!(hsb_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    assert_eq!(hsb_to_rgb(0.5, 0.0, 0.5), [128, 128, 128]);
}

#[test]
fn lut_deserialization_requires_full_table() {
    let short = serde_json::json!([[0, 0, 0], [1, 1, 1]]);
    assert!(serde_json::from_value::<Lut>(short).is_err());

    let lut = Lut::from_color([0, 255, 0]);
    let encoded = serde_json::to_value(&lut).expect("serialize");
    let decoded: Lut = serde_json::from_value(encoded).expect("deserialize");
    assert_eq!(decoded, lut);
}

#[test]
fn display_state_defaults_follow_pixel_type() {
    let state = ChannelDisplayState::for_pixel_type(PixelType::U16);
    assert_eq!((state.min, state.max), (0.0, 65535.0));
    assert!(state.in_overlay);
    assert!(!state.displayed_gray);
    assert_eq!(state.threshold, Threshold::None);
}

#[test]
fn store_then_restore_round_trips_active_view() {
    let state = ChannelDisplayState::for_pixel_type(PixelType::U8)
        .with_color([0, 255, 0])
        .with_range(10.0, 200.0);
    let mut active = ActiveView::default();
    active.restore_from(&state, false);
    let original = active.clone();

    let mut stored = state.clone();
    active.store_into(&mut stored, false);
    active.set_min_and_max(1.0, 2.0);
    active.set_threshold(Threshold::range(5.0, 9.0), LutUpdateMode::OverUnder);
    active.lut = Arc::new(Lut::from_color([255, 0, 255]));
    active.restore_from(&stored, false);

    assert_eq!(active, original);
}

#[test]
fn store_keeps_own_table_while_gray() {
    let mut state = ChannelDisplayState::default().with_color([255, 0, 0]);
    let mut active = state.view(true);
    assert!(active.lut.is_gray());
    active.set_min_and_max(3.0, 30.0);
    active.store_into(&mut state, true);
    assert_eq!(state.lut.color(), [255, 0, 0]);
    assert_eq!((state.min, state.max), (3.0, 30.0));
}

#[test]
fn threshold_range_orders_bounds() {
    let threshold = Threshold::range(40.0, 10.0);
    assert_eq!(
        threshold,
        Threshold::Range {
            min: 10.0,
            max: 40.0
        }
    );
    assert!(threshold.contains(10.0) && threshold.contains(40.0));
    assert!(!threshold.contains(41.0));
}
