use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::contrast::ContrastSettings;
use crate::display::{DisplayMode, Lut, LutUpdateMode, Threshold};
use crate::model::{
    AxisKind, CoreError, Dimension, Dimensions, FillMode, PixelBuffer, PixelType, Rect,
};
use crate::stack::Position;

use super::{Image5D, SharedImage5D};

fn u8_image(width: usize, height: usize, channels: usize, slices: usize, frames: usize) -> Image5D {
    Image5D::new(
        "test",
        PixelType::U8,
        Dimensions::new(width, height, channels, slices, frames),
        FillMode::Zero,
    )
    .expect("image")
}

/// Every plane holds its own offset as pixel value.
fn labelled_image(channels: usize, slices: usize, frames: usize) -> Image5D {
    let count = channels * slices * frames;
    let planes = (0..count)
        .map(|offset| PixelBuffer::U8(vec![offset as u8; 2]))
        .collect();
    Image5D::from_planes(
        "labelled",
        Dimensions::new(2, 1, channels, slices, frames),
        planes,
    )
    .expect("image")
}

fn first_value(image: &Image5D, position: Position) -> f64 {
    image
        .pixels(position)
        .expect("pixels")
        .read()
        .value(0)
        .expect("value")
}

#[test]
fn new_image_has_requested_shape_and_defaults() {
    let image = u8_image(3, 2, 2, 4, 5);
    assert_eq!(image.stack_size(), 40);
    assert_eq!(image.current_position(), Position::origin());
    assert_eq!(image.view_stack().len(), 4);
    assert_eq!(image.create_empty_pixels().len(), 6);
    let state = image.display_state(2).expect("state");
    assert_eq!((state.min, state.max), (0.0, 255.0));
    assert!(state.lut.is_gray());
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn planes_are_addressed_channel_fastest() {
    let image = labelled_image(2, 3, 1);
    assert_eq!(image.offset(Position::new(2, 3, 1)).expect("offset"), 5);
    assert_eq!(first_value(&image, Position::new(2, 3, 1)), 5.0);
    assert_eq!(first_value(&image, Position::new(1, 2, 1)), 2.0);
}

#[test]
fn from_planes_rejects_wrong_count_and_mixed_types() {
    let dims = Dimensions::new(2, 1, 2, 1, 1);
    let one = vec![PixelBuffer::U8(vec![0; 2])];
    assert!(matches!(
        Image5D::from_planes("x", dims, one),
        Err(CoreError::SizeMismatch {
            expected: 2,
            actual: 1
        })
    ));
    let mixed = vec![PixelBuffer::U8(vec![0; 2]), PixelBuffer::U16(vec![0; 2])];
    assert!(matches!(
        Image5D::from_planes("x", dims, mixed),
        Err(CoreError::TypeMismatch { .. })
    ));
}

#[test]
fn growing_channels_keeps_every_plane_handle() {
    let mut image = labelled_image(2, 3, 2);
    let before: Vec<_> = (1..=2)
        .flat_map(|frame| (1..=3).flat_map(move |slice| (1..=2).map(move |c| (c, slice, frame))))
        .map(|(c, s, f)| {
            let position = Position::new(c, s, f);
            (position, image.pixels(position).expect("pixels"))
        })
        .collect();

    assert!(
        image
            .expand(Dimension::Channel, 3, FillMode::Zero)
            .expect("expand")
    );

    assert_eq!(image.stack_size(), 18);
    assert_eq!(image.offset(Position::new(3, 1, 1)).expect("offset"), 2);
    for (position, plane) in &before {
        assert!(image.pixels(*position).expect("pixels").ptr_eq(plane));
    }
    for frame in 1..=2 {
        for slice in 1..=3 {
            assert_eq!(first_value(&image, Position::new(3, slice, frame)), 0.0);
        }
    }
    assert_eq!(image.channel_label(3).expect("label"), "");
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn growing_slices_and_frames_keeps_data_in_place() {
    let mut image = labelled_image(2, 2, 2);
    image
        .expand(Dimension::Slice, 4, FillMode::Zero)
        .expect("slices");
    image
        .expand(Dimension::Frame, 3, FillMode::Zero)
        .expect("frames");

    // Original offset = (f - 1) * 4 + (s - 1) * 2 + (c - 1).
    for frame in 1..=2 {
        for slice in 1..=2 {
            for channel in 1..=2 {
                let original = (frame - 1) * 4 + (slice - 1) * 2 + (channel - 1);
                let value = first_value(&image, Position::new(channel, slice, frame));
                assert_eq!(value, original as f64);
            }
        }
    }
    assert_eq!(first_value(&image, Position::new(2, 4, 3)), 0.0);
    assert_eq!(image.stack_size(), 24);
}

#[test]
fn growth_to_current_or_smaller_size_is_a_no_op() {
    let mut image = labelled_image(3, 2, 1);
    let before = image.pixels(Position::new(3, 2, 1)).expect("pixels");
    assert!(
        !image
            .expand(Dimension::Channel, 3, FillMode::Zero)
            .expect("same size")
    );
    assert!(
        !image
            .expand(Dimension::Slice, 1, FillMode::Zero)
            .expect("smaller")
    );
    assert_eq!(image.stack_size(), 6);
    assert!(
        image
            .pixels(Position::new(3, 2, 1))
            .expect("pixels")
            .ptr_eq(&before)
    );
}

#[test]
fn growing_twice_to_the_same_size_changes_nothing() {
    let mut image = labelled_image(2, 2, 1);
    image.set_channel_min_max(2, 4.0, 40.0).expect("window");
    assert!(
        image
            .expand(Dimension::Channel, 3, FillMode::Zero)
            .expect("first")
    );
    image.set_position(3, 2, 1);
    let planes = image.store().planes().to_vec();
    let states: Vec<_> = (1..=3)
        .map(|channel| image.display_state(channel).expect("state"))
        .collect();

    assert!(
        !image
            .expand(Dimension::Channel, 3, FillMode::Zero)
            .expect("second")
    );

    assert_eq!(image.stack_size(), planes.len());
    for (kept, plane) in image.store().planes().iter().zip(&planes) {
        assert!(kept.ptr_eq(plane));
    }
    for (channel, state) in states.iter().enumerate() {
        assert_eq!(&image.display_state(channel + 1).expect("state"), state);
    }
    assert_eq!(image.current_position(), Position::new(3, 2, 1));
}

#[test]
fn growth_rejects_fixed_axes_and_zero() {
    let mut image = u8_image(2, 2, 1, 1, 1);
    assert!(matches!(
        image.expand(Dimension::Width, 4, FillMode::Zero),
        Err(CoreError::InvalidDimension(_))
    ));
    assert!(matches!(
        image.expand(Dimension::Frame, 0, FillMode::Zero),
        Err(CoreError::InvalidDimension(_))
    ));
    assert_eq!(image.stack_size(), 1);
}

#[test]
fn growth_beyond_addressable_planes_is_rejected_whole() {
    let mut image = u8_image(1, 1, 1, 3, 1);
    image.set_position(1, 2, 1);
    assert!(matches!(
        image.expand(Dimension::Channel, usize::MAX, FillMode::SharedDummy),
        Err(CoreError::InvalidDimension(_))
    ));
    assert!(matches!(
        image.expand(Dimension::Channel, usize::MAX / 4, FillMode::SharedDummy),
        Err(CoreError::InvalidDimension(_))
    ));
    assert!(matches!(
        image.expand(Dimension::Frame, usize::MAX / 2, FillMode::Zero),
        Err(CoreError::InvalidDimension(_))
    ));
    assert_eq!(image.dimensions(), Dimensions::new(1, 1, 1, 3, 1));
    assert_eq!(image.stack_size(), 3);
    assert_eq!(image.current_position(), Position::new(1, 2, 1));
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn shared_dummy_growth_aliases_one_placeholder() {
    let mut image = u8_image(2, 1, 1, 1, 1);
    image
        .expand(Dimension::Slice, 3, FillMode::SharedDummy)
        .expect("expand");

    let second = image.pixels(Position::new(1, 2, 1)).expect("pixels");
    let third = image.pixels(Position::new(1, 3, 1)).expect("pixels");
    assert!(second.ptr_eq(&third));
    assert!(image.is_placeholder(Position::new(1, 2, 1)).expect("flag"));
    assert!(!image.is_placeholder(Position::new(1, 1, 1)).expect("flag"));

    second.write().set_value(0, 9.0);
    assert_eq!(first_value(&image, Position::new(1, 3, 1)), 9.0);

    image
        .set_pixels(Position::new(1, 3, 1), PixelBuffer::U8(vec![1, 1]))
        .expect("replace");
    assert!(!image.is_placeholder(Position::new(1, 3, 1)).expect("flag"));
    assert_eq!(first_value(&image, Position::new(1, 2, 1)), 9.0);
}

#[test]
fn cursor_moves_store_and_restore_channel_windows() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image.active_view_mut().set_min_and_max(10.0, 200.0);
    image.set_channel_min_max(2, 0.0, 50.0).expect("window");

    image.set_position(2, 1, 1);
    assert_eq!(image.active_view().min, 0.0);
    assert_eq!(image.active_view().max, 50.0);
    let first = image.display_state(1).expect("state");
    assert_eq!((first.min, first.max), (10.0, 200.0));

    image.set_position(1, 1, 1);
    assert_eq!(image.active_view().min, 10.0);
    assert_eq!(image.active_view().max, 200.0);
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn threshold_survives_a_round_trip_and_does_not_leak() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image
        .active_view_mut()
        .set_threshold(Threshold::range(20.0, 40.0), LutUpdateMode::OverUnder);

    image.set_channel(2);
    assert_eq!(image.active_view().threshold, Threshold::None);

    image.set_channel(1);
    assert_eq!(image.active_view().threshold, Threshold::range(20.0, 40.0));
    assert_eq!(image.active_view().lut_update, LutUpdateMode::OverUnder);
}

#[test]
fn positions_are_clamped_into_range() {
    let mut image = u8_image(2, 2, 2, 3, 4);
    image.set_position(99, 99, 99);
    assert_eq!(image.current_position(), Position::new(2, 3, 4));
    image.set_position(0, 0, 0);
    assert_eq!(image.current_position(), Position::origin());
    image.set_slice(7);
    assert_eq!(image.current_slice(), 3);
}

#[test]
fn direct_pixel_access_rejects_bad_coordinates() {
    let image = u8_image(2, 2, 2, 1, 1);
    assert!(matches!(
        image.pixels(Position::new(3, 1, 1)),
        Err(CoreError::OutOfRange {
            axis: AxisKind::Channel,
            value: 3,
            size: 2
        })
    ));
    assert!(matches!(
        image.pixels(Position::new(1, 0, 1)),
        Err(CoreError::OutOfRange { axis: AxisKind::Z, .. })
    ));
}

#[test]
fn replacing_pixels_checks_type_and_length() {
    let mut image = u8_image(2, 2, 1, 1, 1);
    let before = image.current_pixels();
    assert!(matches!(
        image.set_current_pixels(PixelBuffer::U16(vec![0; 4])),
        Err(CoreError::TypeMismatch { .. })
    ));
    assert!(matches!(
        image.set_current_pixels(PixelBuffer::U8(vec![0; 3])),
        Err(CoreError::SizeMismatch {
            expected: 4,
            actual: 3
        })
    ));
    assert!(image.current_pixels().ptr_eq(&before));

    let plane = image
        .set_current_pixels(PixelBuffer::U8(vec![7; 4]))
        .expect("replace");
    assert!(image.current_pixels().ptr_eq(&plane));
    assert!(image.view_planes()[0].ptr_eq(&plane));
}

#[test]
fn observers_fire_once_per_move() {
    let mut image = u8_image(2, 2, 2, 3, 1);
    let calls = Arc::new(AtomicUsize::new(0));
    let rebuilds = Arc::new(AtomicUsize::new(0));
    {
        let calls = Arc::clone(&calls);
        let rebuilds = Arc::clone(&rebuilds);
        image.on_position_changed(move |change| {
            calls.fetch_add(1, Ordering::SeqCst);
            if change.view_rebuilt {
                rebuilds.fetch_add(1, Ordering::SeqCst);
            }
        });
    }

    image.set_position(2, 3, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(rebuilds.load(Ordering::SeqCst), 1);

    image.set_slice(2);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(rebuilds.load(Ordering::SeqCst), 1);

    image.clear_observers();
    image.set_channel(1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn store_and_restore_only_touch_the_current_channel() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image.active_view_mut().set_min_and_max(3.0, 30.0);
    assert!(matches!(
        image.verify_synchronized(),
        Err(CoreError::StateInconsistency { channel: 1, .. })
    ));

    image.store_channel(2).expect("no-op");
    assert_eq!(image.display_state(2).expect("state").max, 255.0);

    image.restore_channel(1).expect("restore");
    assert_eq!(image.active_view().max, 255.0);

    image.active_view_mut().set_min_and_max(3.0, 30.0);
    image.store_channel(1).expect("store");
    image.verify_synchronized().expect("synchronized");

    assert!(matches!(
        image.store_channel(3),
        Err(CoreError::OutOfRange { .. })
    ));
    assert!(matches!(
        image.restore_channel(0),
        Err(CoreError::OutOfRange { .. })
    ));
}

#[test]
fn gray_mode_hides_but_keeps_channel_colors() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image.set_channel_color(1, [255, 0, 0]).expect("color");
    assert_eq!(image.active_view().lut.color(), [255, 0, 0]);

    image.set_display_mode(DisplayMode::Gray);
    assert!(Arc::ptr_eq(&image.active_view().lut, &Lut::gray()));
    image.set_channel(2);
    image.set_channel(1);
    assert!(image.active_view().lut.is_gray());

    image.set_display_mode(DisplayMode::Color);
    assert_eq!(image.active_view().lut.color(), [255, 0, 0]);
}

#[test]
fn displayed_gray_applies_to_one_channel() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image.set_channel_color(2, [0, 255, 0]).expect("color");
    image.set_displayed_gray(2, true).expect("gray");
    image.set_channel(2);
    assert!(image.active_view().lut.is_gray());
    assert_eq!(image.display_state(2).expect("state").lut.color(), [0, 255, 0]);
}

#[test]
fn default_colors_and_names() {
    let mut image = u8_image(2, 2, 3, 1, 1);
    image.set_default_colors();
    image.set_default_channel_names();
    assert_eq!(image.display_state(1).expect("state").lut.color(), [255, 0, 0]);
    assert_eq!(image.display_state(2).expect("state").lut.color(), [0, 255, 0]);
    assert_eq!(image.active_view().lut.color(), [255, 0, 0]);
    assert_eq!(image.channel_label(3).expect("label"), "Ch-3");
    assert!(matches!(
        image.set_channel_label(4, "x"),
        Err(CoreError::OutOfRange { .. })
    ));
}

#[test]
fn growth_keeps_cursor_and_pending_edits() {
    let mut image = u8_image(2, 2, 2, 2, 1);
    image.set_position(2, 2, 1);
    image.active_view_mut().set_min_and_max(5.0, 6.0);

    image
        .expand(Dimension::Frame, 3, FillMode::Zero)
        .expect("expand");
    assert_eq!(image.current_position(), Position::new(2, 2, 1));
    assert_eq!(image.active_view().min, 5.0);

    image
        .expand(Dimension::Channel, 4, FillMode::Zero)
        .expect("expand");
    assert_eq!(image.current_position(), Position::new(2, 2, 1));
    assert_eq!(image.display_state(2).expect("state").max, 6.0);
    assert_eq!(image.display_state(4).expect("state").max, 255.0);
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn duplicate_copies_planes_and_state() {
    let mut image = labelled_image(2, 2, 1);
    image.set_position(2, 2, 1);
    image.active_view_mut().set_min_and_max(1.0, 9.0);
    image.set_channel_label(1, "dna").expect("label");

    let copy = image.duplicate().expect("duplicate");
    assert_eq!(copy.title(), "labelled-1");
    assert_eq!(copy.current_position(), Position::new(2, 2, 1));
    assert_eq!(copy.active_view().max, 9.0);
    assert_eq!(copy.channel_label(1).expect("label"), "dna");
    let position = Position::new(1, 2, 1);
    assert!(
        !copy
            .pixels(position)
            .expect("pixels")
            .ptr_eq(&image.pixels(position).expect("pixels"))
    );
    assert_eq!(first_value(&copy, position), first_value(&image, position));
    copy.verify_synchronized().expect("synchronized");
}

#[test]
fn split_turns_halves_into_channels() {
    let planes = vec![
        PixelBuffer::U8(vec![1, 2, 3, 4, 5]),
        PixelBuffer::U8(vec![6, 7, 8, 9, 10]),
    ];
    let mut image =
        Image5D::from_planes("pair", Dimensions::new(5, 1, 1, 2, 1), planes).expect("image");
    image.set_channel_label(1, "cam").expect("label");
    image.set_channel_min_max(1, 2.0, 8.0).expect("window");

    let split = image.split().expect("split");
    assert_eq!(split.width(), 2);
    assert_eq!(split.channel_count(), 2);
    assert_eq!(split.channel_label(1).expect("label"), "cam-Left");
    assert_eq!(split.channel_label(2).expect("label"), "cam-Right");
    assert_eq!(split.display_state(2).expect("state").max, 8.0);

    let left = split.pixels(Position::new(1, 2, 1)).expect("left");
    let right = split.pixels(Position::new(2, 2, 1)).expect("right");
    assert_eq!(left.read().to_f32_vec(), vec![6.0, 7.0]);
    assert_eq!(right.read().to_f32_vec(), vec![8.0, 9.0]);

    let narrow = u8_image(1, 1, 1, 1, 1);
    assert!(matches!(
        narrow.split(),
        Err(CoreError::InvalidDimension(_))
    ));
}

#[test]
fn crop_cuts_every_plane() {
    let planes = vec![
        PixelBuffer::U8((0..6).collect()),
        PixelBuffer::U8((10..16).collect()),
    ];
    let image =
        Image5D::from_planes("grid", Dimensions::new(3, 2, 2, 1, 1), planes).expect("image");

    let cropped = image.crop(Rect::new(1, 1, 2, 1)).expect("crop");
    assert_eq!((cropped.width(), cropped.height()), (2, 1));
    let second = cropped.pixels(Position::new(2, 1, 1)).expect("pixels");
    assert_eq!(second.read().to_f32_vec(), vec![14.0, 15.0]);

    assert!(image.crop(Rect::new(2, 0, 2, 1)).is_err());
}

#[test]
fn dataset_export_and_import() {
    let mut image = labelled_image(2, 3, 2);
    image.set_channel_label(2, "gfp").expect("label");
    let dataset = image.to_dataset().expect("dataset");
    assert_eq!(dataset.shape(), &[2, 3, 2, 1, 2]);
    assert_eq!(dataset.metadata.channel_names[1], "gfp");
    assert_eq!(dataset.data[[1usize, 2, 1, 0, 1].as_slice()], 11.0);

    let back = Image5D::from_dataset(&dataset, PixelType::U8).expect("import");
    assert_eq!(back.dimensions(), image.dimensions());
    assert_eq!(back.title(), "labelled");
    assert_eq!(back.channel_label(2).expect("label"), "gfp");
    assert_eq!(first_value(&back, Position::new(2, 3, 2)), 11.0);
}

#[test]
fn overlay_render_adds_channel_colors() {
    let planes = vec![PixelBuffer::U8(vec![255; 4]), PixelBuffer::U8(vec![255; 4])];
    let mut image =
        Image5D::from_planes("mix", Dimensions::new(2, 2, 2, 1, 1), planes).expect("image");
    image.set_channel_color(1, [255, 0, 0]).expect("red");
    image.set_channel_color(2, [0, 255, 0]).expect("green");

    assert_eq!(image.render().expect("render").get_pixel(0, 0).0, [255, 0, 0]);

    image.set_display_mode(DisplayMode::Overlay);
    let blended = image.render().expect("render");
    assert_eq!(blended.get_pixel(1, 1).0, [255, 255, 0]);

    image.set_displayed_in_overlay(2, false).expect("exclude");
    let red = image.render_overlay().expect("render");
    assert_eq!(red.get_pixel(1, 1).0, [255, 0, 0]);
}

#[test]
fn autostretch_sets_the_channel_window() {
    let plane = PixelBuffer::U8((0..100).collect());
    let mut image = Image5D::from_planes("ramp", Dimensions::new(10, 10, 1, 1, 1), vec![plane])
        .expect("image");
    let stats = image
        .autostretch_channel(1, &ContrastSettings::default())
        .expect("stretch")
        .expect("stats");
    assert_eq!((stats.contrast_min, stats.contrast_max), (0.0, 99.0));
    assert_eq!(image.active_view().max, 99.0);
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn shared_handle_serialises_moves_and_growth() {
    let shared = SharedImage5D::from(u8_image(2, 2, 2, 3, 2));
    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let shared = shared.clone();
            thread::spawn(move || {
                for step in 0..50 {
                    shared.set_position(1 + (worker + step) % 3, 1 + step % 4, 1 + step % 3);
                    if worker == 0 && step == 25 {
                        shared
                            .expand(Dimension::Channel, 3, FillMode::Zero)
                            .expect("expand");
                    }
                    let position = shared.current_position();
                    shared.pixels(position).expect("in range");
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("worker");
    }

    let image = shared.try_unwrap().expect("last handle");
    assert_eq!(image.channel_count(), 3);
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn four_by_four_scenario_offsets_and_growth() {
    let mut image = u8_image(4, 4, 2, 3, 1);
    assert_eq!(image.offset(Position::new(2, 3, 1)).expect("offset"), 5);
    let first = image
        .set_pixels(Position::origin(), PixelBuffer::U8((0..16).collect()))
        .expect("pixels");

    image
        .expand(Dimension::Channel, 3, FillMode::Zero)
        .expect("expand");
    assert_eq!(image.offset(Position::new(3, 1, 1)).expect("offset"), 2);
    let kept = image.pixels(Position::origin()).expect("pixels");
    assert!(kept.ptr_eq(&first));
    assert_eq!(kept.read().value(15), Some(15.0));
}

#[test]
fn store_then_restore_is_bit_for_bit() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    image.set_channel_color(1, [12, 200, 7]).expect("color");
    image
        .set_channel_threshold(1, Threshold::range(1.5, 2.5), LutUpdateMode::BlackAndWhite)
        .expect("threshold");
    image.store_channel(1).expect("store");
    let before = image.active_view().clone();

    let view = image.active_view_mut();
    view.set_min_and_max(-4.0, 1e9);
    view.reset_threshold();
    view.lut = Lut::gray();
    image.restore_channel(1).expect("restore");

    assert_eq!(image.active_view(), &before);
}

#[test]
fn masked_float_plane_keeps_cursor_moves_synchronized() {
    let mut image = Image5D::new(
        "masked",
        PixelType::F32,
        Dimensions::new(2, 2, 2, 1, 1),
        FillMode::Zero,
    )
    .expect("image");
    image
        .set_pixels(Position::origin(), PixelBuffer::F32(vec![f32::NAN; 4]))
        .expect("pixels");

    let stats = image
        .autostretch_channel(1, &ContrastSettings::default())
        .expect("stretch");
    assert!(stats.is_none());
    assert_eq!(image.active_view().max, 1.0);

    image.active_view_mut().set_min_and_max(f64::NAN, f64::NAN);
    image.set_position(2, 1, 1);
    image.set_position(1, 1, 1);
    assert!(image.active_view().min.is_nan());
    image.verify_synchronized().expect("synchronized");
}

#[test]
fn non_finite_windows_are_rejected() {
    let mut image = u8_image(2, 2, 2, 1, 1);
    assert!(matches!(
        image.set_channel_min_max(1, f64::NAN, 10.0),
        Err(CoreError::InvalidWindow { .. })
    ));
    assert!(matches!(
        image.set_channel_threshold(
            2,
            Threshold::range(0.0, f64::INFINITY),
            LutUpdateMode::RedLut
        ),
        Err(CoreError::InvalidWindow { .. })
    ));
    assert_eq!(image.active_view().max, 255.0);

    image.set_channel_min_max(1, 200.0, 10.0).expect("inverted");
    assert_eq!(
        (image.active_view().min, image.active_view().max),
        (200.0, 10.0)
    );
}

#[test]
fn plain_yx_dataset_imports_as_single_plane() {
    use crate::model::{Dataset, Dim, Metadata};
    use ndarray::Array;

    let data = Array::from_shape_vec((2, 3), vec![0.2_f32, 0.4, 0.6, 0.8, 1.0, 1.2])
        .expect("shape")
        .into_dyn();
    let metadata = Metadata {
        dims: vec![Dim::new(AxisKind::Y, 2), Dim::new(AxisKind::X, 3)],
        pixel_type: PixelType::F32,
        ..Metadata::default()
    };
    let dataset = Dataset::new(data, metadata).expect("dataset");

    let image = Image5D::from_dataset(&dataset, PixelType::F32).expect("import");
    assert_eq!(image.dimensions(), Dimensions::new(3, 2, 1, 1, 1));
    let plane = image.current_pixels();
    assert_eq!(plane.read().pixel_type(), PixelType::F32);
    assert_eq!(plane.read().to_f32_vec()[4], 1.0);
}
