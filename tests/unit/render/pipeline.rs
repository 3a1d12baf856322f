use std::io::Cursor;

use super::*;
use crate::{animation::ease::Ease, foundation::core::Rgb8};

fn png(width: u32, height: u32, px: [u8; 4]) -> ImageSource {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    ImageSource::bytes(buf)
}

fn decoded_rgba(frame: &Frame) -> Vec<u8> {
    image::load_from_memory(&frame.png)
        .unwrap()
        .to_rgba8()
        .into_raw()
}

fn style() -> StyleParameters {
    StyleParameters::new(Rgb8::WHITE, Ease::Linear)
}

#[test]
fn yields_every_frame_in_order_with_synchronous_callbacks() {
    let before = png(16, 8, [255, 0, 0, 255]);
    let after = png(16, 8, [0, 0, 255, 255]);
    let mut seen = Vec::new();
    let frames = generate_frames(&before, &after, &style(), &RunOpts::default(), |i, n| {
        seen.push((i.0, n))
    })
    .unwrap();

    assert_eq!(frames.len(), 105);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.index, FrameIndex(i as u64));
        assert_eq!(f.canvas, Canvas { width: 16, height: 8 });
    }
    let expected: Vec<(u64, u64)> = (0..105).map(|i| (i, 105)).collect();
    assert_eq!(seen, expected);
}

#[test]
fn first_and_last_frames_are_the_before_image() {
    let before = png(16, 8, [255, 0, 0, 255]);
    let after = png(16, 8, [0, 0, 255, 255]);
    let frames =
        generate_frames(&before, &after, &style(), &RunOpts::default(), |_, _| {}).unwrap();

    let raw_before = [255u8, 0, 0, 255].repeat(16 * 8);
    assert_eq!(decoded_rgba(&frames[0]), raw_before);
    assert_eq!(decoded_rgba(&frames[104]), raw_before);
}

#[test]
fn identical_inputs_give_byte_identical_frames() {
    let before = png(12, 6, [10, 200, 30, 255]);
    let after = png(12, 6, [90, 10, 250, 255]);
    let s = StyleParameters::new(Rgb8::new(0, 255, 255), Ease::EaseOutBack);
    let a = generate_frames(&before, &after, &s, &RunOpts::default(), |_, _| {}).unwrap();
    let b = generate_frames(&before, &after, &s, &RunOpts::default(), |_, _| {}).unwrap();
    assert_eq!(a, b);
}

#[test]
fn parallel_rendering_matches_sequential() {
    let before = png(12, 6, [10, 200, 30, 255]);
    let after = png(12, 6, [90, 10, 250, 255]);
    let seq = generate_frames(&before, &after, &style(), &RunOpts::default(), |_, _| {}).unwrap();

    let opts = RunOpts {
        threading: RenderThreading {
            parallel: true,
            chunk_size: 7,
            threads: Some(2),
        },
        ..RunOpts::default()
    };
    let mut order = Vec::new();
    let par = generate_frames(&before, &after, &style(), &opts, |i, _| order.push(i.0)).unwrap();
    assert_eq!(seq, par);
    assert_eq!(order, (0..105).collect::<Vec<_>>());
}

#[test]
fn custom_total_frames_is_honored() {
    let before = png(4, 4, [1, 2, 3, 255]);
    let after = png(4, 4, [4, 5, 6, 255]);
    let opts = RunOpts {
        total_frames: 14,
        ..RunOpts::default()
    };
    let frames = generate_frames(&before, &after, &style(), &opts, |_, _| {}).unwrap();
    assert_eq!(frames.len(), 14);
}

#[test]
fn invalid_sources_fail_with_decode_error_before_any_callback() {
    let good = png(4, 4, [1, 2, 3, 255]);
    let bad = ImageSource::bytes(b"nope".to_vec());
    let mut calls = 0;
    let err = generate_frames(&good, &bad, &style(), &RunOpts::default(), |_, _| calls += 1)
        .unwrap_err();
    assert!(matches!(err, ScanwipeError::Decode(_)));
    assert_eq!(calls, 0);
}

#[test]
fn mismatched_sizes_follow_the_policy() {
    let before = png(8, 8, [1, 2, 3, 255]);
    let after = png(6, 4, [4, 5, 6, 255]);

    let reject = RunOpts {
        size_mismatch: SizeMismatch::Reject,
        ..RunOpts::default()
    };
    let err = generate_frames(&before, &after, &style(), &reject, |_, _| {}).unwrap_err();
    assert!(matches!(err, ScanwipeError::Validation(_)));

    let frames =
        generate_frames(&before, &after, &style(), &RunOpts::default(), |_, _| {}).unwrap();
    assert!(frames.iter().all(|f| f.canvas == Canvas { width: 8, height: 8 }));
}

#[test]
fn zero_frames_is_rejected() {
    let src = png(4, 4, [1, 2, 3, 255]);
    let opts = RunOpts {
        total_frames: 0,
        ..RunOpts::default()
    };
    let err = generate_frames(&src, &src, &style(), &opts, |_, _| {}).unwrap_err();
    assert!(matches!(err, ScanwipeError::Validation(_)));
}

#[test]
fn oversized_frame_count_is_rejected_before_allocating() {
    let img = decode_source(&png(4, 4, [255, 0, 0, 255])).unwrap();
    let opts = RunOpts {
        total_frames: u64::MAX,
        ..RunOpts::default()
    };
    let err = render_sequence(&img, &img, &style(), &opts, |_, _| {}).unwrap_err();
    assert!(matches!(err, ScanwipeError::Validation(_)));
}
