use std::sync::Arc;

use super::*;
use crate::foundation::core::Rgb8;

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn solid(width: u32, height: u32, px: [u8; 4]) -> SourceImage {
    SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat((width * height) as usize)),
    }
}

fn sample(phase: Phase, progress: f64) -> PhaseSample {
    PhaseSample { phase, progress }
}

#[test]
fn hold_plans_no_split_and_no_line() {
    let p = plan_frame(sample(Phase::Hold, 0.0), Ease::Linear, 100);
    assert_eq!(p, FramePlan { split: 100, line_x: None });
}

#[test]
fn scan_line_sweeps_from_off_left_to_off_right() {
    let start = plan_frame(sample(Phase::Scan, 0.0), Ease::Linear, 100);
    assert_eq!(start.split, 100);
    assert_eq!(start.line_x, Some(-10.0));

    let mid = plan_frame(sample(Phase::Scan, 0.5), Ease::Linear, 100);
    assert!((mid.line_x.unwrap() - 50.0).abs() < 1e-9);

    let end = plan_frame(sample(Phase::Scan, 1.0), Ease::Linear, 100);
    assert!((end.line_x.unwrap() - 110.0).abs() < 1e-9);
}

#[test]
fn reveal_after_grows_from_the_right() {
    let p = plan_frame(sample(Phase::RevealAfter, 0.25), Ease::Linear, 100);
    assert_eq!(p.split, 75);
    assert_eq!(p.line_x, Some(65.0));

    let p = plan_frame(sample(Phase::RevealAfter, 0.0), Ease::Linear, 100);
    assert_eq!(p.split, 100);
}

#[test]
fn reveal_before_grows_from_the_left_and_completes_without_a_line() {
    let p = plan_frame(sample(Phase::RevealBefore, 0.5), Ease::Linear, 100);
    assert_eq!(p.split, 50);
    assert_eq!(p.line_x, Some(40.0));

    let done = plan_frame(sample(Phase::RevealBefore, 1.0), Ease::EaseOutBack, 100);
    assert_eq!(done, FramePlan { split: 100, line_x: None });
}

#[test]
fn overshooting_easings_clamp_the_split() {
    for t in [0.05, 0.1, 0.2, 0.8, 0.9, 0.95] {
        for ease in [Ease::EaseInBack, Ease::EaseOutBack] {
            for phase in [Phase::RevealAfter, Phase::RevealBefore] {
                let p = plan_frame(sample(phase, t), ease, 64);
                assert!(p.split <= 64);
                assert!(p.line_x.unwrap().is_finite());
            }
        }
    }
}

#[test]
fn hold_frame_is_before_pixels() {
    let before = solid(20, 10, RED);
    let after = solid(20, 10, BLUE);
    let t = Timeline::new(105).unwrap();
    let f = render_frame(&before, &after, FrameIndex(0), t, &StyleParameters::default()).unwrap();
    assert_eq!(f.data, *before.rgba8_premul);
}

#[test]
fn mid_reveal_splits_red_and_blue_with_a_glow_band() {
    let before = solid(100, 100, RED);
    let after = solid(100, 100, BLUE);
    let style = StyleParameters::new(Rgb8::WHITE, Ease::Linear);
    let t = Timeline::new(105).unwrap();

    // Frame 60 is halfway through reveal-after: split at x=50, core at [40, 50).
    let f = render_frame(&before, &after, FrameIndex(60), t, &style).unwrap();
    assert_eq!(f.width, 100);
    for y in [0, 50, 99] {
        // The wide halo barely reaches the left edge.
        let left = f.pixel(0, y);
        assert_eq!(left[0], 255);
        assert!(left[1] <= 4 && left[3] == 255);
        for x in 40..50 {
            assert_eq!(f.pixel(x, y), [255, 255, 255, 255]);
        }
        let right = f.pixel(99, y);
        assert_eq!(right[2], 255);
        assert!(right[0] < 255);
    }
    // Just right of the core the halo brightens the blue side.
    let near = f.pixel(51, 50);
    assert_eq!(near[2], 255);
    assert!(near[0] > 0);
}

#[test]
fn larger_after_is_cropped_and_smaller_after_leaves_transparency() {
    let before = solid(10, 4, RED);
    let style = StyleParameters::default();
    let t = Timeline::new(105).unwrap();

    let big = solid(30, 30, BLUE);
    let f = render_frame(&before, &big, FrameIndex(74), t, &style).unwrap();
    assert_eq!((f.width, f.height), (10, 4));

    let small = solid(5, 2, BLUE);
    let f = render_frame(&before, &small, FrameIndex(75), t, &style).unwrap();
    // Reveal-before at progress 0: the whole canvas shows "after", which only covers 5x2.
    let covered = f.pixel(2, 0);
    assert_eq!(covered[2], 255);
    let uncovered = f.pixel(9, 3);
    assert_ne!(uncovered, RED);
    assert_eq!(uncovered[0], uncovered[2]);
}

#[test]
fn reveal_before_frame_shows_after_right_of_the_split() {
    let before = solid(200, 6, RED);
    let after = solid(200, 6, BLUE);
    let style = StyleParameters::new(Rgb8::WHITE, Ease::Linear);
    let t = Timeline::new(105).unwrap();

    // Frame 90: progress 15/29, split at round(103.4) = 103, core at ~[93.4, 103.4).
    let plan = plan_frame(t.sample(FrameIndex(90)).unwrap(), Ease::Linear, 200);
    assert_eq!(plan.split, 103);

    let f = render_frame(&before, &after, FrameIndex(90), t, &style).unwrap();
    for y in 0..6 {
        assert_eq!(f.pixel(0, y), RED);
        assert_eq!(f.pixel(199, y), BLUE);
        assert_eq!(f.pixel(98, y), [255, 255, 255, 255]);
    }
}
