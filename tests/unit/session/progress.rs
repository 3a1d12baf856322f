use super::*;

#[test]
fn weighting_hits_exact_boundaries() {
    assert_eq!(generation_progress(0, 105), 0.0);
    assert_eq!(generation_progress(105, 105), 0.8);
    assert_eq!(staging_progress(0, 105), 0.8);
    assert_eq!(staging_progress(105, 105), 1.0);
}

#[test]
fn weighting_is_monotonic_across_both_stages() {
    let mut last = 0.0;
    for k in 1..=105 {
        let p = generation_progress(k, 105);
        assert!(p >= last);
        last = p;
    }
    for k in 1..=105 {
        let p = staging_progress(k, 105);
        assert!(p >= last);
        last = p;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn handle_tracks_updates_and_resets_after_finish() {
    let (progress, rx) = Progress::channel();
    let handle = progress.handle();

    progress.start(2);
    progress.frame_rendered(FrameIndex(0), 2);
    assert_eq!(handle.get(), 0.4);
    progress.frame_rendered(FrameIndex(1), 2);
    assert_eq!(handle.get(), 0.8);
    progress.frame_staged(2, 2);
    assert_eq!(handle.get(), 1.0);
    progress.finish(10);
    assert_eq!(handle.get(), 0.0);

    let events: Vec<_> = rx.try_iter().collect();
    assert_eq!(events.first(), Some(&ProgressEvent::Started { total_frames: 2 }));
    assert_eq!(events.last(), Some(&ProgressEvent::Finished { bytes: 10 }));
    assert_eq!(events.len(), 5);
}

#[test]
fn failure_resets_and_dropped_receiver_is_ignored() {
    let (progress, rx) = Progress::channel();
    drop(rx);
    progress.frame_rendered(FrameIndex(3), 4);
    assert_eq!(progress.value(), 0.8);
    progress.fail(&"boom");
    assert_eq!(progress.value(), 0.0);
}
