mod common;

use common::*;
use field_core::*;

fn started(mode: MotionMode) -> (ParticleField, RecordingPainter, FakeFrames, FakeTimers) {
    let mut field = ParticleField::new(seeded_options(), mode, metrics(400.0, 300.0), 0.0);
    let mut painter = RecordingPainter::default();
    let mut frames = FakeFrames::default();
    field.start(&mut painter, &mut frames);
    (field, painter, frames, FakeTimers::default())
}

#[test]
fn burst_of_resizes_recomputes_once() {
    let (mut field, mut painter, _frames, mut timers) = started(MotionMode::Animated);
    let mut recomputed = 0;
    for _ in 0..6 {
        field.on_resize_event(&mut timers);
        for _ in timers.advance(50) {
            if field.on_resize_timeout(&mut painter, metrics(1024.0, 768.0)) {
                recomputed += 1;
            }
        }
    }
    assert_eq!(recomputed, 0);
    for _ in timers.advance(constants::RESIZE_DEBOUNCE_MS) {
        if field.on_resize_timeout(&mut painter, metrics(1024.0, 768.0)) {
            recomputed += 1;
        }
    }
    assert_eq!(recomputed, 1);
    assert_eq!(timers.set, 6);
    assert_eq!(timers.cleared.len(), 5);
    // initial sizing plus the debounced one
    assert_eq!(field.surface().recomputes(), 2);
    assert_eq!(painter.applied.last().unwrap().backing_size(), (2048, 1536));
}

#[test]
fn separate_bursts_recompute_separately() {
    let (mut field, mut painter, _frames, mut timers) = started(MotionMode::Animated);
    for size in [500.0, 600.0] {
        field.on_resize_event(&mut timers);
        field.on_resize_event(&mut timers);
        for _ in timers.advance(constants::RESIZE_DEBOUNCE_MS) {
            field.on_resize_timeout(&mut painter, metrics(size, size));
        }
    }
    assert_eq!(field.surface().recomputes(), 3);
}

#[test]
fn stop_clears_pending_resize_timer() {
    let (mut field, mut painter, mut frames, mut timers) = started(MotionMode::Animated);
    field.on_resize_event(&mut timers);
    field.stop(&mut frames, &mut timers);
    assert!(timers.armed.is_empty());
    assert_eq!(timers.cleared.len(), 1);
    // a callback that raced the teardown is ignored
    assert!(!field.on_resize_timeout(&mut painter, metrics(10.0, 10.0)));
    assert_eq!(field.surface().recomputes(), 1);
}

#[test]
fn failed_rescale_degrades_without_stopping_the_loop() {
    let (mut field, mut painter, mut frames, mut timers) = started(MotionMode::Animated);
    painter.fail_apply = true;
    field.on_resize_event(&mut timers);
    for _ in timers.advance(constants::RESIZE_DEBOUNCE_MS) {
        assert!(field.on_resize_timeout(&mut painter, metrics(900.0, 700.0)));
    }
    let ran = run_frames(&mut field, &mut painter, &mut frames, 64);
    assert_eq!(ran, 4);
    assert_eq!(field.surface().metrics().logical.x, 900.0);
}

#[test]
fn static_mode_redraws_after_resize() {
    let (mut field, mut painter, frames, mut timers) = started(MotionMode::Static);
    assert_eq!(painter.clears, 1);
    field.on_resize_event(&mut timers);
    for _ in timers.advance(constants::RESIZE_DEBOUNCE_MS) {
        field.on_resize_timeout(&mut painter, metrics(640.0, 480.0));
    }
    assert_eq!(painter.clears, 2);
    assert_eq!(frames.requested, 0);
}
