use field_core::*;

fn flat(v: f32) -> Curve {
    Curve::new(vec![(0.0, v)])
}

/// Reactor where only `size` moves with the signal.
fn size_only() -> Reactor {
    Reactor::new(
        [
            Curve::new(vec![(0.0, 1.0), (1.0, 2.0)]),
            flat(0.3),
            flat(0.12),
            flat(15.0),
        ],
        Thresholds::default(),
        0.0,
    )
}

#[test]
fn curve_interpolates_rise_then_return() {
    let c = Curve::new(vec![(0.0, 0.3), (0.5, 0.8), (1.0, 0.3)]);
    assert!((c.sample(0.25) - 0.55).abs() < 1e-6);
    assert!((c.sample(0.5) - 0.8).abs() < 1e-6);
    assert!((c.sample(0.75) - 0.55).abs() < 1e-6);
}

#[test]
fn curve_clamps_outside_domain() {
    let c = Curve::new(vec![(0.0, 15.0), (0.5, 25.0), (1.0, 18.0)]);
    assert_eq!(c.sample(-3.0), 15.0);
    assert_eq!(c.sample(7.0), 18.0);
}

#[test]
fn single_stop_curve_is_constant() {
    assert_eq!(flat(4.0).sample(0.9), 4.0);
    assert!(flat(4.0).check().is_ok());
    assert!(Curve::new(vec![]).check().is_err());
}

#[test]
fn monotonic_sweep_crosses_threshold_exactly_once() {
    let mut reactor = size_only();
    let mut fired = 0;
    for i in 0..=300 {
        let changes = reactor.update(i as f32 * 0.001);
        if changes.size.is_some() {
            fired += 1;
        }
        assert!(changes.density.is_none());
    }
    // 1.0 -> 1.3 only clears the 0.2 threshold once
    assert_eq!(fired, 1);
    let applied = reactor.applied().size;
    assert!(applied > 1.199 && applied < 1.21);
}

#[test]
fn small_signal_jitter_applies_nothing() {
    let mut reactor = Reactor::from_options(&FieldOptions::default(), 0.5);
    for v in [0.49, 0.51, 0.5, 0.505, 0.495] {
        assert!(reactor.update(v).is_empty(), "signal {v} reapplied");
    }
}

#[test]
fn density_change_supersedes_attribute_setters() {
    let mut reactor = Reactor::from_options(&FieldOptions::default(), 0.0);
    let changes = reactor.update(0.2);
    // density 15 -> 19 exceeds 3, speed 0.3 -> 0.5 would exceed 0.1 on its own
    assert!((changes.density.unwrap() - 19.0).abs() < 1e-4);
    assert!(changes.speed.is_none());
    assert!(changes.size.is_none());
    assert!(changes.opacity.is_none());
    assert_eq!(reactor.applied(), reactor.targets());
}

#[test]
fn attribute_change_without_density_change() {
    let mut reactor = Reactor::from_options(&FieldOptions::default(), 0.0);
    // density 15 -> 17.4 stays under 3, speed 0.3 -> 0.42 clears 0.1
    let changes = reactor.update(0.12);
    assert!(changes.density.is_none());
    assert!(changes.speed.is_some());
    assert!(changes.size.is_none());
}

#[test]
fn out_of_range_signal_is_clamped() {
    let mut a = Reactor::from_options(&FieldOptions::default(), 0.0);
    let mut b = Reactor::from_options(&FieldOptions::default(), 0.0);
    a.update(1.0);
    b.update(42.0);
    assert_eq!(a.targets(), b.targets());
}

#[test]
fn non_finite_signal_is_ignored() {
    let mut reactor = Reactor::from_options(&FieldOptions::default(), 0.3);
    let before = reactor.targets();
    assert!(reactor.update(f32::NAN).is_empty());
    assert!(reactor.update(f32::INFINITY).is_empty());
    assert_eq!(reactor.targets(), before);
    assert_eq!(reactor.signal(), 0.3);
}
