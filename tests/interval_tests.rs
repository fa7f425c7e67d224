use plot_layout::core::Interval;

#[test]
fn inverted_interval_has_negative_width() {
    let interval = Interval::new(10.0, 2.0);

    assert!(interval.is_inverted());
    assert_eq!(interval.width(), -8.0);
    assert_eq!(interval.min_value(), 2.0);
    assert_eq!(interval.max_value(), 10.0);
    assert_eq!(interval.normalized(), Interval::new(2.0, 10.0));
}

#[test]
fn validity_requires_finite_bounds() {
    assert!(Interval::new(0.0, 0.0).is_valid());
    assert!(!Interval::new(f64::NAN, 1.0).is_valid());
    assert!(!Interval::new(0.0, f64::INFINITY).is_valid());
}

#[test]
fn contains_uses_the_normalized_range() {
    let interval = Interval::new(5.0, -5.0);

    assert!(interval.contains(0.0));
    assert!(interval.contains(5.0));
    assert!(!interval.contains(5.5));
    assert!(!interval.contains(f64::NAN));
}

#[test]
fn extend_translate_and_limit() {
    let interval = Interval::new(1.0, 3.0);

    assert_eq!(interval.extend(-2.0), Interval::new(-2.0, 3.0));
    assert_eq!(interval.extend(2.0), interval);
    assert_eq!(interval.translated(1.5), Interval::new(2.5, 4.5));
    assert_eq!(interval.center(), 2.0);
    assert_eq!(
        Interval::new(-10.0, 50.0).limited(0.0, 20.0),
        Interval::new(0.0, 20.0)
    );
}
