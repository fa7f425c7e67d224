use approx::assert_abs_diff_eq;
use plot_layout::core::{Rect, Size};
use plot_layout::figure::{FigureGridLayout, GridSpec, calc_norm_rect};

fn zero_margin_layout() -> FigureGridLayout<u32> {
    let mut layout = FigureGridLayout::new();
    layout.adjust_layout(0.0, 0.0, 0.0, 0.0).expect("valid margins");
    layout
}

#[test]
fn quadrants_split_the_unit_square() {
    let top_left = GridSpec::new(2, 2, 0, 0).norm_rect().expect("valid cell");
    let bottom_right = GridSpec::new(2, 2, 1, 1).norm_rect().expect("valid cell");

    assert_eq!(top_left, Rect::new(0.0, 0.0, 0.5, 0.5));
    assert_eq!(bottom_right, Rect::new(0.5, 0.5, 0.5, 0.5));
}

#[test]
fn spans_cover_the_union_of_their_cells() {
    let spanned = GridSpec::new(3, 2, 1, 0)
        .with_span(1, 2)
        .with_spacing(0.1, 0.05)
        .norm_rect()
        .expect("valid span");
    let first = GridSpec::new(3, 2, 1, 0)
        .with_spacing(0.1, 0.05)
        .norm_rect()
        .expect("valid cell");
    let second = GridSpec::new(3, 2, 1, 1)
        .with_spacing(0.1, 0.05)
        .norm_rect()
        .expect("valid cell");

    let union = first.united(second);
    assert_abs_diff_eq!(spanned.left(), union.left(), epsilon = 1e-12);
    assert_abs_diff_eq!(spanned.right(), union.right(), epsilon = 1e-12);
    assert_abs_diff_eq!(spanned.top(), union.top(), epsilon = 1e-12);
    assert_abs_diff_eq!(spanned.height, first.height, epsilon = 1e-12);
}

#[test]
fn invalid_grid_addresses_are_rejected() {
    let mut layout = zero_margin_layout();

    assert!(layout.add_axes_grid(1, GridSpec::new(0, 2, 0, 0)).is_err());
    assert!(layout.add_axes_grid(1, GridSpec::new(2, 2, 2, 0)).is_err());
    assert!(
        layout
            .add_axes_grid(1, GridSpec::new(2, 2, 1, 1).with_span(2, 1))
            .is_err()
    );
    assert!(
        layout
            .add_axes_grid(1, GridSpec::new(2, 2, 0, 0).with_spacing(-0.1, 0.0))
            .is_err()
    );
    assert!(
        layout
            .add_axes_grid(1, GridSpec::new(1, 3, 0, 0).with_spacing(0.5, 0.0))
            .is_err()
    );
    assert!(layout.is_empty());
}

#[test]
fn geometry_projects_normalized_rects_into_pixels() {
    let mut layout = zero_margin_layout();
    layout
        .add_axes_grid(1, GridSpec::new(2, 2, 0, 0))
        .expect("valid cell");
    layout
        .add_axes_grid(2, GridSpec::new(2, 2, 1, 1))
        .expect("valid cell");

    layout.set_geometry(Rect::new(0.0, 0.0, 800.0, 600.0), |_| true);

    assert_eq!(layout.geometry(1), Some(Rect::new(0.0, 0.0, 400.0, 300.0)));
    assert_eq!(layout.geometry(2), Some(Rect::new(400.0, 300.0, 400.0, 300.0)));
}

#[test]
fn geometry_honors_margins_and_outer_offset() {
    let mut layout = FigureGridLayout::new();
    layout.adjust_layout(0.1, 0.0, 0.1, 0.0).expect("valid margins");
    layout.add_axes(7, 0.0, 0.0, 1.0, 1.0).expect("valid rect");

    layout.set_geometry(Rect::new(20.0, 10.0, 1000.0, 500.0), |_| true);

    assert_eq!(layout.geometry(7), Some(Rect::new(120.0, 10.0, 800.0, 500.0)));
}

#[test]
fn hidden_items_are_not_placed() {
    let mut layout = zero_margin_layout();
    layout.add_axes(1, 0.0, 0.0, 0.5, 1.0).expect("valid rect");
    layout.add_axes(2, 0.5, 0.0, 0.5, 1.0).expect("valid rect");

    layout.set_geometry(Rect::new(0.0, 0.0, 200.0, 100.0), |handle| handle == 1);

    assert!(layout.geometry(1).is_some());
    assert_eq!(layout.geometry(2), None);
}

#[test]
fn empty_outer_rect_leaves_geometry_untouched() {
    let mut layout = zero_margin_layout();
    layout.add_axes(1, 0.0, 0.0, 1.0, 1.0).expect("valid rect");

    layout.set_geometry(Rect::new(0.0, 0.0, 0.0, 100.0), |_| true);
    assert_eq!(layout.geometry(1), None);
}

#[test]
fn adjust_layout_validates_margins() {
    let mut layout = FigureGridLayout::<u32>::new();

    assert!(layout.adjust_layout(1.5, 0.0, 0.0, 0.0).is_err());
    assert!(layout.adjust_layout(0.0, -0.1, 0.0, 0.0).is_err());

    // Accepted with a warning.
    layout.adjust_layout(0.6, 0.0, 0.5, 0.0).expect("in-range margins");
    assert_eq!(layout.margins().left, 0.6);
}

#[test]
fn moving_and_removing_items() {
    let mut layout = zero_margin_layout();
    layout.add_axes(1, 0.0, 0.0, 1.0, 1.0).expect("valid rect");

    let moved = Rect::new(0.25, 0.25, 0.5, 0.5);
    assert!(layout.set_axes_norm_pos(1, moved));
    assert_eq!(layout.norm_rect(1), Some(moved));
    assert!(!layout.set_axes_norm_pos(9, moved));

    assert!(layout.remove(1));
    assert!(!layout.remove(1));
    assert_eq!(layout.norm_rect(1), None);
}

#[test]
fn minimum_size_is_the_largest_visible_minimum() {
    let mut layout = zero_margin_layout();
    layout.add_axes(1, 0.0, 0.0, 0.5, 1.0).expect("valid rect");
    layout.add_axes(2, 0.5, 0.0, 0.5, 1.0).expect("valid rect");
    layout.add_axes(3, 0.0, 0.0, 0.1, 0.1).expect("valid rect");

    let size = layout.minimum_size(|handle| match handle {
        1 => Some(Size::new(120.0, 40.0)),
        2 => Some(Size::new(80.0, 90.0)),
        _ => None,
    });
    assert_eq!(size, Size::new(120.0, 90.0));
}

#[test]
fn calc_norm_rect_clamps_to_the_parent() {
    let parent = Rect::new(100.0, 50.0, 400.0, 200.0);

    let inside = calc_norm_rect(parent, Rect::new(200.0, 100.0, 100.0, 50.0));
    assert_eq!(inside, Rect::new(0.25, 0.25, 0.25, 0.25));

    let overflowing = calc_norm_rect(parent, Rect::new(400.0, 0.0, 400.0, 400.0));
    assert_eq!(overflowing.x, 0.75);
    assert_eq!(overflowing.y, 0.0);
    assert_abs_diff_eq!(overflowing.right(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(overflowing.bottom(), 1.0, epsilon = 1e-12);

    assert_eq!(
        calc_norm_rect(Rect::default(), Rect::new(1.0, 1.0, 1.0, 1.0)),
        Rect::default()
    );
}
