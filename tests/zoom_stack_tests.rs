use approx::assert_abs_diff_eq;
use plot_layout::core::{
    AxisArray, AxisPosition, Interval, Rect, ScaleMap, Size, Transformation,
};
use plot_layout::interaction::{AxisScales, ZoomState, ZoomStateStack};

fn state(lower: f64, upper: f64) -> ZoomState {
    ZoomState::new()
        .with_interval(AxisPosition::Bottom, Interval::new(lower, upper))
        .with_interval(AxisPosition::Left, Interval::new(lower * 2.0, upper * 2.0))
}

fn stack_abc() -> (ZoomStateStack, [ZoomState; 3]) {
    let states = [state(0.0, 100.0), state(10.0, 50.0), state(20.0, 30.0)];
    let mut stack = ZoomStateStack::new();
    for s in states {
        assert!(stack.push(s));
    }
    (stack, states)
}

#[derive(Debug, Default)]
struct FakeAxes {
    visible: AxisArray<bool>,
    intervals: AxisArray<Interval>,
}

impl AxisScales for FakeAxes {
    fn is_axis_visible(&self, axis: AxisPosition) -> bool {
        self.visible[axis]
    }

    fn axis_interval(&self, axis: AxisPosition) -> Interval {
        self.intervals[axis]
    }

    fn set_axis_interval(&mut self, axis: AxisPosition, interval: Interval) {
        self.intervals[axis] = interval;
    }
}

#[test]
fn navigation_follows_the_history() {
    let (mut stack, [a, b, c]) = stack_abc();
    assert_eq!(stack.index(), 2);
    assert_eq!(stack.zoom_state(), c);

    assert_eq!(stack.step_by(-1), b);
    assert_eq!(stack.index(), 1);

    assert_eq!(stack.step_by(0), a);
    assert_eq!(stack.index(), 0);
    assert_eq!(stack.zoom_base(), a);

    assert_eq!(stack.step_by(1), b);
}

#[test]
fn push_after_stepping_back_truncates_redo_states() {
    let (mut stack, [a, b, _]) = stack_abc();
    stack.step_by(-1);

    let d = state(12.0, 14.0);
    assert!(stack.push(d));
    assert_eq!(stack.states(), &[a, b, d]);
    assert_eq!(stack.index(), 2);
}

#[test]
fn pushing_the_current_state_is_a_no_op() {
    let (mut stack, [_, _, c]) = stack_abc();

    assert!(!stack.push(c));
    assert_eq!(stack.len(), 3);
}

#[test]
fn step_by_clamps_to_the_history() {
    let (mut stack, [a, _, c]) = stack_abc();

    assert_eq!(stack.step_by(10), c);
    assert_eq!(stack.index(), 2);
    assert_eq!(stack.step_by(-10), a);
    assert_eq!(stack.index(), 0);
}

#[test]
fn capture_then_home_returns_to_base() {
    let mut axes = FakeAxes::default();
    axes.visible[AxisPosition::Bottom] = true;
    axes.visible[AxisPosition::Left] = true;
    axes.intervals[AxisPosition::Bottom] = Interval::new(0.0, 10.0);
    axes.intervals[AxisPosition::Left] = Interval::new(-1.0, 1.0);
    axes.intervals[AxisPosition::Top] = Interval::new(5.0, 6.0);

    let mut stack = ZoomStateStack::new();
    stack.set_zoom_base(ZoomState::capture(&axes));
    let base = stack.zoom_base();
    assert_eq!(base.interval(AxisPosition::Top), None);

    axes.intervals[AxisPosition::Bottom] = Interval::new(2.0, 4.0);
    let zoomed = ZoomState::capture(&axes);
    assert!(stack.push(zoomed));

    stack.step_by(0).apply_to(&mut axes);
    assert_eq!(axes.intervals[AxisPosition::Bottom], Interval::new(0.0, 10.0));
    assert_eq!(axes.intervals[AxisPosition::Top], Interval::new(5.0, 6.0));

    assert_eq!(stack.step_by(1), zoomed);
}

#[test]
fn applying_an_empty_state_changes_nothing() {
    let mut axes = FakeAxes::default();
    axes.visible[AxisPosition::Bottom] = true;
    axes.intervals[AxisPosition::Bottom] = Interval::new(3.0, 4.0);

    let mut stack = ZoomStateStack::new();
    let empty = stack.step_by(-1);
    assert!(!empty.is_valid());
    empty.apply_to(&mut axes);
    assert_eq!(axes.intervals[AxisPosition::Bottom], Interval::new(3.0, 4.0));
}

#[test]
fn panning_edits_the_current_entry_in_place() {
    let (mut stack, [a, b, _]) = stack_abc();

    assert!(stack.move_by(5.0, -1.0));
    assert_eq!(stack.len(), 3);
    let moved = stack.zoom_state();
    assert_eq!(moved.interval(AxisPosition::Bottom), Some(Interval::new(25.0, 35.0)));
    assert_eq!(moved.interval(AxisPosition::Left), Some(Interval::new(39.0, 59.0)));

    assert!(stack.move_to(0.0, 0.0));
    let moved = stack.zoom_state();
    assert_eq!(moved.interval(AxisPosition::Bottom), Some(Interval::new(0.0, 10.0)));
    assert_eq!(moved.interval(AxisPosition::Left), Some(Interval::new(0.0, 20.0)));

    assert_eq!(&stack.states()[..2], &[a, b]);
}

#[test]
fn bounded_stack_drops_the_oldest_states() {
    let mut stack = ZoomStateStack::with_max_depth(Some(3));
    for i in 0..5 {
        stack.push(state(f64::from(i), f64::from(i) + 10.0));
    }

    assert_eq!(stack.len(), 3);
    assert_eq!(stack.zoom_base(), state(2.0, 12.0));
    assert_eq!(stack.index(), 2);

    stack.set_max_stack_depth(Some(1));
    assert_eq!(stack.states(), &[state(4.0, 14.0)]);
    assert_eq!(stack.index(), 0);
}

#[test]
fn set_zoom_stack_validates_input() {
    let mut stack = ZoomStateStack::with_max_depth(Some(2));

    assert!(stack.set_zoom_stack(Vec::new(), 0).is_err());
    assert!(
        stack
            .set_zoom_stack(vec![state(0.0, 1.0), state(0.0, 2.0), state(0.0, 3.0)], 0)
            .is_err()
    );
    assert!(stack.is_empty());

    stack
        .set_zoom_stack(vec![state(0.0, 1.0), state(0.0, 2.0)], 7)
        .expect("stack within bound");
    assert_eq!(stack.index(), 1);
}

#[test]
fn selected_canvas_rect_becomes_a_zoom_state() {
    let mut maps = AxisArray::default();
    maps[AxisPosition::Bottom] = Some(ScaleMap::new(
        Transformation::Linear,
        0.0,
        100.0,
        0.0,
        200.0,
    ));
    maps[AxisPosition::Left] = Some(ScaleMap::new(
        Transformation::Linear,
        0.0,
        10.0,
        100.0,
        0.0,
    ));

    let mut stack = ZoomStateStack::new();
    stack.set_zoom_base(
        ZoomState::new()
            .with_interval(AxisPosition::Bottom, Interval::new(0.0, 100.0))
            .with_interval(AxisPosition::Left, Interval::new(0.0, 10.0)),
    );
    assert!(stack.zoom_to_canvas_rect(Rect::new(20.0, 10.0, 40.0, 30.0), &maps));

    let zoomed = stack.zoom_state();
    let x = zoomed.interval(AxisPosition::Bottom).expect("x interval");
    let y = zoomed.interval(AxisPosition::Left).expect("y interval");
    assert_abs_diff_eq!(x.lower(), 10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(x.upper(), 30.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y.lower(), 6.0, epsilon = 1e-9);
    assert_abs_diff_eq!(y.upper(), 9.0, epsilon = 1e-9);
}

#[test]
fn too_narrow_selection_is_widened() {
    let mut zoom = ZoomState::new().with_interval(AxisPosition::Bottom, Interval::new(5.0, 5.1));

    assert!(zoom.enforce_min_size(Size::new(1.0, 1.0)));
    let x = zoom.interval(AxisPosition::Bottom).expect("x interval");
    assert_abs_diff_eq!(x.width(), 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(x.center(), 5.05, epsilon = 1e-9);
}

#[test]
fn pixel_drag_moves_content_with_the_pointer() {
    let mut maps = AxisArray::default();
    maps[AxisPosition::Bottom] = Some(ScaleMap::new(
        Transformation::Linear,
        0.0,
        100.0,
        0.0,
        200.0,
    ));

    let mut stack = ZoomStateStack::new();
    stack.set_zoom_base(
        ZoomState::new().with_interval(AxisPosition::Bottom, Interval::new(0.0, 100.0)),
    );
    assert!(stack.move_by_pixels(20.0, 0.0, &maps));

    let x = stack
        .zoom_state()
        .interval(AxisPosition::Bottom)
        .expect("x interval");
    assert_abs_diff_eq!(x.lower(), -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(x.upper(), 90.0, epsilon = 1e-9);
    assert_eq!(stack.len(), 1);
}
