use plot_layout::core::{AxisPosition, Rect};
use plot_layout::layout::{AxisLayoutHint, LayoutHints, LayoutOptions, PlotLayout};
use proptest::prelude::*;

proptest! {
    #[test]
    fn y_axes_and_canvas_fill_the_plot_width(
        width in 200u32..2000,
        height in 100u32..1500,
        left in 1i32..80,
        right in 1i32..80
    ) {
        let mut hints = LayoutHints::default();
        hints.axes[AxisPosition::Left] = AxisLayoutHint::visible(left);
        hints.axes[AxisPosition::Right] = AxisLayoutHint::visible(right);

        let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        let mut layout = PlotLayout::new();
        layout.activate(&hints, rect, LayoutOptions::default());

        let canvas = layout.canvas_rect();
        prop_assert_eq!(canvas.width + f64::from(left + right), f64::from(width));
        prop_assert_eq!(canvas.height, f64::from(height));
    }

    #[test]
    fn layout_never_produces_negative_rectangles(
        width in 0u32..800,
        height in 0u32..600,
        dims in proptest::array::uniform4(0i32..120),
        borders in proptest::array::uniform2(0i32..20)
    ) {
        let mut hints = LayoutHints::default();
        for (axis, dim) in AxisPosition::ALL.into_iter().zip(dims) {
            if dim > 0 {
                hints.axes[axis] = AxisLayoutHint::visible(dim)
                    .with_border_dist(borders[0], borders[1])
                    .with_tick_offset(4.0);
            }
        }

        let mut layout = PlotLayout::new();
        let rect = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));
        layout.activate(&hints, rect, LayoutOptions::default());

        let canvas = layout.canvas_rect();
        prop_assert!(canvas.width >= 0.0 && canvas.height >= 0.0);
        for axis in AxisPosition::ALL {
            let scale = layout.scale_rect(axis);
            prop_assert!(scale.width >= 0.0 && scale.height >= 0.0, "{:?}: {:?}", axis, scale);
        }
    }
}
