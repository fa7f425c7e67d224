use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{AxisArray, AxisPosition, Rect, Size};
use crate::error::{PlotError, PlotResult};
use crate::layout::engine::{LayoutEngine, LayoutOptions, LegendPosition};
use crate::layout::hints::LayoutHints;

/// Serializable layout parameters of one plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLayoutConfig {
    /// Space between canvas and scale ticks; -1 excludes the scale borders.
    #[serde(default = "default_canvas_margin")]
    pub canvas_margin: AxisArray<i32>,
    #[serde(default)]
    pub align_canvas_to_scale: AxisArray<bool>,
    #[serde(default = "default_spacing")]
    pub spacing: u32,
    #[serde(default)]
    pub legend_position: LegendPosition,
    #[serde(default = "default_legend_ratio")]
    pub legend_ratio: f64,
}

impl Default for PlotLayoutConfig {
    fn default() -> Self {
        Self {
            canvas_margin: default_canvas_margin(),
            align_canvas_to_scale: AxisArray::splat(false),
            spacing: default_spacing(),
            legend_position: LegendPosition::default(),
            legend_ratio: default_legend_ratio(),
        }
    }
}

fn default_canvas_margin() -> AxisArray<i32> {
    AxisArray::splat(-1)
}

fn default_spacing() -> u32 {
    5
}

fn default_legend_ratio() -> f64 {
    LegendPosition::Bottom.default_ratio()
}

impl PlotLayoutConfig {
    pub fn validate(&self) -> PlotResult<()> {
        if let Some((axis, margin)) = self.canvas_margin.iter().find(|(_, margin)| **margin < -1) {
            return Err(PlotError::InvalidData(format!(
                "canvas margin of {axis:?} axis must be >= -1, got {margin}"
            )));
        }
        if !self.legend_ratio.is_finite() || self.legend_ratio <= 0.0 || self.legend_ratio > 1.0 {
            return Err(PlotError::InvalidData(format!(
                "legend ratio must be in (0, 1], got {}",
                self.legend_ratio
            )));
        }
        Ok(())
    }
}

/// Output rectangles of one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutRects {
    pub title: Rect,
    pub footer: Rect,
    pub legend: Rect,
    pub canvas: Rect,
    pub scales: AxisArray<Rect>,
}

/// Layout of a plot: title, footer, legend, canvas and four axes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotLayout {
    engine: LayoutEngine,
    rects: LayoutRects,
}

impl PlotLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PlotLayoutConfig) -> PlotResult<Self> {
        let mut layout = Self::new();
        layout.apply_config(config)?;
        Ok(layout)
    }

    pub fn apply_config(&mut self, config: &PlotLayoutConfig) -> PlotResult<()> {
        config.validate()?;
        for axis in AxisPosition::ALL {
            self.engine
                .set_canvas_margin(axis, config.canvas_margin[axis]);
            self.engine
                .set_align_canvas(axis, config.align_canvas_to_scale[axis]);
        }
        self.engine.set_spacing(config.spacing);
        self.set_legend_position(config.legend_position, config.legend_ratio);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> PlotLayoutConfig {
        PlotLayoutConfig {
            canvas_margin: AxisArray::from_fn(|axis| self.engine.canvas_margin(axis)),
            align_canvas_to_scale: AxisArray::from_fn(|axis| self.engine.align_canvas(axis)),
            spacing: self.engine.spacing(),
            legend_position: self.engine.legend_position(),
            legend_ratio: self.engine.legend_ratio(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub(crate) fn engine_mut(&mut self) -> &mut LayoutEngine {
        &mut self.engine
    }

    /// Sets the canvas margin of one axis, or of all axes for `None`.
    ///
    /// Margins below -1 are raised to -1. The margin has no effect on edges
    /// aligned to their scale.
    pub fn set_canvas_margin(&mut self, margin: i32, axis: Option<AxisPosition>) {
        let margin = margin.max(-1);
        match axis {
            Some(axis) => self.engine.set_canvas_margin(axis, margin),
            None => {
                for axis in AxisPosition::ALL {
                    self.engine.set_canvas_margin(axis, margin);
                }
            }
        }
    }

    #[must_use]
    pub fn canvas_margin(&self, axis: AxisPosition) -> i32 {
        self.engine.canvas_margin(axis)
    }

    pub fn set_align_canvas_to_scales(&mut self, on: bool) {
        for axis in AxisPosition::ALL {
            self.engine.set_align_canvas(axis, on);
        }
    }

    pub fn set_align_canvas_to_scale(&mut self, axis: AxisPosition, on: bool) {
        self.engine.set_align_canvas(axis, on);
    }

    #[must_use]
    pub fn align_canvas_to_scale(&self, axis: AxisPosition) -> bool {
        self.engine.align_canvas(axis)
    }

    pub fn set_spacing(&mut self, spacing: i32) {
        self.engine.set_spacing(spacing.max(0).unsigned_abs());
    }

    #[must_use]
    pub fn spacing(&self) -> u32 {
        self.engine.spacing()
    }

    /// Moves the legend. Ratios above 1 are limited to 1; non-positive
    /// ratios select the position's default.
    pub fn set_legend_position(&mut self, position: LegendPosition, ratio: f64) {
        let mut ratio = ratio.min(1.0);
        if ratio <= 0.0 || ratio.is_nan() {
            ratio = position.default_ratio();
        }
        self.engine.set_legend_ratio(ratio);
        self.engine.set_legend_position(position);
    }

    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.engine.legend_position()
    }

    pub fn set_legend_ratio(&mut self, ratio: f64) {
        self.set_legend_position(self.legend_position(), ratio);
    }

    #[must_use]
    pub fn legend_ratio(&self) -> f64 {
        self.engine.legend_ratio()
    }

    #[must_use]
    pub fn rects(&self) -> &LayoutRects {
        &self.rects
    }

    pub fn set_rects(&mut self, rects: LayoutRects) {
        self.rects = rects;
    }

    #[must_use]
    pub fn title_rect(&self) -> Rect {
        self.rects.title
    }

    pub fn set_title_rect(&mut self, rect: Rect) {
        self.rects.title = rect;
    }

    #[must_use]
    pub fn footer_rect(&self) -> Rect {
        self.rects.footer
    }

    pub fn set_footer_rect(&mut self, rect: Rect) {
        self.rects.footer = rect;
    }

    #[must_use]
    pub fn legend_rect(&self) -> Rect {
        self.rects.legend
    }

    pub fn set_legend_rect(&mut self, rect: Rect) {
        self.rects.legend = rect;
    }

    #[must_use]
    pub fn canvas_rect(&self) -> Rect {
        self.rects.canvas
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.rects.canvas = rect;
    }

    /// Rectangle of an axis. Only meaningful for visible axes.
    #[must_use]
    pub fn scale_rect(&self, axis: AxisPosition) -> Rect {
        self.rects.scales[axis]
    }

    pub fn set_scale_rect(&mut self, axis: AxisPosition, rect: Rect) {
        self.rects.scales[axis] = rect;
    }

    /// Resets every rectangle to empty.
    pub fn invalidate(&mut self) {
        self.rects = LayoutRects::default();
    }

    /// Recalculates every rectangle for a plot occupying `plot_rect`.
    ///
    /// An empty `plot_rect` leaves all rectangles empty.
    pub fn activate(&mut self, hints: &LayoutHints, plot_rect: Rect, options: LayoutOptions) {
        self.invalidate();
        if plot_rect.is_empty() {
            debug!(
                width = plot_rect.width,
                height = plot_rect.height,
                "skipping layout of empty plot rect"
            );
            return;
        }
        self.do_activate(hints, plot_rect, options);
    }

    fn do_activate(&mut self, hints: &LayoutHints, plot_rect: Rect, options: LayoutOptions) {
        let engine = &self.engine;
        let mut rect = plot_rect;

        let mut legend_hint = (0, 0);
        if !options.ignore_legend && !hints.legend.is_empty() {
            legend_hint = LayoutEngine::legend_hint(&hints.legend, rect);
            self.rects.legend = engine.layout_legend(options, &hints.legend, rect, legend_hint);
            rect = engine.remaining_after_legend(rect, self.rects.legend);
        }

        let dims = engine.layout_dimensions(options, hints, rect);
        let spacing = f64::from(engine.spacing());

        if dims.title > 0 {
            let mut label = Rect::new(rect.x, rect.y, rect.width, f64::from(dims.title));
            rect.set_top(label.bottom() + spacing);
            if !hints.has_symmetric_y_axes() {
                // A single Y axis: center over the canvas.
                label = dims.centered(rect, label);
            }
            self.rects.title = label;
        }

        if dims.footer > 0 {
            let mut label = Rect::new(
                rect.x,
                rect.bottom() - f64::from(dims.footer),
                rect.width,
                f64::from(dims.footer),
            );
            rect.set_bottom(label.top() - spacing);
            if !hints.has_symmetric_y_axes() {
                label = dims.centered(rect, label);
            }
            self.rects.footer = label;
        }

        let canvas = dims.inner_rect(rect);
        self.rects.canvas = canvas;

        for axis in AxisPosition::ALL {
            let dim = dims.axis(axis);
            if dim == 0 {
                continue;
            }
            let dim = f64::from(dim);
            let mut scale = canvas;
            match axis {
                AxisPosition::Left => {
                    scale.x = canvas.left() - dim;
                    scale.width = dim;
                }
                AxisPosition::Right => {
                    scale.x = canvas.right();
                    scale.width = dim;
                }
                AxisPosition::Bottom => {
                    scale.y = canvas.bottom();
                    scale.height = dim;
                }
                AxisPosition::Top => {
                    scale.y = canvas.top() - dim;
                    scale.height = dim;
                }
            }
            self.rects.scales[axis] = scale.normalized();
        }

        engine.align_scales(
            options,
            hints,
            &mut self.rects.canvas,
            &mut self.rects.scales,
        );

        if !self.rects.legend.is_empty() {
            // Prefer aligning the legend to the canvas over the whole plot.
            self.rects.legend = engine.align_legend(legend_hint, self.rects.canvas, self.rects.legend);
        }

        trace!(
            canvas_width = self.rects.canvas.width,
            canvas_height = self.rects.canvas.height,
            "plot layout activated"
        );
    }

    /// Smallest size in which the plot can be laid out without overlap.
    #[must_use]
    pub fn minimum_size_hint(&self, hints: &LayoutHints) -> Size {
        let scales = MinimumScaleSizes::new(self, hints);
        let margins = &hints.canvas_contents_margins;
        let spacing = self.engine.spacing() as i32;

        let mut width = scales.y_axes_width();
        let canvas_width = scales.x_axes_width()
            + margins[AxisPosition::Left]
            + 1
            + margins[AxisPosition::Right]
            + 1;
        width += canvas_width.max(hints.canvas_min_size.width.ceil() as i32);

        let mut height = scales.x_axes_height();
        let canvas_height = scales.y_axes_height()
            + margins[AxisPosition::Top]
            + 1
            + margins[AxisPosition::Bottom]
            + 1;
        height += canvas_height.max(hints.canvas_min_size.height.ceil() as i32);

        for label in [&hints.title, &hints.footer] {
            if label.is_empty() {
                continue;
            }
            let center_on_canvas = !(hints.axes[AxisPosition::Left].is_visible
                && hints.axes[AxisPosition::Right].is_visible);

            let mut label_width = width;
            if center_on_canvas {
                label_width -= scales.y_axes_width();
            }
            let mut label_height = label.height_for_width(f64::from(label_width), true);
            if label_height > label_width {
                // Very long title: trade width for height.
                label_width = label_height;
                width = label_width;
                if center_on_canvas {
                    width += scales.y_axes_width();
                }
                label_height = label.height_for_width(f64::from(label_width), true);
            }
            height += label_height + spacing;
        }

        let legend = &hints.legend;
        if !legend.is_empty() {
            let ratio = self.engine.legend_ratio();
            let (hint_width, _) = legend.size_hint();
            if self.engine.legend_position().is_vertical_band() {
                let mut legend_width = hint_width;
                let legend_height = legend.height_for_width(legend_width);
                if legend.frame_width > 0 {
                    width += spacing;
                }
                if legend_height > height {
                    legend_width += legend.h_scroll_extent;
                }
                if ratio < 1.0 {
                    legend_width = legend_width.min((f64::from(width) / (1.0 - ratio)) as i32);
                }
                width += legend_width + spacing;
            } else {
                let legend_width = hint_width.min(width);
                let mut legend_height = legend.height_for_width(legend_width);
                if legend.frame_width > 0 {
                    height += spacing;
                }
                if ratio < 1.0 {
                    legend_height = legend_height.min((f64::from(height) / (1.0 - ratio)) as i32);
                }
                height += legend_height + spacing;
            }
        }

        Size::new(f64::from(width), f64::from(height))
    }
}

/// Minimum axis sizes, reduced where border distances reach into the
/// orthogonal axes.
struct MinimumScaleSizes {
    widths: AxisArray<i32>,
    heights: AxisArray<i32>,
}

impl MinimumScaleSizes {
    fn new(layout: &PlotLayout, hints: &LayoutHints) -> Self {
        let canvas_border = AxisArray::from_fn(|axis| {
            hints.canvas_contents_margins[axis] + layout.canvas_margin(axis) + 1
        });
        let visible = |axis: AxisPosition| hints.axes[axis].is_visible;
        let widths = AxisArray::from_fn(|axis| {
            if visible(axis) { hints.axes[axis].min_width } else { 0 }
        });
        let heights = AxisArray::from_fn(|axis| {
            if visible(axis) { hints.axes[axis].min_height } else { 0 }
        });
        let tick_offsets = AxisArray::from_fn(|axis| hints.tick_offset(axis).ceil() as i32);

        let aligned = AxisArray::from_fn(|axis| {
            let hint = &hints.axes[axis];
            if axis.is_x_axis() && widths[axis] != 0 {
                let mut width = widths[axis];
                let left_width = widths[AxisPosition::Left];
                if left_width != 0 {
                    let shift = hint.start_border_dist - canvas_border[AxisPosition::Left];
                    if shift > 0 {
                        width -= shift.min(left_width);
                    }
                }
                let right_width = widths[AxisPosition::Right];
                if right_width != 0 {
                    let shift = hint.end_border_dist - canvas_border[AxisPosition::Right];
                    if shift > 0 {
                        width -= shift.min(right_width);
                    }
                }
                width
            } else if axis.is_y_axis() && heights[axis] != 0 {
                let mut height = heights[axis];
                if heights[AxisPosition::Bottom] != 0 {
                    let shift = hint.start_border_dist - canvas_border[AxisPosition::Bottom];
                    if shift > 0 {
                        height -= shift.min(tick_offsets[AxisPosition::Bottom]);
                    }
                }
                if heights[AxisPosition::Top] != 0 {
                    let shift = hint.end_border_dist - canvas_border[AxisPosition::Top];
                    if shift > 0 {
                        height -= shift.min(tick_offsets[AxisPosition::Top]);
                    }
                }
                height
            } else {
                0
            }
        });

        let mut sizes = Self { widths, heights };
        for axis in AxisPosition::ALL {
            if axis.is_x_axis() {
                sizes.widths[axis] = aligned[axis];
            } else {
                sizes.heights[axis] = aligned[axis];
            }
        }
        sizes
    }

    fn y_axes_width(&self) -> i32 {
        self.widths[AxisPosition::Left] + self.widths[AxisPosition::Right]
    }

    fn y_axes_height(&self) -> i32 {
        self.heights[AxisPosition::Left].max(self.heights[AxisPosition::Right])
    }

    fn x_axes_height(&self) -> i32 {
        self.heights[AxisPosition::Top] + self.heights[AxisPosition::Bottom]
    }

    fn x_axes_width(&self) -> i32 {
        self.widths[AxisPosition::Top].max(self.widths[AxisPosition::Bottom])
    }
}
