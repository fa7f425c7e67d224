//! Geometry solver shared by plot and parasite layouts.
//!
//! The solver works in two phases. [`LayoutEngine::layout_dimensions`]
//! finds the thickness of the title, the footer and every axis by iterating
//! to a fixed point, because wrapping a label on one side changes the space
//! left for the orthogonal side. The alignment passes then turn those
//! thicknesses into rectangles whose tick backbones line up.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{AxisArray, AxisPosition, Rect};
use crate::layout::hints::{LabelHint, LayoutHints, LegendHint};

/// Upper bound of solver iterations: twice the number of dynamic components
/// (title, footer and four axes).
pub const MAX_LAYOUT_ITERATIONS: usize = 12;

/// Side of the plot claimed by the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPosition {
    Left,
    Right,
    #[default]
    Bottom,
    Top,
}

impl LegendPosition {
    #[must_use]
    pub const fn is_vertical_band(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Ratio used when a caller passes a non-positive one.
    #[must_use]
    pub const fn default_ratio(self) -> f64 {
        if self.is_vertical_band() { 0.5 } else { 0.33 }
    }
}

/// Flags that switch parts of the layout off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Never reserve space for legend scrollbars.
    #[serde(default)]
    pub ignore_scrollbars: bool,
    /// Ignore frame widths of labels and canvas contents margins.
    #[serde(default)]
    pub ignore_frames: bool,
    #[serde(default)]
    pub ignore_legend: bool,
    #[serde(default)]
    pub ignore_title: bool,
    #[serde(default)]
    pub ignore_footer: bool,
}

/// Thickness of every dynamic component, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub title: i32,
    pub footer: i32,
    pub axes: AxisArray<i32>,
}

impl Dimensions {
    #[must_use]
    pub fn axis(&self, axis: AxisPosition) -> i32 {
        self.axes[axis]
    }

    #[must_use]
    pub fn y_axes(&self) -> i32 {
        self.axes[AxisPosition::Left] + self.axes[AxisPosition::Right]
    }

    #[must_use]
    pub fn x_axes(&self) -> i32 {
        self.axes[AxisPosition::Bottom] + self.axes[AxisPosition::Top]
    }

    /// `label` stretched over the canvas columns of `rect`.
    #[must_use]
    pub fn centered(&self, rect: Rect, label: Rect) -> Rect {
        Rect::new(
            rect.left() + f64::from(self.axes[AxisPosition::Left]),
            label.y,
            rect.width - f64::from(self.y_axes()),
            label.height,
        )
    }

    /// `rect` without the axis strips, collapsed onto its center when the
    /// axes do not fit.
    #[must_use]
    pub fn inner_rect(&self, rect: Rect) -> Rect {
        let mut inner = Rect::new(
            rect.x + f64::from(self.axes[AxisPosition::Left]),
            rect.y + f64::from(self.axes[AxisPosition::Top]),
            rect.width - f64::from(self.y_axes()),
            rect.height - f64::from(self.x_axes()),
        );
        let (center_x, center_y) = rect.center();
        if inner.width < 0.0 {
            inner.x = center_x;
            inner.width = 0.0;
        }
        if inner.height < 0.0 {
            inner.y = center_y;
            inner.height = 0.0;
        }
        inner
    }
}

/// Layout parameters and the solver operating on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEngine {
    legend_position: LegendPosition,
    legend_ratio: f64,
    canvas_margin: AxisArray<i32>,
    align_canvas: AxisArray<bool>,
    spacing: u32,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            legend_position: LegendPosition::Bottom,
            legend_ratio: LegendPosition::Bottom.default_ratio(),
            canvas_margin: AxisArray::splat(-1),
            align_canvas: AxisArray::splat(false),
            spacing: 5,
        }
    }
}

impl LayoutEngine {
    #[must_use]
    pub fn legend_position(&self) -> LegendPosition {
        self.legend_position
    }

    pub fn set_legend_position(&mut self, position: LegendPosition) {
        self.legend_position = position;
    }

    #[must_use]
    pub fn legend_ratio(&self) -> f64 {
        self.legend_ratio
    }

    pub fn set_legend_ratio(&mut self, ratio: f64) {
        self.legend_ratio = ratio;
    }

    #[must_use]
    pub fn canvas_margin(&self, axis: AxisPosition) -> i32 {
        self.canvas_margin[axis]
    }

    pub fn set_canvas_margin(&mut self, axis: AxisPosition, margin: i32) {
        self.canvas_margin[axis] = margin;
    }

    #[must_use]
    pub fn align_canvas(&self, axis: AxisPosition) -> bool {
        self.align_canvas[axis]
    }

    pub fn set_align_canvas(&mut self, axis: AxisPosition, on: bool) {
        self.align_canvas[axis] = on;
    }

    #[must_use]
    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
    }

    fn spacing_f64(&self) -> f64 {
        f64::from(self.spacing)
    }

    fn backbone_offsets(&self, options: LayoutOptions, hints: &LayoutHints) -> AxisArray<i32> {
        AxisArray::from_fn(|axis| {
            let mut offset = 0;
            if !self.align_canvas[axis] {
                offset += self.canvas_margin[axis];
            }
            if !options.ignore_frames {
                offset += hints.canvas_contents_margins[axis];
            }
            offset
        })
    }

    /// Preferred legend size inside `rect`, width limited to the rect.
    #[must_use]
    pub fn legend_hint(legend: &LegendHint, rect: Rect) -> (i32, i32) {
        let (hint_width, hint_height) = legend.size_hint();
        let width = hint_width.min(rect.width.floor() as i32);
        let mut height = legend.height_for_width(width);
        if height <= 0 {
            height = hint_height;
        }
        (width, height)
    }

    /// Band of `rect` claimed by the legend.
    #[must_use]
    pub fn layout_legend(
        &self,
        options: LayoutOptions,
        legend: &LegendHint,
        rect: Rect,
        legend_hint: (i32, i32),
    ) -> Rect {
        let (hint_width, hint_height) = legend_hint;
        let dim = if self.legend_position.is_vertical_band() {
            let mut dim = hint_width.min((rect.width * self.legend_ratio) as i32);
            if !options.ignore_scrollbars && f64::from(hint_height) > rect.height {
                // Room for the vertical scrollbar.
                dim += legend.h_scroll_extent;
            }
            dim
        } else {
            hint_height
                .min((rect.height * self.legend_ratio) as i32)
                .max(legend.v_scroll_extent)
        };
        let dim = f64::from(dim);

        let mut legend_rect = rect;
        match self.legend_position {
            LegendPosition::Left => legend_rect.width = dim,
            LegendPosition::Right => {
                legend_rect.x = rect.right() - dim;
                legend_rect.width = dim;
            }
            LegendPosition::Top => legend_rect.height = dim,
            LegendPosition::Bottom => {
                legend_rect.y = rect.bottom() - dim;
                legend_rect.height = dim;
            }
        }
        legend_rect
    }

    /// `rect` minus the legend band and the spacing next to it.
    #[must_use]
    pub fn remaining_after_legend(&self, rect: Rect, legend_rect: Rect) -> Rect {
        let mut remaining = rect;
        let spacing = self.spacing_f64();
        match self.legend_position {
            LegendPosition::Left => remaining.set_left(legend_rect.right() + spacing),
            LegendPosition::Right => remaining.set_right(legend_rect.left() - spacing),
            LegendPosition::Top => remaining.set_top(legend_rect.bottom() + spacing),
            LegendPosition::Bottom => remaining.set_bottom(legend_rect.top() - spacing),
        }
        remaining.clamped_non_negative()
    }

    /// Stretches the legend along the canvas edge when it is shorter than
    /// the canvas.
    #[must_use]
    pub fn align_legend(&self, legend_hint: (i32, i32), canvas: Rect, legend_rect: Rect) -> Rect {
        let mut aligned = legend_rect;
        if self.legend_position.is_vertical_band() {
            if f64::from(legend_hint.1) < canvas.height {
                aligned.y = canvas.y;
                aligned.height = canvas.height;
            }
        } else if f64::from(legend_hint.0) < canvas.width {
            aligned.x = canvas.x;
            aligned.width = canvas.width;
        }
        aligned
    }

    fn label_height(
        &self,
        label: &LabelHint,
        options: LayoutOptions,
        hints: &LayoutHints,
        width: f64,
        axes_width: i32,
    ) -> i32 {
        if label.is_empty() {
            return 0;
        }
        let mut width = width;
        if !hints.has_symmetric_y_axes() {
            // Centered over the canvas only.
            width -= f64::from(axes_width);
        }
        label.height_for_width(width, !options.ignore_frames)
    }

    /// One solver step: every component recomputed from `previous`.
    ///
    /// Components only ever grow, so iterating this function reaches a
    /// fixed point.
    #[must_use]
    pub fn next_dimensions(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        rect: Rect,
        previous: Dimensions,
    ) -> Dimensions {
        let backbone = self.backbone_offsets(options, hints);
        let mut dims = previous;

        if !options.ignore_title {
            let d = self.label_height(&hints.title, options, hints, rect.width, dims.y_axes());
            dims.title = dims.title.max(d);
        }
        if !options.ignore_footer {
            let d = self.label_height(&hints.footer, options, hints, rect.width, dims.y_axes());
            dims.footer = dims.footer.max(d);
        }

        for axis in AxisPosition::ALL {
            let hint = &hints.axes[axis];
            if !hint.is_visible {
                continue;
            }
            let start = hint.start_border_dist;
            let end = hint.end_border_dist;

            let length = if axis.is_x_axis() {
                let left = dims.axes[AxisPosition::Left];
                let right = dims.axes[AxisPosition::Right];
                let mut length = rect.width - f64::from(dims.y_axes());
                length -= f64::from(start + end);
                if right > 0 {
                    length -= 1.0;
                }
                length += f64::from(left.min(start - backbone[AxisPosition::Left]));
                length += f64::from(right.min(end - backbone[AxisPosition::Right]));
                length
            } else {
                let bottom = dims.axes[AxisPosition::Bottom];
                let top = dims.axes[AxisPosition::Top];
                let mut length = rect.height - f64::from(dims.x_axes());
                length -= f64::from(start + end);
                length -= 1.0;
                if bottom <= 0 {
                    length -= 1.0;
                }
                if top <= 0 {
                    length -= 1.0;
                }
                // Y labels sit beside the X backbones but must not overlap
                // the X labels.
                if bottom > 0 {
                    length += hints
                        .tick_offset(AxisPosition::Bottom)
                        .min(f64::from(start - backbone[AxisPosition::Bottom]));
                }
                if top > 0 {
                    length += hints
                        .tick_offset(AxisPosition::Top)
                        .min(f64::from(end - backbone[AxisPosition::Top]));
                }
                if dims.title > 0 {
                    length -= f64::from(dims.title) + self.spacing_f64();
                }
                length
            };

            let d = hint.dimension_for_length(length);
            dims.axes[axis] = dims.axes[axis].max(d);
        }
        dims
    }

    /// Thickness of title, footer and axes inside `rect`.
    #[must_use]
    pub fn layout_dimensions(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        rect: Rect,
    ) -> Dimensions {
        let mut dims = Dimensions::default();
        for iteration in 1..=MAX_LAYOUT_ITERATIONS {
            let next = self.next_dimensions(options, hints, rect, dims);
            if next == dims {
                trace!(iterations = iteration, "layout dimensions converged");
                return dims;
            }
            dims = next;
        }
        warn!(
            max_iterations = MAX_LAYOUT_ITERATIONS,
            "layout dimensions did not converge"
        );
        dims
    }

    /// Reconciles tick backbones with the canvas, moving canvas edges when
    /// an edge is aligned to its scale.
    pub fn align_scales(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        canvas: &mut Rect,
        scale_rects: &mut AxisArray<Rect>,
    ) {
        self.shift_scales(options, hints, Some(canvas), scale_rects);
        self.realign_scales(options, hints, *canvas, scale_rects);
    }

    /// Like [`LayoutEngine::align_scales`] but the canvas stays fixed and
    /// only the axis rectangles move.
    pub fn align_scales_to_canvas(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        canvas: Rect,
        scale_rects: &mut AxisArray<Rect>,
    ) {
        self.shift_scales(options, hints, None, scale_rects);
        self.realign_scales(options, hints, canvas, scale_rects);
    }

    fn shift_scales(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        mut canvas: Option<&mut Rect>,
        scale_rects: &mut AxisArray<Rect>,
    ) {
        use AxisPosition::{Bottom, Left, Right, Top};

        let backbone = self.backbone_offsets(options, hints);
        let align = &self.align_canvas;

        for axis in AxisPosition::ALL {
            let mut axis_rect = scale_rects[axis];
            if !axis_rect.is_valid() {
                continue;
            }
            let start = hints.axes[axis].start_border_dist;
            let end = hints.axes[axis].end_border_dist;

            if axis.is_x_axis() {
                let left_rect = scale_rects[Left];
                let left_offset = backbone[Left] - start;
                if left_rect.is_valid() {
                    let dx = f64::from(left_offset) + left_rect.width;
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Left] && dx < 0.0 => {
                            // The axis needs more room than the left scale.
                            canvas.set_left(canvas.left().max(axis_rect.left() - dx));
                        }
                        _ => {
                            let left = axis_rect.left() + f64::from(left_offset);
                            axis_rect.set_left(left.max(left_rect.left()));
                        }
                    }
                } else {
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Left] && left_offset < 0 => {
                            canvas.set_left(
                                canvas
                                    .left()
                                    .max(axis_rect.left() - f64::from(left_offset)),
                            );
                        }
                        _ => {
                            if left_offset > 0 {
                                axis_rect.set_left(axis_rect.left() + f64::from(left_offset));
                            }
                        }
                    }
                }

                let right_rect = scale_rects[Right];
                let right_offset = backbone[Right] - end + 1;
                if right_rect.is_valid() {
                    let dx = f64::from(right_offset) + right_rect.width;
                    if let Some(canvas) = canvas.as_deref_mut() {
                        if align[Right] && dx < 0.0 {
                            canvas.set_right(canvas.right().min(axis_rect.right() + dx));
                        }
                    }
                    let right = axis_rect.right() - f64::from(right_offset);
                    axis_rect.set_right(right.min(right_rect.right()));
                } else {
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Right] && right_offset < 0 => {
                            canvas.set_right(
                                canvas
                                    .right()
                                    .min(axis_rect.right() + f64::from(right_offset)),
                            );
                        }
                        _ => {
                            if right_offset > 0 {
                                axis_rect.set_right(axis_rect.right() - f64::from(right_offset));
                            }
                        }
                    }
                }
            } else {
                let bottom_rect = scale_rects[Bottom];
                let bottom_offset = backbone[Bottom] - end + 1;
                if bottom_rect.is_valid() {
                    let dy = f64::from(bottom_offset) + bottom_rect.height;
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Bottom] && dy < 0.0 => {
                            canvas.set_bottom(canvas.bottom().min(axis_rect.bottom() + dy));
                        }
                        _ => {
                            let max_bottom = bottom_rect.top() + hints.tick_offset(Bottom);
                            let bottom = axis_rect.bottom() - f64::from(bottom_offset);
                            axis_rect.set_bottom(bottom.min(max_bottom));
                        }
                    }
                } else {
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Bottom] && bottom_offset < 0 => {
                            canvas.set_bottom(
                                canvas
                                    .bottom()
                                    .min(axis_rect.bottom() + f64::from(bottom_offset)),
                            );
                        }
                        _ => {
                            if bottom_offset > 0 {
                                axis_rect
                                    .set_bottom(axis_rect.bottom() - f64::from(bottom_offset));
                            }
                        }
                    }
                }

                let top_rect = scale_rects[Top];
                let top_offset = backbone[Top] - start;
                if top_rect.is_valid() {
                    let dy = f64::from(top_offset) + top_rect.height;
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Top] && dy < 0.0 => {
                            canvas.set_top(canvas.top().max(axis_rect.top() - dy));
                        }
                        _ => {
                            let min_top = top_rect.bottom() - hints.tick_offset(Top);
                            let top = axis_rect.top() + f64::from(top_offset);
                            axis_rect.set_top(top.max(min_top));
                        }
                    }
                } else {
                    match canvas.as_deref_mut() {
                        Some(canvas) if align[Top] && top_offset < 0 => {
                            canvas.set_top(
                                canvas.top().max(axis_rect.top() - f64::from(top_offset)),
                            );
                        }
                        _ => {
                            if top_offset > 0 {
                                axis_rect.set_top(axis_rect.top() + f64::from(top_offset));
                            }
                        }
                    }
                }
            }

            scale_rects[axis] = axis_rect;
        }
    }

    /// Snaps the scales to the final canvas on every aligned edge.
    fn realign_scales(
        &self,
        options: LayoutOptions,
        hints: &LayoutHints,
        canvas: Rect,
        scale_rects: &mut AxisArray<Rect>,
    ) {
        use AxisPosition::{Bottom, Left, Right, Top};

        let margins = &hints.canvas_contents_margins;
        let frame = |axis: AxisPosition| {
            if options.ignore_frames {
                0.0
            } else {
                f64::from(margins[axis])
            }
        };

        for axis in AxisPosition::ALL {
            let rect = &mut scale_rects[axis];
            if !rect.is_valid() {
                continue;
            }
            let start = f64::from(hints.axes[axis].start_border_dist);
            let end = f64::from(hints.axes[axis].end_border_dist);

            if axis.is_x_axis() {
                if self.align_canvas[Left] {
                    rect.set_left(canvas.left() - start + frame(Left));
                }
                if self.align_canvas[Right] {
                    rect.set_right(canvas.right() - 1.0 + end - frame(Right));
                }
                if self.align_canvas[axis] {
                    if axis == Top {
                        rect.set_bottom(canvas.top());
                    } else {
                        rect.set_top(canvas.bottom());
                    }
                }
            } else {
                if self.align_canvas[Top] {
                    rect.set_top(canvas.top() - start + frame(Top));
                }
                if self.align_canvas[Bottom] {
                    rect.set_bottom(canvas.bottom() - 1.0 + end - frame(Bottom));
                }
                if self.align_canvas[axis] {
                    if axis == Left {
                        rect.set_right(canvas.left());
                    } else {
                        rect.set_left(canvas.right());
                    }
                }
            }
        }
    }
}
