use tracing::{debug, trace};

use crate::core::scale_engine::MAX_MAJOR_TICKS;
use crate::core::{
    AxisArray, AxisPosition, Interval, Rect, ScaleDivision, ScaleEngine, ScaleEngineKind,
    ScaleMap,
};
use crate::interaction::{AxisScales, ZoomState, ZoomStateStack};
use crate::layout::{LayoutHints, LayoutOptions, ParasiteLayout, PlotLayout};

const DEFAULT_MAX_MAJOR: usize = 8;
const DEFAULT_MAX_MINOR: usize = 5;
const MAX_MINOR_TICKS: usize = 100;

/// Scale state of one axis of a [`Plot`].
#[derive(Debug, Clone, PartialEq)]
pub struct AxisScaleState {
    engine: ScaleEngineKind,
    visible: bool,
    auto_scale: bool,
    min_value: f64,
    max_value: f64,
    step_size: f64,
    max_major: usize,
    max_minor: usize,
    scale_div: ScaleDivision,
}

impl AxisScaleState {
    fn new(visible: bool) -> Self {
        let mut state = Self {
            engine: ScaleEngineKind::default(),
            visible,
            auto_scale: true,
            min_value: 0.0,
            max_value: 1000.0,
            step_size: 0.0,
            max_major: DEFAULT_MAX_MAJOR,
            max_minor: DEFAULT_MAX_MINOR,
            scale_div: ScaleDivision::default(),
        };
        state.rebuild_division();
        state
    }

    fn rebuild_division(&mut self) {
        self.scale_div = self.engine.divide_scale(
            self.min_value,
            self.max_value,
            self.max_major,
            self.max_minor,
            self.step_size,
        );
    }

    #[must_use]
    pub fn engine(&self) -> &ScaleEngineKind {
        &self.engine
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn auto_scale(&self) -> bool {
        self.auto_scale
    }

    #[must_use]
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    #[must_use]
    pub fn max_major(&self) -> usize {
        self.max_major
    }

    #[must_use]
    pub fn max_minor(&self) -> usize {
        self.max_minor
    }

    #[must_use]
    pub fn scale_div(&self) -> &ScaleDivision {
        &self.scale_div
    }
}

/// Layout flavour of a plot.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotLayoutKind {
    Standard(PlotLayout),
    Parasite(ParasiteLayout),
}

impl PlotLayoutKind {
    #[must_use]
    pub fn plot_layout(&self) -> &PlotLayout {
        match self {
            Self::Standard(layout) => layout,
            Self::Parasite(parasite) => parasite.layout(),
        }
    }

    pub fn plot_layout_mut(&mut self) -> &mut PlotLayout {
        match self {
            Self::Standard(layout) => layout,
            Self::Parasite(parasite) => parasite.layout_mut(),
        }
    }
}

/// One coordinate system: four axes with their scales, a layout and a zoom
/// history.
///
/// Scale divisions are recomputed as soon as a scale parameter changes.
#[derive(Debug, Clone)]
pub struct Plot {
    axes: AxisArray<AxisScaleState>,
    layout: PlotLayoutKind,
    hints: LayoutHints,
    layout_options: LayoutOptions,
    shared_axes: AxisArray<bool>,
    zoom: ZoomStateStack,
    visible: bool,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

impl Plot {
    /// Plot with the left and bottom axes enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(PlotLayoutKind::Standard(PlotLayout::new()))
    }

    #[must_use]
    pub fn with_layout(layout: PlotLayoutKind) -> Self {
        Self {
            axes: AxisArray::from_fn(|axis| {
                AxisScaleState::new(matches!(axis, AxisPosition::Left | AxisPosition::Bottom))
            }),
            layout,
            hints: LayoutHints::default(),
            layout_options: LayoutOptions::default(),
            shared_axes: AxisArray::splat(false),
            zoom: ZoomStateStack::new(),
            visible: true,
        }
    }

    /// Parasite plot showing only `enabled_axis`.
    #[must_use]
    pub(crate) fn parasite(enabled_axis: AxisPosition) -> Self {
        let mut plot = Self::with_layout(PlotLayoutKind::Parasite(ParasiteLayout::new()));
        for axis in AxisPosition::ALL {
            plot.axes[axis].visible = axis == enabled_axis;
        }
        plot
    }

    /// Hidden plots keep their geometry when the figure is laid out.
    pub fn set_visible(&mut self, on: bool) {
        self.visible = on;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn axis(&self, axis: AxisPosition) -> &AxisScaleState {
        &self.axes[axis]
    }

    pub fn enable_axis(&mut self, axis: AxisPosition, on: bool) {
        self.axes[axis].visible = on;
    }

    #[must_use]
    pub fn is_axis_visible(&self, axis: AxisPosition) -> bool {
        self.axes[axis].visible
    }

    pub fn set_axis_scale_engine(&mut self, axis: AxisPosition, engine: ScaleEngineKind) {
        let state = &mut self.axes[axis];
        state.engine = engine;
        state.rebuild_division();
    }

    /// Fixes the range of `axis` and turns its auto scaling off.
    ///
    /// A `step_size` of 0 lets the scale engine pick one.
    pub fn set_axis_scale(&mut self, axis: AxisPosition, min: f64, max: f64, step_size: f64) {
        let state = &mut self.axes[axis];
        if !state.auto_scale
            && state.min_value == min
            && state.max_value == max
            && state.step_size == step_size
        {
            return;
        }
        state.auto_scale = false;
        state.min_value = min;
        state.max_value = max;
        state.step_size = step_size;
        state.rebuild_division();
        trace!(?axis, min, max, step_size, "axis scale set");
    }

    /// Installs a ready-made division and turns auto scaling off.
    pub fn set_axis_scale_div(&mut self, axis: AxisPosition, scale_div: ScaleDivision) {
        let state = &mut self.axes[axis];
        if !state.auto_scale && state.scale_div.fuzzy_eq(&scale_div) {
            return;
        }
        state.auto_scale = false;
        state.min_value = scale_div.lower_bound();
        state.max_value = scale_div.upper_bound();
        state.scale_div = scale_div;
    }

    pub fn set_axis_auto_scale(&mut self, axis: AxisPosition, on: bool) {
        self.axes[axis].auto_scale = on;
    }

    #[must_use]
    pub fn axis_auto_scale(&self, axis: AxisPosition) -> bool {
        self.axes[axis].auto_scale
    }

    /// Clamped to `[1, 10000]`.
    pub fn set_axis_max_major(&mut self, axis: AxisPosition, max_major: usize) {
        let state = &mut self.axes[axis];
        let max_major = max_major.clamp(1, MAX_MAJOR_TICKS);
        if state.max_major != max_major {
            state.max_major = max_major;
            state.rebuild_division();
        }
    }

    /// Clamped to `[0, 100]`.
    pub fn set_axis_max_minor(&mut self, axis: AxisPosition, max_minor: usize) {
        let state = &mut self.axes[axis];
        let max_minor = max_minor.min(MAX_MINOR_TICKS);
        if state.max_minor != max_minor {
            state.max_minor = max_minor;
            state.rebuild_division();
        }
    }

    #[must_use]
    pub fn axis_scale_div(&self, axis: AxisPosition) -> &ScaleDivision {
        &self.axes[axis].scale_div
    }

    #[must_use]
    pub fn axis_step_size(&self, axis: AxisPosition) -> f64 {
        self.axes[axis].step_size
    }

    /// Fits `axis` to the bounding interval of its data when auto scaling is
    /// on. Returns whether the division changed.
    pub fn autoscale_axis(&mut self, axis: AxisPosition, data: Interval) -> bool {
        let state = &mut self.axes[axis];
        if !state.auto_scale || !data.is_valid() {
            return false;
        }
        let data = data.normalized();
        let fitted = state
            .engine
            .auto_scale(state.max_major, data.min_value(), data.max_value());
        state.min_value = fitted.x1;
        state.max_value = fitted.x2;
        state.step_size = fitted.step_size;
        let previous = std::mem::take(&mut state.scale_div);
        state.rebuild_division();
        debug!(
            ?axis,
            lower = fitted.x1,
            upper = fitted.x2,
            step = fitted.step_size,
            "axis auto scaled"
        );
        previous != state.scale_div
    }

    /// Copies the scale of `axis` from `other`.
    pub fn sync_axis(&mut self, axis: AxisPosition, other: &Plot) {
        let interval = other.axis_scale_div(axis).interval();
        self.set_axis_scale(
            axis,
            interval.min_value(),
            interval.max_value(),
            other.axis_step_size(axis),
        );
    }

    #[must_use]
    pub fn is_axis_shared(&self, axis: AxisPosition) -> bool {
        self.shared_axes[axis]
    }

    pub(crate) fn set_axis_shared(&mut self, axis: AxisPosition, on: bool) {
        self.shared_axes[axis] = on;
    }

    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        self.layout.plot_layout()
    }

    pub fn layout_mut(&mut self) -> &mut PlotLayout {
        self.layout.plot_layout_mut()
    }

    #[must_use]
    pub fn layout_kind(&self) -> &PlotLayoutKind {
        &self.layout
    }

    /// Parasite layout of a parasite plot, `None` for a host.
    #[must_use]
    pub fn parasite_layout(&self) -> Option<&ParasiteLayout> {
        match &self.layout {
            PlotLayoutKind::Parasite(parasite) => Some(parasite),
            PlotLayoutKind::Standard(_) => None,
        }
    }

    pub fn parasite_layout_mut(&mut self) -> Option<&mut ParasiteLayout> {
        match &mut self.layout {
            PlotLayoutKind::Parasite(parasite) => Some(parasite),
            PlotLayoutKind::Standard(_) => None,
        }
    }

    #[must_use]
    pub fn hints(&self) -> &LayoutHints {
        &self.hints
    }

    pub fn set_hints(&mut self, hints: LayoutHints) {
        self.hints = hints;
    }

    #[must_use]
    pub fn layout_options(&self) -> LayoutOptions {
        self.layout_options
    }

    pub fn set_layout_options(&mut self, options: LayoutOptions) {
        self.layout_options = options;
    }

    /// Layout hints with hidden axes switched off.
    #[must_use]
    pub fn effective_hints(&self) -> LayoutHints {
        let mut hints = self.hints.clone();
        for axis in AxisPosition::ALL {
            hints.axes[axis].is_visible &= self.axes[axis].visible;
        }
        hints
    }

    /// Runs the layout pass of this plot. `host` is only consulted by
    /// parasite layouts.
    pub fn activate_layout(&mut self, host: Option<&PlotLayout>, rect: Rect) {
        let hints = self.effective_hints();
        match &mut self.layout {
            PlotLayoutKind::Standard(layout) => layout.activate(&hints, rect, self.layout_options),
            PlotLayoutKind::Parasite(parasite) => {
                parasite.activate(host, &hints, rect, self.layout_options);
            }
        }
    }

    /// Value to pixel maps of every visible axis over the current canvas.
    #[must_use]
    pub fn canvas_maps(&self) -> AxisArray<Option<ScaleMap>> {
        let canvas = self.layout().canvas_rect();
        AxisArray::from_fn(|axis| {
            let state = &self.axes[axis];
            if !state.visible {
                return None;
            }
            let (p1, p2) = if axis.is_x_axis() {
                (canvas.left(), canvas.right())
            } else {
                (canvas.bottom(), canvas.top())
            };
            Some(ScaleMap::new(
                state.engine.transformation(),
                state.scale_div.lower_bound(),
                state.scale_div.upper_bound(),
                p1,
                p2,
            ))
        })
    }

    #[must_use]
    pub fn zoom_stack(&self) -> &ZoomStateStack {
        &self.zoom
    }

    pub fn zoom_stack_mut(&mut self) -> &mut ZoomStateStack {
        &mut self.zoom
    }

    /// Captures the current axes as the zoom base.
    pub fn set_zoom_base(&mut self) {
        let state = ZoomState::capture(&*self);
        self.zoom.set_zoom_base(state);
    }

    /// Pushes the current axes onto the zoom history.
    pub fn push_zoom_state(&mut self) -> bool {
        let state = ZoomState::capture(&*self);
        self.zoom.push(state)
    }

    /// Navigates the zoom history and applies the selected state.
    pub fn zoom_step(&mut self, offset: isize) {
        let state = self.zoom.step_by(offset);
        state.apply_to(self);
    }

    /// Zooms into a selected canvas rectangle.
    pub fn zoom_to_canvas_rect(&mut self, rect: Rect) -> bool {
        if self.zoom.is_empty() {
            self.set_zoom_base();
        }
        let maps = self.canvas_maps();
        if !self.zoom.zoom_to_canvas_rect(rect, &maps) {
            return false;
        }
        let state = self.zoom.zoom_state();
        state.apply_to(self);
        true
    }

    /// Pans by a pixel drag, editing the current zoom entry in place.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) -> bool {
        if self.zoom.is_empty() {
            self.set_zoom_base();
        }
        let maps = self.canvas_maps();
        if !self.zoom.move_by_pixels(dx, dy, &maps) {
            return false;
        }
        let state = self.zoom.zoom_state();
        state.apply_to(self);
        true
    }
}

impl AxisScales for Plot {
    fn is_axis_visible(&self, axis: AxisPosition) -> bool {
        self.axes[axis].visible
    }

    fn axis_interval(&self, axis: AxisPosition) -> Interval {
        self.axes[axis].scale_div.interval()
    }

    fn set_axis_interval(&mut self, axis: AxisPosition, interval: Interval) {
        self.set_axis_scale(axis, interval.lower(), interval.upper(), 0.0);
    }
}
