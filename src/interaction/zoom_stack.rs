use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{AxisArray, AxisPosition, Interval, Rect, ScaleMap, Size};
use crate::error::{PlotError, PlotResult};

/// Read/write access to the current interval of every axis of a plot.
pub trait AxisScales {
    fn is_axis_visible(&self, axis: AxisPosition) -> bool;

    fn axis_interval(&self, axis: AxisPosition) -> Interval;

    fn set_axis_interval(&mut self, axis: AxisPosition, interval: Interval);
}

/// Snapshot of the visible axis intervals of a plot.
///
/// Axes that were hidden at capture time have no entry and are left alone
/// when the snapshot is applied.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomState {
    intervals: AxisArray<Option<Interval>>,
}

impl ZoomState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_interval(mut self, axis: AxisPosition, interval: Interval) -> Self {
        self.intervals[axis] = Some(interval);
        self
    }

    #[must_use]
    pub fn interval(&self, axis: AxisPosition) -> Option<Interval> {
        self.intervals[axis]
    }

    pub fn set_interval(&mut self, axis: AxisPosition, interval: Option<Interval>) {
        self.intervals[axis] = interval;
    }

    /// At least one axis carries a usable interval.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.intervals
            .iter()
            .any(|(_, interval)| interval.is_some_and(Interval::is_valid))
    }

    /// Intervals of every visible axis of `scales`.
    #[must_use]
    pub fn capture(scales: &impl AxisScales) -> Self {
        Self {
            intervals: AxisArray::from_fn(|axis| {
                scales
                    .is_axis_visible(axis)
                    .then(|| scales.axis_interval(axis))
            }),
        }
    }

    /// Writes every valid interval back to its axis, if that axis is visible.
    pub fn apply_to(&self, scales: &mut impl AxisScales) {
        for (axis, interval) in self.intervals.iter() {
            let Some(interval) = interval.filter(|interval| interval.is_valid()) else {
                continue;
            };
            if scales.is_axis_visible(axis) {
                scales.set_axis_interval(
                    axis,
                    Interval::new(interval.min_value(), interval.max_value()),
                );
            }
        }
    }

    /// Moves X intervals by `dx` and Y intervals by `dy`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            intervals: self.intervals.map(|axis, interval| {
                let delta = if axis.is_x_axis() { dx } else { dy };
                interval
                    .filter(|interval| interval.is_valid())
                    .map(|interval| {
                        Interval::new(interval.min_value() + delta, interval.max_value() + delta)
                    })
                    .or(interval)
            }),
        }
    }

    /// Per-axis intervals covered by a selected canvas rectangle.
    ///
    /// Axes without a map are left out of the state.
    #[must_use]
    pub fn from_canvas_rect(rect: Rect, maps: &AxisArray<Option<ScaleMap>>) -> Self {
        let rect = rect.normalized();
        Self {
            intervals: maps.map(|axis, map| {
                map.map(|map| {
                    if axis.is_x_axis() {
                        map.pixel_range_to_interval(rect.left(), rect.right())
                    } else {
                        map.pixel_range_to_interval(rect.top(), rect.bottom())
                    }
                })
            }),
        }
    }

    /// Widens intervals narrower than `min_size` around their centers.
    ///
    /// `min_size.width` applies to X axes and `min_size.height` to Y axes.
    /// Returns whether anything changed.
    pub fn enforce_min_size(&mut self, min_size: Size) -> bool {
        let mut changed = false;
        for (axis, slot) in self.intervals.iter_mut() {
            let Some(interval) = slot.filter(|interval| interval.is_valid()) else {
                continue;
            };
            let min = if axis.is_x_axis() {
                min_size.width
            } else {
                min_size.height
            };
            if interval.width().abs() < min {
                let center = interval.center();
                *slot = Some(Interval::new(center - min / 2.0, center + min / 2.0));
                changed = true;
            }
        }
        changed
    }
}

/// Linear zoom history with a current index.
///
/// Index 0 is the zoom base. Pushing a state discards every entry after the
/// current one; navigating never pushes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomStateStack {
    states: Vec<ZoomState>,
    index: usize,
    max_depth: Option<usize>,
}

impl ZoomStateStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack holding at most `max_depth` states (at least one).
    #[must_use]
    pub fn with_max_depth(max_depth: Option<usize>) -> Self {
        let mut stack = Self::new();
        stack.set_max_stack_depth(max_depth);
        stack
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn states(&self) -> &[ZoomState] {
        &self.states
    }

    #[must_use]
    pub fn max_stack_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Bounds the number of kept states, pruning the oldest ones.
    pub fn set_max_stack_depth(&mut self, max_depth: Option<usize>) {
        self.max_depth = max_depth.map(|depth| depth.max(1));
        self.prune_front();
    }

    fn prune_front(&mut self) {
        let Some(depth) = self.max_depth else {
            return;
        };
        if self.states.len() <= depth {
            return;
        }
        let excess = self.states.len() - depth;
        self.states.drain(..excess);
        self.index = self.index.saturating_sub(excess);
        debug!(pruned = excess, depth, "pruned zoom history");
    }

    /// Oldest state, or an empty one for an empty stack.
    #[must_use]
    pub fn zoom_base(&self) -> ZoomState {
        self.states.first().copied().unwrap_or_default()
    }

    /// State at the current index, or an empty one for an empty stack.
    #[must_use]
    pub fn zoom_state(&self) -> ZoomState {
        self.states.get(self.index).copied().unwrap_or_default()
    }

    /// Clears the history and makes `state` the zoom base.
    pub fn set_zoom_base(&mut self, state: ZoomState) {
        self.states.clear();
        self.states.push(state);
        self.index = 0;
    }

    /// Replaces the whole history. An out-of-range `index` selects the last
    /// state.
    pub fn set_zoom_stack(&mut self, states: Vec<ZoomState>, index: usize) -> PlotResult<()> {
        if states.is_empty() {
            warn!("rejected empty zoom stack");
            return Err(PlotError::InvalidData(
                "zoom stack must contain at least one state".to_owned(),
            ));
        }
        if let Some(depth) = self.max_depth {
            if states.len() > depth {
                warn!(len = states.len(), depth, "rejected zoom stack deeper than its bound");
                return Err(PlotError::InvalidData(format!(
                    "zoom stack of {} states exceeds the maximum depth {depth}",
                    states.len()
                )));
            }
        }
        self.index = if index < states.len() {
            index
        } else {
            states.len() - 1
        };
        self.states = states;
        Ok(())
    }

    /// Pushes `state` after the current index.
    ///
    /// Pushing the current state again is a no-op. Returns whether the
    /// stack changed.
    pub fn push(&mut self, state: ZoomState) -> bool {
        if self.states.is_empty() {
            self.set_zoom_base(state);
            return true;
        }
        if state == self.zoom_state() {
            return false;
        }
        self.states.truncate(self.index + 1);
        self.states.push(state);
        self.index = self.states.len() - 1;
        self.prune_front();
        true
    }

    /// Moves the current index by `offset`, clamped to the history.
    ///
    /// An offset of 0 returns to the zoom base. Returns the new current
    /// state.
    pub fn step_by(&mut self, offset: isize) -> ZoomState {
        if self.states.is_empty() {
            return ZoomState::default();
        }
        self.index = if offset == 0 {
            0
        } else {
            let last = self.states.len() - 1;
            self.index.saturating_add_signed(offset).min(last)
        };
        self.zoom_state()
    }

    fn replace_current(&mut self, state: ZoomState) -> bool {
        match self.states.get_mut(self.index) {
            Some(current) if *current != state => {
                *current = state;
                true
            }
            _ => false,
        }
    }

    /// Pans the current state in place by value deltas.
    pub fn move_by(&mut self, dx: f64, dy: f64) -> bool {
        let moved = self.zoom_state().translated(dx, dy);
        self.replace_current(moved)
    }

    /// Pans the current state in place so its lower X and Y bounds land on
    /// `(x, y)`. Bottom takes precedence over top and left over right.
    pub fn move_to(&mut self, x: f64, y: f64) -> bool {
        let current = self.zoom_state();
        let lower = |first: AxisPosition, second: AxisPosition| {
            current
                .interval(first)
                .or(current.interval(second))
                .filter(|interval| interval.is_valid())
                .map_or(0.0, Interval::min_value)
        };
        let dx = x - lower(AxisPosition::Bottom, AxisPosition::Top);
        let dy = y - lower(AxisPosition::Left, AxisPosition::Right);
        self.move_by(dx, dy)
    }

    /// Pans the current state in place by a pixel drag, the content
    /// following the pointer.
    pub fn move_by_pixels(
        &mut self,
        dx: f64,
        dy: f64,
        maps: &AxisArray<Option<ScaleMap>>,
    ) -> bool {
        let mut moved = self.zoom_state();
        for axis in AxisPosition::ALL {
            let (Some(interval), Some(map)) = (moved.interval(axis), maps[axis]) else {
                continue;
            };
            let pixels = if axis.is_x_axis() { dx } else { dy };
            moved.set_interval(axis, Some(map.shifted_interval(interval, -pixels)));
        }
        self.replace_current(moved)
    }

    /// Narrowest selection accepted for zooming: 1/100 of the base widths.
    ///
    /// Width applies to X axes, height to Y axes; 1.0 without a base
    /// interval.
    #[must_use]
    pub fn min_zoom_size(&self) -> Size {
        let base = self.zoom_base();
        let smallest = |axes: [AxisPosition; 2]| {
            axes.into_iter()
                .filter_map(|axis| base.interval(axis).filter(|interval| interval.is_valid()))
                .map(|interval| interval.width().abs() / 100.0)
                .reduce(f64::min)
                .unwrap_or(1.0)
        };
        Size::new(
            smallest([AxisPosition::Bottom, AxisPosition::Top]),
            smallest([AxisPosition::Left, AxisPosition::Right]),
        )
    }

    /// Converts a selected canvas rectangle into a state, widens it to
    /// [`ZoomStateStack::min_zoom_size`] and pushes it.
    pub fn zoom_to_canvas_rect(
        &mut self,
        rect: Rect,
        maps: &AxisArray<Option<ScaleMap>>,
    ) -> bool {
        let mut state = ZoomState::from_canvas_rect(rect, maps);
        if !state.is_valid() {
            return false;
        }
        state.enforce_min_size(self.min_zoom_size());
        self.push(state)
    }
}
