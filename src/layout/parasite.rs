use tracing::trace;

use crate::core::{AxisArray, AxisPosition, Rect, Size};
use crate::layout::engine::LayoutOptions;
use crate::layout::hints::LayoutHints;
use crate::layout::plot_layout::{LayoutRects, PlotLayout};

/// Layout of a parasite plot drawn over the canvas of a host plot.
///
/// With a host, no geometry is computed: every rectangle, the spacing and
/// the canvas margins are copied from the host's last layout pass. Without
/// a host it behaves like a regular [`PlotLayout`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParasiteLayout {
    layout: PlotLayout,
    track_own_scale_rects: bool,
    own_scale_rects: AxisArray<Rect>,
}

impl ParasiteLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also solves the parasite's own layout before deferring to the host,
    /// so that [`ParasiteLayout::parasite_scale_rect`] reports where its
    /// axes would have been placed.
    #[must_use]
    pub fn with_own_scale_rects(mut self, on: bool) -> Self {
        self.set_own_scale_rects(on);
        self
    }

    /// Turning tracking off clears the recorded rectangles.
    pub fn set_own_scale_rects(&mut self, on: bool) {
        self.track_own_scale_rects = on;
        if !on {
            self.own_scale_rects = AxisArray::default();
        }
    }

    #[must_use]
    pub fn tracks_own_scale_rects(&self) -> bool {
        self.track_own_scale_rects
    }

    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut PlotLayout {
        &mut self.layout
    }

    #[must_use]
    pub fn rects(&self) -> &LayoutRects {
        self.layout.rects()
    }

    /// Scale rectangle of the parasite's own layout, before the host's
    /// rectangles replaced it. Empty unless own rectangles are tracked.
    #[must_use]
    pub fn parasite_scale_rect(&self, axis: AxisPosition) -> Rect {
        self.own_scale_rects[axis]
    }

    pub fn activate(
        &mut self,
        host: Option<&PlotLayout>,
        hints: &LayoutHints,
        plot_rect: Rect,
        options: LayoutOptions,
    ) {
        let Some(host) = host else {
            self.own_scale_rects = AxisArray::default();
            self.layout.activate(hints, plot_rect, options);
            return;
        };

        if self.track_own_scale_rects {
            self.layout.activate(hints, plot_rect, options);
            self.own_scale_rects = self.layout.rects().scales;
        } else {
            self.own_scale_rects = AxisArray::default();
        }

        self.layout.set_rects(*host.rects());
        self.layout.engine_mut().set_spacing(host.spacing());
        for axis in AxisPosition::ALL {
            self.layout
                .set_canvas_margin(host.canvas_margin(axis), Some(axis));
        }
        trace!("parasite layout copied from host");
    }

    /// Minimum size of the host when there is one.
    #[must_use]
    pub fn minimum_size_hint(
        &self,
        host: Option<(&PlotLayout, &LayoutHints)>,
        hints: &LayoutHints,
    ) -> Size {
        match host {
            Some((host_layout, host_hints)) => host_layout.minimum_size_hint(host_hints),
            None => self.layout.minimum_size_hint(hints),
        }
    }
}
