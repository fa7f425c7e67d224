use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{AxisPosition, Rect, Size};
use crate::error::{PlotError, PlotResult};
use crate::figure::{FigureGridLayout, GridSpec};
use crate::layout::{LayoutHints, PlotLayout};

use super::{FigureConfig, Plot};

/// Stable identifier of a plot inside a [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlotId(u64);

impl PlotId {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

type ParasiteList = SmallVec<[PlotId; 4]>;

/// Registry of plots placed on one figure area.
///
/// Host plots are placed by the grid layout. Parasite plots overlay their
/// host and share its geometry; the relation is kept as ids in both
/// directions.
#[derive(Debug, Clone)]
pub struct Figure {
    plots: IndexMap<PlotId, Plot>,
    grid: FigureGridLayout<PlotId>,
    parasites: IndexMap<PlotId, ParasiteList>,
    hosts: IndexMap<PlotId, PlotId>,
    next_id: u64,
    config: FigureConfig,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            plots: IndexMap::new(),
            grid: FigureGridLayout::new(),
            parasites: IndexMap::new(),
            hosts: IndexMap::new(),
            next_id: 0,
            config: FigureConfig::default(),
        }
    }
}

impl Figure {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: FigureConfig) -> PlotResult<Self> {
        config.validate()?;
        let mut figure = Self::new();
        let margins = config.figure_margins;
        figure
            .grid
            .adjust_layout(margins.left, margins.bottom, margins.right, margins.top)?;
        figure.config = config;
        Ok(figure)
    }

    #[must_use]
    pub fn config(&self) -> FigureConfig {
        FigureConfig {
            figure_margins: self.grid.margins(),
            ..self.config
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    #[must_use]
    pub fn grid(&self) -> &FigureGridLayout<PlotId> {
        &self.grid
    }

    /// Every plot id in insertion order.
    pub fn plot_ids(&self) -> impl Iterator<Item = PlotId> + '_ {
        self.plots.keys().copied()
    }

    #[must_use]
    pub fn plot(&self, id: PlotId) -> Option<&Plot> {
        self.plots.get(&id)
    }

    pub fn plot_mut(&mut self, id: PlotId) -> Option<&mut Plot> {
        self.plots.get_mut(&id)
    }

    fn require(&self, id: PlotId) -> PlotResult<()> {
        if self.plots.contains_key(&id) {
            Ok(())
        } else {
            warn!(?id, "unknown plot");
            Err(PlotError::UnknownPlot { id })
        }
    }

    fn peek_id(&self) -> PlotId {
        PlotId(self.next_id)
    }

    fn allocate_id(&mut self) -> PlotId {
        let id = self.peek_id();
        self.next_id += 1;
        id
    }

    fn new_plot(&self, plot: Plot) -> PlotResult<Plot> {
        let mut plot = plot;
        plot.layout_mut().apply_config(&self.config.layout)?;
        plot.zoom_stack_mut()
            .set_max_stack_depth(self.config.max_stack_depth);
        Ok(plot)
    }

    /// Grid cell address using the configured default spacing.
    #[must_use]
    pub fn grid_spec(&self, row_count: usize, col_count: usize, row: usize, col: usize) -> GridSpec {
        GridSpec::new(row_count, col_count, row, col)
            .with_spacing(self.config.grid_spacing, self.config.grid_spacing)
    }

    /// Adds a host plot at a normalized rectangle.
    pub fn add_plot(&mut self, norm_rect: Rect) -> PlotResult<PlotId> {
        let plot = self.new_plot(Plot::new())?;
        // The id is only consumed once the placement is accepted.
        let id = self.peek_id();
        self.grid.add_axes_rect(id, norm_rect)?;
        self.allocate_id();
        self.plots.insert(id, plot);
        debug!(?id, "plot added");
        Ok(id)
    }

    /// Adds a host plot at a grid cell. Invalid addresses add nothing.
    pub fn add_plot_grid(&mut self, spec: GridSpec) -> PlotResult<PlotId> {
        let plot = self.new_plot(Plot::new())?;
        let id = self.peek_id();
        self.grid.add_axes_grid(id, spec)?;
        self.allocate_id();
        self.plots.insert(id, plot);
        debug!(?id, row = spec.row, col = spec.col, "plot added to grid");
        Ok(id)
    }

    /// Moves a host plot to a new normalized rectangle.
    pub fn set_plot_norm_pos(&mut self, id: PlotId, norm_rect: Rect) -> PlotResult<()> {
        self.require(id)?;
        if !self.grid.set_axes_norm_pos(id, norm_rect) {
            warn!(?id, "parasite plots follow their host");
            return Err(PlotError::InvalidParasite(format!(
                "plot {id:?} is a parasite and has no own position"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn norm_rect(&self, id: PlotId) -> Option<Rect> {
        self.grid.norm_rect(id)
    }

    /// Pixel rectangle of a plot after the last [`Figure::set_geometry`].
    /// Parasites report their host's rectangle.
    #[must_use]
    pub fn geometry(&self, id: PlotId) -> Option<Rect> {
        let host = self.host_of(id).unwrap_or(id);
        self.grid.geometry(host)
    }

    /// Creates a parasite plot over `host` showing only `enable_axis`.
    pub fn create_parasite(&mut self, host: PlotId, enable_axis: AxisPosition) -> PlotResult<PlotId> {
        self.require(host)?;
        if self.is_parasite(host) {
            warn!(?host, "can not create a parasite of a parasite plot");
            return Err(PlotError::InvalidParasite(format!(
                "plot {host:?} is itself a parasite"
            )));
        }
        let plot = self.new_plot(Plot::parasite(enable_axis))?;
        let id = self.allocate_id();
        self.plots.insert(id, plot);
        self.parasites.entry(host).or_default().push(id);
        self.hosts.insert(id, host);
        debug!(?host, parasite = ?id, ?enable_axis, "parasite plot created");
        Ok(id)
    }

    /// Makes a parasite also solve its own layout, so that its un-shifted
    /// scale rectangles are available after [`Figure::set_geometry`].
    pub fn set_parasite_own_scale_rects(&mut self, parasite: PlotId, on: bool) -> PlotResult<()> {
        self.require(parasite)?;
        let Some(layout) = self
            .plots
            .get_mut(&parasite)
            .and_then(Plot::parasite_layout_mut)
        else {
            warn!(id = ?parasite, "own scale rectangles need a parasite plot");
            return Err(PlotError::InvalidParasite(format!(
                "plot {parasite:?} is not a parasite"
            )));
        };
        layout.set_own_scale_rects(on);
        Ok(())
    }

    /// Removes a plot; removing a host also removes its parasites.
    ///
    /// Returns every removed id, the requested one first.
    pub fn remove_plot(&mut self, id: PlotId) -> PlotResult<Vec<PlotId>> {
        self.require(id)?;
        if self.is_parasite(id) {
            self.remove_parasite(id)?;
            return Ok(vec![id]);
        }
        let mut removed = vec![id];
        if let Some(parasites) = self.parasites.shift_remove(&id) {
            for parasite in parasites {
                self.hosts.shift_remove(&parasite);
                self.plots.shift_remove(&parasite);
                removed.push(parasite);
            }
        }
        self.grid.remove(id);
        self.plots.shift_remove(&id);
        debug!(?id, count = removed.len(), "plot removed");
        Ok(removed)
    }

    /// Detaches and removes a parasite plot.
    pub fn remove_parasite(&mut self, id: PlotId) -> PlotResult<()> {
        self.require(id)?;
        let Some(host) = self.hosts.shift_remove(&id) else {
            warn!(?id, "plot is not a parasite");
            return Err(PlotError::InvalidParasite(format!(
                "plot {id:?} is not a parasite"
            )));
        };
        if let Some(list) = self.parasites.get_mut(&host) {
            list.retain(|parasite| *parasite != id);
            if list.is_empty() {
                self.parasites.shift_remove(&host);
            }
        }
        self.plots.shift_remove(&id);
        debug!(?host, parasite = ?id, "parasite plot removed");
        Ok(())
    }

    #[must_use]
    pub fn host_of(&self, id: PlotId) -> Option<PlotId> {
        self.hosts.get(&id).copied()
    }

    /// Parasites of `host` in creation order.
    #[must_use]
    pub fn parasites_of(&self, host: PlotId) -> &[PlotId] {
        self.parasites
            .get(&host)
            .map(|list| list.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_parasite(&self, id: PlotId) -> bool {
        self.hosts.contains_key(&id)
    }

    /// Whether `id` has at least one parasite.
    #[must_use]
    pub fn is_host(&self, id: PlotId) -> bool {
        !self.parasites_of(id).is_empty()
    }

    /// The host of `id`'s group followed by its parasites; reversed when
    /// `descending`.
    #[must_use]
    pub fn plot_list(&self, id: PlotId, descending: bool) -> Vec<PlotId> {
        if !self.plots.contains_key(&id) {
            return Vec::new();
        }
        let host = self.host_of(id).unwrap_or(id);
        let mut list = Vec::with_capacity(1 + self.parasites_of(host).len());
        list.push(host);
        list.extend_from_slice(self.parasites_of(host));
        if descending {
            list.reverse();
        }
        list
    }

    /// Makes a parasite axis follow the scale of the host's same axis.
    pub fn set_parasite_share_axis(
        &mut self,
        parasite: PlotId,
        axis: AxisPosition,
        share: bool,
    ) -> PlotResult<()> {
        self.require(parasite)?;
        let Some(host) = self.host_of(parasite) else {
            warn!(?parasite, "only parasite plots share axes");
            return Err(PlotError::InvalidParasite(format!(
                "plot {parasite:?} has no host"
            )));
        };
        if let Some(plot) = self.plots.get_mut(&parasite) {
            plot.set_axis_shared(axis, share);
        }
        if share {
            self.sync_parasite(host, parasite);
        }
        Ok(())
    }

    #[must_use]
    pub fn is_parasite_share_axis(&self, parasite: PlotId, axis: AxisPosition) -> bool {
        self.plot(parasite).is_some_and(|plot| plot.is_axis_shared(axis))
    }

    fn sync_parasite(&mut self, host: PlotId, parasite: PlotId) {
        let Some(host_plot) = self.plots.get(&host).cloned() else {
            return;
        };
        let Some(plot) = self.plots.get_mut(&parasite) else {
            return;
        };
        for axis in AxisPosition::ALL {
            if plot.is_axis_shared(axis) {
                plot.sync_axis(axis, &host_plot);
            }
        }
    }

    /// Copies host scales into every shared parasite axis.
    pub fn sync_shared_axes(&mut self) {
        let pairs: Vec<(PlotId, PlotId)> = self
            .hosts
            .iter()
            .map(|(parasite, host)| (*host, *parasite))
            .collect();
        for (host, parasite) in pairs {
            self.sync_parasite(host, parasite);
        }
    }

    pub fn set_layout_hints(&mut self, id: PlotId, hints: LayoutHints) -> PlotResult<()> {
        self.require(id)?;
        if let Some(plot) = self.plots.get_mut(&id) {
            plot.set_hints(hints);
        }
        Ok(())
    }

    pub fn adjust_layout(&mut self, left: f64, bottom: f64, right: f64, top: f64) -> PlotResult<()> {
        self.grid.adjust_layout(left, bottom, right, top)
    }

    /// Largest minimum size among the visible host plots.
    #[must_use]
    pub fn minimum_size(&self) -> Size {
        self.grid.minimum_size(|id| {
            self.plots
                .get(&id)
                .filter(|plot| plot.is_visible())
                .map(|plot| plot.layout().minimum_size_hint(&plot.effective_hints()))
        })
    }

    /// Places every visible host inside `outer`, lays it out, then lays out
    /// its parasites from the host's result.
    pub fn set_geometry(&mut self, outer: Rect) {
        self.sync_shared_axes();

        let plots = &self.plots;
        self.grid.set_geometry(outer, |id| {
            plots.get(&id).is_some_and(Plot::is_visible)
        });

        let hosts: Vec<PlotId> = self.grid.items().map(|(id, _)| id).collect();
        for host in hosts {
            let Some(rect) = self.grid.geometry(host) else {
                continue;
            };
            let host_layout: PlotLayout = match self.plots.get_mut(&host) {
                Some(plot) if plot.is_visible() => {
                    plot.activate_layout(None, rect);
                    plot.layout().clone()
                }
                _ => continue,
            };
            for parasite in self.parasites_of(host).to_vec() {
                if let Some(plot) = self.plots.get_mut(&parasite) {
                    plot.activate_layout(Some(&host_layout), rect);
                }
            }
            trace!(?host, x = rect.x, y = rect.y, "figure plot laid out");
        }
    }
}
