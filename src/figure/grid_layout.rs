use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{Rect, Size};
use crate::error::{PlotError, PlotResult};

/// Fractional margins of the figure area, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureMargins {
    #[serde(default = "default_margin")]
    pub left: f64,
    #[serde(default = "default_margin")]
    pub bottom: f64,
    #[serde(default = "default_margin")]
    pub right: f64,
    #[serde(default = "default_margin")]
    pub top: f64,
}

fn default_margin() -> f64 {
    0.02
}

impl Default for FigureMargins {
    fn default() -> Self {
        Self {
            left: default_margin(),
            bottom: default_margin(),
            right: default_margin(),
            top: default_margin(),
        }
    }
}

impl FigureMargins {
    pub fn validate(&self) -> PlotResult<()> {
        let in_range = |value: f64| (0.0..=1.0).contains(&value);
        if !(in_range(self.left) && in_range(self.bottom) && in_range(self.right) && in_range(self.top))
        {
            return Err(PlotError::InvalidData(format!(
                "figure margins must be in [0, 1], got {self:?}"
            )));
        }
        Ok(())
    }
}

/// Cell address inside a regular grid of the figure area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub row_count: usize,
    pub col_count: usize,
    pub row: usize,
    pub col: usize,
    #[serde(default = "default_span")]
    pub row_span: usize,
    #[serde(default = "default_span")]
    pub col_span: usize,
    /// Horizontal gap between columns, as a fraction of the figure width.
    #[serde(default)]
    pub wspace: f64,
    /// Vertical gap between rows, as a fraction of the figure height.
    #[serde(default)]
    pub hspace: f64,
}

fn default_span() -> usize {
    1
}

impl GridSpec {
    #[must_use]
    pub fn new(row_count: usize, col_count: usize, row: usize, col: usize) -> Self {
        Self {
            row_count,
            col_count,
            row,
            col,
            row_span: 1,
            col_span: 1,
            wspace: 0.0,
            hspace: 0.0,
        }
    }

    #[must_use]
    pub fn with_span(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, wspace: f64, hspace: f64) -> Self {
        self.wspace = wspace;
        self.hspace = hspace;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.row_count == 0 || self.col_count == 0 || self.row_span == 0 || self.col_span == 0 {
            return Err(PlotError::InvalidGrid(format!(
                "grid counts and spans must be positive: {self:?}"
            )));
        }
        if self.row + self.row_span > self.row_count || self.col + self.col_span > self.col_count {
            return Err(PlotError::InvalidGrid(format!(
                "grid position and span exceed grid dimensions: {self:?}"
            )));
        }
        if !self.wspace.is_finite()
            || !self.hspace.is_finite()
            || self.wspace < 0.0
            || self.hspace < 0.0
        {
            return Err(PlotError::InvalidGrid(format!(
                "grid spacing must be finite and >= 0: {self:?}"
            )));
        }
        Ok(())
    }

    /// Normalized rectangle covered by the addressed cells, including the
    /// spacing between them.
    pub fn norm_rect(&self) -> PlotResult<Rect> {
        self.validate()?;

        let available_width = 1.0 - (self.col_count - 1) as f64 * self.wspace;
        let available_height = 1.0 - (self.row_count - 1) as f64 * self.hspace;
        if available_width <= 0.0 || available_height <= 0.0 {
            return Err(PlotError::InvalidGrid(format!(
                "not enough space for grid cells after spacing: {self:?}"
            )));
        }

        let cell_width = available_width / self.col_count as f64;
        let cell_height = available_height / self.row_count as f64;

        let left = (self.col as f64 * (cell_width + self.wspace)).max(0.0);
        let top = (self.row as f64 * (cell_height + self.hspace)).max(0.0);
        let width = self.col_span as f64 * cell_width + (self.col_span - 1) as f64 * self.wspace;
        let height = self.row_span as f64 * cell_height + (self.row_span - 1) as f64 * self.hspace;

        Ok(Rect::new(
            left,
            top,
            width.min(1.0 - left),
            height.min(1.0 - top),
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct GridItem<H> {
    handle: H,
    norm_rect: Rect,
    geometry: Option<Rect>,
}

/// Places items inside a parent area by normalized rectangles.
///
/// Items are referenced by a handle; the layout never owns what the handle
/// points to.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureGridLayout<H> {
    items: Vec<GridItem<H>>,
    margins: FigureMargins,
}

impl<H> Default for FigureGridLayout<H> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            margins: FigureMargins::default(),
        }
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> FigureGridLayout<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, handle: H) -> bool {
        self.position(handle).is_some()
    }

    fn position(&self, handle: H) -> Option<usize> {
        self.items.iter().position(|item| item.handle == handle)
    }

    /// Handles with their normalized rectangles, in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (H, Rect)> + '_ {
        self.items.iter().map(|item| (item.handle, item.norm_rect))
    }

    #[must_use]
    pub fn margins(&self) -> FigureMargins {
        self.margins
    }

    /// Adds `handle` at a normalized rectangle.
    pub fn add_axes_rect(&mut self, handle: H, norm_rect: Rect) -> PlotResult<()> {
        if self.contains(handle) {
            warn!(?handle, "rejected duplicate figure item");
            return Err(PlotError::InvalidGrid(format!(
                "item {handle:?} is already placed"
            )));
        }
        let finite = [norm_rect.x, norm_rect.y, norm_rect.width, norm_rect.height]
            .iter()
            .all(|value| value.is_finite());
        if !finite {
            warn!(?handle, "rejected non-finite figure rect");
            return Err(PlotError::InvalidGrid(format!(
                "normalized rect of {handle:?} must be finite"
            )));
        }
        self.items.push(GridItem {
            handle,
            norm_rect,
            geometry: None,
        });
        Ok(())
    }

    pub fn add_axes(
        &mut self,
        handle: H,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> PlotResult<()> {
        self.add_axes_rect(handle, Rect::new(left, top, width, height))
    }

    /// Adds `handle` at a grid cell. Returns the normalized rectangle.
    pub fn add_axes_grid(&mut self, handle: H, spec: GridSpec) -> PlotResult<Rect> {
        let norm_rect = spec.norm_rect().inspect_err(|err| {
            warn!(?handle, error = %err, "rejected grid placement");
        })?;
        self.add_axes_rect(handle, norm_rect)?;
        Ok(norm_rect)
    }

    /// Moves an existing item. Returns whether `handle` was found.
    pub fn set_axes_norm_pos(&mut self, handle: H, norm_rect: Rect) -> bool {
        match self.items.iter_mut().find(|item| item.handle == handle) {
            Some(item) => {
                item.norm_rect = norm_rect;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, handle: H) -> bool {
        match self.position(handle) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn norm_rect(&self, handle: H) -> Option<Rect> {
        self.items
            .iter()
            .find(|item| item.handle == handle)
            .map(|item| item.norm_rect)
    }

    /// Pixel rectangle assigned by the last [`FigureGridLayout::set_geometry`].
    #[must_use]
    pub fn geometry(&self, handle: H) -> Option<Rect> {
        self.items
            .iter()
            .find(|item| item.handle == handle)
            .and_then(|item| item.geometry)
    }

    /// Sets the fractional figure margins.
    ///
    /// Margins outside `[0, 1]` are rejected; margins that leave no visible
    /// content only emit a warning.
    pub fn adjust_layout(&mut self, left: f64, bottom: f64, right: f64, top: f64) -> PlotResult<()> {
        let margins = FigureMargins {
            left,
            bottom,
            right,
            top,
        };
        margins.validate().inspect_err(|err| {
            warn!(error = %err, "rejected figure margins");
        })?;
        if left + right >= 1.0 {
            warn!(left, right, "left + right margins leave no visible content");
        }
        if bottom + top >= 1.0 {
            warn!(bottom, top, "bottom + top margins leave no visible content");
        }
        self.margins = margins;
        Ok(())
    }

    /// Largest minimum size among visible items. `min_size_of` returns
    /// `None` for hidden items.
    #[must_use]
    pub fn minimum_size(&self, min_size_of: impl Fn(H) -> Option<Size>) -> Size {
        self.items
            .iter()
            .filter_map(|item| min_size_of(item.handle))
            .fold(Size::default(), Size::expanded_to)
    }

    /// Projects every visible item into `outer`. Hidden items keep their
    /// previous geometry.
    pub fn set_geometry(&mut self, outer: Rect, is_visible: impl Fn(H) -> bool) {
        let width = outer.width.round();
        let height = outer.height.round();
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let margins = self.margins;
        let available_width = width * (1.0 - margins.left - margins.right);
        let available_height = height * (1.0 - margins.bottom - margins.top);
        let start_x = width * margins.left;
        let start_y = height * margins.top;

        for item in &mut self.items {
            if !is_visible(item.handle) {
                continue;
            }
            let norm = item.norm_rect;
            let left = start_x + (norm.left() * available_width).round();
            let top = start_y + (norm.top() * available_height).round();
            let item_width = (norm.width * available_width).round();
            let item_height = (norm.height * available_height).round();

            let geometry = Rect::new(
                outer.x + left.max(0.0).round(),
                outer.y + top.max(0.0).round(),
                item_width.min(width - left).max(0.0).round(),
                item_height.min(height - top).max(0.0).round(),
            );
            trace!(handle = ?item.handle, x = geometry.x, y = geometry.y, "placed figure item");
            item.geometry = Some(geometry);
        }
    }

    /// Inverse projection of a pixel rectangle into `parent`, rounded to 1e-6
    /// and clamped to the unit square.
    #[must_use]
    pub fn calc_norm_rect(parent: Rect, rect: Rect) -> Rect {
        calc_norm_rect(parent, rect)
    }
}

/// See [`FigureGridLayout::calc_norm_rect`].
#[must_use]
pub fn calc_norm_rect(parent: Rect, rect: Rect) -> Rect {
    if parent.is_empty() {
        return Rect::default();
    }
    let parent_width = parent.width.max(1.0);
    let parent_height = parent.height.max(1.0);

    let round = |value: f64| (value / 1e-6).round() * 1e-6;

    let left = round((rect.x - parent.x) / parent_width).clamp(0.0, 1.0);
    let top = round((rect.y - parent.y) / parent_height).clamp(0.0, 1.0);
    let width = round(rect.width / parent_width).clamp(0.0, 1.0 - left);
    let height = round(rect.height / parent_height).clamp(0.0, 1.0 - top);
    Rect::new(left, top, width, height)
}
