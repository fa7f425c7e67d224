use std::fmt;
use std::sync::Arc;

use crate::core::{AxisArray, AxisPosition, Size};

/// Text measurement supplied by the rendering layer.
///
/// The layout never looks at glyphs; it only asks how much room a block of
/// text needs.
pub trait TextMetrics: fmt::Debug + Send + Sync {
    /// Size of the text without line breaks.
    fn natural_size(&self) -> Size;

    /// Height of the text when wrapped into `width` pixels.
    fn height_for_width(&self, width: f64) -> f64;
}

/// Deterministic, backend-independent text measurement.
///
/// Glyph widths are estimated per character class and lines wrap at word
/// boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatedText {
    text: String,
    font_size_px: f64,
    line_height_px: f64,
}

impl EstimatedText {
    #[must_use]
    pub fn new(text: impl Into<String>, font_size_px: f64) -> Self {
        Self {
            text: text.into(),
            font_size_px,
            line_height_px: (font_size_px * 1.25).ceil(),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn width_of(&self, text: &str) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                _ => 0.58,
            }
        });
        units * self.font_size_px
    }

    fn line_count(&self, width: f64) -> usize {
        let space = self.width_of(" ");
        let mut lines = 0;
        for paragraph in self.text.lines() {
            let mut current = 0.0;
            lines += 1;
            for word in paragraph.split_whitespace() {
                let word_width = self.width_of(word);
                if current > 0.0 && current + space + word_width > width {
                    lines += 1;
                    current = word_width;
                } else if current > 0.0 {
                    current += space + word_width;
                } else {
                    current = word_width;
                }
            }
        }
        lines
    }
}

impl TextMetrics for EstimatedText {
    fn natural_size(&self) -> Size {
        if self.text.is_empty() {
            return Size::default();
        }
        let width = self
            .text
            .lines()
            .map(|line| self.width_of(line))
            .fold(0.0, f64::max);
        let lines = self.text.lines().count().max(1);
        Size::new(width.ceil(), lines as f64 * self.line_height_px)
    }

    fn height_for_width(&self, width: f64) -> f64 {
        if self.text.is_empty() {
            return 0.0;
        }
        self.line_count(width) as f64 * self.line_height_px
    }
}

/// Title or footer label.
#[derive(Debug, Clone, Default)]
pub struct LabelHint {
    pub text: Option<Arc<dyn TextMetrics>>,
    pub frame_width: i32,
}

impl LabelHint {
    #[must_use]
    pub fn new(text: Arc<dyn TextMetrics>) -> Self {
        Self {
            text: Some(text),
            frame_width: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none()
    }

    /// Height of the framed label for `width`, or 0 without text.
    #[must_use]
    pub fn height_for_width(&self, width: f64, include_frame: bool) -> i32 {
        let Some(text) = &self.text else {
            return 0;
        };
        let mut height = text.height_for_width(width).ceil() as i32;
        if include_frame {
            height += 2 * self.frame_width;
        }
        height
    }
}

/// Size data of the legend widget.
#[derive(Debug, Clone, Default)]
pub struct LegendHint {
    pub contents: Option<Arc<dyn TextMetrics>>,
    pub frame_width: i32,
    /// Extra width needed by a vertical scrollbar.
    pub h_scroll_extent: i32,
    /// Extra height needed by a horizontal scrollbar.
    pub v_scroll_extent: i32,
}

impl LegendHint {
    #[must_use]
    pub fn new(contents: Arc<dyn TextMetrics>) -> Self {
        Self {
            contents: Some(contents),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    /// Natural size rounded to whole pixels.
    #[must_use]
    pub fn size_hint(&self) -> (i32, i32) {
        self.contents.as_ref().map_or((0, 0), |contents| {
            let size = contents.natural_size();
            (size.width.ceil() as i32, size.height.ceil() as i32)
        })
    }

    #[must_use]
    pub fn height_for_width(&self, width: i32) -> i32 {
        self.contents.as_ref().map_or(0, |contents| {
            contents.height_for_width(f64::from(width)).ceil() as i32
        })
    }
}

/// Size and extent data of one axis, supplied by its scale widget.
#[derive(Debug, Clone, Default)]
pub struct AxisLayoutHint {
    pub is_visible: bool,
    /// Minimum size of the scale widget.
    pub min_width: i32,
    pub min_height: i32,
    /// Space reserved before the first tick.
    pub start_border_dist: i32,
    /// Space reserved after the last tick.
    pub end_border_dist: i32,
    /// Distance from the widget edge to the end of the ticks.
    pub tick_offset: f64,
    /// Thickness of the scale without its title.
    pub dimension_without_title: i32,
    pub title: Option<Arc<dyn TextMetrics>>,
}

impl AxisLayoutHint {
    /// Visible axis of the given thickness with no border distances.
    #[must_use]
    pub fn visible(dimension_without_title: i32) -> Self {
        Self {
            is_visible: true,
            dimension_without_title,
            min_width: dimension_without_title,
            min_height: dimension_without_title,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_border_dist(mut self, start: i32, end: i32) -> Self {
        self.start_border_dist = start;
        self.end_border_dist = end;
        self
    }

    #[must_use]
    pub fn with_tick_offset(mut self, tick_offset: f64) -> Self {
        self.tick_offset = tick_offset;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: Arc<dyn TextMetrics>) -> Self {
        self.title = Some(title);
        self
    }

    /// Thickness needed when the axis is `length` pixels long.
    #[must_use]
    pub fn dimension_for_length(&self, length: f64) -> i32 {
        let title = self.title.as_ref().map_or(0, |title| {
            title.height_for_width(length.floor()).ceil() as i32
        });
        self.dimension_without_title + title
    }
}

/// Everything the layout needs to know about a plot's components.
#[derive(Debug, Clone, Default)]
pub struct LayoutHints {
    pub title: LabelHint,
    pub footer: LabelHint,
    pub legend: LegendHint,
    pub axes: AxisArray<AxisLayoutHint>,
    /// Contents margins of the canvas frame.
    pub canvas_contents_margins: AxisArray<i32>,
    pub canvas_min_size: Size,
}

impl LayoutHints {
    /// Both Y axes visible or both hidden.
    #[must_use]
    pub fn has_symmetric_y_axes(&self) -> bool {
        self.axes[AxisPosition::Left].is_visible == self.axes[AxisPosition::Right].is_visible
    }

    /// Tick offset of a visible axis, 0 for hidden ones.
    #[must_use]
    pub fn tick_offset(&self, axis: AxisPosition) -> f64 {
        let hint = &self.axes[axis];
        if hint.is_visible { hint.tick_offset } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::{EstimatedText, TextMetrics};

    #[test]
    fn estimated_text_wraps_at_word_boundaries() {
        let text = EstimatedText::new("alpha beta gamma", 10.0);
        let natural = text.natural_size();
        assert_eq!(text.height_for_width(natural.width), natural.height);
        assert!(text.height_for_width(natural.width / 2.0) > natural.height);
    }

    #[test]
    fn empty_text_needs_no_space() {
        let text = EstimatedText::new("", 12.0);
        assert_eq!(text.natural_size().width, 0.0);
        assert_eq!(text.height_for_width(100.0), 0.0);
    }
}
