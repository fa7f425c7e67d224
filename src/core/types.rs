use serde::{Deserialize, Serialize};

/// Width/height pair in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn expanded_to(self, other: Size) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }
}

/// Axis-aligned rectangle in floating point pixel space.
///
/// Edges follow the "continuous" convention: `right() == x + width` and
/// `bottom() == y + height`. Moving one edge never moves the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its four edges.
    #[must_use]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn set_left(&mut self, left: f64) {
        self.width += self.x - left;
        self.x = left;
    }

    pub fn set_top(&mut self, top: f64) {
        self.height += self.y - top;
        self.y = top;
    }

    pub fn set_right(&mut self, right: f64) {
        self.width = right - self.x;
    }

    pub fn set_bottom(&mut self, bottom: f64) {
        self.height = bottom - self.y;
    }

    /// Both dimensions strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !self.is_valid()
    }

    /// Flips negative dimensions so that width and height are non-negative.
    #[must_use]
    pub fn normalized(self) -> Self {
        let mut rect = self;
        if rect.width < 0.0 {
            rect.x += rect.width;
            rect.width = -rect.width;
        }
        if rect.height < 0.0 {
            rect.y += rect.height;
            rect.height = -rect.height;
        }
        rect
    }

    /// Clamps negative dimensions to zero, keeping the rectangle centered.
    #[must_use]
    pub fn clamped_non_negative(self) -> Self {
        let mut rect = self;
        if rect.width < 0.0 {
            rect.x += rect.width * 0.5;
            rect.width = 0.0;
        }
        if rect.height < 0.0 {
            rect.y += rect.height * 0.5;
            rect.height = 0.0;
        }
        rect
    }

    #[must_use]
    pub fn contains_point(self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }

    /// Smallest rectangle covering both operands.
    #[must_use]
    pub fn united(self, other: Rect) -> Self {
        Self::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Rect;

    #[test]
    fn moving_an_edge_keeps_the_opposite_edge() {
        let mut rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        rect.set_left(30.0);
        assert_eq!(rect.right(), 110.0);
        rect.set_top(10.0);
        assert_eq!(rect.bottom(), 70.0);
        rect.set_right(80.0);
        assert_eq!(rect.left(), 30.0);
        assert_eq!(rect.width, 50.0);
    }

    #[test]
    fn normalized_flips_negative_extents() {
        let rect = Rect::new(10.0, 10.0, -4.0, -6.0).normalized();
        assert_eq!(rect, Rect::new(6.0, 4.0, 4.0, 6.0));
    }

    #[test]
    fn clamped_rect_never_has_negative_size() {
        let rect = Rect::new(0.0, 0.0, -10.0, 5.0).clamped_non_negative();
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.x, -5.0);
        assert_eq!(rect.height, 5.0);
    }
}
