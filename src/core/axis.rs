use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Position of an axis around the canvas.
///
/// The set is closed: a plot has at most one axis per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisPosition {
    Left,
    Right,
    Bottom,
    Top,
}

impl AxisPosition {
    pub const ALL: [AxisPosition; 4] = [
        AxisPosition::Left,
        AxisPosition::Right,
        AxisPosition::Bottom,
        AxisPosition::Top,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Top => 3,
        }
    }

    /// Horizontal axes (bottom/top) map X values.
    #[must_use]
    pub const fn is_x_axis(self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }

    #[must_use]
    pub const fn is_y_axis(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The axis on the other side of the canvas.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Top => Self::Bottom,
        }
    }
}

/// Fixed-size storage with one slot per [`AxisPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AxisArray<T>([T; 4]);

impl<T> AxisArray<T> {
    #[must_use]
    pub const fn new(left: T, right: T, bottom: T, top: T) -> Self {
        Self([left, right, bottom, top])
    }

    #[must_use]
    pub fn from_fn(mut f: impl FnMut(AxisPosition) -> T) -> Self {
        Self(AxisPosition::ALL.map(&mut f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (AxisPosition, &T)> {
        AxisPosition::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (AxisPosition, &mut T)> {
        AxisPosition::ALL.into_iter().zip(self.0.iter_mut())
    }

    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(AxisPosition, T) -> U) -> AxisArray<U> {
        let [left, right, bottom, top] = self.0;
        AxisArray([
            f(AxisPosition::Left, left),
            f(AxisPosition::Right, right),
            f(AxisPosition::Bottom, bottom),
            f(AxisPosition::Top, top),
        ])
    }
}

impl<T: Copy> AxisArray<T> {
    #[must_use]
    pub const fn splat(value: T) -> Self {
        Self([value; 4])
    }
}

impl<T> Index<AxisPosition> for AxisArray<T> {
    type Output = T;

    fn index(&self, axis: AxisPosition) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<AxisPosition> for AxisArray<T> {
    fn index_mut(&mut self, axis: AxisPosition) -> &mut T {
        &mut self.0[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisArray, AxisPosition};

    #[test]
    fn indexing_follows_axis_position() {
        let mut dims = AxisArray::splat(0);
        dims[AxisPosition::Top] = 7;
        assert_eq!(dims[AxisPosition::Top], 7);
        assert_eq!(dims[AxisPosition::Bottom], 0);
    }

    #[test]
    fn map_receives_matching_positions() {
        let labels = AxisArray::splat(()).map(|axis, ()| axis);
        for (axis, label) in labels.iter() {
            assert_eq!(axis, *label);
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for axis in AxisPosition::ALL {
            assert_eq!(axis.opposite().opposite(), axis);
            assert_eq!(axis.is_x_axis(), axis.opposite().is_x_axis());
        }
    }
}
