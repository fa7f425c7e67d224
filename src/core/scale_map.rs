use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;
use crate::core::log_scale_engine::{LOG_MAX, LOG_MIN};

/// Transformation between scale values and a linear paint coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transformation {
    #[default]
    Linear,
    Log {
        base: u32,
    },
}

impl Transformation {
    fn forward(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log { base } => value.clamp(LOG_MIN, LOG_MAX).ln() / f64::from(base).ln(),
        }
    }

    fn backward(self, value: f64) -> f64 {
        match self {
            Self::Linear => value,
            Self::Log { base } => f64::from(base).powf(value),
        }
    }
}

/// Maps values of one axis to pixel positions and back.
///
/// Pixel bounds may be reversed (`p1 > p2`) as they are for a Y axis whose
/// values grow upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMap {
    s1: f64,
    s2: f64,
    p1: f64,
    p2: f64,
    transformation: Transformation,
    // Cached pixels per transformed unit.
    cnv: f64,
}

impl Default for ScaleMap {
    fn default() -> Self {
        Self::new(Transformation::Linear, 0.0, 1.0, 0.0, 1.0)
    }
}

impl ScaleMap {
    #[must_use]
    pub fn new(transformation: Transformation, s1: f64, s2: f64, p1: f64, p2: f64) -> Self {
        let mut map = Self {
            s1,
            s2,
            p1,
            p2,
            transformation,
            cnv: 1.0,
        };
        map.update_factor();
        map
    }

    fn update_factor(&mut self) {
        let ts1 = self.transformation.forward(self.s1);
        let ts2 = self.transformation.forward(self.s2);
        self.cnv = if ts1 == ts2 {
            1.0
        } else {
            (self.p2 - self.p1) / (ts2 - ts1)
        };
    }

    pub fn set_scale_interval(&mut self, s1: f64, s2: f64) {
        self.s1 = s1;
        self.s2 = s2;
        self.update_factor();
    }

    pub fn set_paint_interval(&mut self, p1: f64, p2: f64) {
        self.p1 = p1;
        self.p2 = p2;
        self.update_factor();
    }

    #[must_use]
    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    #[must_use]
    pub fn s1(&self) -> f64 {
        self.s1
    }

    #[must_use]
    pub fn s2(&self) -> f64 {
        self.s2
    }

    #[must_use]
    pub fn p1(&self) -> f64 {
        self.p1
    }

    #[must_use]
    pub fn p2(&self) -> f64 {
        self.p2
    }

    /// Pixel span, `|p2 - p1|`.
    #[must_use]
    pub fn p_dist(&self) -> f64 {
        (self.p2 - self.p1).abs()
    }

    /// Scale span, `|s2 - s1|`.
    #[must_use]
    pub fn s_dist(&self) -> f64 {
        (self.s2 - self.s1).abs()
    }

    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        let ts1 = self.transformation.forward(self.s1);
        self.p1 + (self.transformation.forward(value) - ts1) * self.cnv
    }

    #[must_use]
    pub fn inv_transform(&self, pixel: f64) -> f64 {
        let ts1 = self.transformation.forward(self.s1);
        self.transformation
            .backward(ts1 + (pixel - self.p1) / self.cnv)
    }

    /// Value difference covered by `pixels` starting at `p1`.
    ///
    /// Exact for linear maps; logarithmic maps should use
    /// [`ScaleMap::shifted_interval`] instead.
    #[must_use]
    pub fn value_delta(&self, pixels: f64) -> f64 {
        self.inv_transform(self.p1 + pixels) - self.inv_transform(self.p1)
    }

    /// `interval` moved by `pixels` in paint coordinates.
    #[must_use]
    pub fn shifted_interval(&self, interval: Interval, pixels: f64) -> Interval {
        Interval::new(
            self.inv_transform(self.transform(interval.lower()) + pixels),
            self.inv_transform(self.transform(interval.upper()) + pixels),
        )
    }

    /// Values covered by the pixel range `[pixel1, pixel2]`, normalized.
    #[must_use]
    pub fn pixel_range_to_interval(&self, pixel1: f64, pixel2: f64) -> Interval {
        Interval::new(self.inv_transform(pixel1), self.inv_transform(pixel2)).normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScaleMap, Transformation};

    #[test]
    fn linear_map_round_trips_through_pixels() {
        let map = ScaleMap::new(Transformation::Linear, 0.0, 100.0, 10.0, 210.0);
        assert!((map.transform(50.0) - 110.0).abs() < 1e-9);
        assert!((map.inv_transform(110.0) - 50.0).abs() < 1e-9);
        assert!((map.value_delta(20.0) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reversed_paint_interval_flips_direction() {
        let map = ScaleMap::new(Transformation::Linear, 0.0, 10.0, 100.0, 0.0);
        assert!((map.transform(0.0) - 100.0).abs() < 1e-9);
        assert!((map.transform(10.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn log_map_spaces_decades_evenly() {
        let map = ScaleMap::new(Transformation::Log { base: 10 }, 1.0, 1000.0, 0.0, 300.0);
        assert!((map.transform(10.0) - 100.0).abs() < 1e-9);
        assert!((map.transform(100.0) - 200.0).abs() < 1e-9);
        assert!((map.inv_transform(100.0) - 10.0).abs() < 1e-9);
    }
}
