use serde::{Deserialize, Serialize};

/// Ordered pair of bounds.
///
/// `lower > upper` is allowed and represents a flipped axis; `width()` is
/// then negative. Use [`Interval::normalized`] for min/max semantics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Interval {
    lower: f64,
    upper: f64,
}

impl Interval {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    #[must_use]
    pub fn lower(self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn min_value(self) -> f64 {
        self.lower.min(self.upper)
    }

    #[must_use]
    pub fn max_value(self) -> f64 {
        self.lower.max(self.upper)
    }

    /// `upper - lower`; negative for inverted intervals.
    #[must_use]
    pub fn width(self) -> f64 {
        self.upper - self.lower
    }

    /// Both bounds finite.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }

    #[must_use]
    pub fn is_inverted(self) -> bool {
        self.lower > self.upper
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.lower + self.width() * 0.5
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_inverted() {
            self.inverted()
        } else {
            self
        }
    }

    #[must_use]
    pub fn inverted(self) -> Self {
        Self::new(self.upper, self.lower)
    }

    /// Whether `value` lies inside the normalized range, bounds included.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        if !self.is_valid() || !value.is_finite() {
            return false;
        }
        value >= self.min_value() && value <= self.max_value()
    }

    /// Shifts both bounds by `delta`.
    #[must_use]
    pub fn translated(self, delta: f64) -> Self {
        Self::new(self.lower + delta, self.upper + delta)
    }

    /// Normalized interval grown to include `value`.
    #[must_use]
    pub fn extend(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        let normalized = self.normalized();
        Self::new(
            normalized.lower.min(value),
            normalized.upper.max(value),
        )
    }

    /// Smallest interval symmetric around `reference` that covers this one.
    #[must_use]
    pub fn symmetrize(self, reference: f64) -> Self {
        let delta = (reference - self.max_value())
            .abs()
            .max((reference - self.min_value()).abs());
        Self::new(reference - delta, reference + delta)
    }

    /// Normalized interval with both bounds clamped into `[lower, upper]`.
    #[must_use]
    pub fn limited(self, lower: f64, upper: f64) -> Self {
        let normalized = self.normalized();
        Self::new(
            normalized.lower.clamp(lower, upper),
            normalized.upper.clamp(lower, upper),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    #[test]
    fn symmetrize_covers_both_bounds() {
        let interval = Interval::new(-2.0, 6.0).symmetrize(1.0);
        assert_eq!(interval, Interval::new(-4.0, 6.0));
    }

    #[test]
    fn limited_clamps_normalized_bounds() {
        let interval = Interval::new(50.0, -10.0).limited(0.0, 20.0);
        assert_eq!(interval, Interval::new(0.0, 20.0));
    }
}
