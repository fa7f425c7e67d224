use serde::{Deserialize, Serialize};

use crate::core::interval::Interval;
use crate::core::scale_arithmetic::fuzzy_compare;

/// Tick tier inside a [`ScaleDivision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickType {
    Minor,
    Medium,
    Major,
}

impl TickType {
    pub const ALL: [TickType; 3] = [TickType::Minor, TickType::Medium, TickType::Major];

    const fn index(self) -> usize {
        match self {
            Self::Minor => 0,
            Self::Medium => 1,
            Self::Major => 2,
        }
    }
}

/// Value range of one axis plus its classified tick positions.
///
/// Tick lists are kept in ascending order even when the bounds are inverted;
/// inversion is a presentation concern of the renderer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScaleDivision {
    lower_bound: f64,
    upper_bound: f64,
    ticks: [Vec<f64>; 3],
}

impl ScaleDivision {
    /// Division without ticks.
    #[must_use]
    pub fn new(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            ticks: Default::default(),
        }
    }

    #[must_use]
    pub fn with_ticks(
        interval: Interval,
        minor: Vec<f64>,
        medium: Vec<f64>,
        major: Vec<f64>,
    ) -> Self {
        Self {
            lower_bound: interval.lower(),
            upper_bound: interval.upper(),
            ticks: [minor, medium, major],
        }
    }

    #[must_use]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    #[must_use]
    pub fn upper_bound(&self) -> f64 {
        self.upper_bound
    }

    pub fn set_interval(&mut self, interval: Interval) {
        self.lower_bound = interval.lower();
        self.upper_bound = interval.upper();
    }

    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::new(self.lower_bound, self.upper_bound)
    }

    /// `upper_bound - lower_bound`.
    #[must_use]
    pub fn range(&self) -> f64 {
        self.upper_bound - self.lower_bound
    }

    #[must_use]
    pub fn ticks(&self, tick_type: TickType) -> &[f64] {
        &self.ticks[tick_type.index()]
    }

    pub fn set_ticks(&mut self, tick_type: TickType, ticks: Vec<f64>) {
        self.ticks[tick_type.index()] = ticks;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower_bound == self.upper_bound
    }

    #[must_use]
    pub fn is_increasing(&self) -> bool {
        self.lower_bound <= self.upper_bound
    }

    /// Whether `value` lies between the bounds, in either orientation.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        let min = self.lower_bound.min(self.upper_bound);
        let max = self.lower_bound.max(self.upper_bound);
        value >= min && value <= max
    }

    /// Swaps the bounds; tick lists stay ascending.
    pub fn invert(&mut self) {
        std::mem::swap(&mut self.lower_bound, &mut self.upper_bound);
    }

    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut division = self.clone();
        division.invert();
        division
    }

    /// Division restricted to `[lower_bound, upper_bound]`, dropping ticks outside.
    #[must_use]
    pub fn bounded(&self, lower_bound: f64, upper_bound: f64) -> Self {
        let min = lower_bound.min(upper_bound);
        let max = lower_bound.max(upper_bound);
        let mut division = Self::new(lower_bound, upper_bound);
        for tick_type in TickType::ALL {
            division.set_ticks(
                tick_type,
                self.ticks(tick_type)
                    .iter()
                    .copied()
                    .filter(|tick| *tick >= min && *tick <= max)
                    .collect(),
            );
        }
        division
    }

    /// Equality with a tolerance relative to the division range.
    #[must_use]
    pub fn fuzzy_eq(&self, other: &ScaleDivision) -> bool {
        let size = self.range().abs().max(other.range().abs());
        let same = |a: f64, b: f64| fuzzy_compare(a, b, size) == 0;
        if !same(self.lower_bound, other.lower_bound) || !same(self.upper_bound, other.upper_bound)
        {
            return false;
        }
        TickType::ALL.into_iter().all(|tick_type| {
            let lhs = self.ticks(tick_type);
            let rhs = other.ticks(tick_type);
            lhs.len() == rhs.len() && lhs.iter().zip(rhs).all(|(a, b)| same(*a, *b))
        })
    }
}
