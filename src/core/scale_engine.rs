use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::interval::Interval;
use crate::core::log_scale_engine::LogScaleEngine;
use crate::core::scale_arithmetic::{
    ceil_eps, divide_interval, floor_eps, fuzzy_compare, is_rounding_noise,
};
use crate::core::scale_div::ScaleDivision;
use crate::core::scale_map::Transformation;
use crate::error::{PlotError, PlotResult};

/// Upper bound for the number of major ticks of one division.
pub const MAX_MAJOR_TICKS: usize = 10_000;

/// Result of [`ScaleEngine::auto_scale`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoScale {
    pub x1: f64,
    pub x2: f64,
    pub step_size: f64,
}

impl AutoScale {
    #[must_use]
    pub fn interval(self) -> Interval {
        Interval::new(self.x1, self.x2)
    }
}

/// Layout attributes of a scale engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScaleAttributes {
    /// The auto-scaled interval always contains the reference value.
    #[serde(default)]
    pub include_reference: bool,
    /// The auto-scaled interval is symmetric around the reference value.
    #[serde(default)]
    pub symmetric: bool,
    /// Endpoints are the data bounds plus margins instead of step multiples.
    #[serde(default)]
    pub floating: bool,
    /// `auto_scale` returns swapped bounds and a negative step.
    #[serde(default)]
    pub inverted: bool,
}

/// Settings shared by every scale engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleEngineSettings {
    #[serde(default)]
    pub attributes: ScaleAttributes,
    #[serde(default)]
    pub reference: f64,
    #[serde(default)]
    pub lower_margin: f64,
    #[serde(default)]
    pub upper_margin: f64,
    #[serde(default = "default_base")]
    pub base: u32,
}

impl Default for ScaleEngineSettings {
    fn default() -> Self {
        Self {
            attributes: ScaleAttributes::default(),
            reference: 0.0,
            lower_margin: 0.0,
            upper_margin: 0.0,
            base: default_base(),
        }
    }
}

fn default_base() -> u32 {
    10
}

impl ScaleEngineSettings {
    pub fn validate(self) -> PlotResult<Self> {
        if self.base < 2 {
            return Err(PlotError::InvalidData(
                "scale engine base must be >= 2".to_owned(),
            ));
        }
        if !self.lower_margin.is_finite()
            || !self.upper_margin.is_finite()
            || self.lower_margin < 0.0
            || self.upper_margin < 0.0
        {
            return Err(PlotError::InvalidData(
                "scale engine margins must be finite and >= 0".to_owned(),
            ));
        }
        if !self.reference.is_finite() {
            return Err(PlotError::InvalidData(
                "scale engine reference must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Computes "nice" intervals and tick divisions for an axis.
pub trait ScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings;

    /// Aligns a raw data range to a nice interval and returns its step size.
    ///
    /// The range may be inverted or degenerate (`x1 == x2`).
    fn auto_scale(&self, max_num_steps: usize, x1: f64, x2: f64) -> AutoScale;

    /// Divides `[x1, x2]` into major, medium and minor ticks.
    ///
    /// A `step_size` of `0.0` lets the engine derive one from `max_major_steps`.
    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: usize,
        max_minor_steps: usize,
        step_size: f64,
    ) -> ScaleDivision;

    /// Step size of the engine's pattern dividing `interval_size` into at
    /// most `num_steps` steps.
    fn divide_interval(&self, interval_size: f64, num_steps: usize) -> f64 {
        divide_interval(interval_size, num_steps, self.settings().base)
    }
}

/// Drops ticks outside `interval` and restores ascending order.
///
/// Ticks within rounding noise of a bound are moved onto it. Noise is
/// measured against the larger of the bound and `scale`.
pub(crate) fn strip_ticks(ticks: Vec<f64>, interval: Interval, scale: f64) -> Vec<f64> {
    let interval = interval.normalized();
    let (lower, upper) = (interval.lower(), interval.upper());
    let mut kept: Vec<f64> = ticks
        .into_iter()
        .map(|tick| {
            if is_rounding_noise(tick, lower, lower.abs().max(scale)) {
                lower
            } else if is_rounding_noise(tick, upper, upper.abs().max(scale)) {
                upper
            } else {
                tick
            }
        })
        .filter(|tick| (lower..=upper).contains(tick))
        .collect();
    kept.sort_by_key(|tick| OrderedFloat(*tick));
    kept
}

/// Interval around a single value, used when a range has zero width.
pub(crate) fn build_interval(value: f64) -> Interval {
    let delta = if value == 0.0 { 0.5 } else { (0.5 * value).abs() };
    if f64::MAX - delta < value {
        return Interval::new(f64::MAX - delta, f64::MAX);
    }
    if -f64::MAX + delta > value {
        return Interval::new(-f64::MAX, -f64::MAX + delta);
    }
    Interval::new(value - delta, value + delta)
}

/// Scale engine for linear scales.
///
/// Step sizes fit the pattern `{1, 2, 5} * 10^n`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearScaleEngine {
    settings: ScaleEngineSettings,
}

impl LinearScaleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ScaleEngineSettings) -> PlotResult<Self> {
        Ok(Self {
            settings: settings.validate()?,
        })
    }

    pub(crate) const fn from_validated(settings: ScaleEngineSettings) -> Self {
        Self { settings }
    }

    /// Expands `interval` to the enclosing multiples of `step_size`.
    #[must_use]
    pub fn align(&self, interval: Interval, step_size: f64) -> Interval {
        let mut x1 = interval.min_value();
        let mut x2 = interval.max_value();

        // Keep the input value when the aligned one differs only by
        // rounding noise. Otherwise move outwards to the enclosing multiple.
        if -f64::MAX + step_size <= x1 {
            let aligned = floor_eps(x1, step_size);
            if !is_rounding_noise(x1, aligned, x1.abs().max(step_size)) {
                x1 = if aligned > x1 { aligned - step_size } else { aligned };
            }
        }
        if f64::MAX - step_size >= x2 {
            let aligned = ceil_eps(x2, step_size);
            if !is_rounding_noise(x2, aligned, x2.abs().max(step_size)) {
                x2 = if aligned < x2 { aligned + step_size } else { aligned };
            }
        }

        Interval::new(x1, x2)
    }

    fn build_ticks(
        &self,
        interval: Interval,
        step_size: f64,
        max_minor_steps: usize,
    ) -> [Vec<f64>; 3] {
        let bounding = self.align(interval, step_size);
        let major = build_linear_major_ticks(bounding, step_size);
        let (minor, medium) = if max_minor_steps > 0 {
            self.build_minor_ticks(&major, max_minor_steps, step_size)
        } else {
            (Vec::new(), Vec::new())
        };

        // Ticks very close to zero snap to exactly zero; stripping runs last.
        [minor, medium, major].map(|ticks| {
            let snapped = ticks
                .into_iter()
                .map(|tick| {
                    if fuzzy_compare(tick, 0.0, step_size) == 0 {
                        0.0
                    } else {
                        tick
                    }
                })
                .collect();
            strip_ticks(snapped, interval, step_size)
        })
    }

    fn build_minor_ticks(
        &self,
        major_ticks: &[f64],
        max_minor_steps: usize,
        step_size: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let min_step = minor_step_size(step_size, max_minor_steps, self.settings.base);
        if min_step == 0.0 {
            return (Vec::new(), Vec::new());
        }

        // Number of ticks between two major ticks.
        let num_ticks = ((step_size / min_step).abs().ceil() as usize).saturating_sub(1);
        let medium_index = (num_ticks % 2 == 1).then_some(num_ticks / 2);

        let mut minor = Vec::new();
        let mut medium = Vec::new();
        for major in major_ticks {
            let mut value = *major;
            for k in 0..num_ticks {
                value += min_step;
                let aligned = if fuzzy_compare(value, 0.0, step_size) == 0 {
                    0.0
                } else {
                    value
                };
                if Some(k) == medium_index {
                    medium.push(aligned);
                } else {
                    minor.push(aligned);
                }
            }
        }
        (minor, medium)
    }
}

/// Minor step for a major step, falling back to half the major step when
/// the pattern step does not fit.
fn minor_step_size(step_size: f64, max_minor_steps: usize, base: u32) -> f64 {
    let min_step = divide_interval(step_size, max_minor_steps, base);
    if min_step != 0.0 {
        let num_ticks = (step_size / min_step).abs().ceil() - 1.0;
        if fuzzy_compare((num_ticks + 1.0) * min_step.abs(), step_size.abs(), step_size) > 0 {
            return 0.5 * step_size;
        }
    }
    min_step
}

pub(crate) fn build_linear_major_ticks(interval: Interval, step_size: f64) -> Vec<f64> {
    let steps = (interval.width() / step_size).round();
    let num_ticks = if steps.is_finite() && steps >= 0.0 {
        steps.min((MAX_MAJOR_TICKS - 1) as f64) as usize + 1
    } else {
        1
    };

    let mut ticks = Vec::with_capacity(num_ticks);
    ticks.push(interval.min_value());
    for i in 1..num_ticks.saturating_sub(1) {
        ticks.push(interval.min_value() + i as f64 * step_size);
    }
    if num_ticks > 1 {
        ticks.push(interval.max_value());
    }
    ticks
}

impl ScaleEngine for LinearScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings {
        &self.settings
    }

    fn auto_scale(&self, max_num_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let settings = self.settings;
        let attributes = settings.attributes;

        let normalized = Interval::new(x1, x2).normalized();
        let mut interval = Interval::new(
            normalized.lower() - settings.lower_margin,
            normalized.upper() + settings.upper_margin,
        );

        if attributes.symmetric {
            interval = interval.symmetrize(settings.reference);
        }
        if attributes.include_reference {
            interval = interval.extend(settings.reference);
        }
        if interval.width() == 0.0 {
            debug!(value = interval.lower(), "expanding degenerate scale range");
            interval = build_interval(interval.lower());
        }

        let mut step_size = self.divide_interval(interval.width(), max_num_steps.max(1));
        if !attributes.floating && step_size != 0.0 {
            interval = self.align(interval, step_size);
        }

        let (mut x1, mut x2) = (interval.min_value(), interval.max_value());
        if attributes.inverted {
            std::mem::swap(&mut x1, &mut x2);
            step_size = -step_size;
        }

        AutoScale { x1, x2, step_size }
    }

    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: usize,
        max_minor_steps: usize,
        step_size: f64,
    ) -> ScaleDivision {
        let interval = Interval::new(x1, x2).normalized();
        if !interval.is_valid() || interval.width() <= 0.0 {
            return ScaleDivision::new(x1, x2);
        }

        let mut step_size = step_size.abs();
        if step_size == 0.0 {
            step_size = self.divide_interval(interval.width(), max_major_steps.max(1));
        }

        let mut division = ScaleDivision::new(interval.lower(), interval.upper());
        if step_size != 0.0 {
            let [minor, medium, major] = self.build_ticks(interval, step_size, max_minor_steps);
            division = ScaleDivision::with_ticks(interval, minor, medium, major);
        }

        if x1 > x2 {
            division.invert();
        }
        division
    }
}

/// Engine selected for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScaleEngineKind {
    Linear(LinearScaleEngine),
    Log(LogScaleEngine),
}

impl Default for ScaleEngineKind {
    fn default() -> Self {
        Self::Linear(LinearScaleEngine::new())
    }
}

impl ScaleEngineKind {
    #[must_use]
    pub fn linear() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn log() -> Self {
        Self::Log(LogScaleEngine::new())
    }

    /// Value transformation matching the engine, for building a [`ScaleMap`].
    ///
    /// [`ScaleMap`]: crate::core::scale_map::ScaleMap
    #[must_use]
    pub fn transformation(&self) -> Transformation {
        match self {
            Self::Linear(_) => Transformation::Linear,
            Self::Log(engine) => Transformation::Log {
                base: engine.settings().base,
            },
        }
    }
}

impl ScaleEngine for ScaleEngineKind {
    fn settings(&self) -> &ScaleEngineSettings {
        match self {
            Self::Linear(engine) => engine.settings(),
            Self::Log(engine) => engine.settings(),
        }
    }

    fn auto_scale(&self, max_num_steps: usize, x1: f64, x2: f64) -> AutoScale {
        match self {
            Self::Linear(engine) => engine.auto_scale(max_num_steps, x1, x2),
            Self::Log(engine) => engine.auto_scale(max_num_steps, x1, x2),
        }
    }

    fn divide_scale(
        &self,
        x1: f64,
        x2: f64,
        max_major_steps: usize,
        max_minor_steps: usize,
        step_size: f64,
    ) -> ScaleDivision {
        match self {
            Self::Linear(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
            Self::Log(engine) => {
                engine.divide_scale(x1, x2, max_major_steps, max_minor_steps, step_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScaleEngine, build_interval, strip_ticks};
    use crate::core::interval::Interval;

    #[test]
    fn build_interval_is_symmetric_around_value() {
        assert_eq!(build_interval(0.0), Interval::new(-0.5, 0.5));
        assert_eq!(build_interval(10.0), Interval::new(5.0, 15.0));
        assert_eq!(build_interval(-4.0), Interval::new(-6.0, -2.0));
    }

    #[test]
    fn build_interval_stays_finite_near_max() {
        let interval = build_interval(f64::MAX);
        assert!(interval.is_valid());
        assert_eq!(interval.upper(), f64::MAX);
    }

    #[test]
    fn strip_drops_outside_ticks_and_snaps_noise_to_bounds() {
        let interval = Interval::new(0.0, 10.0);
        let ticks = strip_ticks(
            vec![12.0, 5.0, -1.0, 10.000_000_000_000_2, -1e-7, 0.0],
            interval,
            1.0,
        );
        assert_eq!(ticks, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn align_moves_bounds_outwards_unless_they_are_noise() {
        let engine = LinearScaleEngine::new();
        assert_eq!(
            engine.align(Interval::new(1e-7, 9.999_999_9), 2.0),
            Interval::new(0.0, 10.0)
        );
        assert_eq!(
            engine.align(Interval::new(1.999_999_9, 8.000_000_1), 2.0),
            Interval::new(0.0, 10.0)
        );
        assert_eq!(
            engine.align(Interval::new(0.1 + 0.2, 0.9), 0.1),
            Interval::new(0.1 + 0.2, 0.9)
        );
    }
}
