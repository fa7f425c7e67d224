use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::interval::Interval;
use crate::core::scale_arithmetic::{
    ceil_eps, divide_interval, floor_eps, fuzzy_compare, is_rounding_noise,
};
use crate::core::scale_div::ScaleDivision;
use crate::core::scale_engine::{
    AutoScale, LinearScaleEngine, MAX_MAJOR_TICKS, ScaleEngine, ScaleEngineSettings,
    build_interval, strip_ticks,
};
use crate::error::PlotResult;

/// Smallest value a logarithmic scale can display.
pub const LOG_MIN: f64 = 1.0e-100;
/// Largest value a logarithmic scale can display.
pub const LOG_MAX: f64 = 1.0e100;

/// Scale engine for logarithmic scales.
///
/// Step sizes are measured in decades (powers of the base). Ranges spanning
/// less than one decade are divided by a linear engine with the same
/// settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LogScaleEngine {
    settings: ScaleEngineSettings,
}

impl LogScaleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: ScaleEngineSettings) -> PlotResult<Self> {
        Ok(Self {
            settings: settings.validate()?,
        })
    }

    fn base(&self) -> f64 {
        f64::from(self.settings.base)
    }

    fn log(&self, value: f64) -> f64 {
        value.ln() / self.base().ln()
    }

    fn log_interval(&self, interval: Interval) -> Interval {
        Interval::new(self.log(interval.lower()), self.log(interval.upper()))
    }

    fn pow_interval(&self, interval: Interval) -> Interval {
        Interval::new(
            self.base().powf(interval.lower()),
            self.base().powf(interval.upper()),
        )
    }

    fn linear_engine(&self) -> LinearScaleEngine {
        LinearScaleEngine::from_validated(self.settings)
    }

    fn spans_less_than_a_decade(&self, interval: Interval) -> bool {
        interval.max_value() / interval.min_value() < self.base()
    }

    /// Replaces non-positive bounds with a positive window.
    ///
    /// Both bounds non-positive gives `[1, base]`; a non-positive lower bound
    /// gives one decade below the upper bound.
    #[must_use]
    pub fn positive_window(&self, x1: f64, x2: f64) -> Interval {
        let interval = Interval::new(x1, x2).normalized();
        if interval.upper() <= 0.0 {
            debug!(x1, x2, "substituting default logarithmic window");
            return Interval::new(1.0, self.base());
        }
        if interval.lower() <= 0.0 {
            debug!(x1, x2, "substituting positive lower logarithmic bound");
            return Interval::new(interval.upper() / self.base(), interval.upper());
        }
        interval
    }

    /// Expands `interval` to the enclosing powers of `base^step_size`.
    #[must_use]
    pub fn align(&self, interval: Interval, step_size: f64) -> Interval {
        let log_interval = self.log_interval(interval.normalized());

        let (lower, upper) = (log_interval.lower(), log_interval.upper());

        let mut x1 = floor_eps(lower, step_size);
        if is_rounding_noise(lower, x1, lower.abs().max(step_size)) {
            x1 = lower;
        } else if x1 > lower {
            x1 -= step_size;
        }
        let mut x2 = ceil_eps(upper, step_size);
        if is_rounding_noise(upper, x2, upper.abs().max(step_size)) {
            x2 = upper;
        } else if x2 < upper {
            x2 += step_size;
        }

        self.pow_interval(Interval::new(x1, x2))
    }

    fn build_major_ticks(&self, interval: Interval, step_size: f64) -> Vec<f64> {
        let width = self.log_interval(interval).width();
        let steps = (width / step_size).round();
        let num_ticks = if steps.is_finite() && steps >= 0.0 {
            steps.min((MAX_MAJOR_TICKS - 1) as f64) as usize + 1
        } else {
            1
        };

        let mut ticks = Vec::with_capacity(num_ticks);
        ticks.push(interval.min_value());
        if num_ticks > 1 {
            let lx_min = interval.min_value().ln();
            let lx_max = interval.max_value().ln();
            let lstep = (lx_max - lx_min) / (num_ticks - 1) as f64;
            for i in 1..num_ticks - 1 {
                ticks.push((lx_min + i as f64 * lstep).exp());
            }
            ticks.push(interval.max_value());
        }
        ticks
    }

    fn build_minor_ticks(
        &self,
        major_ticks: &[f64],
        max_minor_steps: usize,
        step_size: f64,
    ) -> (Vec<f64>, Vec<f64>) {
        let base = self.base();
        let mut minor = Vec::new();
        let mut medium = Vec::new();

        if step_size < 1.1 {
            // One decade per major step: minor ticks at multiples of the
            // major value.
            let min_step = divide_interval(step_size, max_minor_steps + 1, self.settings.base);
            if min_step == 0.0 {
                return (minor, medium);
            }
            let num_steps = (step_size / min_step).round() as usize;
            let medium_index = (num_steps > 2 && num_steps % 2 == 0).then_some(num_steps / 2);

            for window in major_ticks.windows(2) {
                let value = window[0];
                let s = base / num_steps as f64;
                if s >= 1.0 {
                    if fuzzy_compare(s, 1.0, 1.0) != 0 {
                        minor.push(value * s);
                    }
                    for j in 2..num_steps {
                        minor.push(value * j as f64 * s);
                    }
                } else {
                    for j in 1..num_steps {
                        let tick = value + j as f64 * value * (base - 1.0) / num_steps as f64;
                        if Some(j) == medium_index {
                            medium.push(tick);
                        } else {
                            minor.push(tick);
                        }
                    }
                }
            }
        } else {
            let mut min_step = divide_interval(step_size, max_minor_steps, self.settings.base);
            if min_step == 0.0 {
                return (minor, medium);
            }
            min_step = min_step.max(1.0);

            let mut num_ticks = ((step_size / min_step).round() as i64 - 1).max(0) as usize;
            if fuzzy_compare((num_ticks + 1) as f64 * min_step, step_size, step_size) > 0 {
                num_ticks = 0;
            }
            if num_ticks == 0 {
                return (minor, medium);
            }
            let medium_index = (num_ticks > 2 && num_ticks % 2 == 1).then_some(num_ticks / 2);
            let factor = base.powf(min_step).max(base);

            for major in major_ticks {
                let mut tick = *major;
                for j in 0..num_ticks {
                    tick *= factor;
                    if Some(j) == medium_index {
                        medium.push(tick);
                    } else {
                        minor.push(tick);
                    }
                }
            }
        }
        (minor, medium)
    }
}

impl ScaleEngine for LogScaleEngine {
    fn settings(&self) -> &ScaleEngineSettings {
        &self.settings
    }

    fn auto_scale(&self, max_num_steps: usize, x1: f64, x2: f64) -> AutoScale {
        let settings = self.settings;
        let attributes = settings.attributes;
        let base = self.base();

        let window = self.positive_window(x1, x2);
        let mut interval = Interval::new(
            window.lower() / base.powf(settings.lower_margin),
            window.upper() * base.powf(settings.upper_margin),
        )
        .limited(LOG_MIN, LOG_MAX);

        if self.spans_less_than_a_decade(interval) {
            let linear = self
                .linear_engine()
                .auto_scale(max_num_steps, window.lower(), window.upper());
            let linear_interval = linear.interval().normalized().limited(LOG_MIN, LOG_MAX);
            if self.spans_less_than_a_decade(linear_interval) {
                // Step converted to decades so divide_scale can convert back.
                let step_size = if linear.step_size < 0.0 {
                    -self.log(linear.step_size.abs())
                } else {
                    self.log(linear.step_size)
                };
                return AutoScale {
                    x1: linear.x1,
                    x2: linear.x2,
                    step_size,
                };
            }
        }

        let log_ref = if settings.reference > LOG_MIN / 2.0 {
            settings.reference.min(LOG_MAX / 2.0)
        } else {
            1.0
        };

        if attributes.symmetric {
            let delta = (interval.max_value() / log_ref).max(log_ref / interval.min_value());
            interval = Interval::new(log_ref / delta, log_ref * delta);
        }
        if attributes.include_reference {
            interval = interval.extend(log_ref);
        }
        interval = interval.limited(LOG_MIN, LOG_MAX);
        if interval.width() == 0.0 {
            interval = build_interval(interval.min_value()).limited(LOG_MIN, LOG_MAX);
        }

        let mut step_size = self
            .divide_interval(self.log_interval(interval).width(), max_num_steps.max(1))
            .max(1.0);
        if !attributes.floating {
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
        let interval = self.positive_window(x1, x2).limited(LOG_MIN, LOG_MAX);
        if interval.width() <= 0.0 {
            return ScaleDivision::new(x1, x2);
        }

        let (lower, upper) = if x1 > x2 {
            (interval.upper(), interval.lower())
        } else {
            (interval.lower(), interval.upper())
        };

        if self.spans_less_than_a_decade(interval) {
            let linear_step = if step_size == 0.0 {
                0.0
            } else {
                self.base().powf(step_size.abs())
            };
            return self.linear_engine().divide_scale(
                lower,
                upper,
                max_major_steps,
                max_minor_steps,
                linear_step,
            );
        }

        let mut step_size = step_size.abs();
        if step_size == 0.0 {
            step_size = self
                .divide_interval(self.log_interval(interval).width(), max_major_steps.max(1))
                .max(1.0);
        }

        let bounding = self.align(interval, step_size);
        let major = self.build_major_ticks(bounding, step_size);
        let (minor, medium) = if max_minor_steps > 0 {
            self.build_minor_ticks(&major, max_minor_steps, step_size)
        } else {
            (Vec::new(), Vec::new())
        };

        let mut division = ScaleDivision::with_ticks(
            interval,
            strip_ticks(minor, interval, 0.0),
            strip_ticks(medium, interval, 0.0),
            strip_ticks(major, interval, 0.0),
        );
        if x1 > x2 {
            division.invert();
        }
        division
    }
}

#[cfg(test)]
mod tests {
    use super::LogScaleEngine;
    use crate::core::interval::Interval;

    #[test]
    fn positive_window_substitutes_non_positive_bounds() {
        let engine = LogScaleEngine::new();
        assert_eq!(engine.positive_window(-5.0, 0.0), Interval::new(1.0, 10.0));
        assert_eq!(engine.positive_window(-5.0, 100.0), Interval::new(10.0, 100.0));
        assert_eq!(engine.positive_window(100.0, 1.0), Interval::new(1.0, 100.0));
    }

    #[test]
    fn align_snaps_to_decades() {
        let engine = LogScaleEngine::new();
        let aligned = engine.align(Interval::new(3.0, 300.0), 1.0);
        assert!((aligned.lower() - 1.0).abs() < 1e-9);
        assert!((aligned.upper() - 1000.0).abs() < 1e-6);
    }
}
