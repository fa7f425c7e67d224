use plot_layout::core::{LinearScaleEngine, LogScaleEngine, ScaleEngine, TickType};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_auto_scale_encloses_input(
        x1 in -10_000.0f64..10_000.0,
        span in 0.01f64..1_000_000.0,
        max_steps in 1usize..20,
        swap in any::<bool>()
    ) {
        let x2 = x1 + span;
        let (a, b) = if swap { (x2, x1) } else { (x1, x2) };

        let engine = LinearScaleEngine::new();
        let fitted = engine.auto_scale(max_steps, a, b);

        prop_assert!(fitted.x1 <= x1);
        prop_assert!(fitted.x2 >= x2);
        prop_assert!(fitted.step_size > 0.0);
    }

    #[test]
    fn linear_ticks_lie_inside_the_division(
        x1 in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        max_major in 1usize..15,
        max_minor in 0usize..10,
        swap in any::<bool>()
    ) {
        let x2 = x1 + span;
        let (a, b) = if swap { (x2, x1) } else { (x1, x2) };

        let division = LinearScaleEngine::new().divide_scale(a, b, max_major, max_minor, 0.0);
        for tick_type in TickType::ALL {
            let ticks = division.ticks(tick_type);
            prop_assert!(ticks.windows(2).all(|pair| pair[0] <= pair[1]));
            for tick in ticks {
                prop_assert!(*tick >= x1 && *tick <= x2);
            }
        }
    }

    #[test]
    fn dividing_a_division_again_reproduces_its_ticks(
        x1 in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        max_major in 1usize..15,
        max_minor in 0usize..10
    ) {
        let engine = LinearScaleEngine::new();
        let fitted = engine.auto_scale(max_major, x1, x1 + span);
        let division = engine.divide_scale(fitted.x1, fitted.x2, max_major, max_minor, fitted.step_size);
        let again = engine.divide_scale(
            division.lower_bound(),
            division.upper_bound(),
            max_major,
            max_minor,
            fitted.step_size,
        );

        prop_assert_eq!(division, again);
    }

    #[test]
    fn log_ticks_are_positive_and_inside(
        exponent in -20.0f64..20.0,
        decades in 0.1f64..12.0,
        max_major in 1usize..12,
        max_minor in 0usize..10
    ) {
        let x1 = 10f64.powf(exponent);
        let x2 = 10f64.powf(exponent + decades);

        let division = LogScaleEngine::new().divide_scale(x1, x2, max_major, max_minor, 0.0);
        for tick_type in TickType::ALL {
            for tick in division.ticks(tick_type) {
                prop_assert!(*tick > 0.0);
                prop_assert!(*tick >= x1 && *tick <= x2);
            }
        }
    }
}
