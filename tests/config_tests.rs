use plot_layout::core::AxisPosition;
use plot_layout::figure::FigureMargins;
use plot_layout::layout::LegendPosition;
use plot_layout::{FigureConfig, PlotError};

#[test]
fn figure_config_json_round_trip() {
    let mut config = FigureConfig::default();
    config.layout.spacing = 7;
    config.layout.legend_position = LegendPosition::Right;
    config.layout.legend_ratio = 0.4;
    config.layout.canvas_margin[AxisPosition::Top] = 3;
    config.max_stack_depth = Some(16);
    config.grid_spacing = 0.05;

    let json = config.to_json_pretty().expect("serialize config");
    let parsed = FigureConfig::from_json_str(&json).expect("parse config");

    assert_eq!(parsed, config);
}

#[test]
fn partial_json_falls_back_to_defaults() {
    let parsed = FigureConfig::from_json_str(r#"{ "max_stack_depth": 3 }"#).expect("parse config");

    assert_eq!(parsed.max_stack_depth, Some(3));
    assert_eq!(parsed.layout.spacing, 5);
    assert_eq!(parsed.layout.legend_position, LegendPosition::Bottom);
    assert_eq!(parsed.grid_spacing, 0.0);
    assert_eq!(parsed.figure_margins, FigureMargins::default());

    let parsed = FigureConfig::from_json_str(r#"{ "figure_margins": { "left": 0.1 } }"#)
        .expect("parse config");
    assert_eq!(parsed.figure_margins.left, 0.1);
    assert_eq!(parsed.figure_margins.right, 0.02);
}

#[test]
fn invalid_values_are_rejected() {
    let bad_ratio = r#"{ "layout": { "legend_ratio": 2.0 } }"#;
    assert!(matches!(
        FigureConfig::from_json_str(bad_ratio),
        Err(PlotError::InvalidData(_))
    ));

    let bad_margin = r#"{ "figure_margins": { "top": 1.5 } }"#;
    assert!(FigureConfig::from_json_str(bad_margin).is_err());

    let bad_spacing = r#"{ "grid_spacing": 1.0 }"#;
    assert!(FigureConfig::from_json_str(bad_spacing).is_err());

    assert!(FigureConfig::from_json_str("not json").is_err());
}

#[test]
fn zero_stack_depth_is_accepted() {
    let config = FigureConfig {
        max_stack_depth: Some(0),
        ..FigureConfig::default()
    };
    assert!(config.validate().is_ok());

    let mut figure = plot_layout::Figure::from_config(config).expect("valid config");
    let id = figure
        .add_plot(plot_layout::core::Rect::new(0.0, 0.0, 1.0, 1.0))
        .expect("plot");
    let plot = figure.plot(id).expect("plot");
    assert_eq!(plot.zoom_stack().max_stack_depth(), Some(1));
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn default_tracing_requires_the_telemetry_feature() {
    assert!(!plot_layout::telemetry::init_default_tracing());
}
