pub mod axis;
pub mod interval;
pub mod log_scale_engine;
pub mod scale_arithmetic;
pub mod scale_div;
pub mod scale_engine;
pub mod scale_map;
pub mod types;

pub use axis::{AxisArray, AxisPosition};
pub use interval::Interval;
pub use log_scale_engine::LogScaleEngine;
pub use scale_div::{ScaleDivision, TickType};
pub use scale_engine::{
    AutoScale, LinearScaleEngine, ScaleAttributes, ScaleEngine, ScaleEngineKind,
    ScaleEngineSettings,
};
pub use scale_map::{ScaleMap, Transformation};
pub use types::{Rect, Size};
