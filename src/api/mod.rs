mod figure;
mod figure_config;
mod plot;

pub use figure::{Figure, PlotId};
pub use figure_config::FigureConfig;
pub use plot::{AxisScaleState, Plot, PlotLayoutKind};
