pub mod zoom_stack;

pub use zoom_stack::{AxisScales, ZoomState, ZoomStateStack};
