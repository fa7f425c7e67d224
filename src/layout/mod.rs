pub mod engine;
pub mod hints;
pub mod parasite;
pub mod plot_layout;

pub use engine::{Dimensions, LayoutEngine, LayoutOptions, LegendPosition};
pub use hints::{AxisLayoutHint, EstimatedText, LabelHint, LayoutHints, LegendHint, TextMetrics};
pub use parasite::ParasiteLayout;
pub use plot_layout::{LayoutRects, PlotLayout, PlotLayoutConfig};
