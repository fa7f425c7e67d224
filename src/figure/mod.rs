pub mod grid_layout;

pub use grid_layout::{FigureGridLayout, FigureMargins, GridSpec, calc_norm_rect};
