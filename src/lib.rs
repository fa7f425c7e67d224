//! plot-layout: axis scales, plot layout solving and zoom history.
//!
//! The crate computes "nice" axis ranges and tick divisions, solves the
//! rectangles of a plot (title, footer, legend, canvas and four axes) from
//! size hints, places several plots on a figure area, and keeps a zoom/pan
//! history over axis intervals. Rendering and text measurement stay with
//! the embedding application.

pub mod api;
pub mod core;
pub mod error;
pub mod figure;
pub mod interaction;
pub mod layout;
pub mod telemetry;

pub use api::{Figure, FigureConfig, Plot, PlotId};
pub use error::{PlotError, PlotResult};
