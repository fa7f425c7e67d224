use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};
use crate::figure::FigureMargins;
use crate::layout::PlotLayoutConfig;

/// Serializable settings of a [`Figure`](super::Figure).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Layout parameters applied to every new plot.
    #[serde(default)]
    pub layout: PlotLayoutConfig,
    /// Zoom history bound of every new plot; `None` keeps all states and 0
    /// behaves like 1.
    #[serde(default)]
    pub max_stack_depth: Option<usize>,
    /// Default inter-cell spacing for grid placement, in `[0, 1)`.
    #[serde(default = "default_grid_spacing")]
    pub grid_spacing: f64,
    #[serde(default)]
    pub figure_margins: FigureMargins,
}

fn default_grid_spacing() -> f64 {
    0.0
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            layout: PlotLayoutConfig::default(),
            max_stack_depth: None,
            grid_spacing: default_grid_spacing(),
            figure_margins: FigureMargins::default(),
        }
    }
}

impl FigureConfig {
    pub fn validate(&self) -> PlotResult<()> {
        self.layout.validate()?;
        self.figure_margins.validate()?;
        if !self.grid_spacing.is_finite() || !(0.0..1.0).contains(&self.grid_spacing) {
            return Err(PlotError::InvalidData(format!(
                "grid spacing must be in [0, 1), got {}",
                self.grid_spacing
            )));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(self) -> PlotResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| PlotError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates config from JSON.
    pub fn from_json_str(input: &str) -> PlotResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
