use thiserror::Error;

use crate::api::PlotId;

pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlotError {
    #[error("invalid grid placement: {0}")]
    InvalidGrid(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown plot: {id:?}")]
    UnknownPlot { id: PlotId },

    #[error("invalid parasite relation: {0}")]
    InvalidParasite(String),
}
