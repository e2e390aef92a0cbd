//! Error types in regclass
//!

use thiserror::Error;

use ndarray::ShapeError;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    /// Malformed training input, e.g. mismatched lengths or a single class
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("expected {expected} features, but got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("the model has to be fitted before it can be used")]
    NotFitted,
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("prediction and ground truth have different lengths: {0} vs {1}")]
    MismatchedShapes(usize, usize),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
}
