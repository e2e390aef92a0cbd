//! An error when fitting a linear regression model
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinearError>;

/// An error when fitting a linear regression model
#[derive(Error, Debug)]
pub enum LinearError {
    #[error("at least one sample needed")]
    NotEnoughSamples,
    #[error("penalty should be positive, but is {0}")]
    InvalidPenalty(f32),
    #[error("gamma prior parameters should be positive, but {0} is {1}")]
    InvalidPrior(&'static str, f32),
    #[error("tolerance should be positive, but is {0}")]
    InvalidTolerance(f32),
    #[error("at least one iteration needed")]
    InvalidMaxIterations,
    /// The regularized normal equations are singular
    #[error("the data is ill-conditioned")]
    IllConditioned,
    #[error(transparent)]
    LinalgError(#[from] linfa_linalg::LinalgError),
    #[error(transparent)]
    BaseCrate(#[from] regclass::Error),
}
