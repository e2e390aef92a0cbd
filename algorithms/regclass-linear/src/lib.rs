//!
//! `regclass-linear` provides pure Rust implementations of penalized linear regression
//! algorithms. They serve as base estimators when regression is used for classification.
//!
//! ## Current state
//!
//! `regclass-linear` currently provides an implementation of the following regression
//! algorithms:
//! - Bayesian ridge regression, which estimates the penalty from the data
//! - Ridge regression with a fixed penalty
//!
//! Both fit an intercept by default and solve the normal equations through an eigendecomposition
//! of the Gram matrix.

mod bayesian_ridge;
mod error;
mod hyperparams;
mod ridge;
mod spectral;

pub use bayesian_ridge::*;
pub use error::*;
pub use hyperparams::*;
pub use ridge::*;
