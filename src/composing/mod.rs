//! Composition models
//!
//! This module contains two composition models:
//!  * `BinaryRegressionAdapter`: use a regression model as binary classifier
//!  * `OneVsRest`: combine binary regression classifiers to a single multi-class model
mod binary_adapter;
mod one_vs_rest;

pub use binary_adapter::{
    clamp_unit, round_half_even, BinaryRegressionAdapter, BinaryRegressionAdapterParams,
};
pub use one_vs_rest::{OneVsRest, OneVsRestParams};
