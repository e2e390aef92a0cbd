//! `regclass` turns regression models into classifiers.
//!
//! Kin in spirit to Python's `scikit-learn`, it provides the building blocks to use any
//! regression estimator for classification tasks:
//!
//! * a binary adapter which rounds and clamps the continuous output of a regression model to
//!   the labels `0` and `1`, and reports the clamped output as score of the positive class
//! * a one-vs-rest composition which fits one adapter per class and predicts the class with the
//!   highest score
//!
//! The regression models themselves are not part of this crate, any hyperparameter set
//! implementing [`Fit`](traits::Fit) whose fitted model implements
//! [`PredictInplace`](traits::PredictInplace) can be used. The `regclass-linear` crate provides
//! Bayesian ridge and ridge regression, `regclass-classifier` wraps everything into a stateful
//! classifier with a default estimator.
//!
//! ## Example
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use regclass::prelude::*;
//! use regclass_linear::{BayesianRidge, LinearError};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let (train, test) = regclass_datasets::three_clusters(&mut rng)
//!     .shuffle(&mut rng)
//!     .split_with_ratio(0.7);
//!
//! let model = OneVsRestParams::new(BayesianRidge::params()).fit(&train)?;
//! let accuracy = model.score(test.records(), test.targets())?;
//! assert!(accuracy > 0.5);
//! # Ok::<(), LinearError>(())
//! ```

pub mod composing;
pub mod dataset;
pub mod error;
mod metrics_classification;
pub mod param_guard;
pub mod prelude;
pub mod traits;

pub use composing::*;
pub use dataset::{Dataset, DatasetBase, Float, Label};
pub use error::Error;
pub use param_guard::ParamGuard;

/// Common metrics functions for classification
pub mod metrics {
    pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};
}
