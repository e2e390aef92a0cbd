//!
//! `regclass-classifier` wraps the one-vs-rest composition of `regclass` into a stateful
//! classifier. Without further configuration the classifier uses Bayesian ridge regression as
//! base estimator, any other [`BaseEstimator`] can be supplied instead.
//!
//! ## Current state
//!
//! `regclass-classifier` provides
//! - [`RegressionClassifier`], a classifier which is fitted in place and returns
//!   [`NotFitted`](regclass::Error::NotFitted) when queried before fitting
//! - [`GridSearchParams`], which picks the best base estimator out of a list of candidates by
//!   k-fold cross-validated accuracy
//!
//! ## Example
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//! use regclass::prelude::*;
//! use regclass_classifier::RegressionClassifier;
//! use regclass_linear::LinearError;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let dataset = regclass_datasets::three_clusters(&mut rng);
//!
//! let mut classifier: RegressionClassifier<f64, usize> = RegressionClassifier::default();
//! classifier.fit(&dataset)?;
//!
//! let accuracy = classifier.score(dataset.records(), dataset.targets())?;
//! assert!(accuracy > 0.9);
//! # Ok::<(), LinearError>(())
//! ```

mod classifier;
mod estimator;
mod grid_search;

pub use classifier::*;
pub use estimator::*;
pub use grid_search::*;
