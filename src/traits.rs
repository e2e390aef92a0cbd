//! Provide traits for different classes of algorithms
//!

use crate::dataset::{DatasetBase, Records};
use std::convert::From;

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. For example
/// in a regression task the fitted object holds the hyperplane which approximates the targets,
/// in a one-vs-rest classification it holds one fitted binary model per class. The hyperparameter
/// set implementing `Fit` is left untouched, so it can be used as a template for any number of
/// models.
///
/// The error type `E` is chosen by the algorithm. It has to be constructible from the base
/// crate error, so that input validation done by composing models surfaces through the same
/// error type as the failures of the wrapped algorithm.
pub trait Fit<R: Records, T, E: std::error::Error + From<crate::error::Error>> {
    type Object;

    fn fit(&self, dataset: &DatasetBase<R, T>) -> Result<Self::Object, E>;
}

/// Predict with model into a mutable reference of targets.
pub trait PredictInplace<R: Records, T> {
    /// Predict something in place
    fn predict_inplace<'a>(&'a self, x: &'a R, y: &mut T);

    /// Create targets that `predict_inplace` works with.
    fn default_target(&self, x: &R) -> T;
}

/// Predict with model
///
/// This trait assumes the `PredictInplace` implementation and provides additional input/output
/// combinations.
pub trait Predict<R: Records, T> {
    fn predict(&self, x: R) -> T;
}

impl<'a, R: Records, T, O> Predict<&'a R, T> for O
where
    O: PredictInplace<R, T>,
{
    fn predict(&self, records: &'a R) -> T {
        let mut targets = self.default_target(records);
        self.predict_inplace(records, &mut targets);
        targets
    }
}
