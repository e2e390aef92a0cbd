//! Ridge regression with a fixed penalty
use ndarray::{Array1, ArrayBase, Data, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regclass::dataset::{AsSingleTargets, DatasetBase};
use regclass::traits::{Fit, PredictInplace};
use regclass::Float;

use crate::error::{LinearError, Result};
use crate::hyperparams::{RidgeParams, RidgeValidParams};
use crate::spectral::{finite, Centered, Spectral};

/// A fitted ridge regression model
///
/// Ridge regression minimizes the residual sum of squares plus the squared L2 norm of the
/// weights, scaled by the penalty. The intercept is not penalized.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Ridge<F> {
    coefficients: Array1<F>,
    intercept: F,
}

impl<F: Float> Ridge<F> {
    /// Create a default parameter set for construction of a ridge model
    pub fn params() -> RidgeParams<F> {
        RidgeParams::new()
    }

    pub fn coefficients(&self) -> &Array1<F> {
        &self.coefficients
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> F {
        self.intercept
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, LinearError> for RidgeValidParams<F>
{
    type Object = Ridge<F>;

    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let data = Centered::new(
            dataset.records(),
            dataset.targets().as_single_targets(),
            self.with_intercept(),
        )?;

        let coefficients = finite(Spectral::new(&data)?.solve(self.penalty()))?;

        Ok(Ridge {
            intercept: data.intercept(&coefficients),
            coefficients,
        })
    }
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>> for Ridge<F> {
    fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<F>) {
        assert_eq!(
            x.nrows(),
            y.len(),
            "The number of data points must match the number of output targets."
        );

        *y = x.dot(&self.coefficients) + self.intercept;
    }

    fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<F> {
        Array1::zeros(x.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use regclass::traits::Predict;
    use regclass::Dataset;

    #[test]
    fn fits_a_line_through_two_dots() {
        let dataset = Dataset::new(array![[0f64], [1.]], array![1., 2.]);
        let model = Ridge::params().penalty(0.0).fit(&dataset).unwrap();
        let result = model.predict(dataset.records());

        assert_abs_diff_eq!(&result, &array![1., 2.], epsilon = 1e-12);
    }

    #[test]
    fn penalty_shrinks_the_slope() {
        // centered x = [-1, 1], centered y = [-1, 1], so the slope is 2 / (2 + penalty)
        let dataset = Dataset::new(array![[0f64], [2.]], array![1., 3.]);
        let model = Ridge::params().penalty(2.0).fit(&dataset).unwrap();

        assert_abs_diff_eq!(model.coefficients(), &array![0.5], epsilon = 1e-12);
        assert_abs_diff_eq!(model.intercept(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn zero_penalty_on_rank_deficient_data() {
        let dataset = Dataset::new(array![[1f64], [1.], [1.]], array![0., 1., 2.]);
        // a constant feature vanishes after centering
        let model = Ridge::params().penalty(0.0).fit(&dataset).unwrap();
        assert_abs_diff_eq!(model.coefficients(), &array![0.0]);
        assert_abs_diff_eq!(model.intercept(), 1.0, epsilon = 1e-12);
    }
}
