//! Bayesian ridge regression
use ndarray::{Array1, ArrayBase, Data, Ix1, Ix2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regclass::dataset::{AsSingleTargets, DatasetBase};
use regclass::traits::{Fit, PredictInplace};
use regclass::Float;

use crate::error::{LinearError, Result};
use crate::hyperparams::{BayesianRidgeParams, BayesianRidgeValidParams};
use crate::spectral::{finite, residual_sum, Centered, Spectral};

/// A fitted Bayesian ridge regression model
///
/// The model places a zero-mean isotropic Gaussian prior with precision `lambda` over the weights
/// and assumes Gaussian noise with precision `alpha`. Both precisions are estimated by
/// maximizing the marginal likelihood of the training data, so the amount of regularization
/// adapts to the data without cross-validation.
///
/// ## Model implementation
///
/// The evidence is maximized with MacKay's fixed-point updates. The Gram matrix of the centered
/// records is decomposed once, then every iteration computes the posterior mean of the weights
/// for the current precisions, the effective number of parameters `gamma` and the updated
/// precisions. The iteration stops once the weights change less than the tolerance in L1 norm.
///
/// See also:
/// * [MacKay, Bayesian Interpolation](https://doi.org/10.1162/neco.1992.4.3.415)
/// * Tipping, Sparse Bayesian Learning and the Relevance Vector Machine, JMLR 2001
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BayesianRidge<F> {
    coefficients: Array1<F>,
    intercept: F,
    alpha: F,
    lambda: F,
    n_iterations: u32,
}

impl<F: Float> BayesianRidge<F> {
    /// Create a default parameter set for construction of a Bayesian ridge model
    pub fn params() -> BayesianRidgeParams<F> {
        BayesianRidgeParams::new()
    }

    /// Posterior mean of the weights
    pub fn coefficients(&self) -> &Array1<F> {
        &self.coefficients
    }

    /// Get the fitted intercept, 0. if no intercept was fitted
    pub fn intercept(&self) -> F {
        self.intercept
    }

    /// Estimated precision of the noise
    pub fn alpha(&self) -> F {
        self.alpha
    }

    /// Estimated precision of the weights
    pub fn lambda(&self) -> F {
        self.lambda
    }

    /// Number of evidence updates until convergence
    pub fn n_iterations(&self) -> u32 {
        self.n_iterations
    }
}

impl<F: Float, D: Data<Elem = F>, T: AsSingleTargets<Elem = F>>
    Fit<ArrayBase<D, Ix2>, T, LinearError> for BayesianRidgeValidParams<F>
{
    type Object = BayesianRidge<F>;

    /// Fit a Bayesian ridge model given a feature matrix `X` and a target variable `y`.
    ///
    /// The feature matrix `X` must have shape `(n_samples, n_features)`, the target variable `y`
    /// must have shape `(n_samples)`.
    fn fit(&self, dataset: &DatasetBase<ArrayBase<D, Ix2>, T>) -> Result<Self::Object> {
        let data = Centered::new(
            dataset.records(),
            dataset.targets().as_single_targets(),
            self.with_intercept(),
        )?;
        let spectral = Spectral::new(&data)?;

        let nsamples = F::cast(data.records.nrows());
        let two = F::cast(2.0);

        let mut alpha = initial_alpha(&dataset.targets().as_single_targets());
        let mut lambda = F::one();

        let mut coefficients = solve(&spectral, alpha, lambda)?;
        let mut n_iterations = 0;
        let mut converged = false;

        for iter in 0..self.max_iterations() {
            let rss = residual_sum(&data, &coefficients);

            let gamma = spectral
                .eigvals()
                .iter()
                .map(|ev| alpha * *ev / (lambda + alpha * *ev))
                .sum::<F>();

            lambda = (gamma + two * self.lambda_1())
                / (coefficients.dot(&coefficients) + two * self.lambda_2());
            alpha = (nsamples - gamma + two * self.alpha_1()) / (rss + two * self.alpha_2());

            let updated = solve(&spectral, alpha, lambda)?;
            let change = (&updated - &coefficients).mapv(|x| x.abs()).sum();
            coefficients = updated;
            n_iterations = iter + 1;

            if change < self.tolerance() {
                converged = true;
                break;
            }
        }

        if converged {
            debug!(n_iterations, %alpha, %lambda, "bayesian ridge converged");
        } else {
            debug!(
                n_iterations,
                %alpha,
                %lambda,
                "bayesian ridge reached the maximum number of iterations"
            );
        }

        Ok(BayesianRidge {
            intercept: data.intercept(&coefficients),
            coefficients,
            alpha,
            lambda,
            n_iterations,
        })
    }
}

/// Starting noise precision, the inverse of the target variance
///
/// The variance is always taken around the target mean, even when no intercept is fitted.
fn initial_alpha<F: Float, D: Data<Elem = F>>(targets: &ArrayBase<D, Ix1>) -> F {
    F::one() / (targets.var(F::zero()) + F::epsilon())
}

/// Posterior mean of the weights for the given precisions
fn solve<F: Float>(spectral: &Spectral<F>, alpha: F, lambda: F) -> Result<Array1<F>> {
    finite(spectral.solve(lambda / alpha))
}

impl<F: Float, D: Data<Elem = F>> PredictInplace<ArrayBase<D, Ix2>, Array1<F>>
    for BayesianRidge<F>
{
    /// Given an input matrix `X`, with shape `(n_samples, n_features)`, `predict` returns the
    /// posterior mean of the target variable.
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
