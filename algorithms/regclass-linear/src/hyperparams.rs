#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regclass::{Float, ParamGuard};

use crate::error::{LinearError, Result};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BayesianRidgeValidParams<F> {
    max_iterations: u32,
    tolerance: F,
    alpha_1: F,
    alpha_2: F,
    lambda_1: F,
    lambda_2: F,
    with_intercept: bool,
}

impl<F: Float> BayesianRidgeValidParams<F> {
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn alpha_1(&self) -> F {
        self.alpha_1
    }

    pub fn alpha_2(&self) -> F {
        self.alpha_2
    }

    pub fn lambda_1(&self) -> F {
        self.lambda_1
    }

    pub fn lambda_2(&self) -> F {
        self.lambda_2
    }

    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }
}

/// A hyper-parameter set for Bayesian ridge regression
///
/// Estimates a ridge regression model where the noise precision `alpha` and the weight precision
/// `lambda` are inferred from the data. Both precisions carry a Gamma prior whose shape and rate
/// are configured here.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [max_iterations](Self::max_iterations) | `300` | Maximum number of evidence updates | `[1, inf)` |
/// | [tolerance](Self::tolerance) | `1e-3` | Stop once the L1 change of the weights falls below | `(0, inf)` |
/// | [alpha_1](Self::alpha_1) | `1e-6` | Shape of the Gamma prior over `alpha` | `[0, inf)` |
/// | [alpha_2](Self::alpha_2) | `1e-6` | Rate of the Gamma prior over `alpha` | `[0, inf)` |
/// | [lambda_1](Self::lambda_1) | `1e-6` | Shape of the Gamma prior over `lambda` | `[0, inf)` |
/// | [lambda_2](Self::lambda_2) | `1e-6` | Rate of the Gamma prior over `lambda` | `[0, inf)` |
/// | [with_intercept](Self::with_intercept) | `true` | Enable intercept | `false`, `true` |
///
/// # Example
///
/// ```rust
/// use regclass_linear::{BayesianRidgeParams, LinearError};
/// use regclass::prelude::*;
/// use ndarray::array;
///
/// let ds = Dataset::new(array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]], array![3.0, 2.0, 5.0]);
///
/// let unchecked_params = BayesianRidgeParams::new().max_iterations(100);
/// let model = unchecked_params.fit(&ds)?;
///
/// // errors of a verified parameter set only come from the fitting process
/// let checked_params = unchecked_params.check()?;
/// let model = checked_params.fit(&ds)?;
/// # Ok::<(), LinearError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BayesianRidgeParams<F>(BayesianRidgeValidParams<F>);

impl<F: Float> Default for BayesianRidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> BayesianRidgeParams<F> {
    pub fn new() -> BayesianRidgeParams<F> {
        Self(BayesianRidgeValidParams {
            max_iterations: 300,
            tolerance: F::cast(1e-3),
            alpha_1: F::cast(1e-6),
            alpha_2: F::cast(1e-6),
            lambda_1: F::cast(1e-6),
            lambda_2: F::cast(1e-6),
            with_intercept: true,
        })
    }

    /// Set the maximum number of evidence updates
    ///
    /// Defaults to `300` if not set
    pub fn max_iterations(mut self, max_iterations: u32) -> Self {
        self.0.max_iterations = max_iterations;
        self
    }

    /// Set the tolerance on the L1 change of the weights between two updates
    ///
    /// Defaults to `1e-3` if not set
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.0.tolerance = tolerance;
        self
    }

    /// Shape parameter of the Gamma prior over the noise precision
    pub fn alpha_1(mut self, alpha_1: F) -> Self {
        self.0.alpha_1 = alpha_1;
        self
    }

    /// Rate parameter of the Gamma prior over the noise precision
    pub fn alpha_2(mut self, alpha_2: F) -> Self {
        self.0.alpha_2 = alpha_2;
        self
    }

    /// Shape parameter of the Gamma prior over the weight precision
    pub fn lambda_1(mut self, lambda_1: F) -> Self {
        self.0.lambda_1 = lambda_1;
        self
    }

    /// Rate parameter of the Gamma prior over the weight precision
    pub fn lambda_2(mut self, lambda_2: F) -> Self {
        self.0.lambda_2 = lambda_2;
        self
    }

    /// Configure the model to fit an intercept.
    /// Defaults to `true` if not set.
    pub fn with_intercept(mut self, with_intercept: bool) -> Self {
        self.0.with_intercept = with_intercept;
        self
    }
}

impl<F: Float> ParamGuard for BayesianRidgeParams<F> {
    type Checked = BayesianRidgeValidParams<F>;
    type Error = LinearError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let priors = [
            ("alpha_1", self.0.alpha_1),
            ("alpha_2", self.0.alpha_2),
            ("lambda_1", self.0.lambda_1),
            ("lambda_2", self.0.lambda_2),
        ];

        if self.0.max_iterations == 0 {
            return Err(LinearError::InvalidMaxIterations);
        }
        if self.0.tolerance.is_nan() || self.0.tolerance <= F::zero() {
            return Err(LinearError::InvalidTolerance(
                self.0.tolerance.to_f32().unwrap_or(f32::NAN),
            ));
        }
        if let Some((name, value)) = priors
            .iter()
            .find(|(_, value)| value.is_nan() || value.is_sign_negative())
        {
            return Err(LinearError::InvalidPrior(
                *name,
                value.to_f32().unwrap_or(f32::NAN),
            ));
        }

        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeValidParams<F> {
    penalty: F,
    with_intercept: bool,
}

impl<F: Float> RidgeValidParams<F> {
    pub fn penalty(&self) -> F {
        self.penalty
    }

    pub fn with_intercept(&self) -> bool {
        self.with_intercept
    }
}

/// A hyper-parameter set for ridge regression
///
/// Minimizes `||y - Xw||^2_2 + penalty * ||w||^2_2`. A penalty of zero gives ordinary least
/// squares, for rank deficient data the solution with minimum norm is picked.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | [penalty](Self::penalty) | `1.0` | Strength of the L2 penalty | `[0, inf)` |
/// | [with_intercept](Self::with_intercept) | `true` | Enable intercept | `false`, `true` |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct RidgeParams<F>(RidgeValidParams<F>);

impl<F: Float> Default for RidgeParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Float> RidgeParams<F> {
    pub fn new() -> RidgeParams<F> {
        Self(RidgeValidParams {
            penalty: F::one(),
            with_intercept: true,
        })
    }

    /// Set the strength of the L2 penalty, otherwise known as `alpha`.
    ///
    /// Defaults to `1.0` if not set
    pub fn penalty(mut self, penalty: F) -> Self {
        self.0.penalty = penalty;
        self
    }

    /// Configure the model to fit an intercept.
    /// Defaults to `true` if not set.
    pub fn with_intercept(mut self, with_intercept: bool) -> Self {
        self.0.with_intercept = with_intercept;
        self
    }
}

impl<F: Float> ParamGuard for RidgeParams<F> {
    type Checked = RidgeValidParams<F>;
    type Error = LinearError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.penalty.is_nan() || self.0.penalty.is_sign_negative() {
            Err(LinearError::InvalidPenalty(
                self.0.penalty.to_f32().unwrap_or(f32::NAN),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bayesian_ridge_defaults() {
        let params = BayesianRidgeParams::<f64>::default().check().unwrap();

        assert_eq!(params.max_iterations(), 300);
        assert!((params.tolerance() - 1e-3).abs() < 1e-12);
        assert!((params.lambda_2() - 1e-6).abs() < 1e-15);
        assert!(params.with_intercept());
    }

    #[test]
    fn invalid_bayesian_ridge_params() {
        let res = BayesianRidgeParams::<f64>::new().tolerance(0.0).check();
        assert!(matches!(res, Err(LinearError::InvalidTolerance(_))));

        let res = BayesianRidgeParams::<f64>::new().max_iterations(0).check();
        assert!(matches!(res, Err(LinearError::InvalidMaxIterations)));

        let res = BayesianRidgeParams::<f64>::new().lambda_1(-1.0).check();
        assert!(matches!(res, Err(LinearError::InvalidPrior("lambda_1", _))));
    }

    #[test]
    fn invalid_ridge_penalty() {
        let res = RidgeParams::<f32>::new().penalty(-0.5).check();
        assert!(matches!(res, Err(LinearError::InvalidPenalty(_))));

        assert!(RidgeParams::<f32>::new().penalty(0.0).check().is_ok());
    }
}
