use regclass::Float;
use regclass_linear::{
    BayesianRidge, BayesianRidgeParams, BayesianRidgeValidParams, LinearError, Ridge, RidgeParams,
    RidgeValidParams,
};

/// Regression hyperparameters which can serve as base estimator of a
/// [`RegressionClassifier`](crate::RegressionClassifier)
///
/// Names the fitted model and the error type of a regression algorithm, so that the classifier
/// can store the fitted per-class models. The hyperparameters are cloned once per class and the
/// clones are fitted in parallel, hence the `Clone + Sync` bound.
///
/// Implement this for your own hyperparameter set to use it with the classifier. The set also
/// has to implement [`Fit`](regclass::traits::Fit) on record views with `Object = Self::Model`.
pub trait BaseEstimator<F>: Clone + Sync {
    /// The fitted regression model
    type Model: Send;
    /// Error returned when fitting fails
    type Error: std::error::Error + From<regclass::Error> + Send;
}

impl<F: Float> BaseEstimator<F> for BayesianRidgeParams<F> {
    type Model = BayesianRidge<F>;
    type Error = LinearError;
}

impl<F: Float> BaseEstimator<F> for BayesianRidgeValidParams<F> {
    type Model = BayesianRidge<F>;
    type Error = LinearError;
}

impl<F: Float> BaseEstimator<F> for RidgeParams<F> {
    type Model = Ridge<F>;
    type Error = LinearError;
}

impl<F: Float> BaseEstimator<F> for RidgeValidParams<F> {
    type Model = Ridge<F>;
    type Error = LinearError;
}
