//! A stateful classifier backed by regression models
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix1, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regclass::dataset::{AsSingleTargets, DatasetBase, Label};
use regclass::error::{Error, Result};
use regclass::traits::{Fit, PredictInplace};
use regclass::{Float, OneVsRest, OneVsRestParams};
use regclass_linear::{BayesianRidge, BayesianRidgeParams};

use crate::estimator::BaseEstimator;

/// Configuration of a [`RegressionClassifier`]
///
/// Holds exactly the base estimator, which is shared by the models of all classes.
///
/// # Parameters
/// | Name | Default | Purpose |
/// | :--- | :--- | :--- |
/// | [base_estimator](Self::base_estimator) | `BayesianRidge::params()` | Regression hyperparameters fitted once per class |
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionClassifierParams<P> {
    base_estimator: P,
}

impl<P> RegressionClassifierParams<P> {
    pub fn new(base_estimator: P) -> Self {
        RegressionClassifierParams { base_estimator }
    }

    pub fn base_estimator(&self) -> &P {
        &self.base_estimator
    }

    /// Replace the base estimator
    pub fn with_base_estimator(mut self, base_estimator: P) -> Self {
        self.base_estimator = base_estimator;
        self
    }
}

impl<F: Float> Default for RegressionClassifierParams<BayesianRidgeParams<F>> {
    fn default() -> Self {
        Self::new(BayesianRidge::params())
    }
}

/// A classifier which fits one regression model per class
///
/// The classifier is created unfitted. [`fit`](Self::fit) trains a one-vs-rest composition of
/// binary regression adapters and replaces any previously fitted state. All queries fail with
/// [`NotFitted`](Error::NotFitted) until the first successful fit.
///
/// Changing the configuration with [`set_params`](Self::set_params) keeps the fitted models,
/// the new base estimator is used from the next call to `fit` on.
///
/// ## Example
///
/// ```
/// use ndarray::array;
/// use regclass::Dataset;
/// use regclass_classifier::RegressionClassifier;
/// use regclass_linear::{LinearError, Ridge};
///
/// let dataset = Dataset::new(
///     array![[0., 0.], [0., 1.], [5., 5.], [5., 6.], [0., 5.], [1., 6.]],
///     array!["a", "a", "b", "b", "c", "c"],
/// );
///
/// let mut classifier = RegressionClassifier::new(Ridge::params().penalty(0.1));
/// classifier.fit(&dataset)?;
///
/// assert_eq!(classifier.classes()?, vec!["a", "b", "c"]);
/// assert_eq!(classifier.predict(&array![[5., 5.5]])?, array!["b"]);
/// # Ok::<(), LinearError>(())
/// ```
pub struct RegressionClassifier<F, L, P = BayesianRidgeParams<F>>
where
    P: BaseEstimator<F>,
{
    params: RegressionClassifierParams<P>,
    model: Option<OneVsRest<L, P::Model>>,
}

impl<F: Float, L> Default for RegressionClassifier<F, L> {
    fn default() -> Self {
        Self::with_params(RegressionClassifierParams::default())
    }
}

impl<F, L, P: BaseEstimator<F>> RegressionClassifier<F, L, P> {
    /// Create an unfitted classifier with the given base estimator
    pub fn new(base_estimator: P) -> Self {
        Self::with_params(RegressionClassifierParams::new(base_estimator))
    }

    pub fn with_params(params: RegressionClassifierParams<P>) -> Self {
        RegressionClassifier {
            params,
            model: None,
        }
    }

    /// The current configuration
    pub fn params(&self) -> &RegressionClassifierParams<P> {
        &self.params
    }

    /// Replace the configuration
    ///
    /// Fitted models are kept, the new configuration takes effect at the next fit.
    pub fn set_params(&mut self, params: RegressionClassifierParams<P>) -> &mut Self {
        self.params = params;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// The fitted one-vs-rest model, if any
    pub fn model(&self) -> Option<&OneVsRest<L, P::Model>> {
        self.model.as_ref()
    }

    fn fitted(&self) -> Result<&OneVsRest<L, P::Model>> {
        self.model.as_ref().ok_or(Error::NotFitted)
    }
}

impl<F, L, P> RegressionClassifier<F, L, P>
where
    F: Float,
    L: Label + Ord + Send + Sync,
    P: BaseEstimator<F>,
    P: for<'a> Fit<
        ArrayView2<'a, F>,
        Array1<F>,
        <P as BaseEstimator<F>>::Error,
        Object = <P as BaseEstimator<F>>::Model,
    >,
{
    /// Fit one regression model per distinct label
    ///
    /// On success any previously fitted state is replaced. On failure the classifier is left as
    /// it was, errors of the base estimator are returned unchanged.
    pub fn fit<D, T>(
        &mut self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> std::result::Result<&mut Self, P::Error>
    where
        D: Data<Elem = F>,
        T: AsSingleTargets<Elem = L>,
    {
        let params = OneVsRestParams::new(self.params.base_estimator().clone());
        let model: std::result::Result<OneVsRest<L, P::Model>, P::Error> = params.fit(dataset);

        self.model = Some(model?);

        Ok(self)
    }
}

impl<F: Float, L: Label + Ord, P: BaseEstimator<F>> RegressionClassifier<F, L, P> {
    /// The labels seen during fitting, in ascending order
    pub fn classes(&self) -> Result<Vec<L>> {
        Ok(self.fitted()?.classes())
    }

    /// Predict the label with the highest score for every sample
    pub fn predict<D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<L>>
    where
        D: Data<Elem = F>,
        P::Model: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.fitted()?.predict(x)
    }

    /// Same as [`predict`](Self::predict)
    pub fn decision_function<D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<L>>
    where
        D: Data<Elem = F>,
        P::Model: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.predict(x)
    }

    /// Clamped regression output of every class model, columns follow [`classes`](Self::classes)
    pub fn predict_proba<D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>>
    where
        D: Data<Elem = F>,
        P::Model: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.fitted()?.predict_proba(x)
    }

    /// Mean accuracy of the predictions
    pub fn score<D, S>(&self, x: &ArrayBase<D, Ix2>, y: &ArrayBase<S, Ix1>) -> Result<f32>
    where
        D: Data<Elem = F>,
        S: Data<Elem = L>,
        P::Model: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.fitted()?.score(x, y)
    }
}
