//! Turn a regression model into a binary classifier
//!
//! The wrapped regressor is trained on targets encoded as `0.0` and `1.0`. Its continuous output
//! is then post-processed: for hard predictions it is rounded half-to-even and clamped to `[0, 1]`,
//! for probability estimates it is only clamped. The clamped output is an ad-hoc proxy for the
//! probability of the positive class, it is not calibrated.
use ndarray::{Array1, ArrayBase, ArrayView2, Data, Ix1, Ix2};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::{AsSingleTargets, DatasetBase, Records};
use crate::error::{Error, Result};
use crate::metrics_classification::ToConfusionMatrix;
use crate::traits::{Fit, Predict, PredictInplace};
use crate::Float;

/// Round half to even, as `numpy.rint` does
///
/// Values with a fractional part of exactly one half are rounded to the nearest even integer,
/// everything else is rounded to the nearest integer.
pub fn round_half_even<F: Float>(x: F) -> F {
    let half = F::cast(0.5);
    if (x - x.trunc()).abs() == half {
        let two = F::cast(2.0);
        (x / two).round() * two
    } else {
        x.round()
    }
}

/// Clamp a value to the closed unit interval
pub fn clamp_unit<F: Float>(x: F) -> F {
    x.max(F::zero()).min(F::one())
}

/// Hyperparameters of a binary classifier backed by a regression model
///
/// Holds the regression hyperparameter set `P` which is used as a template. Fitting leaves it
/// untouched and returns a [`BinaryRegressionAdapter`] which exclusively owns the fitted
/// regression model.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryRegressionAdapterParams<P> {
    regressor: P,
}

impl<P> BinaryRegressionAdapterParams<P> {
    pub fn new(regressor: P) -> Self {
        BinaryRegressionAdapterParams { regressor }
    }

    /// The wrapped regression hyperparameters
    pub fn regressor(&self) -> &P {
        &self.regressor
    }
}

/// A fitted binary classifier backed by a regression model
///
/// Predicted labels are exactly `0` or `1`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryRegressionAdapter<M> {
    model: M,
    nfeatures: usize,
}

impl<F, D, T, P, M, E> Fit<ArrayBase<D, Ix2>, T, E> for BinaryRegressionAdapterParams<P>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = usize>,
    P: for<'a> Fit<ArrayView2<'a, F>, Array1<F>, E, Object = M>,
    E: std::error::Error + From<Error>,
{
    type Object = BinaryRegressionAdapter<M>;

    /// Fit the wrapped regressor on targets encoded as `0` and `1`
    ///
    /// Fails with `InvalidInput` for any other label and when the number of targets differs from
    /// the number of records. Errors of the regressor are returned unchanged.
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> std::result::Result<Self::Object, E> {
        let targets = dataset.targets().as_single_targets();
        if targets.len() != dataset.nsamples() {
            return Err(Error::InvalidInput(format!(
                "{} records but {} targets",
                dataset.nsamples(),
                targets.len()
            ))
            .into());
        }

        if let Some(label) = targets.iter().find(|x| **x > 1) {
            return Err(Error::InvalidInput(format!(
                "binary targets have to be 0 or 1, but got {}",
                label
            ))
            .into());
        }

        let encoded = targets.mapv(F::cast);
        let model = self
            .regressor
            .fit(&DatasetBase::new(dataset.records().view(), encoded))?;

        Ok(BinaryRegressionAdapter {
            model,
            nfeatures: dataset.nfeatures(),
        })
    }
}

impl<M> BinaryRegressionAdapter<M> {
    /// The fitted regression model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Number of features seen during fitting
    pub fn nfeatures(&self) -> usize {
        self.nfeatures
    }

    fn check_shape<R: Records>(&self, x: &R) -> Result<()> {
        if x.nfeatures() != self.nfeatures {
            return Err(Error::ShapeMismatch {
                expected: self.nfeatures,
                actual: x.nfeatures(),
            });
        }

        Ok(())
    }

    /// Continuous output of the wrapped regressor
    fn regress<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<F>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.check_shape(x)?;

        Ok(self.model.predict(x))
    }

    /// Predict labels `0` or `1`
    ///
    /// The regression output is rounded half-to-even first and clamped afterwards, so `1.6`
    /// becomes `1` and `-0.4` becomes `0`.
    pub fn predict<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<usize>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        let y = self.regress(x)?;

        Ok(y.mapv(|v| clamp_unit(round_half_even(v)).as_()))
    }

    /// Same as [`predict`](Self::predict)
    pub fn decision_function<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<usize>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        self.predict(x)
    }

    /// Clamped regression output, used as score of the positive class
    ///
    /// No rounding happens and values outside of `[0, 1]` are truncated, not rescaled.
    pub fn predict_proba<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<F>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        let y = self.regress(x)?;

        Ok(y.mapv(clamp_unit))
    }

    /// Fraction of samples whose predicted label equals the provided label
    pub fn score<F, D, S>(&self, x: &ArrayBase<D, Ix2>, y: &ArrayBase<S, Ix1>) -> Result<f32>
    where
        F: Float,
        D: Data<Elem = F>,
        S: Data<Elem = usize>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        if y.is_empty() {
            return Err(Error::InvalidInput(
                "cannot score an empty set of samples".into(),
            ));
        }

        let cm = self.predict(x)?.confusion_matrix(y)?;

        Ok(cm.accuracy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array2};

    /// Hyperparameters of a dummy regressor which ignores the training data
    #[derive(Clone)]
    struct ConstantParams;

    /// Returns the first feature of each sample as regression output
    #[derive(Debug)]
    struct Passthrough;

    impl<'a> Fit<ArrayView2<'a, f64>, Array1<f64>, Error> for ConstantParams {
        type Object = Passthrough;

        fn fit(
            &self,
            _: &DatasetBase<ArrayView2<'a, f64>, Array1<f64>>,
        ) -> std::result::Result<Passthrough, Error> {
            Ok(Passthrough)
        }
    }

    impl<D: Data<Elem = f64>> PredictInplace<ArrayBase<D, Ix2>, Array1<f64>> for Passthrough {
        fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<f64>) {
            y.assign(&x.column(0));
        }

        fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<f64> {
            Array1::zeros(x.nrows())
        }
    }

    /// Hyperparameters which always fail to fit
    struct FailingParams;

    impl<'a> Fit<ArrayView2<'a, f64>, Array1<f64>, Error> for FailingParams {
        type Object = Passthrough;

        fn fit(
            &self,
            _: &DatasetBase<ArrayView2<'a, f64>, Array1<f64>>,
        ) -> std::result::Result<Passthrough, Error> {
            Err(Error::Parameters("singular matrix".into()))
        }
    }

    fn fitted() -> BinaryRegressionAdapter<Passthrough> {
        let dataset = DatasetBase::new(Array2::<f64>::zeros((2, 1)), array![0usize, 1]);
        let model: std::result::Result<_, Error> =
            BinaryRegressionAdapterParams::new(ConstantParams).fit(&dataset);
        model.unwrap()
    }

    #[test]
    fn round_half_even_ties() {
        assert_abs_diff_eq!(round_half_even(0.5f64), 0.0);
        assert_abs_diff_eq!(round_half_even(1.5f64), 2.0);
        assert_abs_diff_eq!(round_half_even(2.5f64), 2.0);
        assert_abs_diff_eq!(round_half_even(-0.5f64), 0.0);
        assert_abs_diff_eq!(round_half_even(-1.5f64), -2.0);
        assert_abs_diff_eq!(round_half_even(1.6f32), 2.0);
        assert_abs_diff_eq!(round_half_even(-0.4f32), 0.0);
    }

    #[test]
    fn predict_rounds_then_clamps() {
        let model = fitted();
        let x = array![[1.6], [0.5], [1.5], [-0.4], [0.51], [-3.0], [7.2]];

        assert_eq!(model.predict(&x).unwrap(), array![1usize, 0, 1, 0, 1, 0, 1]);
        assert_eq!(model.decision_function(&x).unwrap(), model.predict(&x).unwrap());
    }

    #[test]
    fn predict_proba_only_clamps() {
        let model = fitted();
        let x = array![[1.6], [-0.3], [0.5], [0.25]];

        assert_abs_diff_eq!(
            model.predict_proba(&x).unwrap(),
            array![1.0, 0.0, 0.5, 0.25]
        );
    }

    #[test]
    fn score_is_accuracy() {
        let model = fitted();
        let x = array![[0.9], [0.2], [0.7], [0.4], [1.2]];
        let y = array![1usize, 0, 0, 1, 1];

        assert_abs_diff_eq!(model.score(&x, &y).unwrap(), 3.0 / 5.0);
    }

    #[test]
    fn rejects_non_binary_targets() {
        let dataset = DatasetBase::new(Array2::<f64>::zeros((3, 1)), array![0usize, 1, 2]);
        let res: std::result::Result<_, Error> =
            BinaryRegressionAdapterParams::new(ConstantParams).fit(&dataset);

        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn propagates_regressor_failure() {
        let dataset = DatasetBase::new(Array2::<f64>::zeros((2, 1)), array![0usize, 1]);
        let res: std::result::Result<_, Error> =
            BinaryRegressionAdapterParams::new(FailingParams).fit(&dataset);

        assert!(matches!(res, Err(Error::Parameters(msg)) if msg == "singular matrix"));
    }

    #[test]
    fn checks_feature_dimension() {
        let model = fitted();
        let x = Array2::<f64>::zeros((2, 3));

        assert!(matches!(
            model.predict(&x),
            Err(Error::ShapeMismatch {
                expected: 1,
                actual: 3
            })
        ));
        assert!(model.predict_proba(&x).is_err());
    }
}
