//! Merge binary regression classifiers to a multi-class classifier
//!
//! For every distinct label a separate [`BinaryRegressionAdapter`] is fitted, which learns to
//! separate that label from all others. The multi-class prediction of a sample is the label whose
//! adapter reports the highest score.
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix1, Ix2};
use rayon::prelude::*;
use tracing::debug;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use super::binary_adapter::{BinaryRegressionAdapter, BinaryRegressionAdapterParams};
use crate::dataset::{AsSingleTargets, DatasetBase, Label, Records};
use crate::error::{Error, Result};
use crate::metrics_classification::ToConfusionMatrix;
use crate::traits::{Fit, PredictInplace};
use crate::Float;

/// One-vs-rest hyperparameters
///
/// Holds the base estimator, the regression hyperparameter set which is cloned for every class.
/// All classes share the same base estimator configuration.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct OneVsRestParams<P> {
    base_estimator: P,
}

impl<P> OneVsRestParams<P> {
    pub fn new(base_estimator: P) -> Self {
        OneVsRestParams { base_estimator }
    }

    /// The regression hyperparameters used as template for every class
    pub fn base_estimator(&self) -> &P {
        &self.base_estimator
    }

    /// Replace the base estimator
    pub fn with_base_estimator(mut self, base_estimator: P) -> Self {
        self.base_estimator = base_estimator;
        self
    }
}

/// A fitted one-vs-rest classifier
///
/// Holds one binary adapter per label, ordered by ascending label.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct OneVsRest<L, M> {
    models: Vec<(L, BinaryRegressionAdapter<M>)>,
    nfeatures: usize,
}

impl<F, D, T, L, P, M, E> Fit<ArrayBase<D, Ix2>, T, E> for OneVsRestParams<P>
where
    F: Float,
    D: Data<Elem = F>,
    T: AsSingleTargets<Elem = L>,
    L: Label + Ord + Send + Sync,
    P: for<'a> Fit<ArrayView2<'a, F>, Array1<F>, E, Object = M> + Clone + Sync,
    M: Send,
    E: std::error::Error + From<Error> + Send,
{
    type Object = OneVsRest<L, M>;

    /// Fit one binary adapter per distinct label
    ///
    /// The adapter of label `c` is trained on targets which are `1` where the label equals `c`
    /// and `0` everywhere else. Adapters are independent of each other and fitted in parallel.
    ///
    /// Fails with `InvalidInput` when the number of targets differs from the number of records,
    /// when there are no samples, or when only a single class is present.
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, T>,
    ) -> std::result::Result<Self::Object, E> {
        let records = dataset.records().view();
        let targets = dataset.targets().as_single_targets();

        if targets.len() != records.nsamples() {
            return Err(Error::InvalidInput(format!(
                "{} records but {} targets",
                records.nsamples(),
                targets.len()
            ))
            .into());
        }
        if targets.is_empty() {
            return Err(Error::InvalidInput("no samples to fit".into()).into());
        }

        let labels = dataset.labels();
        if labels.len() < 2 {
            return Err(Error::InvalidInput(
                "at least two distinct classes are required".into(),
            )
            .into());
        }

        let models = labels
            .into_par_iter()
            .enumerate()
            .map(|(idx, label)| {
                let binary = targets.map(|x| usize::from(*x == label));
                debug!(
                    class = idx,
                    positives = binary.sum(),
                    samples = binary.len(),
                    "fitting one-vs-rest model"
                );

                let params = BinaryRegressionAdapterParams::new(self.base_estimator.clone());
                let model: std::result::Result<BinaryRegressionAdapter<M>, E> =
                    params.fit(&DatasetBase::new(records.view(), binary));

                model.map(|model| (label, model))
            })
            .collect::<std::result::Result<Vec<_>, E>>()?;

        Ok(OneVsRest {
            models,
            nfeatures: records.nfeatures(),
        })
    }
}

impl<L: Label + Ord, M> OneVsRest<L, M> {
    /// The labels seen during fitting, in ascending order
    pub fn classes(&self) -> Vec<L> {
        self.models.iter().map(|(label, _)| label.clone()).collect()
    }

    /// The binary adapters together with the label they recognize
    pub fn models(&self) -> &[(L, BinaryRegressionAdapter<M>)] {
        &self.models
    }

    /// Number of features seen during fitting
    pub fn nfeatures(&self) -> usize {
        self.nfeatures
    }

    /// Score of every class for every sample
    ///
    /// Returns a matrix with dimensionality (nsamples, nclasses) whose columns follow the order of
    /// [`classes`](Self::classes). The scores are the clamped outputs of the regression models,
    /// rows are not normalized and do not necessarily sum up to one.
    pub fn predict_proba<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array2<F>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        if x.nfeatures() != self.nfeatures {
            return Err(Error::ShapeMismatch {
                expected: self.nfeatures,
                actual: x.nfeatures(),
            });
        }

        let mut probabilities = Array2::zeros((x.nrows(), self.models.len()));
        for (mut column, (_, model)) in probabilities.columns_mut().into_iter().zip(&self.models) {
            column.assign(&model.predict_proba(x)?);
        }

        Ok(probabilities)
    }

    /// Predict the label with the highest score for every sample
    ///
    /// If several classes share the highest score, the smallest of their labels is returned.
    pub fn predict<F, D>(&self, x: &ArrayBase<D, Ix2>) -> Result<Array1<L>>
    where
        F: Float,
        D: Data<Elem = F>,
        M: PredictInplace<ArrayBase<D, Ix2>, Array1<F>>,
    {
        let probabilities = self.predict_proba(x)?;

        let predictions = probabilities
            .rows()
            .into_iter()
            .map(|row| {
                // strict comparison keeps the first, i.e. smallest, label on ties
                let best = row
                    .iter()
                    .enumerate()
                    .fold(0, |best, (idx, p)| if *p > row[best] { idx } else { best });

                self.models[best].0.clone()
            })
            .collect();

        Ok(predictions)
    }

    /// Mean accuracy of the predictions
    pub fn score<F, D, S>(&self, x: &ArrayBase<D, Ix2>, y: &ArrayBase<S, Ix1>) -> Result<f32>
    where
        F: Float,
        D: Data<Elem = F>,
        S: Data<Elem = L>,
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
    use crate::dataset::Dataset;
    use crate::error::Error;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, s, Axis};

    /// Nearest neighbour regression, predicts the target of the closest training sample
    #[derive(Clone)]
    struct NearestNeighbourParams;

    struct NearestNeighbour {
        records: Array2<f64>,
        targets: Array1<f64>,
    }

    impl<'a> Fit<ArrayView2<'a, f64>, Array1<f64>, Error> for NearestNeighbourParams {
        type Object = NearestNeighbour;

        fn fit(
            &self,
            dataset: &DatasetBase<ArrayView2<'a, f64>, Array1<f64>>,
        ) -> std::result::Result<NearestNeighbour, Error> {
            Ok(NearestNeighbour {
                records: dataset.records().to_owned(),
                targets: dataset.targets().clone(),
            })
        }
    }

    impl<D: Data<Elem = f64>> PredictInplace<ArrayBase<D, Ix2>, Array1<f64>> for NearestNeighbour {
        fn predict_inplace(&self, x: &ArrayBase<D, Ix2>, y: &mut Array1<f64>) {
            for (row, target) in x.rows().into_iter().zip(y.iter_mut()) {
                let closest = self
                    .records
                    .rows()
                    .into_iter()
                    .map(|other| (&other - &row).mapv(|v| v * v).sum())
                    .enumerate()
                    .fold((0, f64::INFINITY), |acc, (idx, dist)| {
                        if dist < acc.1 {
                            (idx, dist)
                        } else {
                            acc
                        }
                    })
                    .0;
                *target = self.targets[closest];
            }
        }

        fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<f64> {
            Array1::zeros(x.nrows())
        }
    }

    /// Regression which predicts a constant, independent of the training data
    #[derive(Clone)]
    struct ConstantParams(f64);

    struct Constant(f64);

    impl<'a> Fit<ArrayView2<'a, f64>, Array1<f64>, Error> for ConstantParams {
        type Object = Constant;

        fn fit(
            &self,
            _: &DatasetBase<ArrayView2<'a, f64>, Array1<f64>>,
        ) -> std::result::Result<Constant, Error> {
            Ok(Constant(self.0))
        }
    }

    impl<D: Data<Elem = f64>> PredictInplace<ArrayBase<D, Ix2>, Array1<f64>> for Constant {
        fn predict_inplace(&self, _: &ArrayBase<D, Ix2>, y: &mut Array1<f64>) {
            y.fill(self.0);
        }

        fn default_target(&self, x: &ArrayBase<D, Ix2>) -> Array1<f64> {
            Array1::zeros(x.nrows())
        }
    }

    fn three_clusters() -> Dataset<f64, usize> {
        // 30 samples with two features, ten per cluster
        let records = Array2::from_shape_fn((30, 2), |(i, j)| {
            let cluster = (i / 10) as f64;
            let jitter = (i % 10) as f64 * 0.05;
            cluster * 10.0 + jitter + j as f64 * 0.5
        });
        let targets = Array1::from_shape_fn(30, |i| i / 10);

        Dataset::new(records, targets)
    }

    fn fit<L: Label + Ord + Send + Sync>(
        params: &OneVsRestParams<NearestNeighbourParams>,
        dataset: &Dataset<f64, L>,
    ) -> OneVsRest<L, NearestNeighbour> {
        let model: std::result::Result<_, Error> = params.fit(dataset);
        model.unwrap()
    }

    #[test]
    fn predicts_only_known_labels() {
        let dataset = three_clusters();
        let model = fit(&OneVsRestParams::new(NearestNeighbourParams), &dataset);

        assert_eq!(model.classes(), vec![0, 1, 2]);
        assert_eq!(model.models().len(), 3);

        let pred = model.predict(dataset.records()).unwrap();
        assert!(pred.iter().all(|x| model.classes().contains(x)));
        assert_eq!(&pred, dataset.targets());
        assert_abs_diff_eq!(model.score(dataset.records(), dataset.targets()).unwrap(), 1.0);
    }

    #[test]
    fn predict_proba_has_one_column_per_class() {
        let dataset = three_clusters();
        let model = fit(&OneVsRestParams::new(NearestNeighbourParams), &dataset);

        let probabilities = model.predict_proba(dataset.records()).unwrap();
        assert_eq!(probabilities.dim(), (30, 3));
        // each training sample is its own nearest neighbour
        assert_abs_diff_eq!(
            probabilities.slice(s![..10, ..]).sum_axis(Axis(0)),
            array![10.0, 0.0, 0.0]
        );
    }

    #[test]
    fn repeated_fits_are_identical() {
        let dataset = three_clusters();
        let params = OneVsRestParams::new(NearestNeighbourParams);

        let first = fit(&params, &dataset).predict_proba(dataset.records()).unwrap();
        let second = fit(&params, &dataset).predict_proba(dataset.records()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn ties_go_to_the_smallest_label() {
        let dataset = Dataset::new(Array2::<f64>::zeros((4, 2)), array![9, 3, 7, 3]);
        let params = OneVsRestParams::new(ConstantParams(0.5));
        let model: std::result::Result<_, Error> = params.fit(&dataset);
        let model = model.unwrap();

        assert_eq!(model.classes(), vec![3, 7, 9]);
        assert_abs_diff_eq!(
            model.predict_proba(&Array2::<f64>::zeros((2, 2))).unwrap(),
            array![[0.5, 0.5, 0.5], [0.5, 0.5, 0.5]]
        );
        assert_eq!(
            model.predict(&Array2::<f64>::zeros((2, 2))).unwrap(),
            array![3, 3]
        );
    }

    #[test]
    fn refit_replaces_all_classes() {
        let params = OneVsRestParams::new(NearestNeighbourParams);
        let first = fit(&params, &three_clusters());
        assert_eq!(first.classes(), vec![0, 1, 2]);

        let dataset = Dataset::new(array![[0.0, 0.0], [5.0, 5.0]], array![5usize, 9]);
        let second = fit(&params, &dataset);

        assert_eq!(second.classes(), vec![5, 9]);
        let pred = second.predict(&array![[0.1, 0.1], [4.0, 4.0], [0.0, 1.0]]).unwrap();
        assert_eq!(pred, array![5, 9, 5]);
    }

    #[test]
    fn string_labels() {
        let dataset = Dataset::new(
            array![[0.0], [0.1], [1.0], [1.1]],
            array!["spam", "spam", "ham", "ham"],
        );
        let model = fit(&OneVsRestParams::new(NearestNeighbourParams), &dataset);

        assert_eq!(model.classes(), vec!["ham", "spam"]);
        assert_eq!(
            model.predict(&array![[0.05], [1.05]]).unwrap(),
            array!["spam", "ham"]
        );
    }

    #[test]
    fn rejects_malformed_input() {
        let params = OneVsRestParams::new(NearestNeighbourParams);

        let single_class = Dataset::new(Array2::<f64>::zeros((3, 1)), array![1usize, 1, 1]);
        let res: std::result::Result<OneVsRest<usize, _>, Error> = params.fit(&single_class);
        assert!(matches!(res, Err(Error::InvalidInput(_))));

        let empty = Dataset::new(Array2::<f64>::zeros((0, 1)), Array1::<usize>::zeros(0));
        let res: std::result::Result<OneVsRest<usize, _>, Error> = params.fit(&empty);
        assert!(matches!(res, Err(Error::InvalidInput(_))));

        let mismatched = DatasetBase::new(Array2::<f64>::zeros((3, 1)), array![0usize, 1]);
        let res: std::result::Result<OneVsRest<usize, _>, Error> = params.fit(&mismatched);
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_wrong_feature_dimension() {
        let dataset = three_clusters();
        let model = fit(&OneVsRestParams::new(NearestNeighbourParams), &dataset);

        assert!(matches!(
            model.predict(&Array2::<f64>::zeros((1, 3))),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn base_estimator_can_be_replaced() {
        let params = OneVsRestParams::new(ConstantParams(0.2)).with_base_estimator(ConstantParams(0.7));

        assert_abs_diff_eq!(params.base_estimator().0, 0.7);
    }
}
