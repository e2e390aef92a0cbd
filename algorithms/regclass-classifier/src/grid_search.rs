//! Select a base estimator by cross-validation
use ndarray::{Array1, Array2, ArrayView2};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regclass::dataset::{DatasetBase, Label, Records};
use regclass::error::Error;
use regclass::traits::{Fit, PredictInplace};
use regclass::{Float, ParamGuard};

use crate::classifier::RegressionClassifier;
use crate::estimator::BaseEstimator;

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GridSearchValidParams<P> {
    candidates: Vec<P>,
    folds: usize,
}

impl<P> GridSearchValidParams<P> {
    /// The base estimators to choose from
    pub fn candidates(&self) -> &[P] {
        &self.candidates
    }

    pub fn folds(&self) -> usize {
        self.folds
    }
}

/// A hyper-parameter set for the grid search over base estimators
///
/// Every candidate is evaluated with k-fold cross-validation: the dataset is split into `folds`
/// contiguous parts, a [`RegressionClassifier`] is fitted on all but one part and scored on the
/// remaining one. The candidate with the highest mean accuracy wins, ties go to the candidate
/// listed first. The winner is refitted on the whole dataset.
///
/// The folds are not shuffled. Shuffle the dataset beforehand if its samples are ordered by
/// label, otherwise a training split may contain a single class and fitting fails.
///
/// # Parameters
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :---| :--- |
/// | candidates | | Base estimators to choose from | at least one |
/// | [folds](Self::folds) | `5` | Number of cross-validation folds | `[2, nsamples]` |
///
/// # Example
///
/// ```
/// use rand::{rngs::SmallRng, SeedableRng};
/// use regclass::prelude::*;
/// use regclass_classifier::GridSearchParams;
/// use regclass_linear::{LinearError, Ridge};
///
/// let mut rng = SmallRng::seed_from_u64(42);
/// let dataset = regclass_datasets::three_clusters(&mut rng).shuffle(&mut rng);
///
/// let candidates = vec![Ridge::params().penalty(0.1), Ridge::params().penalty(10.0)];
/// let result = GridSearchParams::new(candidates).folds(3).fit(&dataset)?;
///
/// assert_eq!(result.mean_scores().len(), 2);
/// assert!(result.classifier().is_fitted());
/// # Ok::<(), LinearError>(())
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct GridSearchParams<P>(GridSearchValidParams<P>);

impl<P> GridSearchParams<P> {
    pub fn new(candidates: Vec<P>) -> Self {
        Self(GridSearchValidParams {
            candidates,
            folds: 5,
        })
    }

    /// Set the number of cross-validation folds.
    ///
    /// Defaults to `5` if not set
    pub fn folds(mut self, folds: usize) -> Self {
        self.0.folds = folds;
        self
    }
}

impl<P> ParamGuard for GridSearchParams<P> {
    type Checked = GridSearchValidParams<P>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked, Error> {
        if self.0.candidates.is_empty() {
            Err(Error::Parameters(
                "grid search needs at least one candidate".into(),
            ))
        } else if self.0.folds < 2 {
            Err(Error::Parameters(format!(
                "at least two folds needed, but got {}",
                self.0.folds
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked, Error> {
        self.check_ref()?;
        Ok(self.0)
    }
}

/// Outcome of a grid search
pub struct GridSearchResult<F, L, P>
where
    P: BaseEstimator<F>,
{
    best_index: usize,
    best_score: f32,
    mean_scores: Vec<f32>,
    classifier: RegressionClassifier<F, L, P>,
}

impl<F, L, P: BaseEstimator<F>> GridSearchResult<F, L, P> {
    /// Position of the winning candidate
    pub fn best_index(&self) -> usize {
        self.best_index
    }

    /// Mean cross-validated accuracy of the winning candidate
    pub fn best_score(&self) -> f32 {
        self.best_score
    }

    /// Mean cross-validated accuracy of every candidate, in candidate order
    pub fn mean_scores(&self) -> &[f32] {
        &self.mean_scores
    }

    /// The winning base estimator
    pub fn best_estimator(&self) -> &P {
        self.classifier.params().base_estimator()
    }

    /// The winning classifier, fitted on the whole dataset
    pub fn classifier(&self) -> &RegressionClassifier<F, L, P> {
        &self.classifier
    }

    pub fn into_classifier(self) -> RegressionClassifier<F, L, P> {
        self.classifier
    }
}

impl<F, L, P> Fit<Array2<F>, Array1<L>, <P as BaseEstimator<F>>::Error>
    for GridSearchValidParams<P>
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
    <P as BaseEstimator<F>>::Model: PredictInplace<Array2<F>, Array1<F>>,
{
    type Object = GridSearchResult<F, L, P>;

    /// Evaluate every candidate and refit the best one
    ///
    /// Fails with `InvalidInput` if the dataset has fewer samples than folds. Errors of the
    /// candidates are returned unchanged.
    fn fit(
        &self,
        dataset: &DatasetBase<Array2<F>, Array1<L>>,
    ) -> Result<Self::Object, <P as BaseEstimator<F>>::Error> {
        if dataset.nsamples() < self.folds {
            return Err(Error::InvalidInput(format!(
                "{} folds requested, but only {} samples available",
                self.folds,
                dataset.nsamples()
            ))
            .into());
        }

        let folds = dataset.fold(self.folds);

        let mean_scores = self
            .candidates
            .iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let mut classifier = RegressionClassifier::new(candidate.clone());

                let mut total = 0.0;
                for (train, valid) in &folds {
                    classifier.fit(train)?;
                    total += classifier.score(valid.records(), valid.targets())?;
                }
                let mean_score = total / folds.len() as f32;

                debug!(candidate = idx, mean_score, "evaluated grid search candidate");

                Ok(mean_score)
            })
            .collect::<Result<Vec<f32>, <P as BaseEstimator<F>>::Error>>()?;

        // strict comparison keeps the first candidate on ties
        let (best_index, best_score) = mean_scores.iter().enumerate().fold(
            (0, f32::NEG_INFINITY),
            |best, (idx, score)| {
                if *score > best.1 {
                    (idx, *score)
                } else {
                    best
                }
            },
        );

        info!(best_index, best_score, "grid search selected a base estimator");

        let mut classifier = RegressionClassifier::new(self.candidates[best_index].clone());
        classifier.fit(dataset)?;

        Ok(GridSearchResult {
            best_index,
            best_score,
            mean_scores,
            classifier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use regclass::Dataset;
    use regclass_linear::{LinearError, Ridge, RidgeParams};

    /// Two interleaved classes along a line, so every contiguous fold sees both
    fn alternating() -> Dataset<f64, usize> {
        let records = Array2::from_shape_fn((12, 1), |(i, _)| {
            if i % 2 == 0 {
                i as f64 * 0.1
            } else {
                5.0 + i as f64 * 0.1
            }
        });
        let targets = Array1::from_shape_fn(12, |i| i % 2);

        Dataset::new(records, targets)
    }

    #[test]
    fn invalid_params() {
        let res = GridSearchParams::<RidgeParams<f64>>::new(vec![]).check();
        assert!(matches!(res, Err(Error::Parameters(_))));

        let res = GridSearchParams::new(vec![Ridge::<f64>::params()])
            .folds(1)
            .check();
        assert!(matches!(res, Err(Error::Parameters(_))));

        let params = GridSearchParams::new(vec![Ridge::<f64>::params()])
            .check()
            .unwrap();
        assert_eq!(params.folds(), 5);
        assert_eq!(params.candidates().len(), 1);
    }

    #[test]
    fn selects_candidate_with_best_accuracy() {
        let dataset = alternating();

        // through the origin both class models increase with the feature, so class 1 wins
        // everywhere except at zero
        let candidates = vec![
            Ridge::params().penalty(1e-3).with_intercept(false),
            Ridge::params().penalty(1e-3),
        ];
        let result = GridSearchParams::new(candidates)
            .folds(3)
            .fit(&dataset)
            .unwrap();

        assert_eq!(result.best_index(), 1);
        assert_abs_diff_eq!(result.best_score(), 1.0);
        assert_eq!(result.mean_scores().len(), 2);
        assert!(result.mean_scores()[0] < 1.0);
        assert_eq!(result.best_estimator(), &Ridge::params().penalty(1e-3));

        let classifier = result.into_classifier();
        assert_eq!(
            classifier.predict(&array![[0.0], [6.0]]).unwrap(),
            array![0, 1]
        );
    }

    #[test]
    fn ties_go_to_first_candidate() {
        let dataset = alternating();
        let candidates = vec![Ridge::params().penalty(1e-3); 3];

        let result = GridSearchParams::new(candidates).fit(&dataset).unwrap();

        assert_eq!(result.best_index(), 0);
    }

    #[test]
    fn more_folds_than_samples() {
        let dataset = Dataset::new(array![[0.0], [1.0], [2.0]], array![0usize, 1, 0]);

        let res = GridSearchParams::new(vec![Ridge::params()]).fit(&dataset);

        assert!(matches!(
            res,
            Err(LinearError::BaseCrate(Error::InvalidInput(_)))
        ));
    }
}
