//! Shared solver for penalized least squares
//!
//! Both regressors solve `(X^T X + shift * I) w = X^T y` for varying shifts. The Gram matrix is
//! decomposed once, after which every solve costs two matrix-vector products.
use linfa_linalg::eigh::Eigh;
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix2};

use regclass::Float;

use crate::error::{LinearError, Result};

/// Training data with the mean of every column removed
pub(crate) struct Centered<F> {
    pub records: Array2<F>,
    pub targets: Array1<F>,
    pub records_offset: Array1<F>,
    pub targets_offset: F,
}

impl<F: Float> Centered<F> {
    /// Center records and targets if an intercept is fitted, otherwise copy them
    pub fn new<D: Data<Elem = F>>(
        records: &ArrayBase<D, Ix2>,
        targets: ArrayView1<'_, F>,
        with_intercept: bool,
    ) -> Result<Self> {
        if records.nrows() == 0 {
            return Err(LinearError::NotEnoughSamples);
        }
        if records.nrows() != targets.len() {
            return Err(regclass::Error::InvalidInput(format!(
                "{} records but {} targets",
                records.nrows(),
                targets.len()
            ))
            .into());
        }

        if !with_intercept {
            return Ok(Centered {
                records: records.to_owned(),
                targets: targets.to_owned(),
                records_offset: Array1::zeros(records.ncols()),
                targets_offset: F::zero(),
            });
        }

        let records_offset = records
            .mean_axis(Axis(0))
            .ok_or(LinearError::NotEnoughSamples)?;
        let targets_offset = targets.mean().ok_or(LinearError::NotEnoughSamples)?;

        Ok(Centered {
            records: records - &records_offset,
            targets: &targets - targets_offset,
            records_offset,
            targets_offset,
        })
    }

    /// Intercept which undoes the centering for the given weights
    pub fn intercept(&self, weights: &Array1<F>) -> F {
        self.targets_offset - self.records_offset.dot(weights)
    }
}

/// Eigendecomposition of the Gram matrix together with the projected right hand side
pub(crate) struct Spectral<F> {
    eigvals: Array1<F>,
    eigvecs: Array2<F>,
    projected: Array1<F>,
}

impl<F: Float> Spectral<F> {
    pub fn new(data: &Centered<F>) -> Result<Self> {
        let x = &data.records;
        let gram = x.t().dot(x);
        let (eigvals, eigvecs) = gram.eigh()?;

        // the Gram matrix is positive semi-definite, round-off may produce tiny negative values
        let eigvals = eigvals.mapv(|v: F| v.max(F::zero()));
        let projected = eigvecs.t().dot(&x.t().dot(&data.targets));

        Ok(Spectral {
            eigvals,
            eigvecs,
            projected,
        })
    }

    /// Eigenvalues of `X^T X` in the order of the eigenvectors
    pub fn eigvals(&self) -> &Array1<F> {
        &self.eigvals
    }

    /// Solve `(X^T X + shift * I) w = X^T y`
    ///
    /// Directions whose shifted eigenvalue vanishes get zero weight, which yields the minimum norm
    /// solution for singular systems.
    pub fn solve(&self, shift: F) -> Array1<F> {
        let largest = self.eigvals.fold(F::zero(), |acc, ev| acc.max(*ev + shift));
        let cutoff = largest * F::epsilon().sqrt();

        let scaled = self
            .projected
            .iter()
            .zip(self.eigvals.iter())
            .map(|(p, ev)| {
                let denom = *ev + shift;
                if denom <= cutoff {
                    F::zero()
                } else {
                    *p / denom
                }
            })
            .collect::<Array1<F>>();

        self.eigvecs.dot(&scaled)
    }
}

/// Fails with `IllConditioned` if the weights are not finite, e.g. for records containing NaN
pub(crate) fn finite<F: Float>(weights: Array1<F>) -> Result<Array1<F>> {
    if weights.iter().all(|w| w.is_finite()) {
        Ok(weights)
    } else {
        Err(LinearError::IllConditioned)
    }
}

/// Sum of squared residuals `||y - Xw||^2`
pub(crate) fn residual_sum<F: Float>(data: &Centered<F>, weights: &Array1<F>) -> F {
    let residuals = &data.targets - &data.records.dot(weights);
    residuals.dot(&residuals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn centers_records_and_targets() {
        let x = array![[1.0, 10.0], [3.0, 20.0]];
        let y = array![4.0, 8.0];
        let data = Centered::new(&x, y.view(), true).unwrap();

        assert_abs_diff_eq!(data.records, array![[-1.0, -5.0], [1.0, 5.0]]);
        assert_abs_diff_eq!(data.targets, array![-2.0, 2.0]);
        assert_abs_diff_eq!(data.records_offset, array![2.0, 15.0]);
        assert_abs_diff_eq!(data.targets_offset, 6.0);
    }

    #[test]
    fn solves_normal_equations() {
        let x = array![[1.0, 0.0], [0.0, 2.0], [1.0, 1.0]];
        let y = array![1.0, 4.0, 3.0];
        let data = Centered::new(&x, y.view(), false).unwrap();
        let spectral = Spectral::new(&data).unwrap();

        // y = x_0 + 2 x_1 exactly
        let w = spectral.solve(0.0);
        assert_abs_diff_eq!(w, array![1.0, 2.0], epsilon = 1e-10);
        assert_abs_diff_eq!(residual_sum(&data, &w), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn minimum_norm_for_duplicated_feature() {
        let x = array![[1.0, 1.0], [2.0, 2.0]];
        let y = array![2.0, 4.0];
        let data = Centered::new(&x, y.view(), false).unwrap();

        // weight is split evenly between the identical columns
        let w = Spectral::new(&data).unwrap().solve(0.0);
        assert_abs_diff_eq!(w, array![1.0, 1.0], epsilon = 1e-8);
    }

    #[test]
    fn non_finite_weights_fail() {
        assert!(finite(array![1.0, 2.0]).is_ok());
        assert!(matches!(
            finite(array![1.0, f64::NAN]),
            Err(LinearError::IllConditioned)
        ));
    }

    #[test]
    fn rejects_mismatched_targets() {
        let x = array![[1.0], [2.0]];
        let y = array![1.0];

        assert!(matches!(
            Centered::new(&x, y.view(), true),
            Err(LinearError::BaseCrate(regclass::Error::InvalidInput(_)))
        ));
    }
}
