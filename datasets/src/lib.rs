//! `regclass-datasets` provides synthetic datasets ready to be used in tests and examples.
//!
//! ## Current State
//!
//! Every dataset is generated from a caller supplied random number generator, so seeding the
//! generator makes the dataset reproducible. Currently the following generators are provided:
//!
//! * [`generate::blobs`]: isotropic Gaussian blobs around a set of centroids
//! * [`generate::labelled_blobs`]: the same blobs, labelled by the index of their centroid
//! * [`three_clusters`]: three well separated clusters of ten samples with two features
//!
//! ## Using a dataset
//!
//! ```
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let (train, valid) = regclass_datasets::three_clusters(&mut rng)
//!     .shuffle(&mut rng)
//!     .split_with_ratio(0.8);
//! ```

pub mod generate;

use ndarray::array;
use ndarray_rand::rand::Rng;
use regclass::Dataset;

/// Three clusters of ten samples each, centered at `(0, 0)`, `(8, 8)` and `(0, 8)`
///
/// The samples are drawn from standard normal distributions around the centroids and labelled
/// `0`, `1` and `2` in the order of the centroids. Records are not shuffled.
pub fn three_clusters(rng: &mut impl Rng) -> Dataset<f64, usize> {
    let centroids = array![[0., 0.], [8., 8.], [0., 8.]];

    generate::labelled_blobs(10, &centroids, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use regclass::dataset::Records;

    #[test]
    fn three_clusters_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = three_clusters(&mut rng);

        assert_eq!(dataset.nsamples(), 30);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.labels(), vec![0, 1, 2]);
    }

    #[test]
    fn same_seed_same_dataset() {
        let first = three_clusters(&mut SmallRng::seed_from_u64(7));
        let second = three_clusters(&mut SmallRng::seed_from_u64(7));

        assert_eq!(first.records(), second.records());
        assert_eq!(first.targets(), second.targets());
    }
}
