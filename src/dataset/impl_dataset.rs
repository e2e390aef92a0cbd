use super::{Dataset, DatasetBase};
use ndarray::{s, Axis};
use rand::{seq::SliceRandom, Rng};

impl<F: Clone, E: Clone> Dataset<F, E> {
    /// Select a subset of samples by their row indices
    fn select_samples(&self, indices: &[usize]) -> Dataset<F, E> {
        DatasetBase::new(
            self.records.select(Axis(0), indices),
            self.targets.select(Axis(0), indices),
        )
    }

    /// Returns a dataset with the samples shuffled
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset<F, E> {
        let mut indices = (0..self.records.nrows()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select_samples(&indices)
    }

    /// Split the dataset into two parts, the first holds `ratio` of the samples (rounded up)
    pub fn split_with_ratio(self, ratio: f32) -> (Dataset<F, E>, Dataset<F, E>) {
        let n = (self.records.nrows() as f32 * ratio).ceil() as usize;
        let n = n.min(self.records.nrows());

        let first = DatasetBase::new(
            self.records.slice(s![..n, ..]).to_owned(),
            self.targets.slice(s![..n]).to_owned(),
        );
        let second = DatasetBase::new(
            self.records.slice(s![n.., ..]).to_owned(),
            self.targets.slice(s![n..]).to_owned(),
        );

        (first, second)
    }

    /// Performs k-folding on the dataset
    ///
    /// The samples are split into `k` contiguous chunks, each chunk is used once as
    /// validation set while the remaining samples form the training set. The first
    /// `nsamples % k` chunks hold one additional sample.
    ///
    /// ## Panics
    ///
    /// If `k` is zero or larger than the number of samples.
    pub fn fold(&self, k: usize) -> Vec<(Dataset<F, E>, Dataset<F, E>)> {
        let nsamples = self.records.nrows();
        assert!(k > 0, "the number of folds has to be positive");
        assert!(
            k <= nsamples,
            "the number of folds {} exceeds the number of samples {}",
            k,
            nsamples
        );

        let (chunk, rest) = (nsamples / k, nsamples % k);
        let mut start = 0;

        (0..k)
            .map(|i| {
                let end = start + chunk + usize::from(i < rest);
                let (train, valid): (Vec<usize>, Vec<usize>) =
                    (0..nsamples).partition(|idx| *idx < start || *idx >= end);
                start = end;

                (self.select_samples(&train), self.select_samples(&valid))
            })
            .collect()
    }
}
