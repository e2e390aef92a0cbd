use super::{AsSingleTargets, DatasetBase, Label, Records};
use ndarray::{Array1, ArrayBase, ArrayView1, Data, Ix1};
use std::collections::BTreeSet;

/// A NdArray can act as targets
impl<L, S: Data<Elem = L>> AsSingleTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_single_targets(&self) -> ArrayView1<'_, L> {
        self.view()
    }
}

/// References to targets act as targets
impl<T: AsSingleTargets> AsSingleTargets for &T {
    type Elem = T::Elem;

    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem> {
        (*self).as_single_targets()
    }
}

impl<R: Records, L: Label + Ord, T: AsSingleTargets<Elem = L>> DatasetBase<R, T> {
    /// Returns the distinct labels of the targets in ascending order
    pub fn labels(&self) -> Vec<L> {
        self.targets
            .as_single_targets()
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<R: Records, T: AsSingleTargets> DatasetBase<R, T> {
    /// Apply a function to every target, returns a dataset with the new owned targets
    pub fn map_targets<S, G: FnMut(&T::Elem) -> S>(self, fnc: G) -> DatasetBase<R, Array1<S>> {
        let targets = self.targets.as_single_targets().map(fnc);

        DatasetBase {
            records: self.records,
            targets,
        }
    }
}
