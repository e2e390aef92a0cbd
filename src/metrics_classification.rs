//! Common metrics for performance evaluation of classifier
//!
//! Scoring is essential for classification tasks. This module implements the confusion matrix,
//! from which accuracy, precision, recall and the f-scores are derived.
use std::collections::{BTreeSet, HashMap};
use std::fmt;

use ndarray::prelude::*;
use ndarray::Data;

use crate::dataset::{AsSingleTargets, Label};
use crate::error::{Error, Result};

/// Confusion matrix for multi-label evaluation
///
/// A confusion matrix shows predictions in a matrix, where rows correspond to target and columns
/// to predicted. The diagonal entries are correct predictions.
pub struct ConfusionMatrix<A> {
    matrix: Array2<usize>,
    members: Array1<A>,
}

impl<A> ConfusionMatrix<A> {
    /// Calculate precision for every class
    pub fn precision(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(0));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| *a as f32 / *b as f32)
            .collect()
    }

    /// Calculate recall for every class
    pub fn recall(&self) -> Array1<f32> {
        let sum = self.matrix.sum_axis(Axis(1));

        self.matrix
            .diag()
            .iter()
            .zip(sum.iter())
            .map(|(a, b)| *a as f32 / *b as f32)
            .collect()
    }

    /// Return mean accuracy
    ///
    /// This is the fraction of samples on the diagonal, i.e. where prediction and ground truth
    /// agree.
    pub fn accuracy(&self) -> f32 {
        self.matrix.diag().sum() as f32 / self.matrix.sum() as f32
    }

    /// Return beta score for every class
    pub fn f_score(&self, beta: f32) -> Array1<f32> {
        let sb = beta * beta;
        let precision = self.precision();
        let recall = self.recall();

        precision
            .iter()
            .zip(recall.iter())
            .map(|(p, r)| (1.0 + sb) * (p * r) / (sb * p + r))
            .collect()
    }

    /// Return beta=1 score for every class
    pub fn f1_score(&self) -> Array1<f32> {
        self.f_score(1.0)
    }

    /// Number of samples for ground truth `truth` predicted as `predicted`
    pub fn count(&self, truth: usize, predicted: usize) -> usize {
        self.matrix[(truth, predicted)]
    }

    /// The classes in the order of rows and columns
    pub fn members(&self) -> ArrayView1<'_, A> {
        self.members.view()
    }
}

/// Print a confusion matrix
impl<A: fmt::Display> fmt::Debug for ConfusionMatrix<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let len = self.matrix.len_of(Axis(0));
        writeln!(f)?;
        write!(f, "{: <10}", "classes")?;
        for member in self.members.iter() {
            write!(f, " | {: <10}", member)?;
        }
        writeln!(f)?;

        for i in 0..len {
            write!(f, "{: <10}", self.members[i])?;
            for j in 0..len {
                write!(f, " | {: <10}", self.matrix[(i, j)])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Classification functions
///
/// Contains only routine for Confusion Matrix, as all other current metrics can be derived from
/// the entries in the matrix.
pub trait ToConfusionMatrix<A, T> {
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<A>>;
}

impl<A, S, T> ToConfusionMatrix<A, T> for ArrayBase<S, Ix1>
where
    A: Label + Ord,
    S: Data<Elem = A>,
    T: AsSingleTargets<Elem = A>,
{
    fn confusion_matrix(&self, ground_truth: T) -> Result<ConfusionMatrix<A>> {
        let ground_truth = ground_truth.as_single_targets();
        if self.len() != ground_truth.len() {
            return Err(Error::MismatchedShapes(self.len(), ground_truth.len()));
        }

        // union of predicted and true labels, in ascending order
        let classes = ground_truth
            .iter()
            .chain(self.iter())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();

        let indices = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class, idx))
            .collect::<HashMap<_, _>>();

        let mut matrix = Array2::zeros((classes.len(), classes.len()));
        for (truth, prediction) in ground_truth.iter().zip(self.iter()) {
            matrix[(indices[truth], indices[prediction])] += 1;
        }

        Ok(ConfusionMatrix {
            matrix,
            members: Array1::from(classes),
        })
    }
}
