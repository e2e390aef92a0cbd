//! Datasets
//!
//! This module implements the dataset struct and various helper traits to extend its
//! functionality.
use ndarray::{Array1, Array2, ArrayBase, ArrayView1, ArrayView2, Ix2, NdFloat};

use num_traits::{AsPrimitive, FromPrimitive, NumCast};

use std::hash::Hash;
use std::iter::Sum;

mod impl_dataset;
mod impl_records;
mod impl_targets;

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points. They are used in records of a dataset and,
/// for regression task, in the targets as well.
pub trait Float:
    NdFloat
    + FromPrimitive
    + Default
    + Sum
    + AsPrimitive<usize>
    + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Discrete labels
///
/// Labels are countable, comparable and hashable. The one-vs-rest composition additionally
/// requires them to be totally ordered, so that classes have a canonical order.
pub trait Label: PartialEq + Eq + Hash + Clone {}

impl Label for bool {}
impl Label for usize {}
impl Label for u8 {}
impl Label for u32 {}
impl Label for i32 {}
impl Label for i64 {}
impl Label for char {}
impl Label for String {}
impl Label for &str {}

/// DatasetBase
///
/// This is the fundamental structure of a dataset. It contains a number of records about the data
/// and the targets associated with them. It is generic over the records and targets and
/// introduces a trait bound on the records only.
///
/// # Fields
///
/// * `records`: a two-dimensional matrix with dimensionality (nsamples, nfeatures)
/// * `targets`: a one-dimensional array with dimensionality (nsamples)
pub struct DatasetBase<R, T>
where
    R: Records,
{
    pub records: R,
    pub targets: T,
}

/// Dataset
///
/// The most commonly used typed of dataset. It contains a number of records
/// stored as an `Array2` and each record corresponds to a single target, stored as
/// an `Array1`.
pub type Dataset<D, T> = DatasetBase<Array2<D>, Array1<T>>;

/// Record trait
pub trait Records: Sized {
    type Elem;

    fn nsamples(&self) -> usize;
    fn nfeatures(&self) -> usize;
}

/// Return a reference to a single target variable
pub trait AsSingleTargets {
    type Elem;

    /// Returns a view on targets as one-dimensional array
    fn as_single_targets(&self) -> ArrayView1<'_, Self::Elem>;
}

impl<R: Records, T> DatasetBase<R, T> {
    /// Create a new dataset from records and targets
    pub fn new(records: R, targets: T) -> DatasetBase<R, T> {
        DatasetBase { records, targets }
    }

    /// Returns reference to records
    pub fn records(&self) -> &R {
        &self.records
    }

    /// Returns reference to targets
    pub fn targets(&self) -> &T {
        &self.targets
    }
}

impl<F, S, T> DatasetBase<ArrayBase<S, Ix2>, T>
where
    S: ndarray::Data<Elem = F>,
{
    /// Creates a view of the dataset with borrowed records
    pub fn view(&self) -> DatasetBase<ArrayView2<'_, F>, &T> {
        DatasetBase::new(self.records.view(), &self.targets)
    }
}
