//! regclass prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!

#[doc(no_inline)]
pub use crate::error::{Error, Result};

#[doc(no_inline)]
pub use crate::traits::*;

#[doc(no_inline)]
pub use crate::dataset::{AsSingleTargets, Dataset, DatasetBase, Float, Records};

#[doc(no_inline)]
pub use crate::metrics_classification::{ConfusionMatrix, ToConfusionMatrix};

#[doc(no_inline)]
pub use crate::composing::{OneVsRest, OneVsRestParams};

#[doc(no_inline)]
pub use crate::param_guard::ParamGuard;
