//! Common traits and types that are useful for working with `eosgrid`
#![allow(unused_imports)]

pub use crate::grid::{Axis, Grid, SpeciesCollection};
pub use crate::interp::{BoundaryInterpolator, BoundaryPolicy, EvalMode, Evaluator};
pub use crate::merge::{AxisFilter, MergeConfig};
pub use crate::traits::Evaluate;

pub(crate) use crate::error::{AxisKind, DisjointGrids, InvalidGrid, ShapeMismatch, UnknownSpecies};
pub(crate) use crate::{Error, Result};

pub(crate) use derive_more::{Constructor, Deref, Display, From, Into};

pub(crate) use ndarray::{Array1, Array2, ArrayView2};
pub(crate) use std::collections::BTreeMap;
