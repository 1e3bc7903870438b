#![doc = include_str!("../README.md")]

pub mod composition;
mod error;
pub mod grid;
pub mod interp;
mod intersect;
pub mod merge;
pub mod prelude;
mod traits;

pub use traits::Evaluate;

pub use error::{AxisKind, DisjointGrids, InvalidGrid, ShapeMismatch, UnknownSpecies};

pub use grid::{Axis, Grid, SpeciesCollection};

pub use interp::{BicubicSurface, BoundaryInterpolator, BoundaryPolicy, EvalMode, Evaluator};

pub use intersect::{intersect, intersect_all, intersect_with_tolerance};

pub use merge::{common_axes, merge, AxisFilter, GridMerger, MergeConfig};

pub use composition::Composition;

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug, derive_more::From)]
pub enum Error {
    #[error("Malformed grid: {0}")]
    InvalidGrid(InvalidGrid),
    #[error("Species grids do not overlap: {0}")]
    DisjointGrids(DisjointGrids),
    #[error("{0}")]
    UnknownSpecies(UnknownSpecies),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
