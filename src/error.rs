//! payload types carried by the variants of [`Error`](crate::Error)

use crate::prelude::*;

#[derive(Display, Debug, Clone, PartialEq)]
pub enum InvalidGrid {
    #[display(fmt = "{name} axis has {len} points, at least 2 are required")]
    AxisTooShort { name: &'static str, len: usize },
    #[display(
        fmt = "{name} axis is not strictly increasing at index {index} ({previous} -> {value})"
    )]
    NotIncreasing {
        name: &'static str,
        index: usize,
        previous: f64,
        value: f64,
    },
    #[display(fmt = "{name} axis has a non-finite value {value} at index {index}")]
    NonFinite {
        name: &'static str,
        index: usize,
        value: f64,
    },
    #[display(fmt = "{_0}")]
    ShapeMismatch(ShapeMismatch),
    #[display(fmt = "mask for the {name} axis has {actual} entries, the axis has {expected}")]
    MaskLength {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display(fmt = "at least one species must be named for intersection")]
    NoSpecies,
    #[display(fmt = "invalid composition: {_0}")]
    Composition(String),
}

#[derive(Display, Debug, Clone, PartialEq, Constructor)]
#[display(
    fmt = "field `{field}` has shape {actual:?}, the density / temperature axes require {expected:?}"
)]
pub struct ShapeMismatch {
    field: String,
    expected: (usize, usize),
    actual: (usize, usize),
}

impl From<ShapeMismatch> for InvalidGrid {
    fn from(x: ShapeMismatch) -> Self {
        Self::ShapeMismatch(x)
    }
}

/// which of the two axes failed to produce a usable overlap
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    #[display(fmt = "density")]
    Density,
    #[display(fmt = "temperature")]
    Temperature,
}

#[derive(Display, Debug, Clone, PartialEq, Constructor)]
#[display(
    fmt = "common {axis} axis of species {species:?} has {len} points, at least 2 are required"
)]
pub struct DisjointGrids {
    pub axis: AxisKind,
    pub species: Vec<String>,
    pub len: usize,
}

#[derive(From, Display, Debug, Clone, PartialEq, Constructor)]
#[display(fmt = "species `{name}` is not present in the collection")]
pub struct UnknownSpecies {
    pub name: String,
}
