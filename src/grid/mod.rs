//! # Grid Information
//!
//! An [`Axis`] holds the sample coordinates of one direction of a table (density in
//! g/cm³ or temperature in eV). A [`Grid`] pairs a density axis with a temperature
//! axis and carries any number of named field tables sampled on that axis pair.
//! Lastly, a [`SpeciesCollection`] maps species names (`"ele"`, `"ioncc"`, ...) to the
//! grid of each species.
//!
//! Table readers for the various on-disk formats produce a `SpeciesCollection`;
//! everything in this crate consumes and produces these in-memory types only.
//!
//! ## Invariants
//!
//! Every constructor in this module validates its input:
//!
//! * an axis has at least two points, is strictly increasing and contains no NaN / Inf
//! * every field table of a grid has shape `(density.len(), temperature.len())`
//!
//! Types are never mutated behind the caller's back. Operations that change the
//! sampling of a grid (such as [`Grid::select`]) return a new value.

mod axis;
mod species;
mod table;

pub use axis::Axis;
pub use species::SpeciesCollection;
pub use table::Grid;

pub(crate) use table::check_shape;
