//! # Boundary aware interpolation
//!
//! Tabulated EoS and opacity data are only known on a rectangular density /
//! temperature grid. This module fits a smooth surface through such a table
//! ([`BicubicSurface`]) and wraps it in an [`Evaluator`] that decides what happens
//! to queries outside of the tabulated range.
//!
//! ## Boundary policies
//!
//! The low end of each axis is controlled independently with a [`BoundaryPolicy`]:
//!
//! * [`BoundaryPolicy::Clamp`] substitutes the axis minimum for any query below it
//! * [`BoundaryPolicy::ZeroExtrapolate`] prepends a synthetic coordinate below the
//!   minimum with a row (or column) of zeros, so that the field ramps smoothly down
//!   to zero between the synthetic point and the first real sample
//!
//! The high end of both axes always clamps.
//!
//! ## Evaluator modes
//!
//! An evaluator returns either the field itself or one of its partial derivatives,
//! as selected by [`EvalMode`]. The choice is made once, when the evaluator is
//! built:
//!
//! ```
//! use eosgrid::ndarray::Array2;
//! use eosgrid::{BoundaryInterpolator, BoundaryPolicy, EvalMode, Evaluate};
//!
//! let density = [1.0, 2.0, 3.0];
//! let temperature = [10.0, 20.0];
//! let table = Array2::from_shape_fn((3, 2), |(i, j)| (i + j) as f64);
//!
//! let eval = BoundaryInterpolator::new(BoundaryPolicy::Clamp, BoundaryPolicy::Clamp, EvalMode::Value)
//!     .build(&table, &density, &temperature)
//!     .unwrap();
//!
//! assert_eq!(eval.evaluate(2.0, 20.0), 2.0);
//! // below the density minimum the query is clamped
//! assert_eq!(eval.evaluate(0.1, 20.0), eval.evaluate(1.0, 20.0));
//! ```

mod boundary;
mod spline;
mod surface;

pub use boundary::{build, BoundaryInterpolator, Evaluator};
pub use surface::BicubicSurface;

/// What to do with queries below the minimum of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryPolicy {
    /// substitute the axis minimum
    #[default]
    Clamp,
    /// ramp the field to zero at a synthetic coordinate below the minimum
    ZeroExtrapolate,
}

/// Quantity returned by an [`Evaluator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvalMode {
    #[default]
    Value,
    /// partial derivative with respect to density
    DDensity,
    /// partial derivative with respect to temperature
    DTemperature,
}
