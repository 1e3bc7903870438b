//! # Traits
//!
//! [`Evaluate`] is the seam between the interpolation engine and anything that
//! consumes a continuous field over a density / temperature plane. Both the
//! raw [`BicubicSurface`](crate::BicubicSurface) and the boundary-aware
//! [`Evaluator`](crate::Evaluator) implement it, so resampling code can be
//! written once against the trait.

use ndarray::Array2;

/// A scalar field that can be queried at arbitrary `(density, temperature)` points.
pub trait Evaluate {
    /// value of the field at a single point
    fn evaluate(&self, density: f64, temperature: f64) -> f64;

    /// Evaluate the field on the outer product of two coordinate lists.
    ///
    /// The returned table is indexed `[density_index, temperature_index]`, the
    /// same layout used by the field tables of a [`Grid`](crate::Grid).
    fn evaluate_grid(&self, density: &[f64], temperature: &[f64]) -> Array2<f64> {
        Array2::from_shape_fn((density.len(), temperature.len()), |(i, j)| {
            self.evaluate(density[i], temperature[j])
        })
    }
}

impl<T: Evaluate + ?Sized> Evaluate for &T {
    fn evaluate(&self, density: f64, temperature: f64) -> f64 {
        (**self).evaluate(density, temperature)
    }
}
