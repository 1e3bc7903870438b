use super::{BicubicSurface, BoundaryPolicy, EvalMode};
use crate::grid::check_shape;
use crate::prelude::*;

use std::fmt;
use std::sync::Arc;

type EvalFn = dyn Fn(f64, f64) -> f64 + Send + Sync;

/// Recipe for building [`Evaluator`]s: the low-end policy of each axis and the
/// quantity to return.
///
/// The default clamps both axes and returns the field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor)]
pub struct BoundaryInterpolator {
    pub density_low: BoundaryPolicy,
    pub temperature_low: BoundaryPolicy,
    pub mode: EvalMode,
}

impl BoundaryInterpolator {
    /// Fit a surface through `table` (indexed `[density_index, temperature_index]`)
    /// and return a reusable evaluator for it.
    ///
    /// Fails with [`InvalidGrid`](crate::InvalidGrid) if either axis is shorter than
    /// two points, is not strictly increasing, or if the table shape does not match
    /// the axes.
    pub fn build(
        &self,
        table: &Array2<f64>,
        density: &[f64],
        temperature: &[f64],
    ) -> Result<Evaluator> {
        let density = Axis::with_name("density", density.to_vec())?;
        let temperature = Axis::with_name("temperature", temperature.to_vec())?;
        check_shape("table", (density.len(), temperature.len()), table.dim())?;

        let mut table = table.clone();

        let density = match self.density_low {
            BoundaryPolicy::Clamp => density,
            BoundaryPolicy::ZeroExtrapolate => {
                let (axis, augmented) = prepend_zero_lane(&density, table, ndarray::Axis(0))?;
                table = augmented;
                axis
            }
        };

        let temperature = match self.temperature_low {
            BoundaryPolicy::Clamp => temperature,
            BoundaryPolicy::ZeroExtrapolate => {
                let (axis, augmented) =
                    prepend_zero_lane(&temperature, table, ndarray::Axis(1))?;
                table = augmented;
                axis
            }
        };

        tracing::trace!(
            density_low = ?self.density_low,
            temperature_low = ?self.temperature_low,
            mode = ?self.mode,
            shape = ?table.dim(),
            "fitting bicubic surface"
        );

        let surface = BicubicSurface::new(table, density, temperature)?;

        Ok(Evaluator::new(Arc::new(surface), self.mode))
    }
}

/// Build an evaluator in a single call.
///
/// Shorthand for
/// `BoundaryInterpolator::new(density_low, temperature_low, mode).build(table, density, temperature)`.
pub fn build(
    table: &Array2<f64>,
    density: &[f64],
    temperature: &[f64],
    density_low: BoundaryPolicy,
    temperature_low: BoundaryPolicy,
    mode: EvalMode,
) -> Result<Evaluator> {
    BoundaryInterpolator::new(density_low, temperature_low, mode)
        .build(table, density, temperature)
}

/// Prepend a synthetic coordinate below the minimum of `axis`, and a lane of zeros
/// to `table` along `direction`.
///
/// The synthetic coordinate is zero for a positive axis. Otherwise it sits one
/// leading spacing below the minimum.
fn prepend_zero_lane(
    axis: &Axis,
    table: Array2<f64>,
    direction: ndarray::Axis,
) -> Result<(Axis, Array2<f64>)> {
    let synthetic = if axis.min() > 0.0 {
        0.0
    } else {
        axis.min() - (axis[1] - axis[0])
    };

    let mut values = Vec::with_capacity(axis.len() + 1);
    values.push(synthetic);
    values.extend_from_slice(axis);
    let augmented_axis = Axis::with_name("augmented", values)?;

    let mut shape = table.raw_dim();
    shape[direction.index()] += 1;

    let mut augmented = Array2::zeros(shape);
    augmented
        .slice_axis_mut(direction, ndarray::Slice::from(1..))
        .assign(&table);

    tracing::trace!(synthetic, direction = direction.index(), "zero extrapolation lane added");

    Ok((augmented_axis, augmented))
}

/// A fitted surface together with the clamping and quantity chosen at build time.
///
/// Evaluation is a pure function of the query point: the evaluator can be called
/// any number of times, cloned cheaply (the surface is shared) and sent across
/// threads.
#[derive(Clone)]
pub struct Evaluator {
    surface: Arc<BicubicSurface>,
    mode: EvalMode,
    func: Arc<EvalFn>,
}

impl Evaluator {
    fn new(surface: Arc<BicubicSurface>, mode: EvalMode) -> Self {
        let (d_lo, d_hi) = (surface.density().min(), surface.density().max());
        let (t_lo, t_hi) = (surface.temperature().min(), surface.temperature().max());

        let s = Arc::clone(&surface);

        // queries are clamped into the (possibly augmented) axis ranges, so the
        // synthetic zero coordinate is the lower clamp for zero extrapolated axes
        let func: Arc<EvalFn> = match mode {
            EvalMode::Value => Arc::new(move |d, t| {
                s.value(d.max(d_lo).min(d_hi), t.max(t_lo).min(t_hi))
            }),
            EvalMode::DDensity => Arc::new(move |d, t| {
                s.d_density(d.max(d_lo).min(d_hi), t.max(t_lo).min(t_hi))
            }),
            EvalMode::DTemperature => Arc::new(move |d, t| {
                s.d_temperature(d.max(d_lo).min(d_hi), t.max(t_lo).min(t_hi))
            }),
        };

        Self {
            surface,
            mode,
            func,
        }
    }

    /// the (possibly boundary augmented) surface behind this evaluator
    pub fn surface(&self) -> &BicubicSurface {
        &self.surface
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Another evaluator over the same fitted surface returning a different
    /// quantity. The surface is not refitted.
    pub fn with_mode(&self, mode: EvalMode) -> Self {
        Self::new(Arc::clone(&self.surface), mode)
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&self, density: f64, temperature: f64) -> f64 {
        (self.func)(density, temperature)
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("mode", &self.mode)
            .field("density", self.surface.density())
            .field("temperature", self.surface.temperature())
            .finish()
    }
}
