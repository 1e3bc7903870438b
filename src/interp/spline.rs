//! one dimensional natural cubic spline pieces shared by the bicubic surface

use crate::prelude::*;
use ndarray::ArrayView1;
use ndarray::Zip;

/// Second derivatives of the natural cubic spline through `(x[i], y[i])`.
///
/// The end second derivatives are zero. Solves the tridiagonal system with a
/// single forward sweep and back substitution. With two points the spline is
/// the straight line and every second derivative is zero.
pub(crate) fn second_derivatives(x: &[f64], y: ArrayView1<f64>) -> Array1<f64> {
    let n = x.len();
    let mut y2 = Array1::zeros(n);

    if n < 3 {
        return y2;
    }

    let mut u = vec![0.0; n];

    for i in 1..n - 1 {
        let sig = (x[i] - x[i - 1]) / (x[i + 1] - x[i - 1]);
        let p = sig * y2[i - 1] + 2.0;
        y2[i] = (sig - 1.0) / p;

        let slope_diff =
            (y[i + 1] - y[i]) / (x[i + 1] - x[i]) - (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        u[i] = (6.0 * slope_diff / (x[i + 1] - x[i - 1]) - sig * u[i - 1]) / p;
    }

    y2[n - 1] = 0.0;
    for k in (1..n - 1).rev() {
        y2[k] = y2[k] * y2[k + 1] + u[k];
    }

    y2
}

/// Natural spline second derivatives of every lane of `table` that runs along
/// `axis`, where `x` are the coordinates of that axis.
pub(crate) fn second_derivatives_along(
    table: ArrayView2<f64>,
    x: &[f64],
    axis: ndarray::Axis,
) -> Array2<f64> {
    let mut out = Array2::zeros(table.dim());

    Zip::from(out.lanes_mut(axis))
        .and(table.lanes(axis))
        .for_each(|mut out_lane, lane| out_lane.assign(&second_derivatives(x, lane)));

    out
}

/// Weights of the four knot quantities `[y_lo, y_hi, y2_lo, y2_hi]` that make up
/// a cubic spline segment, together with the index of the segment's lower knot.
///
/// With `derivative` set the weights give the first derivative of the segment
/// instead of its value.
pub(crate) fn segment_weights(axis: &Axis, x: f64, derivative: bool) -> (usize, [f64; 4]) {
    let k = axis.interval(x);
    let (lo, hi) = (axis[k], axis[k + 1]);
    let h = hi - lo;

    let a = (hi - x) / h;
    let b = (x - lo) / h;

    let weights = if derivative {
        [
            -1.0 / h,
            1.0 / h,
            -(3.0 * a * a - 1.0) * h / 6.0,
            (3.0 * b * b - 1.0) * h / 6.0,
        ]
    } else {
        [
            a,
            b,
            (a * a * a - a) * h * h / 6.0,
            (b * b * b - b) * h * h / 6.0,
        ]
    };

    (k, weights)
}
