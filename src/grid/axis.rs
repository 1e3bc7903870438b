use crate::prelude::*;

/// Strictly increasing, finite sample coordinates with at least two points.
///
/// Dereferences to the underlying `Vec<f64>` so it can be sliced and iterated
/// like any other array of coordinates.
#[derive(Debug, Clone, PartialEq, Deref, Into)]
pub struct Axis(Vec<f64>);

impl Axis {
    /// Validate `values` and wrap them in an axis.
    ///
    /// ```
    /// let axis = eosgrid::Axis::new(vec![0.1, 1.0, 10.0]).unwrap();
    /// assert_eq!(axis.len(), 3);
    ///
    /// assert!(eosgrid::Axis::new(vec![1.0]).is_err());
    /// assert!(eosgrid::Axis::new(vec![1.0, 1.0]).is_err());
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Self> {
        Self::with_name("coordinate", values)
    }

    /// same as [`Axis::new`] with the axis name reported in any validation error
    pub(crate) fn with_name(name: &'static str, values: Vec<f64>) -> Result<Self> {
        validate(name, &values)?;
        Ok(Self(values))
    }

    /// smallest coordinate
    pub fn min(&self) -> f64 {
        self.0[0]
    }

    /// largest coordinate
    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// whether `x` lies in the closed range `[min, max]`
    pub fn contains(&self, x: f64) -> bool {
        self.min() <= x && x <= self.max()
    }

    /// Clamp `x` into the closed range `[min, max]`
    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.min()).min(self.max())
    }

    /// Boolean keep / drop mask of this axis under a predicate. Order is preserved.
    pub fn mask<F: Fn(f64) -> bool>(&self, keep: F) -> Vec<bool> {
        self.0.iter().map(|x| keep(*x)).collect()
    }

    /// the coordinates of this axis selected by `mask`, in their original order
    pub fn masked_values(&self, mask: &[bool]) -> Vec<f64> {
        self.0
            .iter()
            .zip(mask)
            .filter_map(|(x, keep)| keep.then(|| *x))
            .collect()
    }

    /// Index of the interval `[x_k, x_{k+1}]` that contains `x`.
    ///
    /// Values at or beyond the ends are assigned to the first / last interval, so
    /// the returned index is always in `0..len - 1`.
    pub(crate) fn interval(&self, x: f64) -> usize {
        let n = self.0.len();
        let upper = self.0.partition_point(|v| *v <= x);
        upper.clamp(1, n - 1) - 1
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl AsRef<[f64]> for Axis {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

fn validate(name: &'static str, values: &[f64]) -> Result<(), InvalidGrid> {
    if values.len() < 2 {
        return Err(InvalidGrid::AxisTooShort {
            name,
            len: values.len(),
        });
    }

    if let Some((index, value)) = values.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(InvalidGrid::NonFinite {
            name,
            index,
            value: *value,
        });
    }

    if let Some(index) = (1..values.len()).find(|i| values[*i] <= values[*i - 1]) {
        return Err(InvalidGrid::NotIncreasing {
            name,
            index,
            previous: values[index - 1],
            value: values[index],
        });
    }

    Ok(())
}
