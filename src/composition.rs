//! Mixture composition of a material table.
//!
//! Opacity codes tabulate on an ion number density axis, while hydrodynamics
//! codes want mass density. [`Composition`] carries the atomic numbers, atomic
//! masses and relative number fractions of the mixture and performs that
//! conversion.

use crate::prelude::*;

/// Avogadro constant in mol⁻¹ (exact since the 2019 SI redefinition)
pub const AVOGADRO: f64 = 6.022_140_76e23;

#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    znum: Vec<f64>,
    anum: Vec<f64>,
    xnum: Vec<f64>,
}

impl Composition {
    /// Mixture from atomic numbers `znum`, atomic masses `anum` (g/mol) and relative
    /// number fractions `xnum` of each element.
    ///
    /// The fractions do not need to be normalised.
    ///
    /// ```
    /// // pure aluminium
    /// let al = eosgrid::Composition::new(vec![13.0], vec![26.98], vec![1.0]).unwrap();
    /// assert!((al.abar() - 26.98).abs() < 1e-12);
    /// ```
    pub fn new(znum: Vec<f64>, anum: Vec<f64>, xnum: Vec<f64>) -> Result<Self> {
        if znum.is_empty() || znum.len() != anum.len() || znum.len() != xnum.len() {
            return Err(invalid(format!(
                "expected one entry per element, got {} atomic numbers, {} masses and {} fractions",
                znum.len(),
                anum.len(),
                xnum.len()
            )));
        }

        if let Some(a) = anum.iter().find(|a| !(a.is_finite() && **a > 0.0)) {
            return Err(invalid(format!("atomic mass {a} is not positive")));
        }

        if let Some(x) = xnum.iter().find(|x| !(x.is_finite() && **x >= 0.0)) {
            return Err(invalid(format!("number fraction {x} is negative")));
        }

        if xnum.iter().sum::<f64>() <= 0.0 {
            return Err(invalid("number fractions sum to zero".to_string()));
        }

        Ok(Self { znum, anum, xnum })
    }

    pub fn znum(&self) -> &[f64] {
        &self.znum
    }

    pub fn anum(&self) -> &[f64] {
        &self.anum
    }

    pub fn xnum(&self) -> &[f64] {
        &self.xnum
    }

    /// Mean atomic mass `1 / Σ (x_i / A_i)`.
    pub fn abar(&self) -> f64 {
        let inverse: f64 = self
            .xnum
            .iter()
            .zip(&self.anum)
            .map(|(x, a)| x / a)
            .sum();
        1.0 / inverse
    }

    /// Fraction weighted mean atomic number, the full-ionisation limit of Zbar.
    pub fn zbar_max(&self) -> f64 {
        let total: f64 = self.xnum.iter().sum();
        self.xnum
            .iter()
            .zip(&self.znum)
            .map(|(x, z)| x * z)
            .sum::<f64>()
            / total
    }

    /// mass density (g/cm³) of an ion number density `nion` (cm⁻³)
    pub fn mass_density(&self, nion: f64) -> f64 {
        nion * self.abar() / AVOGADRO
    }

    /// [`Composition::mass_density`] applied to a whole ion density axis
    pub fn mass_density_axis(&self, nion: &Axis) -> Result<Axis> {
        let abar = self.abar();
        let rho = nion.iter().map(|n| n * abar / AVOGADRO).collect();
        Axis::with_name("density", rho)
    }
}

fn invalid(message: String) -> Error {
    InvalidGrid::Composition(message).into()
}
