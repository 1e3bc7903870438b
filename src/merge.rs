//! # Merging species grids
//!
//! Multi-species EoS tables (electrons, ions, cold curve, ...) are frequently
//! tabulated on slightly different density / temperature axes. A simulation that
//! consumes several species at once needs them on one shared axis pair. The
//! [`GridMerger`] computes that pair from the overlap of the species' axes and
//! resamples every field of every selected species onto it.
//!
//! ```
//! use eosgrid::ndarray::Array2;
//! use eosgrid::{Grid, MergeConfig, SpeciesCollection};
//!
//! let ele = Grid::from_vecs(vec![1.0, 2.0, 3.0, 4.0], vec![1.0, 10.0, 100.0])
//!     .unwrap()
//!     .with_field("pres", Array2::from_elem((4, 3), 1.0))
//!     .unwrap();
//! let ion = Grid::from_vecs(vec![1.5, 2.5, 5.0], vec![2.0, 20.0, 200.0])
//!     .unwrap()
//!     .with_field("pres", Array2::from_elem((3, 3), 2.0))
//!     .unwrap();
//!
//! let collection = SpeciesCollection::new()
//!     .with_species("ele", ele)
//!     .with_species("ion", ion);
//!
//! let merged = eosgrid::merge(&collection, &["ele", "ion"], &MergeConfig::default()).unwrap();
//!
//! assert_eq!(merged.get("ele").unwrap().density(), merged.get("ion").unwrap().density());
//! assert_eq!(merged.get("ele").unwrap().density().as_slice(), &[1.5, 2.0, 2.5, 3.0, 4.0]);
//! assert_eq!(merged.get("ion").unwrap().temperature().as_slice(), &[2.0, 10.0, 20.0, 100.0]);
//! ```

use crate::intersect::intersect_all;
use crate::prelude::*;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

type Predicate = dyn Fn(f64) -> bool + Send + Sync;

/// Keep / drop predicate over the coordinates of one axis.
///
/// Filters are applied as a mask before the axes of the species are intersected,
/// so they restrict the range of the common axes. They never affect the samples
/// used to fit the interpolating surfaces.
#[derive(Clone)]
pub struct AxisFilter {
    label: String,
    keep: Arc<Predicate>,
}

impl AxisFilter {
    /// Filter from an arbitrary predicate
    pub fn new<F>(label: impl Into<String>, keep: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            keep: Arc::new(keep),
        }
    }

    /// keep every coordinate
    pub fn keep_all() -> Self {
        Self::new("keep all", |_| true)
    }

    /// keep strictly positive coordinates
    pub fn positive() -> Self {
        Self::new("x > 0", |x| x > 0.0)
    }

    /// keep coordinates in the closed range `[lo, hi]`
    pub fn range(lo: f64, hi: f64) -> Self {
        Self::new(format!("{lo} <= x <= {hi}"), move |x| lo <= x && x <= hi)
    }

    pub fn keep(&self, x: f64) -> bool {
        (self.keep)(x)
    }

    /// Coordinates of `axis` accepted by this filter, in order
    pub fn apply(&self, axis: &Axis) -> Vec<f64> {
        axis.masked_values(&axis.mask(|x| self.keep(x)))
    }
}

/// The documented default: [`AxisFilter::positive`]. Physical density and
/// temperature axes are positive, so this keeps everything for valid tables.
impl Default for AxisFilter {
    fn default() -> Self {
        Self::positive()
    }
}

impl fmt::Debug for AxisFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AxisFilter").field(&self.label).finish()
    }
}

/// Options of a merge.
///
/// ```
/// use eosgrid::{AxisFilter, MergeConfig};
///
/// let config = MergeConfig::default()
///     .with_density_filter(AxisFilter::range(1e-3, 1e3))
///     .with_threshold_fields(["pres", "eint"]);
///
/// assert_eq!(config.threshold_fields, vec!["pres", "eint"]);
/// assert_eq!(config.threshold_epsilon, f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// mask applied to every density axis before intersection
    pub density_filter: AxisFilter,
    /// mask applied to every temperature axis before intersection
    pub temperature_filter: AxisFilter,
    /// fields whose near-zero interpolation noise is flushed to exactly zero
    pub threshold_fields: Vec<String>,
    /// values with a magnitude at or below this are flushed in threshold fields
    pub threshold_epsilon: f64,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            density_filter: AxisFilter::default(),
            temperature_filter: AxisFilter::default(),
            threshold_fields: Vec::new(),
            threshold_epsilon: f64::EPSILON,
        }
    }
}

impl MergeConfig {
    pub fn with_density_filter(mut self, filter: AxisFilter) -> Self {
        self.density_filter = filter;
        self
    }

    pub fn with_temperature_filter(mut self, filter: AxisFilter) -> Self {
        self.temperature_filter = filter;
        self
    }

    pub fn with_threshold_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.threshold_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold_epsilon(mut self, epsilon: f64) -> Self {
        self.threshold_epsilon = epsilon;
        self
    }
}

/// Resamples a chosen set of species onto one shared density / temperature axis
/// pair.
#[derive(Debug, Clone)]
pub struct GridMerger {
    species: Vec<String>,
    config: MergeConfig,
}

impl GridMerger {
    /// merger for the named species with the default [`MergeConfig`]
    pub fn new<I, S>(species: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            species: species.into_iter().map(Into::into).collect(),
            config: MergeConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Common axis pair of the selected species, see [`common_axes`]
    pub fn common_axes(&self, collection: &SpeciesCollection) -> Result<(Axis, Axis)> {
        common_axes(collection, &self.species, &self.config)
    }

    /// Produce a new collection in which every selected species is resampled onto
    /// the common axes. Other species are copied through unchanged.
    ///
    /// All selected species end up with element-wise identical axes. The merge is
    /// all or nothing: any error leaves no partial result behind.
    #[instrument(skip_all, fields(species = ?self.species))]
    pub fn merge(&self, collection: &SpeciesCollection) -> Result<SpeciesCollection> {
        let (density, temperature) = self.common_axes(collection)?;

        debug!(
            density_points = density.len(),
            temperature_points = temperature.len(),
            density_range = ?(density.min(), density.max()),
            temperature_range = ?(temperature.min(), temperature.max()),
            "computed common axes"
        );

        let interpolator = BoundaryInterpolator::default();
        let mut out = SpeciesCollection::new();

        for (name, grid) in collection.iter() {
            if !self.species.iter().any(|s| s == name) {
                out.insert(name, grid.clone());
                continue;
            }

            let mut merged = Grid::new(density.clone(), temperature.clone());

            for (field, table) in grid.fields() {
                let evaluator = interpolator.build(table, grid.density(), grid.temperature())?;
                let mut resampled = evaluator.evaluate_grid(&density, &temperature);

                let flushed = self
                    .config
                    .threshold_fields
                    .iter()
                    .any(|f| f == field)
                    .then(|| flush_to_zero(&mut resampled, self.config.threshold_epsilon));

                debug!(species = name, field, flushed = ?flushed, "resampled field");
                merged.insert_field(field, resampled)?;
            }

            out.insert(name, merged);
        }

        for field in &self.config.threshold_fields {
            let present = self
                .species
                .iter()
                .filter_map(|s| collection.get(s))
                .any(|grid| grid.contains_field(field));

            if !present {
                warn!(
                    field = field.as_str(),
                    "threshold field is not present in any merged species"
                );
            }
        }

        Ok(out)
    }
}

/// Merge the grids of `intersect_species` onto one shared axis pair.
///
/// Shorthand for building a [`GridMerger`] over `intersect_species` with a copy of
/// `config` and merging `collection` with it.
pub fn merge<S: AsRef<str>>(
    collection: &SpeciesCollection,
    intersect_species: &[S],
    config: &MergeConfig,
) -> Result<SpeciesCollection> {
    GridMerger::new(intersect_species.iter().map(|s| s.as_ref().to_string()))
        .with_config(config.clone())
        .merge(collection)
}

/// Common `(density, temperature)` axes of the named species.
///
/// Each species' axes are masked by the configured filters, then the masked
/// density axes are intersected with each other (and likewise the temperature
/// axes). Fails if no species is named, if a named species is missing, or if
/// either common axis ends up with fewer than two points.
pub fn common_axes<S: AsRef<str>>(
    collection: &SpeciesCollection,
    species: &[S],
    config: &MergeConfig,
) -> Result<(Axis, Axis)> {
    if species.is_empty() {
        return Err(InvalidGrid::NoSpecies.into());
    }

    let grids = species
        .iter()
        .map(|name| collection.try_get(name.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    let densities: Vec<Vec<f64>> = grids
        .iter()
        .map(|grid| config.density_filter.apply(grid.density()))
        .collect();
    let temperatures: Vec<Vec<f64>> = grids
        .iter()
        .map(|grid| config.temperature_filter.apply(grid.temperature()))
        .collect();

    let density = intersect_all(densities.iter().map(Vec::as_slice));
    let temperature = intersect_all(temperatures.iter().map(Vec::as_slice));

    let names = || -> Vec<String> { species.iter().map(|s| s.as_ref().to_string()).collect() };

    if density.len() < 2 {
        return Err(DisjointGrids::new(AxisKind::Density, names(), density.len()).into());
    }
    if temperature.len() < 2 {
        return Err(DisjointGrids::new(AxisKind::Temperature, names(), temperature.len()).into());
    }

    Ok((
        Axis::with_name("density", density)?,
        Axis::with_name("temperature", temperature)?,
    ))
}

/// Replace every value with `|v| <= epsilon` by exactly zero, returning how many
/// non-zero values were flushed.
fn flush_to_zero(table: &mut Array2<f64>, epsilon: f64) -> usize {
    let mut flushed = 0;

    table.map_inplace(|v| {
        if v.abs() <= epsilon {
            if *v != 0.0 {
                flushed += 1;
            }
            *v = 0.0;
        }
    });

    flushed
}
