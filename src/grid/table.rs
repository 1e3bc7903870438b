use crate::prelude::*;

/// Density / temperature axis pair and the field tables sampled on it.
///
/// Field tables are indexed `[density_index, temperature_index]`. Field names are
/// kept in a sorted map so iteration order (and therefore every derived result)
/// is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    density: Axis,
    temperature: Axis,
    fields: BTreeMap<String, Array2<f64>>,
}

impl Grid {
    /// create a grid with no fields
    pub fn new(density: Axis, temperature: Axis) -> Self {
        Self {
            density,
            temperature,
            fields: BTreeMap::new(),
        }
    }

    /// Validate raw coordinate vectors and create a grid with no fields.
    ///
    /// ```
    /// let grid = eosgrid::Grid::from_vecs(vec![0.1, 1.0], vec![1.0, 10.0, 100.0]).unwrap();
    /// assert_eq!(grid.shape(), (2, 3));
    /// ```
    pub fn from_vecs(density: Vec<f64>, temperature: Vec<f64>) -> Result<Self> {
        let density = Axis::with_name("density", density)?;
        let temperature = Axis::with_name("temperature", temperature)?;
        Ok(Self::new(density, temperature))
    }

    /// builder form of [`Grid::insert_field`]
    pub fn with_field<S: Into<String>>(mut self, name: S, table: Array2<f64>) -> Result<Self> {
        self.insert_field(name, table)?;
        Ok(self)
    }

    /// Add (or replace) a field table. The table must have shape
    /// `(density.len(), temperature.len())`.
    pub fn insert_field<S: Into<String>>(
        &mut self,
        name: S,
        table: Array2<f64>,
    ) -> Result<Option<Array2<f64>>> {
        let name = name.into();
        check_shape(&name, self.shape(), table.dim())?;
        Ok(self.fields.insert(name, table))
    }

    pub fn density(&self) -> &Axis {
        &self.density
    }

    pub fn temperature(&self) -> &Axis {
        &self.temperature
    }

    /// `(density.len(), temperature.len())`
    pub fn shape(&self) -> (usize, usize) {
        (self.density.len(), self.temperature.len())
    }

    pub fn field(&self, name: &str) -> Option<&Array2<f64>> {
        self.fields.get(name)
    }

    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Array2<f64>)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// Sub-grid made of the density rows and temperature columns selected by the
    /// two boolean masks. Every field table is sliced accordingly.
    ///
    /// Fails if a mask length does not match its axis, or if fewer than two points
    /// remain on either axis.
    pub fn select(&self, density_mask: &[bool], temperature_mask: &[bool]) -> Result<Self> {
        check_mask("density", self.density.len(), density_mask)?;
        check_mask("temperature", self.temperature.len(), temperature_mask)?;

        let density = Axis::with_name("density", self.density.masked_values(density_mask))?;
        let temperature = Axis::with_name(
            "temperature",
            self.temperature.masked_values(temperature_mask),
        )?;

        let rows = selected_indices(density_mask);
        let cols = selected_indices(temperature_mask);

        let fields = self
            .fields
            .iter()
            .map(|(name, table)| {
                let sliced = table
                    .select(ndarray::Axis(0), &rows)
                    .select(ndarray::Axis(1), &cols);
                (name.clone(), sliced)
            })
            .collect();

        Ok(Self {
            density,
            temperature,
            fields,
        })
    }

    /// Keep only the density points that also appear (exactly) in `reference`.
    ///
    /// EoS tables generated with QEOS carry a few density points that the matching
    /// opacity table does not; this drops them so both tables share one axis.
    pub fn retain_density_in(&self, reference: &[f64]) -> Result<Self> {
        let density_mask = self.density.mask(|x| reference.contains(&x));
        let temperature_mask = vec![true; self.temperature.len()];
        self.select(&density_mask, &temperature_mask)
    }

    /// decompose the grid into its axes and field map
    pub fn into_parts(self) -> (Axis, Axis, BTreeMap<String, Array2<f64>>) {
        (self.density, self.temperature, self.fields)
    }
}

pub(crate) fn check_shape(
    name: &str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<(), InvalidGrid> {
    if expected != actual {
        return Err(ShapeMismatch::new(name.to_string(), expected, actual).into());
    }
    Ok(())
}

fn check_mask(name: &'static str, expected: usize, mask: &[bool]) -> Result<(), InvalidGrid> {
    if mask.len() != expected {
        return Err(InvalidGrid::MaskLength {
            name,
            expected,
            actual: mask.len(),
        });
    }
    Ok(())
}

fn selected_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter_map(|(idx, keep)| keep.then(|| idx))
        .collect()
}
