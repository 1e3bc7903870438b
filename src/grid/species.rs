use crate::prelude::*;

/// Mapping from species name (`"ele"`, `"ion"`, `"ioncc"`, ...) to the grid of
/// that species.
///
/// This is the unit of input and output for [`merge`](crate::merge()). It has value
/// semantics: merging reads one collection and returns a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesCollection {
    species: BTreeMap<String, Grid>,
}

impl SpeciesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// builder form of [`SpeciesCollection::insert`]
    pub fn with_species<S: Into<String>>(mut self, name: S, grid: Grid) -> Self {
        self.insert(name, grid);
        self
    }

    /// add (or replace) the grid of a species, returning the previous grid
    pub fn insert<S: Into<String>>(&mut self, name: S, grid: Grid) -> Option<Grid> {
        self.species.insert(name.into(), grid)
    }

    pub fn get(&self, name: &str) -> Option<&Grid> {
        self.species.get(name)
    }

    /// like [`SpeciesCollection::get`], but a missing species is an error
    pub fn try_get(&self, name: &str) -> Result<&Grid, UnknownSpecies> {
        self.species
            .get(name)
            .ok_or_else(|| UnknownSpecies::new(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Grid)> {
        self.species.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Grid)> for SpeciesCollection {
    fn from_iter<I: IntoIterator<Item = (S, Grid)>>(iter: I) -> Self {
        Self {
            species: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for SpeciesCollection {
    type Item = (String, Grid);
    type IntoIter = std::collections::btree_map::IntoIter<String, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.species.into_iter()
    }
}
