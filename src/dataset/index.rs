use std::collections::HashSet;

use crate::{error::DatasetError, models::Movie};

/// Lookup failure for a title that is not in the catalog
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("Title not in catalog: {0}")]
    NotFound(String),
}

/// Immutable catalog of movies plus the dense similarity matrix aligned to it
///
/// A movie's position in the catalog is its row and column index in the matrix.
/// Both halves are validated together on construction and never change afterwards.
#[derive(Debug)]
pub struct SimilarityIndex {
    catalog: Vec<Movie>,
    matrix: Vec<Vec<f32>>,
}

impl SimilarityIndex {
    /// Builds the index, checking that the matrix is square and matches the catalog
    pub fn new(catalog: Vec<Movie>, matrix: Vec<Vec<f32>>) -> Result<Self, DatasetError> {
        if matrix.len() != catalog.len() {
            return Err(DatasetError::InvalidDataset(format!(
                "similarity matrix has {} rows but catalog has {} movies",
                matrix.len(),
                catalog.len()
            )));
        }

        if let Some((row, values)) = matrix
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != catalog.len())
        {
            return Err(DatasetError::InvalidDataset(format!(
                "similarity matrix row {} has {} columns, expected {}",
                row,
                values.len(),
                catalog.len()
            )));
        }

        Ok(Self { catalog, matrix })
    }

    /// Number of movies in the catalog
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Resolves a title to its catalog position
    ///
    /// Exact, case-sensitive match. When a title occurs more than once the
    /// first occurrence wins.
    pub fn resolve_index(&self, title: &str) -> Result<usize, IndexError> {
        self.catalog
            .iter()
            .position(|movie| movie.title == title)
            .ok_or_else(|| IndexError::NotFound(title.to_string()))
    }

    /// Full similarity row for a position, paired with column positions
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    pub fn row_for(&self, position: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.matrix[position].iter().copied().enumerate()
    }

    /// Title of the movie at a position
    ///
    /// # Panics
    /// Panics if `position` is out of range.
    pub fn title_at(&self, position: usize) -> &str {
        &self.catalog[position].title
    }

    pub fn movie_at(&self, position: usize) -> Option<&Movie> {
        self.catalog.get(position)
    }

    /// Sorted, de-duplicated titles for building a selection list
    pub fn titles(&self) -> Vec<&str> {
        let mut titles: Vec<&str> = self.catalog.iter().map(|m| m.title.as_str()).collect();
        titles.sort_unstable();
        titles.dedup();
        titles
    }

    /// Titles that occur more than once, in order of first occurrence
    pub fn duplicate_titles(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();

        for movie in &self.catalog {
            let title = movie.title.as_str();
            if !seen.insert(title) && reported.insert(title) {
                duplicates.push(title);
            }
        }

        duplicates
    }
}
