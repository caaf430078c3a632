use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::{dataset::SimilarityIndex, error::DatasetError, models::Movie};

/// What to do when the catalog contains the same title more than once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateTitlePolicy {
    /// Keep the dataset; lookups resolve to the first occurrence
    #[default]
    FirstMatch,
    /// Refuse to load the dataset
    Reject,
}

/// Locations of the two persisted halves of a dataset
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    pub movies: PathBuf,
    pub similarity: PathBuf,
}

impl DatasetPaths {
    pub fn new(movies: impl Into<PathBuf>, similarity: impl Into<PathBuf>) -> Self {
        Self {
            movies: movies.into(),
            similarity: similarity.into(),
        }
    }
}

/// Loads the catalog and similarity matrix and validates them as one dataset
///
/// `movies` must be a JSON array of objects carrying a string `title`;
/// `similarity` must be a JSON array of numeric rows. Any failure here is
/// meant to stop the process before it serves requests.
pub fn load_dataset(
    paths: &DatasetPaths,
    policy: DuplicateTitlePolicy,
) -> Result<SimilarityIndex, DatasetError> {
    // Check both files up front so the error names the one that is missing
    for path in [&paths.movies, &paths.similarity] {
        if !path.exists() {
            return Err(DatasetError::MissingFile(path.clone()));
        }
    }

    let records: Vec<Map<String, Value>> = read_json(&paths.movies)?;
    let catalog = records
        .into_iter()
        .enumerate()
        .map(|(position, record)| movie_from_record(position, record))
        .collect::<Result<Vec<_>, _>>()?;

    let matrix: Vec<Vec<f32>> = read_json(&paths.similarity)?;
    let index = SimilarityIndex::new(catalog, matrix)?;

    let duplicates = index.duplicate_titles();
    if !duplicates.is_empty() {
        match policy {
            DuplicateTitlePolicy::Reject => {
                return Err(DatasetError::InvalidDataset(format!(
                    "catalog contains duplicate titles: {}",
                    duplicates.join(", ")
                )));
            }
            DuplicateTitlePolicy::FirstMatch => {
                tracing::warn!(
                    duplicate_count = duplicates.len(),
                    first = %duplicates[0],
                    "Catalog contains duplicate titles, lookups use the first occurrence"
                );
            }
        }
    }

    tracing::info!(
        movies = index.len(),
        movies_path = %paths.movies.display(),
        similarity_path = %paths.similarity.display(),
        "Dataset loaded"
    );

    Ok(index)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| DatasetError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn movie_from_record(
    position: usize,
    mut record: Map<String, Value>,
) -> Result<Movie, DatasetError> {
    match record.remove("title") {
        Some(Value::String(title)) if title.trim().is_empty() => Err(DatasetError::InvalidDataset(
            format!("movie at position {} has an empty title", position),
        )),
        Some(Value::String(title)) => Ok(Movie {
            title,
            fields: record,
        }),
        Some(other) => Err(DatasetError::InvalidDataset(format!(
            "movie at position {} has a non-string title: {}",
            position, other
        ))),
        None => Err(DatasetError::InvalidDataset(format!(
            "movie at position {} has no 'title' field",
            position
        ))),
    }
}
