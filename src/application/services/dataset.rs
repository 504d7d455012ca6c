//! Dataset loading service
//!
//! Reads the JSON document once at startup and hands out the parsed tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Dataset;
use crate::infrastructure::traits::FileSystem;

/// Counts shown by `watchtree info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    pub countries: usize,
    /// Distinct genre names across all countries
    pub genres: usize,
    pub users: usize,
    pub watch_items: usize,
}

/// Service for loading the dataset from disk.
pub struct DatasetService {
    fs: Arc<dyn FileSystem>,
}

impl DatasetService {
    /// Create a new dataset service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load and parse the dataset at `path`.
    ///
    /// A missing file and a schema mismatch are both fatal to the caller;
    /// an empty array is a valid, empty dataset.
    pub fn load(&self, path: &Path) -> ApplicationResult<Dataset> {
        debug!("load: path={}", path.display());
        if !self.fs.is_file(path) {
            return Err(ApplicationError::DataFileNotFound(path.to_path_buf()));
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read data file", path)?;

        let dataset = Self::parse_at(&content, path.to_path_buf())?;
        let summary = Self::summary(&dataset);
        debug!(
            "load: {} countries, {} genres, {} users",
            summary.countries, summary.genres, summary.users
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text without touching the filesystem.
    pub fn parse(content: &str) -> ApplicationResult<Dataset> {
        Self::parse_at(content, PathBuf::from("<memory>"))
    }

    fn parse_at(content: &str, path: PathBuf) -> ApplicationResult<Dataset> {
        serde_json::from_str(content).map_err(|e| ApplicationError::InvalidDataset {
            path,
            message: e.to_string(),
        })
    }

    pub fn summary(dataset: &Dataset) -> DatasetSummary {
        let genres: HashSet<&str> = dataset
            .iter()
            .flat_map(|country| country.genres.iter().map(|genre| genre.genre.as_str()))
            .collect();
        let users = dataset
            .iter()
            .flat_map(|country| country.genres.iter())
            .flat_map(|genre| genre.users.iter());

        let (user_count, watch_items) = users.fold((0, 0), |(count, items), user| {
            (count + 1, items + user.watch_history.len())
        });

        DatasetSummary {
            countries: dataset.len(),
            genres: genres.len(),
            users: user_count,
            watch_items,
        }
    }
}
