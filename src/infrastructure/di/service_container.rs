//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::services::{BrowseService, DatasetService};
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::util::path::expand_env_vars;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub dataset_service: DatasetService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let dataset_service = DatasetService::new(Arc::clone(&fs));

        Self {
            settings,
            fs,
            dataset_service,
        }
    }

    /// Data file to load: explicit override first, then settings.
    ///
    /// `~` and `$VAR` are expanded for the override the same way
    /// [`Settings`] expands `data_file` from config.
    pub fn data_file(&self, explicit: Option<&Path>) -> ApplicationResult<PathBuf> {
        explicit
            .map(|path| PathBuf::from(expand_env_vars(&path.to_string_lossy())))
            .or_else(|| self.settings.data_file.clone())
            .ok_or(ApplicationError::NoDataFile)
    }

    /// Load the dataset and wrap it in a browse service.
    pub fn browse_service(&self, explicit: Option<&Path>) -> ApplicationResult<BrowseService> {
        let path = self.data_file(explicit)?;
        let dataset = self.dataset_service.load(&path)?;
        Ok(BrowseService::new(Arc::new(dataset)))
    }
}
