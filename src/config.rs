//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/watchtree/watchtree.toml`
//! 3. Local config: `./.watchtree.toml` (working directory)
//! 4. Environment variables: `WATCHTREE_*` prefix

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::GroupBy;
use crate::util::path::expand_env_vars;

/// Filter selections applied before any command-line toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FilterConfig {
    /// Countries selected on startup (empty = all)
    pub countries: Vec<String>,
    /// Genres selected on startup (empty = all)
    pub genres: Vec<String>,
}

/// Raw filter config for intermediate parsing (arrays are Option to detect "not specified").
///
/// Used during layered config merging to distinguish between:
/// - `None` → field not specified, inherit from base
/// - `Some([])` → explicit empty array
/// - `Some([...])` → explicit values to merge
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawFilterConfig {
    pub countries: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
}

/// How expanded nodes are shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Expand every row of a view
    pub expand_all: bool,
    /// Show watch-history items under expanded users
    pub show_watch_history: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            expand_all: false,
            show_watch_history: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplayConfig {
    pub expand_all: Option<bool>,
    pub show_watch_history: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub group_by: Option<GroupBy>,
    pub filters: RawFilterConfig,
    pub display: RawDisplayConfig,
}

impl FilterConfig {
    /// Merge arrays with union semantics and negation support.
    ///
    /// - Items from overlay are added to base
    /// - Items prefixed with `!` remove the corresponding item from the result
    /// - Duplicates are de-duplicated
    ///
    /// # Examples
    /// ```ignore
    /// merge_array(&["a", "b"], &["c"])       // → ["a", "b", "c"]
    /// merge_array(&["a", "b"], &["!a", "c"]) // → ["b", "c"]
    /// ```
    pub fn merge_array(base: &[String], overlay: &[String]) -> Vec<String> {
        let mut result: HashSet<String> = base.iter().cloned().collect();

        for item in overlay {
            if let Some(negated) = item.strip_prefix('!') {
                result.remove(negated);
            } else {
                result.insert(item.clone());
            }
        }

        // Convert to sorted Vec for deterministic output
        let mut vec: Vec<String> = result.into_iter().collect();
        vec.sort();
        vec
    }

    /// Merge overlay onto self (base) with union semantics.
    pub fn merge(&self, overlay: &RawFilterConfig) -> Self {
        Self {
            countries: overlay
                .countries
                .as_ref()
                .map(|o| Self::merge_array(&self.countries, o))
                .unwrap_or_else(|| self.countries.clone()),
            genres: overlay
                .genres
                .as_ref()
                .map(|o| Self::merge_array(&self.genres, o))
                .unwrap_or_else(|| self.genres.clone()),
        }
    }

    /// Apply global config onto defaults.
    ///
    /// Arrays given in the global file replace the defaults entirely.
    pub fn apply_global(&self, global: &RawFilterConfig) -> Self {
        Self {
            countries: global
                .countries
                .clone()
                .unwrap_or_else(|| self.countries.clone()),
            genres: global.genres.clone().unwrap_or_else(|| self.genres.clone()),
        }
    }
}

impl DisplayConfig {
    fn overlay(&self, raw: &RawDisplayConfig) -> Self {
        Self {
            expand_all: raw.expand_all.unwrap_or(self.expand_all),
            show_watch_history: raw.show_watch_history.unwrap_or(self.show_watch_history),
        }
    }
}

/// Unified configuration for watchtree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// JSON dataset to load
    pub data_file: Option<PathBuf>,
    /// Default grouping mode
    pub group_by: GroupBy,
    /// Preset filter selections
    pub filters: FilterConfig,
    /// Display options
    pub display: DisplayConfig,
}

/// Get the XDG config directory for watchtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "watchtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("watchtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".watchtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in `data_file`.
    fn expand_paths(&mut self) {
        if let Some(data_file) = &self.data_file {
            let expanded = expand_env_vars(data_file.to_string_lossy().as_ref());
            self.data_file = Some(PathBuf::from(expanded));
        }
    }

    /// Merge overlay config onto self (base) with union semantics for arrays.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay.data_file.clone().or_else(|| self.data_file.clone()),
            group_by: overlay.group_by.unwrap_or(self.group_by),
            filters: self.filters.merge(&overlay.filters),
            display: self.display.overlay(&overlay.display),
        }
    }

    /// Apply global config onto defaults with REPLACE semantics for arrays.
    fn apply_global(&self, global: &RawSettings) -> Self {
        Self {
            data_file: global.data_file.clone().or_else(|| self.data_file.clone()),
            group_by: global.group_by.unwrap_or(self.group_by),
            filters: self.filters.apply_global(&global.filters),
            display: self.display.overlay(&global.display),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.watchtree.toml` (usually cwd)
    ///
    /// # Array Merge Semantics
    /// - Defaults → Global: REPLACE
    /// - Global → Local: UNION with `!item` negation
    /// - Any → Env vars: REPLACE
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Same as [`Settings::load`] with an explicit global config location.
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_path {
            if global_path.exists() {
                let raw = load_raw_settings(global_path)?;
                current = current.apply_global(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply WATCHTREE_* environment variables as explicit overrides.
    ///
    /// `WATCHTREE_GROUP_BY`, `WATCHTREE_FILTERS__COUNTRIES=France,Spain`,
    /// `WATCHTREE_DISPLAY__EXPAND_ALL=true`. A variable that is set but does
    /// not parse is a config error.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("WATCHTREE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("filters.countries")
                .with_list_parse_key("filters.genres")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Some(val) = env_value::<String>(&config, "data_file")? {
            settings.data_file = Some(PathBuf::from(val));
        }
        if let Some(val) = env_value::<GroupBy>(&config, "group_by")? {
            settings.group_by = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "filters.countries")? {
            settings.filters.countries = val;
        }
        if let Some(val) = env_value::<Vec<String>>(&config, "filters.genres")? {
            settings.filters.genres = val;
        }
        if let Some(val) = env_value::<bool>(&config, "display.expand_all")? {
            settings.display.expand_all = val;
        }
        if let Some(val) = env_value::<bool>(&config, "display.show_watch_history")? {
            settings.display.show_watch_history = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# watchtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/watchtree/watchtree.toml  (defines your baseline)
#   Local:  ./.watchtree.toml                   (per-directory additions)
#   Env:    WATCHTREE_* environment variables  (explicit overrides)
#           nested keys use "__", lists use ",":
#             WATCHTREE_GROUP_BY=genre
#             WATCHTREE_FILTERS__COUNTRIES=France,Spain
#
# Array Merge Semantics:
#   Global config REPLACES compiled defaults.
#   Local config UNIONS with global.
#   Use "!item" in local config to REMOVE an inherited item:
#     countries = ["Spain", "!France"]

# JSON dataset to browse
# data_file = "~/data/netflix_users_data.json"

# Top-level grouping: "country" or "genre"
# group_by = "country"

[filters]
# Countries selected on startup (empty = all)
# countries = ["France"]

# Genres selected on startup (empty = all)
# genres = ["Drama"]

[display]
# Expand every row
# expand_all = false

# Show watch history under expanded users
# show_watch_history = true
"#
        .to_string()
    }
}

/// `Ok(None)` when the key is unset; parse failures are errors.
fn env_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("environment override {key}: {e}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
