//! Integration tests for the `WATCHTREE_*` environment layer of Settings.
//!
//! Env overrides REPLACE whatever the config files produced. Kept in their own
//! test binary and serialized on ENV_LOCK, because every `Settings::load_from`
//! in the process reads the environment.

use std::env;
use std::fs;
use std::sync::{Mutex, MutexGuard, OnceLock};

use tempfile::TempDir;

use watchtree::application::ApplicationError;
use watchtree::config::{local_config_path, Settings};
use watchtree::domain::GroupBy;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Sets variables for one test and removes them again on drop.
struct EnvVars {
    keys: Vec<&'static str>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvVars {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        let guard = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        for (key, value) in vars {
            env::set_var(key, value);
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
            _guard: guard,
        }
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[test]
fn given_env_group_by_when_load_then_replaces_default() {
    // Arrange
    let _env = EnvVars::set(&[("WATCHTREE_GROUP_BY", "genre")]);

    // Act
    let settings = Settings::load_from(None, None).expect("load settings");

    // Assert
    assert_eq!(settings.group_by, GroupBy::Genre);
}

#[test]
fn given_env_countries_when_load_then_replaces_local_union() {
    // Arrange: local config selects Brazil, env names France and Spain
    let local_dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(local_dir.path()),
        r#"
[filters]
countries = ["Brazil"]
"#,
    )
    .unwrap();
    let _env = EnvVars::set(&[("WATCHTREE_FILTERS__COUNTRIES", "France,Spain")]);

    // Act
    let settings = Settings::load_from(None, Some(local_dir.path())).expect("load settings");

    // Assert: replaced, not merged
    assert_eq!(settings.filters.countries, vec!["France", "Spain"]);
}

#[test]
fn given_env_display_flag_when_load_then_overrides_nested_key() {
    let _env = EnvVars::set(&[
        ("WATCHTREE_DISPLAY__EXPAND_ALL", "true"),
        ("WATCHTREE_DISPLAY__SHOW_WATCH_HISTORY", "false"),
    ]);

    let settings = Settings::load_from(None, None).expect("load settings");

    assert!(settings.display.expand_all);
    assert!(!settings.display.show_watch_history);
}

#[test]
fn given_invalid_env_group_by_when_load_then_returns_config_error() {
    // Arrange
    let _env = EnvVars::set(&[("WATCHTREE_GROUP_BY", "bogus")]);

    // Act
    let result = Settings::load_from(None, None);

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("group_by"), "got: {message}")
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_env_vars_removed_when_load_then_defaults_return() {
    {
        let _env = EnvVars::set(&[("WATCHTREE_GROUP_BY", "genre")]);
        assert_eq!(
            Settings::load_from(None, None).expect("load").group_by,
            GroupBy::Genre
        );
    }

    let _env = EnvVars::set(&[]);
    let settings = Settings::load_from(None, None).expect("load settings");

    assert_eq!(settings.group_by, GroupBy::Country);
}
