//! Test support: one-time tracing setup and a small sample dataset

use std::collections::HashMap;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{CountryData, Dataset, Genre, User, WatchHistoryItem};
use crate::infrastructure::traits::FileSystem;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "debug");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_test_writer()
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// In-memory [`FileSystem`]: files only, directories always "exist".
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    pub fn with_file(path: impl Into<PathBuf>, content: &str) -> Self {
        let fs = Self::default();
        fs.lock().insert(path.into(), content.to_string());
        fs
    }

    pub fn contents(&self, path: &Path) -> Option<String> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, String>> {
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.lock().insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Build a user with one watch-history item.
pub fn user(name: &str, email: &str) -> User {
    User {
        name: name.to_string(),
        email: email.to_string(),
        birthdate: "1990-01-01".to_string(),
        subscription_date: "2020-06-15".to_string(),
        watch_history: vec![WatchHistoryItem {
            title: format!("{name}'s pick"),
            watched_date: "2023-03-01".to_string(),
        }],
    }
}

pub fn genre(name: &str, users: Vec<User>) -> Genre {
    Genre {
        genre: name.to_string(),
        users,
    }
}

pub fn country(name: &str, genres: Vec<Genre>) -> CountryData {
    CountryData {
        country: name.to_string(),
        genres,
    }
}

/// Three countries, Drama shared between two of them.
///
/// ```text
/// France  Drama  [Ana, Pierre]   Comedy [Luc]
/// Spain   Drama  [Carlos]        Horror [Sveta]
/// Brazil  Action [Joao]
/// ```
pub fn sample_dataset() -> Dataset {
    vec![
        country(
            "France",
            vec![
                genre(
                    "Drama",
                    vec![
                        user("Ana", "ana@example.fr"),
                        user("Pierre", "pierre@example.fr"),
                    ],
                ),
                genre("Comedy", vec![user("Luc", "luc@example.fr")]),
            ],
        ),
        country(
            "Spain",
            vec![
                genre("Drama", vec![user("Carlos", "carlos@example.es")]),
                genre("Horror", vec![user("Sveta", "svetlana@x.com")]),
            ],
        ),
        country(
            "Brazil",
            vec![genre("Action", vec![user("Joao", "joao@example.br")])],
        ),
    ]
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
    }

    #[test]
    fn test_sample_dataset_shape() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset[0].genres[0].users.len(), 2);
    }
}
