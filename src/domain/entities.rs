//! Domain entities: the watch-history dataset tree

use serde::{Deserialize, Serialize};

/// One watched title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchHistoryItem {
    pub title: String,
    pub watched_date: String,
}

/// A subscriber and what they watched.
///
/// `email` is the identity key for expand/collapse state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub birthdate: String,
    pub subscription_date: String,
    pub watch_history: Vec<WatchHistoryItem>,
}

/// Users grouped under a genre name (unique within its country).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub genre: String,
    pub users: Vec<User>,
}

/// Top-level record of the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryData {
    pub country: String,
    pub genres: Vec<Genre>,
}

/// The whole document, read-only once loaded.
pub type Dataset = Vec<CountryData>;

/// Which entity forms the top-level rows of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Country,
    Genre,
}

impl GroupBy {
    /// Heading for the list of top-level rows.
    pub fn heading(&self) -> &'static str {
        match self {
            GroupBy::Country => "Countries",
            GroupBy::Genre => "Genres",
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Country => write!(f, "country"),
            GroupBy::Genre => write!(f, "genre"),
        }
    }
}

/// Genres of the same name merged across countries.
///
/// Borrows the name and users from the dataset it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreGroup<'a> {
    pub genre: &'a str,
    pub users: Vec<&'a User>,
}

/// One top-level row produced by the filter engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewRow<'a> {
    /// Country passed through untouched, with its full genre list.
    Country(&'a CountryData),
    /// Genre merged across the selected countries.
    Genre(GenreGroup<'a>),
}

impl<'a> ViewRow<'a> {
    /// Expansion key: country name or genre name.
    pub fn key(&self) -> &'a str {
        match self {
            ViewRow::Country(country) => &country.country,
            ViewRow::Genre(group) => group.genre,
        }
    }

    /// Number of direct children (genres of a country, users of a genre).
    pub fn child_count(&self) -> usize {
        match self {
            ViewRow::Country(country) => country.genres.len(),
            ViewRow::Genre(group) => group.users.len(),
        }
    }

    /// "3 genres" / "2 users"
    pub fn child_label(&self) -> String {
        match self {
            ViewRow::Country(country) => format!("{} genres", country.genres.len()),
            ViewRow::Genre(group) => format!("{} users", group.users.len()),
        }
    }

    /// Users below this row, in display order.
    pub fn users(&self) -> Vec<&'a User> {
        match self {
            ViewRow::Country(country) => country
                .genres
                .iter()
                .flat_map(|genre| genre.users.iter())
                .collect(),
            ViewRow::Genre(group) => group.users.clone(),
        }
    }
}
