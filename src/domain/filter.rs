//! Filter/group engine
//!
//! Pure functions over a borrowed dataset. Nothing here mutates its inputs:
//! rows borrow from the dataset, sets are read-only and `toggle` returns a
//! fresh set.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use itertools::Itertools;

use crate::domain::entities::{CountryData, GenreGroup, GroupBy, User, ViewRow};

/// Lowercased search term, so the predicate folds case only once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(term: &str) -> Self {
        Self(term.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring test. The empty term matches everything.
    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }

    /// The user match predicate: name or email contains the term.
    pub fn matches_user(&self, user: &User) -> bool {
        self.matches(&user.name) || self.matches(&user.email)
    }
}

/// Empty selection means "no filter".
fn admits(selected: &HashSet<String>, name: &str) -> bool {
    selected.is_empty() || selected.contains(name)
}

/// Convenience wrapper around [`SearchTerm::matches_user`].
pub fn user_matches(user: &User, search_term: &str) -> bool {
    SearchTerm::new(search_term).matches_user(user)
}

fn country_matches(
    country: &CountryData,
    term: &SearchTerm,
    selected_genres: &HashSet<String>,
) -> bool {
    term.matches(&country.country)
        || country.genres.iter().any(|genre| {
            admits(selected_genres, &genre.genre)
                && (term.matches(&genre.genre)
                    || genre.users.iter().any(|user| term.matches_user(user)))
        })
}

/// Compute the top-level rows for the given view state.
///
/// `GroupBy::Country` returns matching countries untouched: `selected_genres`
/// decides whether a country is included but never trims its genre list.
/// `GroupBy::Genre` merges same-named genres of the admitted countries in
/// first-seen order, then filters the merged groups.
pub fn compute_view<'a>(
    dataset: &'a [CountryData],
    group_by: GroupBy,
    search_term: &str,
    selected_countries: &HashSet<String>,
    selected_genres: &HashSet<String>,
) -> Vec<ViewRow<'a>> {
    let term = SearchTerm::new(search_term);

    match group_by {
        GroupBy::Country => dataset
            .iter()
            .filter(|country| {
                admits(selected_countries, &country.country)
                    && country_matches(country, &term, selected_genres)
            })
            .map(ViewRow::Country)
            .collect(),
        GroupBy::Genre => merge_genres(dataset, selected_countries)
            .into_iter()
            .filter(|group| {
                admits(selected_genres, group.genre)
                    && (term.matches(group.genre)
                        || group.users.iter().any(|user| term.matches_user(user)))
            })
            .map(ViewRow::Genre)
            .collect(),
    }
}

/// Merge genres by exact name across the admitted countries.
///
/// Users are concatenated in country order, then per-country order.
pub fn merge_genres<'a>(
    dataset: &'a [CountryData],
    selected_countries: &HashSet<String>,
) -> Vec<GenreGroup<'a>> {
    let mut groups: Vec<GenreGroup<'a>> = Vec::new();
    let mut positions: HashMap<&'a str, usize> = HashMap::new();

    for country in dataset
        .iter()
        .filter(|country| admits(selected_countries, &country.country))
    {
        for genre in &country.genres {
            match positions.get(genre.genre.as_str()) {
                Some(&idx) => groups[idx].users.extend(genre.users.iter()),
                None => {
                    positions.insert(&genre.genre, groups.len());
                    groups.push(GenreGroup {
                        genre: &genre.genre,
                        users: genre.users.iter().collect(),
                    });
                }
            }
        }
    }
    groups
}

/// Distinct country names, sorted ascending by code point.
pub fn list_countries(dataset: &[CountryData]) -> Vec<String> {
    dataset
        .iter()
        .map(|country| country.country.as_str())
        .sorted()
        .dedup()
        .map(str::to_string)
        .collect()
}

/// Distinct genre names across all countries, sorted ascending by code point.
pub fn list_genres(dataset: &[CountryData]) -> Vec<String> {
    dataset
        .iter()
        .flat_map(|country| country.genres.iter().map(|genre| genre.genre.as_str()))
        .sorted()
        .dedup()
        .map(str::to_string)
        .collect()
}

/// Return a new set with `item`'s membership flipped.
pub fn toggle<T>(set: &HashSet<T>, item: &T) -> HashSet<T>
where
    T: Eq + Hash + Clone,
{
    let mut next = set.clone();
    if !next.remove(item) {
        next.insert(item.clone());
    }
    next
}

/// Flatten the users of already-filtered rows, keeping those matching the term.
///
/// Used for the flat "active search" display. Applies the same predicate as
/// [`compute_view`].
pub fn matching_users<'a>(rows: &[ViewRow<'a>], search_term: &str) -> Vec<&'a User> {
    let term = SearchTerm::new(search_term);
    rows.iter()
        .flat_map(|row| row.users())
        .filter(|user| term.matches_user(user))
        .collect()
}
