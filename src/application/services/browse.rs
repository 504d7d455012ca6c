//! Browse service
//!
//! Drives the filter engine from a [`ViewState`] and decides between the
//! grouped tree and the flat search listing.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{list_countries, list_genres, Dataset, User, ViewRow, ViewState};

/// What a front end should render for the current view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseResult<'a> {
    /// No search term: top-level rows grouped by country or genre.
    Grouped(Vec<ViewRow<'a>>),
    /// Active search: users matching the term below the filtered rows.
    Search(Vec<&'a User>),
}

impl BrowseResult<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            BrowseResult::Grouped(rows) => rows.is_empty(),
            BrowseResult::Search(users) => users.is_empty(),
        }
    }
}

/// Service answering view queries against one loaded dataset.
pub struct BrowseService {
    dataset: Arc<Dataset>,
}

impl BrowseService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Sorted distinct country names (filter options).
    pub fn countries(&self) -> Vec<String> {
        list_countries(&self.dataset)
    }

    /// Sorted distinct genre names (filter options).
    pub fn genres(&self) -> Vec<String> {
        list_genres(&self.dataset)
    }

    /// Recompute the view for `state`.
    pub fn view(&self, state: &ViewState) -> BrowseResult<'_> {
        debug!(
            "view: group_by={}, search={:?}, countries={}, genres={}",
            state.group_by,
            state.search_term,
            state.selected_countries.len(),
            state.selected_genres.len()
        );
        self.warn_unknown_selections(state);

        let rows = state.compute(&self.dataset);
        if state.is_searching() {
            let users = state.matching_users(&rows);
            debug!("view: {} matching users", users.len());
            BrowseResult::Search(users)
        } else {
            debug!("view: {} rows", rows.len());
            BrowseResult::Grouped(rows)
        }
    }

    /// Every expansion key reachable from `result`.
    pub fn expandable_keys(result: &BrowseResult<'_>) -> HashSet<String> {
        let mut keys = HashSet::new();
        match result {
            BrowseResult::Grouped(rows) => {
                for row in rows {
                    keys.insert(row.key().to_string());
                    if let ViewRow::Country(country) = row {
                        keys.extend(country.genres.iter().map(|genre| genre.genre.clone()));
                    }
                    keys.extend(row.users().iter().map(|user| user.email.clone()));
                }
            }
            BrowseResult::Search(users) => {
                keys.extend(users.iter().map(|user| user.email.clone()));
            }
        }
        keys
    }

    /// Selections that name nothing in the dataset match nothing; say so.
    fn warn_unknown_selections(&self, state: &ViewState) {
        let known_countries = self.countries();
        for country in state
            .selected_countries
            .iter()
            .filter(|c| !known_countries.contains(c))
        {
            warn!("unknown country in filter: {}", country);
        }

        let known_genres = self.genres();
        for genre in state
            .selected_genres
            .iter()
            .filter(|g| !known_genres.contains(g))
        {
            warn!("unknown genre in filter: {}", genre);
        }
    }
}
