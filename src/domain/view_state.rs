//! View state owned by a front end, fed into the filter engine
//!
//! Transitions swap in a new set built by [`toggle`] instead of editing the
//! current one, so a cloned snapshot keeps describing the earlier view.

use std::collections::HashSet;

use crate::domain::entities::{CountryData, GroupBy, User, ViewRow};
use crate::domain::filter::{compute_view, matching_users, toggle};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub group_by: GroupBy,
    pub search_term: String,
    pub selected_countries: HashSet<String>,
    pub selected_genres: HashSet<String>,
    /// Country names, genre names and user emails currently expanded.
    pub expanded_items: HashSet<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        self.group_by = group_by;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_country(&mut self, country: &str) {
        self.selected_countries = toggle(&self.selected_countries, &country.to_string());
    }

    pub fn toggle_genre(&mut self, genre: &str) {
        self.selected_genres = toggle(&self.selected_genres, &genre.to_string());
    }

    pub fn toggle_expanded(&mut self, key: &str) {
        self.expanded_items = toggle(&self.expanded_items, &key.to_string());
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded_items.contains(key)
    }

    /// Clear search and both selections. Grouping and expansion stay as they are.
    pub fn reset_filters(&mut self) {
        self.selected_countries = HashSet::new();
        self.selected_genres = HashSet::new();
        self.search_term = String::new();
    }

    /// A non-empty term switches the front end to the flat user listing.
    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    pub fn compute<'a>(&self, dataset: &'a [CountryData]) -> Vec<ViewRow<'a>> {
        compute_view(
            dataset,
            self.group_by,
            &self.search_term,
            &self.selected_countries,
            &self.selected_genres,
        )
    }

    pub fn matching_users<'a>(&self, rows: &[ViewRow<'a>]) -> Vec<&'a User> {
        matching_users(rows, &self.search_term)
    }
}
