//! Tests for ViewState transitions

use watchtree::domain::{GroupBy, ViewRow, ViewState};
use watchtree::util::testing::sample_dataset;

#[test]
fn given_new_state_when_created_then_groups_by_country_without_filters() {
    let state = ViewState::new();

    assert_eq!(state.group_by, GroupBy::Country);
    assert!(!state.is_searching());
    assert!(state.selected_countries.is_empty());
    assert!(state.selected_genres.is_empty());
    assert!(state.expanded_items.is_empty());
}

#[test]
fn given_snapshot_when_toggling_then_snapshot_keeps_previous_sets() {
    // Arrange
    let mut state = ViewState::new();
    state.toggle_country("France");
    let snapshot = state.clone();

    // Act
    state.toggle_country("Spain");
    state.toggle_genre("Drama");
    state.toggle_expanded("France");

    // Assert
    assert_eq!(snapshot.selected_countries.len(), 1);
    assert!(snapshot.selected_genres.is_empty());
    assert!(!snapshot.is_expanded("France"));
    assert_eq!(state.selected_countries.len(), 2);
    assert!(state.is_expanded("France"));
}

#[test]
fn given_expanded_key_when_toggled_again_then_collapses() {
    let mut state = ViewState::new();

    state.toggle_expanded("ana@example.fr");
    assert!(state.is_expanded("ana@example.fr"));

    state.toggle_expanded("ana@example.fr");
    assert!(!state.is_expanded("ana@example.fr"));
}

#[test]
fn given_filters_when_resetting_then_clears_search_and_selections_only() {
    // Arrange
    let mut state = ViewState::new();
    state.set_group_by(GroupBy::Genre);
    state.set_search_term("ana");
    state.toggle_country("France");
    state.toggle_genre("Drama");
    state.toggle_expanded("Drama");

    // Act
    state.reset_filters();

    // Assert
    assert_eq!(state.group_by, GroupBy::Genre);
    assert!(!state.is_searching());
    assert!(state.selected_countries.is_empty());
    assert!(state.selected_genres.is_empty());
    assert!(state.is_expanded("Drama"));
}

#[test]
fn given_state_when_computing_then_uses_its_own_fields() {
    // Arrange
    let dataset = sample_dataset();
    let mut state = ViewState::new();
    state.set_group_by(GroupBy::Genre);
    state.toggle_country("Spain");

    // Act
    let rows = state.compute(&dataset);

    // Assert
    let keys: Vec<&str> = rows.iter().map(ViewRow::key).collect();
    assert_eq!(keys, vec!["Drama", "Horror"]);
}

#[test]
fn given_search_term_when_projecting_then_returns_matching_users() {
    // Arrange
    let dataset = sample_dataset();
    let mut state = ViewState::new();
    state.set_search_term("SVETLANA");

    // Act
    let rows = state.compute(&dataset);
    let users = state.matching_users(&rows);

    // Assert
    assert!(state.is_searching());
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "svetlana@x.com");
}
