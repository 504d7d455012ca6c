//! Tests for terminal rendering of rows and search results

use std::collections::HashSet;

use watchtree::application::render::{render_rows, render_users, RenderOptions};
use watchtree::domain::{compute_view, GroupBy, User};
use watchtree::util::testing::sample_dataset;

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn given_collapsed_countries_when_rendering_then_shows_counts_only() {
    // Arrange
    let dataset = sample_dataset();
    let rows = compute_view(&dataset, GroupBy::Country, "", &set(&[]), &set(&[]));

    // Act
    let out = render_rows(&rows, GroupBy::Country, &set(&[]), RenderOptions::default()).to_string();

    // Assert
    assert!(out.starts_with("Countries (3)"), "got:\n{out}");
    assert!(out.contains("France  ▶ 2 genres"), "got:\n{out}");
    assert!(out.contains("Brazil  ▶ 1 genres"), "got:\n{out}");
    assert!(!out.contains("Drama"), "collapsed rows hide children:\n{out}");
}

#[test]
fn given_expanded_country_and_genre_when_rendering_then_shows_nested_users() {
    // Arrange
    let dataset = sample_dataset();
    let rows = compute_view(&dataset, GroupBy::Country, "", &set(&["France"]), &set(&[]));
    let expanded = set(&["France", "Drama"]);

    // Act
    let out = render_rows(&rows, GroupBy::Country, &expanded, RenderOptions::default()).to_string();

    // Assert
    assert!(out.contains("France  ▼ 2 genres"), "got:\n{out}");
    assert!(out.contains("Drama  ▼ 2 users"), "got:\n{out}");
    assert!(out.contains("Comedy  ▶ 1 users"), "got:\n{out}");
    assert!(out.contains("Ana <ana@example.fr>  ▶ 1 items"), "got:\n{out}");
    assert!(!out.contains("Luc"), "collapsed genre hides users:\n{out}");
}

#[test]
fn given_expanded_user_when_rendering_genres_then_lists_watch_history() {
    let dataset = sample_dataset();
    let rows = compute_view(&dataset, GroupBy::Genre, "", &set(&[]), &set(&[]));
    let expanded = set(&["Horror", "svetlana@x.com"]);

    let out = render_rows(&rows, GroupBy::Genre, &expanded, RenderOptions::default()).to_string();

    assert!(out.starts_with("Genres (4)"), "got:\n{out}");
    assert!(out.contains("Sveta <svetlana@x.com>  ▼ 1 items"), "got:\n{out}");
    assert!(out.contains("Sveta's pick (2023-03-01)"), "got:\n{out}");
}

#[test]
fn given_history_disabled_when_rendering_then_hides_watch_items() {
    let dataset = sample_dataset();
    let rows = compute_view(&dataset, GroupBy::Genre, "", &set(&[]), &set(&[]));
    let expanded = set(&["Horror", "svetlana@x.com"]);
    let options = RenderOptions {
        show_watch_history: false,
    };

    let out = render_rows(&rows, GroupBy::Genre, &expanded, options).to_string();

    assert!(out.contains("Sveta <svetlana@x.com>"), "got:\n{out}");
    assert!(!out.contains("Sveta's pick"), "got:\n{out}");
}

#[test]
fn given_no_users_when_rendering_search_then_says_no_matches() {
    let users: Vec<&User> = Vec::new();

    let out = render_users(&users, &set(&[]), RenderOptions::default());

    assert_eq!(out, "No matching users");
}

#[test]
fn given_users_when_rendering_search_then_aligns_columns() {
    // Arrange
    let dataset = sample_dataset();
    let users: Vec<&User> = vec![
        &dataset[0].genres[0].users[0],
        &dataset[1].genres[1].users[0],
    ];

    // Act
    let out = render_users(&users, &set(&[]), RenderOptions::default());

    // Assert
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Name   Email"), "got:\n{out}");
    assert!(lines[0].ends_with("Watch History"), "got:\n{out}");
    let email_col = lines[0].find("Email").unwrap();
    assert_eq!(lines[1].find("ana@example.fr"), Some(email_col));
    assert_eq!(lines[2].find("svetlana@x.com"), Some(email_col));
    assert!(lines[2].ends_with("▶ 1 items"), "got:\n{out}");
}

#[test]
fn given_expanded_user_when_rendering_search_then_appends_indented_history() {
    let dataset = sample_dataset();
    let users: Vec<&User> = vec![&dataset[0].genres[1].users[0]];

    let out = render_users(&users, &set(&["luc@example.fr"]), RenderOptions::default());

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with("▼ 1 items"), "got:\n{out}");
    assert_eq!(lines[2], "    Luc's pick (2023-03-01)");
}
