//! Plain-text rendering of engine output
//!
//! Produces strings and `termtree` trees only; printing is up to the caller.

use std::collections::HashSet;

use termtree::Tree;

use crate::domain::{Genre, GroupBy, User, ViewRow, WatchHistoryItem};

const EXPANDED: &str = "▼";
const COLLAPSED: &str = "▶";

/// Options that change what expanded nodes reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_watch_history: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_watch_history: true,
        }
    }
}

fn marker(expanded: &HashSet<String>, key: &str) -> &'static str {
    if expanded.contains(key) {
        EXPANDED
    } else {
        COLLAPSED
    }
}

/// Render grouped rows as a tree; only expanded nodes show their children.
pub fn render_rows(
    rows: &[ViewRow<'_>],
    group_by: GroupBy,
    expanded: &HashSet<String>,
    options: RenderOptions,
) -> Tree<String> {
    let root = format!("{} ({})", group_by.heading(), rows.len());

    let leaves: Vec<Tree<String>> = rows
        .iter()
        .map(|row| {
            let key = row.key();
            let mut node = Tree::new(format!(
                "{}  {} {}",
                key,
                marker(expanded, key),
                row.child_label()
            ));
            if expanded.contains(key) {
                match row {
                    ViewRow::Country(country) => {
                        for genre in &country.genres {
                            node.push(genre_node(genre, expanded, options));
                        }
                    }
                    ViewRow::Genre(group) => {
                        for user in &group.users {
                            node.push(user_node(user, expanded, options));
                        }
                    }
                }
            }
            node
        })
        .collect();

    Tree::new(root).with_leaves(leaves)
}

fn genre_node(genre: &Genre, expanded: &HashSet<String>, options: RenderOptions) -> Tree<String> {
    let mut node = Tree::new(format!(
        "{}  {} {} users",
        genre.genre,
        marker(expanded, &genre.genre),
        genre.users.len()
    ));
    if expanded.contains(&genre.genre) {
        for user in &genre.users {
            node.push(user_node(user, expanded, options));
        }
    }
    node
}

fn user_node(user: &User, expanded: &HashSet<String>, options: RenderOptions) -> Tree<String> {
    let mut node = Tree::new(format!(
        "{} <{}>  {} {} items",
        user.name,
        user.email,
        marker(expanded, &user.email),
        user.watch_history.len()
    ));
    if options.show_watch_history && expanded.contains(&user.email) {
        for item in &user.watch_history {
            node.push(Tree::new(watch_item_label(item)));
        }
    }
    node
}

fn watch_item_label(item: &WatchHistoryItem) -> String {
    format!("{} ({})", item.title, item.watched_date)
}

/// Render the flat user table shown while a search is active.
pub fn render_users(users: &[&User], expanded: &HashSet<String>, options: RenderOptions) -> String {
    if users.is_empty() {
        return "No matching users".to_string();
    }

    let header = [
        "Name",
        "Email",
        "Birthdate",
        "Subscription Date",
        "Watch History",
    ];
    let rows: Vec<[String; 5]> = users
        .iter()
        .map(|user| {
            [
                user.name.clone(),
                user.email.clone(),
                user.birthdate.clone(),
                user.subscription_date.clone(),
                format!(
                    "{} {} items",
                    marker(expanded, &user.email),
                    user.watch_history.len()
                ),
            ]
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![format_line(&header[..])];
    for (user, row) in users.iter().zip(rows.iter()) {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        lines.push(format_line(&cells[..]));
        if options.show_watch_history && expanded.contains(&user.email) {
            for item in &user.watch_history {
                lines.push(format!("    {}", watch_item_label(item)));
            }
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_key_in_set_when_marking_then_uses_expanded_glyph() {
        let expanded: HashSet<String> = ["France".to_string()].into();
        assert_eq!(marker(&expanded, "France"), EXPANDED);
        assert_eq!(marker(&expanded, "Spain"), COLLAPSED);
    }
}
