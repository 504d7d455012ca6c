//! watchtree: search, filter and group a countries → genres → users dataset
//!
//! The filter/group engine lives in [`domain::filter`] and is pure: it borrows
//! the dataset and returns derived rows. The other layers load the JSON
//! document, hold settings and render the engine's output for the terminal.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{
    compute_view, list_countries, list_genres, matching_users, toggle, CountryData, Dataset,
    Genre, GroupBy, User, ViewRow, ViewState, WatchHistoryItem,
};
