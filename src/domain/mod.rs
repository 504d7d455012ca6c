//! Domain layer: entities and the filter/group engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod filter;
pub mod view_state;

pub use entities::*;
pub use filter::{
    compute_view, list_countries, list_genres, matching_users, merge_genres, toggle,
    user_matches, SearchTerm,
};
pub use view_state::ViewState;
