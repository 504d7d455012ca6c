//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem) but are themselves
//! concrete structs, not traits.

mod browse;
mod dataset;

pub use browse::{BrowseResult, BrowseService};
pub use dataset::{DatasetService, DatasetSummary};
