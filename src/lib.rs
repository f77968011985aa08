//! Interactive exploration of bikeshare trip data.
//!
//! A session asks for a city and optional month/day filters, loads the
//! city's CSV into a polars `DataFrame`, and prints time, station, trip
//! duration and user statistics before offering raw rows page by page.

pub mod error;
pub mod explorer;
pub mod filter;
pub mod prompt;
pub mod schema;
pub mod session;
pub mod stats;
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use error::ExploreError;
pub use explorer::TripExplorer;
pub use filter::{City, FilterSpec, Selection};
