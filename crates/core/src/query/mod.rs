//! Listing queries: the raw wire form, the validated form, and the builder
//! between them.

mod builder;
mod types;

pub use builder::{build_query, BuiltQuery};
pub use types::{MatchMode, MovieFilter, MovieQuery, RawMovieQuery, SortField, SortOrder};
