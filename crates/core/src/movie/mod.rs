//! Movie records and their storage.

mod sqlite;
mod store;
mod types;

pub use sqlite::SqliteMovieStore;
pub use store::{MovieStore, StoreError};
pub use types::{Movie, MovieUpdate, NewMovie};
