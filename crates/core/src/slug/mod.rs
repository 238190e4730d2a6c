//! Slug identities for catalog records.
//!
//! A slug is derived from the movie title once, at creation time, and never
//! regenerated afterwards; renaming a movie does not move its URL. Collisions
//! are resolved by numeric suffix probing against the store.

mod generate;
mod resolve;

pub use generate::{fallback_slug, slugify, MAX_SLUG_LEN};
pub use resolve::resolve_unique;
