//! Movie catalog - the service layer over the movie store.
//!
//! The catalog owns the rules the store does not: how titles become slugs,
//! how id-or-slug tokens resolve, and how raw query parameters turn into
//! deterministic paged reads.

mod service;
mod types;

pub use service::CatalogService;
pub use types::MoviePage;
