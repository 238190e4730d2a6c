//! Types for the movie catalog service.

use serde::Serialize;

use crate::movie::Movie;
use crate::pagination::PageMeta;

/// One page of catalog results plus the metadata describing it.
#[derive(Debug, Clone, Serialize)]
pub struct MoviePage {
    /// Movies on this page, in query order.
    pub movies: Vec<Movie>,
    /// Pagination metadata computed from the matching total.
    pub pagination: PageMeta,
}
