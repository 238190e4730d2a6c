//! Typed query model for catalog listings.

use serde::{Deserialize, Serialize};

/// Columns a listing may be ordered by.
///
/// This is a closed allow-list: anything outside it falls back to
/// `CreatedAt`. An unknown sort key is not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    ReleaseYear,
    Rating,
    #[default]
    CreatedAt,
    ViewCount,
}

impl SortField {
    /// Map a raw `sort_by` parameter onto the allow-list.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortField::Title,
            Some("release_year") => SortField::ReleaseYear,
            Some("rating") => SortField::Rating,
            Some("created_at") => SortField::CreatedAt,
            Some("view_count") => SortField::ViewCount,
            _ => SortField::CreatedAt,
        }
    }

    /// Column to order by. These are fixed strings, never client input.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::ReleaseYear => "release_year",
            SortField::Rating => "rating",
            SortField::CreatedAt => "created_at",
            SortField::ViewCount => "view_count",
        }
    }
}

/// Sort direction.
///
/// Only a case-insensitive `asc` ascends; every other value, including
/// absence, descends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// How genre and director filters match. A deployment-level choice, not a
/// per-request one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Exact equality.
    Exact,
    /// Case-insensitive substring containment.
    #[default]
    Substring,
}

/// Field filters for a listing. Present filters are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year: Option<i32>,
    /// Free-text needle matched against title, director and overview.
    pub search: Option<String>,
}

impl MovieFilter {
    pub fn is_empty(&self) -> bool {
        self.genre.is_none()
            && self.director.is_none()
            && self.year.is_none()
            && self.search.is_none()
    }
}

/// Fully validated listing query, ready for the storage layer.
///
/// Built by [`build_query`](super::build_query); by the time one of these
/// exists, every field has passed validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieQuery {
    pub filter: MovieFilter,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub match_mode: MatchMode,
    pub limit: u32,
    pub offset: u64,
}

impl MovieQuery {
    /// Unfiltered first page with the given size and default ordering.
    pub fn unfiltered(limit: u32) -> Self {
        Self {
            filter: MovieFilter::default(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            match_mode: MatchMode::default(),
            limit,
            offset: 0,
        }
    }
}

/// Raw listing parameters exactly as they arrived on the wire.
///
/// Every field is an unparsed string. Parsing happens in the builder so
/// that a malformed `page` becomes a collected field error instead of a
/// transport-level rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMovieQuery {
    pub genre: Option<String>,
    pub director: Option<String>,
    pub year: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}
