//! Translation of raw wire parameters into a [`MovieQuery`].

use crate::error::ValidationErrors;
use crate::pagination::{normalize_per_page, offset_for, PageLimits};

use super::types::{MatchMode, MovieFilter, MovieQuery, RawMovieQuery, SortField, SortOrder};

/// A validated query plus the page number it was derived from.
///
/// The page is carried separately so listing code can recompute pagination
/// metadata once the true total is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub query: MovieQuery,
    pub page: u32,
}

/// Build a storage-ready query from raw wire parameters.
///
/// Most bad input degrades silently: unknown sort keys and directions fall
/// back to their defaults and an unparsable `year` filter is dropped.
/// Paging parameters are the exception. A `page`, `limit` or `offset` that
/// does not parse, a non-positive `page` or `limit`, or a negative `offset`
/// is collected as a field error and the whole query is rejected. Oversized
/// limits are not errors; they clamp to `max_per_page`.
pub fn build_query(
    raw: &RawMovieQuery,
    limits: &PageLimits,
    match_mode: MatchMode,
) -> Result<BuiltQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let limit = match raw.limit.as_deref() {
        None => limits.default_per_page,
        Some(text) => match text.trim().parse::<i64>() {
            Ok(value) if value >= 1 => {
                normalize_per_page(value.min(i64::from(u32::MAX)) as u32, limits)
            }
            _ => {
                errors.push("limit", "must be a positive integer");
                limits.default_per_page
            }
        },
    };

    let requested_page = match raw.page.as_deref() {
        None => 1,
        Some(text) => match text.trim().parse::<i64>() {
            Ok(value) if value >= 1 => value.min(i64::from(u32::MAX)) as u32,
            _ => {
                errors.push("page", "must be a positive integer");
                1
            }
        },
    };

    let explicit_offset = match raw.offset.as_deref() {
        None => None,
        Some(text) => match text.trim().parse::<i64>() {
            Ok(value) if value >= 0 => Some(value as u64),
            _ => {
                errors.push("offset", "must be a non-negative integer");
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // An explicit offset wins over the page parameter; the page reported in
    // metadata is then the one containing that offset, pinned to u32::MAX
    // when the offset lies past the addressable page range.
    let (page, offset) = match explicit_offset {
        Some(offset) => {
            let page = (offset / u64::from(limit))
                .saturating_add(1)
                .min(u64::from(u32::MAX)) as u32;
            (page, offset)
        }
        None => (requested_page, offset_for(requested_page, limit)),
    };

    let filter = MovieFilter {
        genre: clean(raw.genre.as_deref()),
        director: clean(raw.director.as_deref()),
        year: raw.year.as_deref().and_then(parse_year),
        search: clean(raw.search.as_deref()),
    };

    let query = MovieQuery {
        filter,
        sort_field: SortField::from_param(raw.sort_by.as_deref()),
        sort_order: SortOrder::from_param(raw.sort_order.as_deref()),
        match_mode,
        limit,
        offset,
    };

    Ok(BuiltQuery { query, page })
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Year filters that fail to parse are dropped, not rejected.
fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
