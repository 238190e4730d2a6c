//! Catalog service - identity resolution, slug assignment and paged queries.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{CatalogError, ValidationErrors};
use crate::identifier::MovieIdentifier;
use crate::metrics::{
    LIST_QUERIES, MOVIES_CREATED, QUERY_REJECTIONS, SLUG_COLLISIONS, STORE_ERRORS,
};
use crate::movie::{Movie, MovieStore, MovieUpdate, NewMovie, StoreError};
use crate::pagination::{PageLimits, PageMeta};
use crate::query::{build_query, MatchMode, MovieQuery, RawMovieQuery};
use crate::slug::{fallback_slug, resolve_unique, slugify};

use super::types::MoviePage;

/// The movie catalog service.
///
/// Sits between the HTTP layer and the movie store: resolves id-or-slug
/// tokens, assigns slugs at creation time and turns raw query parameters
/// into deterministic paged reads.
pub struct CatalogService {
    store: Arc<dyn MovieStore>,
    limits: PageLimits,
    match_mode: MatchMode,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(store: Arc<dyn MovieStore>, limits: PageLimits, match_mode: MatchMode) -> Self {
        Self {
            store,
            limits,
            match_mode,
        }
    }

    /// The pagination limits this service applies.
    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    /// List movies for raw query parameters.
    ///
    /// Pagination metadata is computed from the total counted in this call.
    /// When rows move between the count and the fetch, the metadata follows
    /// the count, not the fetched rows.
    pub fn list(&self, raw: &RawMovieQuery) -> Result<MoviePage, CatalogError> {
        LIST_QUERIES.inc();

        let built = match build_query(raw, &self.limits, self.match_mode) {
            Ok(built) => built,
            Err(errors) => {
                QUERY_REJECTIONS.inc();
                return Err(errors.into());
            }
        };

        let total = track("count", self.store.count_matching(&built.query))?;
        let movies = track("fetch", self.store.fetch_page(&built.query))?;

        let pagination = PageMeta::compute(built.page, built.query.limit, total, &self.limits);

        Ok(MoviePage { movies, pagination })
    }

    /// Get one movie by numeric id or slug, recording the view.
    ///
    /// A failed view write is logged and swallowed; a read never fails
    /// because the counter could not be bumped.
    pub fn get(&self, token: &str) -> Result<Movie, CatalogError> {
        let mut movie = self.lookup(token)?;

        match track("view", self.store.record_view(movie.id)) {
            Ok(count) => movie.view_count = count,
            Err(e) => {
                warn!("Failed to record view for movie {}: {}", movie.id, e);
            }
        }

        Ok(movie)
    }

    /// Create a movie, assigning it a unique slug derived from the title.
    ///
    /// If another writer claims the resolved slug first, the slug is
    /// regenerated and the insert retried once; a second conflict surfaces
    /// as Duplicate.
    pub fn create(&self, movie: NewMovie) -> Result<Movie, CatalogError> {
        let title = movie.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationErrors::single("title", "must not be empty").into());
        }
        let movie = NewMovie { title, ..movie };

        let base = slugify(&movie.title);
        let base = if base.is_empty() {
            // nothing sluggable in the title
            fallback_slug(None)
        } else {
            base
        };

        let slug = resolve_unique(&base, |candidate| self.store.exists_by_slug(candidate))?;

        match track("insert", self.store.insert(&movie, &slug)) {
            Ok(created) => {
                MOVIES_CREATED.inc();
                info!("Created movie {} with slug '{}'", created.id, created.slug);
                Ok(created)
            }
            Err(StoreError::Conflict(_)) => {
                SLUG_COLLISIONS.inc();
                warn!("Slug '{}' was claimed concurrently, regenerating", slug);

                let slug = resolve_unique(&base, |candidate| self.store.exists_by_slug(candidate))?;
                match track("insert", self.store.insert(&movie, &slug)) {
                    Ok(created) => {
                        MOVIES_CREATED.inc();
                        info!("Created movie {} with slug '{}'", created.id, created.slug);
                        Ok(created)
                    }
                    Err(StoreError::Conflict(_)) => Err(CatalogError::Duplicate(slug)),
                    Err(e) => Err(e.into()),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply a partial update.
    ///
    /// Absent fields keep their values. The slug never changes, even when
    /// the title does.
    pub fn update(&self, token: &str, update: &MovieUpdate) -> Result<Movie, CatalogError> {
        let movie = self.lookup(token)?;
        if update.is_empty() {
            return Ok(movie);
        }

        let updated = track("update", self.store.update(movie.id, update))?;
        info!("Updated movie {}", updated.id);
        Ok(updated)
    }

    /// Delete a movie, returning the removed record.
    pub fn delete(&self, token: &str) -> Result<Movie, CatalogError> {
        let movie = self.lookup(token)?;
        let deleted = track("delete", self.store.delete(movie.id))?;
        info!("Deleted movie {} ('{}')", deleted.id, deleted.slug);
        Ok(deleted)
    }

    /// Total number of movies in the catalog.
    pub fn total_movies(&self) -> Result<u64, CatalogError> {
        let total = track("count", self.store.count_matching(&MovieQuery::unfiltered(1)))?;
        Ok(total)
    }

    /// Resolve an id-or-slug token without recording a view.
    fn lookup(&self, token: &str) -> Result<Movie, CatalogError> {
        let found = match MovieIdentifier::classify(token) {
            MovieIdentifier::Id(id) => track("fetch", self.store.fetch_by_id(id))?,
            MovieIdentifier::Slug(slug) => track("fetch", self.store.fetch_by_slug(&slug))?,
            // malformed tokens cannot name anything
            MovieIdentifier::Invalid => None,
        };
        found.ok_or_else(|| CatalogError::NotFound(token.to_string()))
    }
}

fn track<T>(operation: &str, result: Result<T, StoreError>) -> Result<T, StoreError> {
    if result.is_err() {
        STORE_ERRORS.with_label_values(&[operation]).inc();
    }
    result
}
