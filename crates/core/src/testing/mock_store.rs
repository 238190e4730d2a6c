//! Mock movie store for testing.

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};
use std::sync::Mutex;

use chrono::Utc;

use crate::movie::{Movie, MovieStore, MovieUpdate, NewMovie, StoreError};
use crate::query::{MatchMode, MovieFilter, MovieQuery, SortField, SortOrder};

/// Mock implementation of the MovieStore trait.
///
/// Provides controllable behavior for testing:
/// - In-memory rows with honest filter/sort/page semantics
/// - Scripted counts to simulate rows changing between count and fetch
/// - Slug races (a competing writer claims the slug at insert time)
/// - Error injection
///
/// # Example
///
/// ```rust,ignore
/// let store = MockMovieStore::new();
/// store.insert(&NewMovie::with_title("Heat"), "heat")?;
///
/// // Make count_matching disagree with the stored rows
/// store.set_scripted_count(95);
///
/// // Fail the next operation
/// store.set_next_error(StoreError::Busy("locked".into()));
/// ```
#[derive(Default)]
pub struct MockMovieStore {
    movies: Mutex<Vec<Movie>>,
    next_id: AtomicI64,
    /// If set, count_matching returns this instead of counting rows.
    scripted_count: Mutex<Option<u64>>,
    /// If set, the next operation fails with this error.
    next_error: Mutex<Option<StoreError>>,
    /// While positive, each insert loses its slug to a competing row.
    race_inserts: AtomicU32,
    /// If set, record_view keeps failing with a clone of this error.
    view_error: Mutex<Option<StoreError>>,
}

impl MockMovieStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the value count_matching returns, regardless of stored rows.
    pub fn set_scripted_count(&self, count: u64) {
        *self.scripted_count.lock().unwrap() = Some(count);
    }

    /// Go back to counting the stored rows.
    pub fn clear_scripted_count(&self) {
        *self.scripted_count.lock().unwrap() = None;
    }

    /// Configure the next operation to fail with the given error.
    pub fn set_next_error(&self, error: StoreError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Make the next `races` inserts lose their slug race: a competing row
    /// claims the slug first and the insert reports a conflict.
    pub fn set_race_inserts(&self, races: u32) {
        self.race_inserts.store(races, Ordering::SeqCst);
    }

    /// Make record_view fail persistently with the given error.
    pub fn set_view_error(&self, error: StoreError) {
        *self.view_error.lock().unwrap() = Some(error);
    }

    /// Number of stored movies.
    pub fn len(&self) -> usize {
        self.movies.lock().unwrap().len()
    }

    /// Whether the store holds no movies.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pre-populate a movie without going through insert.
    pub fn push(&self, movie: Movie) {
        let floor = movie.id + 1;
        self.next_id.fetch_max(floor, Ordering::SeqCst);
        self.movies.lock().unwrap().push(movie);
    }

    fn take_error(&self) -> Option<StoreError> {
        self.next_error.lock().unwrap().take()
    }

    fn matches(movie: &Movie, filter: &MovieFilter, mode: MatchMode) -> bool {
        if let Some(ref genre) = filter.genre {
            let hit = match (&movie.genre, mode) {
                (Some(value), MatchMode::Exact) => value == genre,
                (Some(value), MatchMode::Substring) => {
                    value.to_lowercase().contains(&genre.to_lowercase())
                }
                (None, _) => false,
            };
            if !hit {
                return false;
            }
        }

        if let Some(ref director) = filter.director {
            let hit = match (&movie.director, mode) {
                (Some(value), MatchMode::Exact) => value == director,
                (Some(value), MatchMode::Substring) => {
                    value.to_lowercase().contains(&director.to_lowercase())
                }
                (None, _) => false,
            };
            if !hit {
                return false;
            }
        }

        if let Some(year) = filter.year {
            if movie.release_year != Some(year) {
                return false;
            }
        }

        if let Some(ref search) = filter.search {
            let needle = search.to_lowercase();
            let hit = movie.title.to_lowercase().contains(&needle)
                || movie
                    .director
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
                || movie
                    .overview
                    .as_ref()
                    .is_some_and(|o| o.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        true
    }

    fn compare(a: &Movie, b: &Movie, field: SortField) -> CmpOrdering {
        match field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::ReleaseYear => a.release_year.cmp(&b.release_year),
            SortField::Rating => a
                .rating
                .partial_cmp(&b.rating)
                .unwrap_or(CmpOrdering::Equal),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::ViewCount => a.view_count.cmp(&b.view_count),
        }
    }
}

impl MovieStore for MockMovieStore {
    fn insert(&self, movie: &NewMovie, slug: &str) -> Result<Movie, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let mut movies = self.movies.lock().unwrap();

        if self
            .race_inserts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            // A competing writer claims this slug between the uniqueness
            // probe and the insert.
            let now = Utc::now();
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            movies.push(Movie {
                id,
                slug: slug.to_string(),
                title: format!("Competing entry {}", id),
                overview: None,
                release_year: None,
                duration_minutes: None,
                rating: None,
                director: None,
                genre: None,
                cast: Vec::new(),
                poster_url: None,
                trailer_url: None,
                view_count: 0,
                created_at: now,
                updated_at: now,
            });
            return Err(StoreError::Conflict(format!("slug '{}'", slug)));
        }

        if movies.iter().any(|m| m.slug == slug) {
            return Err(StoreError::Conflict(format!("slug '{}'", slug)));
        }

        let now = Utc::now();
        let created = Movie {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            slug: slug.to_string(),
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            release_year: movie.release_year,
            duration_minutes: movie.duration_minutes,
            rating: movie.rating,
            director: movie.director.clone(),
            genre: movie.genre.clone(),
            cast: movie.cast.clone(),
            poster_url: movie.poster_url.clone(),
            trailer_url: movie.trailer_url.clone(),
            view_count: 0,
            created_at: now,
            updated_at: now,
        };
        movies.push(created.clone());
        Ok(created)
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Movie>, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        Ok(self
            .movies
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.slug == slug)
            .cloned())
    }

    fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        Ok(self.movies.lock().unwrap().iter().any(|m| m.slug == slug))
    }

    fn count_matching(&self, query: &MovieQuery) -> Result<u64, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        if let Some(count) = *self.scripted_count.lock().unwrap() {
            return Ok(count);
        }

        let count = self
            .movies
            .lock()
            .unwrap()
            .iter()
            .filter(|m| Self::matches(m, &query.filter, query.match_mode))
            .count();
        Ok(count as u64)
    }

    fn fetch_page(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let movies = self.movies.lock().unwrap();
        let mut rows: Vec<Movie> = movies
            .iter()
            .filter(|m| Self::matches(m, &query.filter, query.match_mode))
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ord = Self::compare(a, b, query.sort_field).then(a.id.cmp(&b.id));
            match query.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        Ok(rows
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    fn update(&self, id: i64, update: &MovieUpdate) -> Result<Movie, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(ref title) = update.title {
            movie.title = title.clone();
        }
        if let Some(ref overview) = update.overview {
            movie.overview = Some(overview.clone());
        }
        if let Some(year) = update.release_year {
            movie.release_year = Some(year);
        }
        if let Some(minutes) = update.duration_minutes {
            movie.duration_minutes = Some(minutes);
        }
        if let Some(rating) = update.rating {
            movie.rating = Some(rating);
        }
        if let Some(ref director) = update.director {
            movie.director = Some(director.clone());
        }
        if let Some(ref genre) = update.genre {
            movie.genre = Some(genre.clone());
        }
        if let Some(ref cast) = update.cast {
            movie.cast = cast.clone();
        }
        if let Some(ref poster_url) = update.poster_url {
            movie.poster_url = Some(poster_url.clone());
        }
        if let Some(ref trailer_url) = update.trailer_url {
            movie.trailer_url = Some(trailer_url.clone());
        }
        movie.updated_at = Utc::now();

        Ok(movie.clone())
    }

    fn delete(&self, id: i64) -> Result<Movie, StoreError> {
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let mut movies = self.movies.lock().unwrap();
        let idx = movies
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Ok(movies.remove(idx))
    }

    fn record_view(&self, id: i64) -> Result<i64, StoreError> {
        if let Some(err) = self.view_error.lock().unwrap().clone() {
            return Err(err);
        }
        if let Some(err) = self.take_error() {
            return Err(err);
        }

        let mut movies = self.movies.lock().unwrap();
        let movie = movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        movie.view_count += 1;
        Ok(movie.view_count)
    }
}
