//! SQLite-backed movie store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::query::{MatchMode, MovieFilter, MovieQuery};

use super::store::{MovieStore, StoreError};
use super::types::{Movie, MovieUpdate, NewMovie};

// Shared column list so every SELECT decodes through row_to_movie.
const MOVIE_COLUMNS: &str = "id, slug, title, overview, release_year, duration_minutes, rating, \
     director, genre, cast_list, poster_url, trailer_url, view_count, created_at, updated_at";

/// SQLite-backed movie store.
pub struct SqliteMovieStore {
    conn: Mutex<Connection>,
}

impl SqliteMovieStore {
    /// Open a store at the given path, creating the database file and
    /// tables if needed.
    pub fn new(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(map_db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(map_db_err)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS movies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                slug TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL,
                overview TEXT,
                release_year INTEGER,
                duration_minutes INTEGER,
                rating REAL,
                director TEXT,
                genre TEXT,
                cast_list TEXT NOT NULL DEFAULT '[]',
                poster_url TEXT,
                trailer_url TEXT,
                view_count INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_movies_created_at ON movies(created_at);
            CREATE INDEX IF NOT EXISTS idx_movies_release_year ON movies(release_year);
            CREATE INDEX IF NOT EXISTS idx_movies_director ON movies(director);
            CREATE INDEX IF NOT EXISTS idx_movies_genre ON movies(genre);
            "#,
        )
        .map_err(map_db_err)?;

        Ok(())
    }

    fn build_where_clause(
        filter: &MovieFilter,
        mode: MatchMode,
    ) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref genre) = filter.genre {
            match mode {
                MatchMode::Exact => {
                    conditions.push("genre = ?");
                    params.push(Box::new(genre.clone()));
                }
                MatchMode::Substring => {
                    conditions.push("genre LIKE ?");
                    params.push(Box::new(format!("%{}%", genre)));
                }
            }
        }

        if let Some(ref director) = filter.director {
            match mode {
                MatchMode::Exact => {
                    conditions.push("director = ?");
                    params.push(Box::new(director.clone()));
                }
                MatchMode::Substring => {
                    conditions.push("director LIKE ?");
                    params.push(Box::new(format!("%{}%", director)));
                }
            }
        }

        if let Some(year) = filter.year {
            conditions.push("release_year = ?");
            params.push(Box::new(year));
        }

        if let Some(ref search) = filter.search {
            // free-text search is always substring, regardless of mode
            conditions.push("(title LIKE ? OR director LIKE ? OR overview LIKE ?)");
            let pattern = format!("%{}%", search);
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        (where_clause, params)
    }

    fn row_to_movie(row: &rusqlite::Row) -> rusqlite::Result<Movie> {
        let id: i64 = row.get(0)?;
        let slug: String = row.get(1)?;
        let title: String = row.get(2)?;
        let overview: Option<String> = row.get(3)?;
        let release_year: Option<i32> = row.get(4)?;
        let duration_minutes: Option<u32> = row.get(5)?;
        let rating: Option<f64> = row.get(6)?;
        let director: Option<String> = row.get(7)?;
        let genre: Option<String> = row.get(8)?;
        let cast_json: Option<String> = row.get(9)?;
        let poster_url: Option<String> = row.get(10)?;
        let trailer_url: Option<String> = row.get(11)?;
        let view_count: i64 = row.get(12)?;
        let created_at_str: String = row.get(13)?;
        let updated_at_str: String = row.get(14)?;

        // Parse timestamps - use now as fallback if parsing fails (shouldn't
        // happen with data we wrote ourselves)
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        let cast: Vec<String> = cast_json
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();

        Ok(Movie {
            id,
            slug,
            title,
            overview,
            release_year,
            duration_minutes,
            rating,
            director,
            genre,
            cast,
            poster_url,
            trailer_url,
            view_count,
            created_at,
            updated_at,
        })
    }

    fn get_by_id(conn: &Connection, id: i64) -> Result<Movie, StoreError> {
        let sql = format!("SELECT {} FROM movies WHERE id = ?", MOVIE_COLUMNS);
        match conn.query_row(&sql, params![id], Self::row_to_movie) {
            Ok(movie) => Ok(movie),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound(id.to_string())),
            Err(e) => Err(map_db_err(e)),
        }
    }
}

impl MovieStore for SqliteMovieStore {
    fn insert(&self, movie: &NewMovie, slug: &str) -> Result<Movie, StoreError> {
        let conn = self.conn.lock().unwrap();

        let now = Utc::now();
        let cast_json = serde_json::to_string(&movie.cast)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        conn.execute(
            "INSERT INTO movies (slug, title, overview, release_year, duration_minutes, rating, \
             director, genre, cast_list, poster_url, trailer_url, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                slug,
                movie.title,
                movie.overview,
                movie.release_year,
                movie.duration_minutes,
                movie.rating,
                movie.director,
                movie.genre,
                cast_json,
                movie.poster_url,
                movie.trailer_url,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ],
        )
        .map_err(map_db_err)?;

        let id = conn.last_insert_rowid();

        Ok(Movie {
            id,
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
        })
    }

    fn fetch_by_id(&self, id: i64) -> Result<Option<Movie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let sql = format!("SELECT {} FROM movies WHERE id = ?", MOVIE_COLUMNS);
        match conn.query_row(&sql, params![id], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    fn fetch_by_slug(&self, slug: &str) -> Result<Option<Movie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let sql = format!("SELECT {} FROM movies WHERE slug = ?", MOVIE_COLUMNS);
        match conn.query_row(&sql, params![slug], Self::row_to_movie) {
            Ok(movie) => Ok(Some(movie)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    fn exists_by_slug(&self, slug: &str) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM movies WHERE slug = ?",
                params![slug],
                |row| row.get(0),
            )
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    fn count_matching(&self, query: &MovieQuery) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();

        let (where_clause, params) = Self::build_where_clause(&query.filter, query.match_mode);
        let sql = format!("SELECT COUNT(*) FROM movies {}", where_clause);

        let param_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let count: i64 = conn
            .query_row(&sql, param_refs.as_slice(), |row| row.get(0))
            .map_err(map_db_err)?;

        Ok(count as u64)
    }

    fn fetch_page(&self, query: &MovieQuery) -> Result<Vec<Movie>, StoreError> {
        let conn = self.conn.lock().unwrap();

        let (where_clause, params) = Self::build_where_clause(&query.filter, query.match_mode);

        // The id tiebreak makes the ordering total, so rows with equal sort
        // keys page deterministically.
        let sql = format!(
            "SELECT {} FROM movies {} ORDER BY {} {dir}, id {dir} LIMIT ? OFFSET ?",
            MOVIE_COLUMNS,
            where_clause,
            query.sort_field.column(),
            dir = query.sort_order.keyword(),
        );

        let mut stmt = conn.prepare(&sql).map_err(map_db_err)?;

        let mut all_params: Vec<Box<dyn rusqlite::ToSql>> = params;
        all_params.push(Box::new(i64::from(query.limit)));
        all_params.push(Box::new(query.offset as i64));

        let param_refs: Vec<&dyn rusqlite::ToSql> = all_params.iter().map(|p| p.as_ref()).collect();

        let rows = stmt
            .query_map(param_refs.as_slice(), Self::row_to_movie)
            .map_err(map_db_err)?;

        let mut movies = Vec::new();
        for row_result in rows {
            movies.push(row_result.map_err(map_db_err)?);
        }

        Ok(movies)
    }

    fn update(&self, id: i64, update: &MovieUpdate) -> Result<Movie, StoreError> {
        let conn = self.conn.lock().unwrap();

        let cast_json = update
            .cast
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let now = Utc::now();
        let affected = conn
            .execute(
                "UPDATE movies SET \
                 title = COALESCE(?, title), \
                 overview = COALESCE(?, overview), \
                 release_year = COALESCE(?, release_year), \
                 duration_minutes = COALESCE(?, duration_minutes), \
                 rating = COALESCE(?, rating), \
                 director = COALESCE(?, director), \
                 genre = COALESCE(?, genre), \
                 cast_list = COALESCE(?, cast_list), \
                 poster_url = COALESCE(?, poster_url), \
                 trailer_url = COALESCE(?, trailer_url), \
                 updated_at = ? \
                 WHERE id = ?",
                params![
                    update.title,
                    update.overview,
                    update.release_year,
                    update.duration_minutes,
                    update.rating,
                    update.director,
                    update.genre,
                    cast_json,
                    update.poster_url,
                    update.trailer_url,
                    now.to_rfc3339(),
                    id,
                ],
            )
            .map_err(map_db_err)?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        Self::get_by_id(&conn, id)
    }

    fn delete(&self, id: i64) -> Result<Movie, StoreError> {
        let conn = self.conn.lock().unwrap();

        // Fetch first so the removed record can be returned
        let movie = Self::get_by_id(&conn, id)?;

        conn.execute("DELETE FROM movies WHERE id = ?", params![id])
            .map_err(map_db_err)?;

        Ok(movie)
    }

    fn record_view(&self, id: i64) -> Result<i64, StoreError> {
        let conn = self.conn.lock().unwrap();

        let affected = conn
            .execute(
                "UPDATE movies SET view_count = view_count + 1 WHERE id = ?",
                params![id],
            )
            .map_err(map_db_err)?;

        if affected == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        let count: i64 = conn
            .query_row(
                "SELECT view_count FROM movies WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .map_err(map_db_err)?;

        Ok(count)
    }
}

fn map_db_err(e: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(failure, ref message) = e {
        match failure.code {
            rusqlite::ErrorCode::ConstraintViolation => {
                return StoreError::Conflict(
                    message.clone().unwrap_or_else(|| "unique constraint".to_string()),
                );
            }
            rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                return StoreError::Busy(e.to_string());
            }
            _ => {}
        }
    }
    StoreError::Database(e.to_string())
}
