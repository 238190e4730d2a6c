//! Testing utilities and mock implementations.
//!
//! This module provides a mock movie store plus fixture builders, allowing
//! service and API tests to run without a real database.
//!
//! # Example
//!
//! ```rust,ignore
//! use marquee_core::testing::{fixtures, MockMovieStore};
//!
//! let store = MockMovieStore::new();
//! store.push(fixtures::movie(1, "Inception", "inception"));
//!
//! // Simulate rows changing underneath a paged read
//! store.set_scripted_count(95);
//! ```

mod mock_store;

pub use mock_store::MockMovieStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{TimeZone, Utc};

    use crate::movie::{Movie, NewMovie};

    /// Create a movie row with stable timestamps, spaced one minute apart by id.
    pub fn movie(id: i64, title: &str, slug: &str) -> Movie {
        let at =
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + chrono::Duration::minutes(id);
        Movie {
            id,
            slug: slug.to_string(),
            title: title.to_string(),
            overview: Some(format!("{} overview.", title)),
            release_year: Some(2010),
            duration_minutes: Some(120),
            rating: Some(7.0),
            director: Some("Jane Doe".to_string()),
            genre: Some("drama".to_string()),
            cast: vec!["Actor One".to_string()],
            poster_url: None,
            trailer_url: None,
            view_count: 0,
            created_at: at,
            updated_at: at,
        }
    }

    /// Create a creation payload with only the title set.
    pub fn new_movie(title: &str) -> NewMovie {
        NewMovie::with_title(title)
    }
}
