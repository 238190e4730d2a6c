pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identifier;
pub mod metrics;
pub mod movie;
pub mod pagination;
pub mod query;
pub mod slug;
pub mod testing;

pub use auth::{
    create_authenticator, AuthError, AuthRequest, Authenticator, Identity, NoneAuthenticator,
};
pub use catalog::{CatalogService, MoviePage};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, AuthMethod, CatalogConfig,
    Config, ConfigError, DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use error::{CatalogError, ErrorEnvelope, ErrorKind, FieldError, ValidationErrors};
pub use identifier::MovieIdentifier;
pub use movie::{Movie, MovieStore, MovieUpdate, NewMovie, SqliteMovieStore, StoreError};
pub use pagination::{PageLimits, PageMeta, PageWindow};
pub use query::{
    build_query, BuiltQuery, MatchMode, MovieFilter, MovieQuery, RawMovieQuery, SortField,
    SortOrder,
};
pub use slug::{fallback_slug, resolve_unique, slugify, MAX_SLUG_LEN};
