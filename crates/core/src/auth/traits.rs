use async_trait::async_trait;
use thiserror::Error;

use super::types::{AuthRequest, Identity};

/// Why a request could not be authenticated.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credentials were presented at all.
    #[error("Authentication required")]
    NotAuthenticated,

    /// Credentials were presented but did not check out.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The backing verifier could not be reached.
    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

/// Credential verification, pluggable per deployment.
///
/// The HTTP layer hands every protected request through one of these; which
/// implementation is active comes from the `[auth]` config section.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify the request's credentials and return who made it.
    async fn authenticate(&self, request: &AuthRequest) -> Result<Identity, AuthError>;

    /// Short name of this method, e.g. `"api_key"`.
    fn method_name(&self) -> &'static str;
}
