use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request information for authentication
#[derive(Debug, Clone, Default)]
pub struct AuthRequest {
    /// Header names lowercased, values as received
    pub headers: HashMap<String, String>,
}

impl AuthRequest {
    /// Build a request from header pairs, lowercasing the names
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self {
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_lowercase(), v.into()))
                .collect(),
        }
    }
}

/// Authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub method: String,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            method: "none".to_string(),
        }
    }
}
