use std::sync::Arc;

use marquee_core::{Authenticator, CatalogService, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    service: Arc<CatalogService>,
    authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        config: Config,
        service: Arc<CatalogService>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            config,
            service,
            authenticator,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn service(&self) -> &CatalogService {
        &self.service
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }
}
