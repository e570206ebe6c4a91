//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{OrderCodeService, ProviderSet, TrackingService};
use crate::domain::entities::Provider;

/// State shared by every request.
///
/// Services hold `Arc`s to stateless provider clients, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub order_code_service: Arc<OrderCodeService>,
    pub tracking_service: Arc<TrackingService>,
    /// Providers whose client was constructed at startup.
    pub configured_providers: Arc<[Provider]>,
}

impl AppState {
    pub fn new(providers: ProviderSet) -> Self {
        let configured_providers = [Provider::Merchize, Provider::Dreamship]
            .into_iter()
            .filter(|p| providers.get(*p).is_some())
            .collect();

        Self {
            order_code_service: Arc::new(OrderCodeService::new(providers.clone())),
            tracking_service: Arc::new(TrackingService::new(providers)),
            configured_providers,
        }
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.configured_providers.contains(&provider)
    }
}
