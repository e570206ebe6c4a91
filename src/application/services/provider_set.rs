//! The configured provider clients, addressed by [`Provider`].

use std::sync::Arc;

use crate::domain::clients::ProviderClient;
use crate::domain::entities::Provider;

/// Clients for every provider the service can query.
///
/// Printway has no client; [`ProviderSet::get`] returns `None` for it.
#[derive(Clone)]
pub struct ProviderSet {
    merchize: Arc<dyn ProviderClient>,
    dreamship: Arc<dyn ProviderClient>,
}

impl ProviderSet {
    pub fn new(merchize: Arc<dyn ProviderClient>, dreamship: Arc<dyn ProviderClient>) -> Self {
        Self {
            merchize,
            dreamship,
        }
    }

    pub fn get(&self, provider: Provider) -> Option<&dyn ProviderClient> {
        match provider {
            Provider::Merchize => Some(self.merchize.as_ref()),
            Provider::Dreamship => Some(self.dreamship.as_ref()),
            Provider::Printway => None,
        }
    }
}
