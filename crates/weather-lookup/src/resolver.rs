use tracing::{debug, warn};

use crate::error::{LookupError, Upstream};
use crate::model::LocationCandidate;
use crate::providers::ProviderApi;

/// Turns free text into geocoded candidates.
#[derive(Debug, Clone)]
pub struct LocationResolver<P> {
    providers: P,
    suggest_limit: u8,
}

impl<P: ProviderApi> LocationResolver<P> {
    pub fn new(providers: P, suggest_limit: u8) -> Self {
        Self {
            providers,
            suggest_limit: suggest_limit.max(1),
        }
    }

    /// Autocomplete candidates. Failures degrade to an empty list.
    pub fn suggest(&self, query: &str) -> Vec<LocationCandidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        match self.providers.geocode(query, self.suggest_limit) {
            Ok(mut candidates) => {
                candidates.truncate(usize::from(self.suggest_limit));
                debug!(query, count = candidates.len(), "suggestions resolved");
                candidates
            }
            Err(error) => {
                warn!(query, %error, "autocomplete lookup failed");
                Vec::new()
            }
        }
    }

    /// Best single match for `query`.
    pub fn resolve_by_name(&self, query: &str) -> Result<LocationCandidate, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        let candidates = self
            .providers
            .geocode(query, 1)
            .map_err(|error| LookupError::transport(Upstream::Geocoding, error))?;

        candidates
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(query.to_string()))
    }
}
