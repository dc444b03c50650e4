//! Shared state handed to the schedule handlers through the depot.

use std::sync::Arc;

use airtime_core::config::Settings;
use airtime_core::error::CoreError;
use airtime_db::db::DbProvider;
use airtime_service::artwork::ArtworkStore;
use airtime_service::schedule::service::SeriesLimits;
use salvo::async_trait;

use crate::error::AppResult;

type SharedProvider = Arc<dyn DbProvider + Send + Sync>;

/// ## Summary
/// Injects the database provider, the settings and the artwork store derived
/// from them into every request's depot.
#[derive(Clone)]
pub struct StateHandler {
    provider: Option<SharedProvider>,
    settings: Arc<Settings>,
    artwork: Arc<ArtworkStore>,
}

impl StateHandler {
    /// State without a database. Handlers that need one answer 500.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        let artwork = Arc::new(ArtworkStore::new(&settings.storage.artwork_dir));
        Self {
            provider: None,
            settings: Arc::new(settings),
            artwork,
        }
    }

    #[must_use]
    pub fn with_provider(mut self, provider: impl DbProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }
}

#[async_trait]
impl salvo::Handler for StateHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        if let Some(provider) = &self.provider {
            depot.inject(Arc::clone(provider));
        }
        depot.inject(Arc::clone(&self.settings));
        depot.inject(Arc::clone(&self.artwork));
    }
}

/// ## Summary
/// Retrieves the database provider from the depot.
///
/// ## Errors
/// Returns `InvariantViolation` if no provider was injected.
pub fn get_db_from_depot(depot: &salvo::Depot) -> AppResult<SharedProvider> {
    depot
        .obtain::<SharedProvider>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Database provider not found in depot").into())
}

/// ## Summary
/// Retrieves the settings from the depot.
///
/// ## Errors
/// Returns `InvariantViolation` if the settings were not injected.
pub fn get_settings_from_depot(depot: &salvo::Depot) -> AppResult<Arc<Settings>> {
    depot
        .obtain::<Arc<Settings>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Settings not found in depot").into())
}

/// ## Errors
/// Returns `InvariantViolation` if the store was not injected.
pub fn get_artwork_from_depot(depot: &salvo::Depot) -> AppResult<Arc<ArtworkStore>> {
    depot
        .obtain::<Arc<ArtworkStore>>()
        .cloned()
        .map_err(|_err| CoreError::InvariantViolation("Artwork store not found in depot").into())
}

/// ## Errors
/// Returns `InvariantViolation` if the settings were not injected.
pub fn get_series_limits_from_depot(depot: &salvo::Depot) -> AppResult<SeriesLimits> {
    get_settings_from_depot(depot).map(|settings| SeriesLimits::from(&settings.schedule))
}
