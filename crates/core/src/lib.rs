pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::investment::Investment;
use models::settings::Settings;
use providers::simulated::SimulatedBackend;
use providers::traits::RemoteBackend;
use services::{
    analytics_service::{AnalyticsService, PerformanceSeriesGenerator},
    broadcast::Subscription,
    investment_repository::InvestmentRepository,
    portfolio_service::PortfolioService,
};
use storage::backend::KeyValueBackend;
use storage::manager::InvestmentStore;

/// Main entry point for the portfolio dashboard core library.
///
/// Owns the repository and hands out the mutation facade and the analytics
/// engine that share it. There is no global instance: the embedding
/// application builds one and passes it (or its parts) to consumers.
pub struct PortfolioDashboard {
    settings: Settings,
    repository: Arc<InvestmentRepository>,
    investments: PortfolioService,
    analytics: AnalyticsService,
}

impl std::fmt::Debug for PortfolioDashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioDashboard")
            .field("investments", &self.repository.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl PortfolioDashboard {
    /// Open the dashboard on `backend`, loading the stored collection or
    /// seeding it. Mutations are confirmed by a [`SimulatedBackend`].
    ///
    /// Fails only when the backend itself cannot be read; a missing or
    /// corrupt blob is replaced by the seed set.
    pub fn open(backend: Arc<dyn KeyValueBackend>, settings: Settings) -> Result<Self, errors::CoreError> {
        Self::with_remote(backend, settings, Arc::new(SimulatedBackend::new()))
    }

    /// Like [`open`](Self::open) with a caller-supplied confirmation backend.
    pub fn with_remote(
        backend: Arc<dyn KeyValueBackend>,
        settings: Settings,
        remote: Arc<dyn RemoteBackend>,
    ) -> Result<Self, errors::CoreError> {
        Self::build(backend, settings, remote, PerformanceSeriesGenerator::new())
    }

    /// Fully explicit constructor; lets tests fix the performance-series seed.
    pub fn build(
        backend: Arc<dyn KeyValueBackend>,
        settings: Settings,
        remote: Arc<dyn RemoteBackend>,
        generator: PerformanceSeriesGenerator,
    ) -> Result<Self, errors::CoreError> {
        let store = InvestmentStore::new(backend, settings.storage_key.clone());
        let repository = Arc::new(InvestmentRepository::open(store)?);
        let investments = PortfolioService::new(Arc::clone(&repository), remote, settings.latency);
        let analytics = AnalyticsService::new(Arc::clone(&repository), generator, settings.latency);

        Ok(Self {
            settings,
            repository,
            investments,
            analytics,
        })
    }

    /// Shared handle to the repository (snapshot reads and subscriptions).
    #[must_use]
    pub fn repository(&self) -> &Arc<InvestmentRepository> {
        &self.repository
    }

    /// The list/get/add/update/delete facade.
    #[must_use]
    pub fn investments(&self) -> &PortfolioService {
        &self.investments
    }

    /// Summary, allocation, performance and market data.
    #[must_use]
    pub fn analytics(&self) -> &AnalyticsService {
        &self.analytics
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Convenience ─────────────────────────────────────────────────

    /// The latest committed collection.
    #[must_use]
    pub fn current_snapshot(&self) -> Vec<Investment> {
        self.repository.current_snapshot()
    }

    /// Subscribe to the investment collection (replays the current value).
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&[Investment]) + Send + Sync + 'static,
    {
        self.repository.subscribe(observer)
    }

    /// Export the current collection as pretty-printed JSON.
    pub fn export_to_json(&self) -> Result<String, errors::CoreError> {
        serde_json::to_string_pretty(self.repository.snapshot().as_slice())
            .map_err(|e| errors::CoreError::Serialization(format!("Failed to serialize investments: {e}")))
    }
}
