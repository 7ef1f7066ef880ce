use std::sync::Arc;

use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::investment::{Investment, NewInvestment};
use crate::models::settings::{simulate_latency, LatencySettings};
use crate::providers::traits::{Mutation, RemoteBackend};

use super::investment_repository::{InvestmentRepository, Snapshot};

/// List/get/add/update/delete over the repository, with optimistic apply.
///
/// Every mutation follows the same protocol:
/// 1. capture the current snapshot,
/// 2. apply the change to the repository (subscribers see it, it is persisted),
/// 3. await the remote confirmation,
/// 4. on failure, restore the captured snapshot and return the error.
///
/// Structural errors (unknown id) are returned before step 2 and leave
/// the repository untouched.
pub struct PortfolioService {
    repository: Arc<InvestmentRepository>,
    remote: Arc<dyn RemoteBackend>,
    latency: LatencySettings,
}

impl std::fmt::Debug for PortfolioService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioService")
            .field("remote", &self.remote.name())
            .field("latency", &self.latency)
            .finish()
    }
}

impl PortfolioService {
    pub fn new(
        repository: Arc<InvestmentRepository>,
        remote: Arc<dyn RemoteBackend>,
        latency: LatencySettings,
    ) -> Self {
        Self {
            repository,
            remote,
            latency,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// All investments, in insertion order, as of the call.
    pub async fn list(&self) -> Vec<Investment> {
        let investments = self.repository.current_snapshot();
        simulate_latency(self.latency.list()).await;
        investments
    }

    /// A single investment, or `None` when no record has this id.
    pub async fn get_by_id(&self, id: u64) -> Option<Investment> {
        let investment = self.repository.get(id);
        simulate_latency(self.latency.get()).await;
        investment
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Insert a new investment. The repository assigns the id and an
    /// absent `current_price` defaults to `purchase_price`.
    pub async fn add(&self, new: NewInvestment) -> Result<Investment, CoreError> {
        let before = self.repository.snapshot();
        let record = self.repository.apply_insert_new(new);
        self.complete(Mutation::Add(record.clone()), before).await?;
        Ok(record)
    }

    /// Replace an existing investment (matched by id).
    pub async fn update(&self, investment: Investment) -> Result<Investment, CoreError> {
        let before = self.repository.snapshot();
        let record = investment.with_price_defaulted();
        self.repository.apply_replace(record.clone())?;
        self.complete(Mutation::Update(record.clone()), before).await?;
        Ok(record)
    }

    /// Remove the investment with `id`.
    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        let before = self.repository.snapshot();
        self.repository.apply_remove(id)?;
        self.complete(Mutation::Delete(id), before).await
    }

    /// Await confirmation; roll back to `before` if it fails.
    async fn complete(&self, mutation: Mutation, before: Snapshot) -> Result<(), CoreError> {
        match self.remote.confirm(&mutation, self.latency.mutation()).await {
            Ok(()) => {
                debug!(
                    "{} of investment {} confirmed by {}",
                    mutation.operation(),
                    mutation.investment_id(),
                    self.remote.name()
                );
                Ok(())
            }
            Err(e) => {
                warn!(
                    "{} of investment {} failed ({e}); rolling back",
                    mutation.operation(),
                    mutation.investment_id()
                );
                self.repository.restore(before);
                Err(e)
            }
        }
    }
}
