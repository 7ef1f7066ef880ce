use async_trait::async_trait;
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::investment::Investment;

/// A mutation that has already been applied locally and awaits confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Add(Investment),
    Update(Investment),
    Delete(u64),
}

impl Mutation {
    /// Short operation name (for logs/errors).
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Mutation::Add(_) => "add",
            Mutation::Update(_) => "update",
            Mutation::Delete(_) => "delete",
        }
    }

    /// Id of the investment the mutation targets.
    #[must_use]
    pub fn investment_id(&self) -> u64 {
        match self {
            Mutation::Add(inv) | Mutation::Update(inv) => inv.id,
            Mutation::Delete(id) => *id,
        }
    }
}

/// The remote side that confirms optimistic mutations.
///
/// The dashboard has no real server: the default implementation only waits
/// and succeeds. Tests plug in implementations that fail on demand to
/// exercise the rollback path.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    /// Confirm `mutation`, taking roughly `latency` to answer.
    async fn confirm(&self, mutation: &Mutation, latency: Duration) -> Result<(), CoreError>;
}
