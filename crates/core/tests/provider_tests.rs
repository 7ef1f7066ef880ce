// ═══════════════════════════════════════════════════════════════════
// Provider Tests — Mutation, SimulatedBackend
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::time::Duration;

use portfolio_dashboard_core::errors::CoreError;
use portfolio_dashboard_core::models::investment::{AssetType, NewInvestment};
use portfolio_dashboard_core::providers::simulated::SimulatedBackend;
use portfolio_dashboard_core::providers::traits::{Mutation, RemoteBackend};

fn add_mutation() -> Mutation {
    let inv = NewInvestment::new(
        "Index Fund",
        AssetType::MutualFund,
        4.0,
        25.0,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    )
    .into_investment(5);
    Mutation::Add(inv)
}

mod mutation {
    use super::*;

    #[test]
    fn operation_names() {
        assert_eq!(add_mutation().operation(), "add");
        assert_eq!(Mutation::Delete(1).operation(), "delete");
    }

    #[test]
    fn investment_id() {
        assert_eq!(add_mutation().investment_id(), 5);
        assert_eq!(Mutation::Delete(8).investment_id(), 8);
    }
}

mod simulated_backend {
    use super::*;

    #[tokio::test]
    async fn succeeds_by_default() {
        let backend = SimulatedBackend::new();
        assert!(backend.confirm(&add_mutation(), Duration::ZERO).await.is_ok());
        assert_eq!(backend.confirmations(), 1);
        assert_eq!(backend.name(), "Simulated");
    }

    #[tokio::test]
    async fn fail_next_fails_exactly_that_many() {
        let backend = SimulatedBackend::new();
        backend.fail_next(2);
        assert!(backend.confirm(&add_mutation(), Duration::ZERO).await.is_err());
        assert!(backend.confirm(&Mutation::Delete(1), Duration::ZERO).await.is_err());
        assert!(backend.confirm(&Mutation::Delete(1), Duration::ZERO).await.is_ok());
        assert_eq!(backend.confirmations(), 3);
    }

    #[tokio::test]
    async fn failure_names_the_operation() {
        let backend = SimulatedBackend::new();
        backend.fail_next(1);
        match backend.confirm(&Mutation::Delete(4), Duration::ZERO).await {
            Err(CoreError::SimulatedFailure { operation, message }) => {
                assert_eq!(operation, "delete");
                assert!(message.contains('4'));
            }
            other => panic!("Expected SimulatedFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn always_fail_can_be_cleared() {
        let backend = SimulatedBackend::new();
        backend.set_always_fail(true);
        assert!(backend.confirm(&add_mutation(), Duration::ZERO).await.is_err());
        assert!(backend.confirm(&add_mutation(), Duration::ZERO).await.is_err());
        backend.set_always_fail(false);
        assert!(backend.confirm(&add_mutation(), Duration::ZERO).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_the_requested_latency() {
        let backend = SimulatedBackend::new();
        let started = tokio::time::Instant::now();
        backend
            .confirm(&add_mutation(), Duration::from_millis(500))
            .await
            .unwrap();
        assert!(started.elapsed() >= Duration::from_millis(500));
    }
}
