use std::sync::{Arc, Mutex, PoisonError};

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::analytics::{AllocationBreakdown, AllocationSlice, PortfolioSummary, ALLOCATION_PALETTE};
use crate::models::chart::{PerformanceSeries, PERFORMANCE_LABELS};
use crate::models::investment::Investment;
use crate::models::market::{market_snapshot, MarketTrend};
use crate::models::settings::{simulate_latency, LatencySettings};

use super::broadcast::Subscription;
use super::investment_repository::InvestmentRepository;

/// Share of the cost basis the performance series starts from.
const PERFORMANCE_START_FACTOR: f64 = 0.9;

/// Starting value when the cost basis is zero but holdings exist.
const PERFORMANCE_FALLBACK_HELD: f64 = 50_000.0;

/// Starting value for an empty portfolio.
const PERFORMANCE_FALLBACK_EMPTY: f64 = 10_000.0;

/// Centre of the per-month random draw; below 0.5 biases the walk upward.
const PERTURBATION_CENTER: f64 = 0.45;

/// Maximum relative change per month (±2.5% around the centre).
const PERTURBATION_SCALE: f64 = 0.05;

// ── Pure derivations ────────────────────────────────────────────────

/// Total value, cost, gain/loss and holding count of `investments`.
#[must_use]
pub fn summarize(investments: &[Investment]) -> PortfolioSummary {
    let (total_value, total_cost) = investments
        .iter()
        .fold((0.0, 0.0), |(value, cost), inv| {
            (value + inv.valuation(), cost + inv.cost_basis())
        });

    PortfolioSummary {
        total_portfolio_value: total_value,
        total_cost,
        total_gain_loss: total_value - total_cost,
        number_of_assets: investments.len(),
    }
}

/// Group valuations by asset type, keeping the order types first appear in.
#[must_use]
pub fn allocate(investments: &[Investment]) -> AllocationBreakdown {
    let mut slices: Vec<AllocationSlice> = Vec::new();

    for inv in investments {
        let value = inv.valuation();
        match slices.iter_mut().find(|s| s.asset_type == inv.asset_type) {
            Some(slice) => slice.value += value,
            None => slices.push(AllocationSlice {
                asset_type: inv.asset_type,
                value,
                percentage: 0.0, // filled below
                color: String::new(), // filled below
            }),
        }
    }

    let total: f64 = slices.iter().map(|s| s.value).sum();
    for (idx, slice) in slices.iter_mut().enumerate() {
        slice.percentage = if total > 0.0 {
            (slice.value / total) * 100.0
        } else {
            0.0
        };
        slice.color = ALLOCATION_PALETTE[idx % ALLOCATION_PALETTE.len()].to_string();
    }

    AllocationBreakdown { slices }
}

/// Where the synthetic performance series starts for `investments`.
#[must_use]
pub fn performance_start_value(investments: &[Investment]) -> f64 {
    let cost: f64 = investments.iter().map(Investment::cost_basis).sum();
    let start = cost * PERFORMANCE_START_FACTOR;
    if start > 0.0 {
        start
    } else if investments.is_empty() {
        PERFORMANCE_FALLBACK_EMPTY
    } else {
        PERFORMANCE_FALLBACK_HELD
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ── Performance series ──────────────────────────────────────────────

/// Produces the mock monthly performance walk.
///
/// Output is random unless built with [`with_seed`](Self::with_seed).
pub struct PerformanceSeriesGenerator {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for PerformanceSeriesGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerformanceSeriesGenerator").finish_non_exhaustive()
    }
}

impl PerformanceSeriesGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        if let Err(e) = getrandom::getrandom(&mut seed) {
            warn!("OS entropy unavailable ({e}); seeding performance series from the clock");
            let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
            return Self::with_seed(nanos as u64);
        }
        Self {
            rng: Mutex::new(StdRng::from_seed(seed)),
        }
    }

    /// Reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Twelve monthly points starting from `performance_start_value(investments)`.
    pub fn generate(&self, investments: &[Investment]) -> PerformanceSeries {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let mut last_value = performance_start_value(investments);

        let points = PERFORMANCE_LABELS
            .iter()
            .map(|label| {
                let draw: f64 = rng.gen();
                last_value *= 1.0 + (draw - PERTURBATION_CENTER) * PERTURBATION_SCALE;
                (label.to_string(), round_cents(last_value))
            })
            .collect();

        PerformanceSeries { points }
    }
}

impl Default for PerformanceSeriesGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Service ─────────────────────────────────────────────────────────

/// Serves summary, allocation, performance and market data to the dashboard.
///
/// Everything is recomputed from the repository's latest snapshot; nothing
/// is cached. One-shot reads wait for the configured latency first, push
/// subscriptions are delivered synchronously on every emission.
pub struct AnalyticsService {
    repository: Arc<InvestmentRepository>,
    generator: PerformanceSeriesGenerator,
    latency: LatencySettings,
}

impl std::fmt::Debug for AnalyticsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyticsService")
            .field("latency", &self.latency)
            .finish()
    }
}

impl AnalyticsService {
    pub fn new(
        repository: Arc<InvestmentRepository>,
        generator: PerformanceSeriesGenerator,
        latency: LatencySettings,
    ) -> Self {
        Self {
            repository,
            generator,
            latency,
        }
    }

    // ── Synchronous reads ───────────────────────────────────────────

    #[must_use]
    pub fn current_summary(&self) -> PortfolioSummary {
        summarize(&self.repository.snapshot())
    }

    #[must_use]
    pub fn current_allocation(&self) -> AllocationBreakdown {
        allocate(&self.repository.snapshot())
    }

    // ── One-shot async reads ────────────────────────────────────────

    pub async fn summary(&self) -> PortfolioSummary {
        simulate_latency(self.latency.summary()).await;
        self.current_summary()
    }

    pub async fn allocation(&self) -> AllocationBreakdown {
        simulate_latency(self.latency.allocation()).await;
        self.current_allocation()
    }

    /// Synthetic series from the cost basis at call time.
    pub async fn performance_series(&self) -> PerformanceSeries {
        let series = self.generator.generate(&self.repository.snapshot());
        simulate_latency(self.latency.performance()).await;
        series
    }

    pub async fn market_trends(&self) -> Vec<MarketTrend> {
        simulate_latency(self.latency.market_trends()).await;
        market_snapshot()
    }

    // ── Push subscriptions ──────────────────────────────────────────

    /// Call `observer` with a fresh summary now and after every change.
    pub fn subscribe_summary<F>(&self, observer: F) -> Subscription
    where
        F: Fn(PortfolioSummary) + Send + Sync + 'static,
    {
        self.repository
            .subscribe(move |investments| observer(summarize(investments)))
    }

    /// Call `observer` with a fresh allocation now and after every change.
    pub fn subscribe_allocation<F>(&self, observer: F) -> Subscription
    where
        F: Fn(AllocationBreakdown) + Send + Sync + 'static,
    {
        self.repository
            .subscribe(move |investments| observer(allocate(investments)))
    }
}
