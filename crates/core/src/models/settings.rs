use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::CoreError;

/// Default key under which the investment collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "portfolioInvestments";

/// Library configuration. Every field has a default, so a partial JSON
/// document (or none at all) is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key of the JSON blob in the durable backend.
    pub storage_key: String,

    /// Artificial delays standing in for network round trips.
    pub latency: LatencySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            latency: LatencySettings::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::InvalidSettings(e.to_string()))?;
        if settings.storage_key.trim().is_empty() {
            return Err(CoreError::InvalidSettings("storage_key must not be empty".into()));
        }
        Ok(settings)
    }

    /// Default settings with every delay set to zero.
    #[must_use]
    pub fn without_latency() -> Self {
        Self {
            latency: LatencySettings::none(),
            ..Self::default()
        }
    }
}

/// Per-call-site artificial latency, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencySettings {
    pub list_ms: u64,
    pub get_ms: u64,
    pub mutation_ms: u64,
    pub summary_ms: u64,
    pub allocation_ms: u64,
    pub performance_ms: u64,
    pub market_trends_ms: u64,
}

impl Default for LatencySettings {
    fn default() -> Self {
        Self {
            list_ms: 300,
            get_ms: 100,
            mutation_ms: 500,
            summary_ms: 100,
            allocation_ms: 100,
            performance_ms: 200,
            market_trends_ms: 150,
        }
    }
}

impl LatencySettings {
    #[must_use]
    pub fn none() -> Self {
        Self {
            list_ms: 0,
            get_ms: 0,
            mutation_ms: 0,
            summary_ms: 0,
            allocation_ms: 0,
            performance_ms: 0,
            market_trends_ms: 0,
        }
    }

    #[must_use]
    pub fn list(&self) -> Duration {
        Duration::from_millis(self.list_ms)
    }

    #[must_use]
    pub fn get(&self) -> Duration {
        Duration::from_millis(self.get_ms)
    }

    #[must_use]
    pub fn mutation(&self) -> Duration {
        Duration::from_millis(self.mutation_ms)
    }

    #[must_use]
    pub fn summary(&self) -> Duration {
        Duration::from_millis(self.summary_ms)
    }

    #[must_use]
    pub fn allocation(&self) -> Duration {
        Duration::from_millis(self.allocation_ms)
    }

    #[must_use]
    pub fn performance(&self) -> Duration {
        Duration::from_millis(self.performance_ms)
    }

    #[must_use]
    pub fn market_trends(&self) -> Duration {
        Duration::from_millis(self.market_trends_ms)
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
