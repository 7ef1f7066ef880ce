use serde::{Deserialize, Serialize};

/// Direction badge shown next to a market quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// A quote for an external market index. Reference data only; unrelated to holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketTrend {
    pub name: String,
    /// Pre-formatted for display (e.g., "4,532.10")
    pub value: String,
    /// Pre-formatted signed percentage (e.g., "+0.75%")
    pub change: String,
    pub trend: TrendDirection,
}

impl MarketTrend {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        change: impl Into<String>,
        trend: TrendDirection,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            change: change.into(),
            trend,
        }
    }
}

/// The hard-coded market snapshot served to the dashboard.
#[must_use]
pub fn market_snapshot() -> Vec<MarketTrend> {
    vec![
        MarketTrend::new("S&P 500", "4,532.10", "+0.75%", TrendDirection::Up),
        MarketTrend::new("NASDAQ Composite", "15,005.50", "-0.15%", TrendDirection::Down),
        MarketTrend::new("Dow Jones Industrial Average", "35,012.80", "+0.50%", TrendDirection::Up),
        MarketTrend::new("Gold (XAU/USD)", "$1,805.30/oz", "+0.20%", TrendDirection::Up),
    ]
}
