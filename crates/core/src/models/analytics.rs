use serde::{Deserialize, Serialize};

use super::chart::{ChartData, ChartDataset};
use super::investment::AssetType;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Σ valuation over all holdings
    pub total_portfolio_value: f64,

    /// Σ purchase price × quantity
    pub total_cost: f64,

    /// total_portfolio_value - total_cost
    pub total_gain_loss: f64,

    pub number_of_assets: usize,
}

/// Presentation palette for the allocation pie, assigned by slice position.
pub const ALLOCATION_PALETTE: [&str; 6] = [
    "rgba(0, 123, 255, 0.7)",
    "rgba(40, 167, 69, 0.7)",
    "rgba(255, 193, 7, 0.7)",
    "rgba(220, 53, 69, 0.7)",
    "rgba(23, 162, 184, 0.7)",
    "rgba(108, 117, 125, 0.7)",
];

pub const ALLOCATION_LABEL: &str = "Asset Allocation";
pub const ALLOCATION_BORDER: &str = "#fff";

/// One asset type's share of the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset_type: AssetType,

    /// Σ valuation of the holdings of this type
    pub value: f64,

    /// This slice's value / total × 100 (0 when the total is 0)
    pub percentage: f64,

    pub color: String,
}

/// Holdings grouped by asset type, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationBreakdown {
    pub slices: Vec<AllocationSlice>,
}

impl AllocationBreakdown {
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    #[must_use]
    pub fn get(&self, asset_type: AssetType) -> Option<&AllocationSlice> {
        self.slices.iter().find(|s| s.asset_type == asset_type)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl From<&AllocationBreakdown> for ChartData {
    fn from(breakdown: &AllocationBreakdown) -> Self {
        ChartData {
            labels: breakdown
                .slices
                .iter()
                .map(|s| s.asset_type.to_string())
                .collect(),
            datasets: vec![ChartDataset {
                data: breakdown.slices.iter().map(|s| s.value).collect(),
                label: ALLOCATION_LABEL.to_string(),
                // the pie always receives the full palette; unused colours are ignored
                background_color: Some(ALLOCATION_PALETTE.iter().map(|c| c.to_string()).collect()),
                border_color: Some(vec![ALLOCATION_BORDER.to_string()]),
                tension: None,
                fill: None,
            }],
        }
    }
}
