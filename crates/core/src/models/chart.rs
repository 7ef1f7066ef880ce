use serde::{Deserialize, Serialize};

/// Chart-ready payload: the core computes the numbers, the frontend only renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// A single series inside a [`ChartData`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub data: Vec<f64>,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

/// Month labels of the synthetic performance series.
pub const PERFORMANCE_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const PERFORMANCE_LABEL: &str = "Portfolio Value Over Time";

/// A monthly value series. Synthetic: it is NOT derived from real price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSeries {
    /// (month label, value rounded to 2 dp)
    pub points: Vec<(String, f64)>,
}

impl PerformanceSeries {
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|(l, _)| l.clone()).collect()
    }
}

impl From<&PerformanceSeries> for ChartData {
    fn from(series: &PerformanceSeries) -> Self {
        ChartData {
            labels: series.labels(),
            datasets: vec![ChartDataset {
                data: series.values(),
                label: PERFORMANCE_LABEL.to_string(),
                background_color: Some(vec!["rgba(0, 123, 255, 0.2)".to_string()]),
                border_color: Some(vec!["rgba(0, 123, 255, 1)".to_string()]),
                tension: Some(0.1),
                fill: Some(true),
            }],
        }
    }
}
