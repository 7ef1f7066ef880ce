use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// The category of an investment, as offered by the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Stock,
    Bond,
    Crypto,
    #[serde(rename = "ETF")]
    Etf,
    MutualFund,
    RealEstate,
    Other,
}

impl AssetType {
    /// Every asset type in the order the entry form lists them.
    pub const ALL: [AssetType; 7] = [
        AssetType::Stock,
        AssetType::Bond,
        AssetType::Crypto,
        AssetType::Etf,
        AssetType::MutualFund,
        AssetType::RealEstate,
        AssetType::Other,
    ];
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetType::Stock => write!(f, "Stock"),
            AssetType::Bond => write!(f, "Bond"),
            AssetType::Crypto => write!(f, "Crypto"),
            AssetType::Etf => write!(f, "ETF"),
            AssetType::MutualFund => write!(f, "MutualFund"),
            AssetType::RealEstate => write!(f, "RealEstate"),
            AssetType::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for AssetType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::ALL
            .into_iter()
            .find(|t| t.to_string() == s)
            .ok_or_else(|| CoreError::Deserialization(format!("Unknown asset type '{s}'")))
    }
}

/// A single holding in the portfolio. The only persisted entity.
///
/// Field names serialize in camelCase (`assetName`, `purchasePrice`, ...)
/// so the stored JSON blob stays compatible with the dashboard frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Assigned by the repository, never by the caller.
    pub id: u64,

    /// Display name, usually with the ticker (e.g., "Apple Inc. (AAPL)")
    pub asset_name: String,

    pub asset_type: AssetType,

    /// Units held
    pub quantity: f64,

    /// Price per unit at acquisition
    pub purchase_price: f64,

    /// Stored as an ISO-8601 date ("2023-01-15")
    pub purchase_date: NaiveDate,

    /// Latest known price per unit. When absent, `purchase_price` stands in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

impl Investment {
    /// Price used for every valuation: `current_price`, falling back to `purchase_price`.
    #[must_use]
    pub fn valuation_price(&self) -> f64 {
        self.current_price.unwrap_or(self.purchase_price)
    }

    /// Current market value of the holding.
    #[must_use]
    pub fn valuation(&self) -> f64 {
        self.valuation_price() * self.quantity
    }

    /// What was paid for the holding.
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.quantity
    }

    #[must_use]
    pub fn gain_loss(&self) -> f64 {
        self.valuation() - self.cost_basis()
    }

    /// Copy of this record with an absent `current_price` filled from `purchase_price`.
    #[must_use]
    pub fn with_price_defaulted(mut self) -> Self {
        self.current_price = Some(self.valuation_price());
        self
    }
}

/// An investment as submitted by the entry form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub asset_name: String,
    pub asset_type: AssetType,
    pub quantity: f64,
    pub purchase_price: f64,
    pub purchase_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}

impl NewInvestment {
    pub fn new(
        asset_name: impl Into<String>,
        asset_type: AssetType,
        quantity: f64,
        purchase_price: f64,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            asset_name: asset_name.into(),
            asset_type,
            quantity,
            purchase_price,
            purchase_date,
            current_price: None,
        }
    }

    /// Builder-style setter for the current price.
    #[must_use]
    pub fn with_current_price(mut self, price: f64) -> Self {
        self.current_price = Some(price);
        self
    }

    /// Attach an id, defaulting an absent `current_price` to `purchase_price`.
    #[must_use]
    pub fn into_investment(self, id: u64) -> Investment {
        Investment {
            id,
            asset_name: self.asset_name,
            asset_type: self.asset_type,
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            purchase_date: self.purchase_date,
            current_price: self.current_price,
        }
        .with_price_defaulted()
    }
}

impl From<Investment> for NewInvestment {
    fn from(inv: Investment) -> Self {
        Self {
            asset_name: inv.asset_name,
            asset_type: inv.asset_type,
            quantity: inv.quantity,
            purchase_price: inv.purchase_price,
            purchase_date: inv.purchase_date,
            current_price: inv.current_price,
        }
    }
}

/// The fixed collection used when nothing (or nothing readable) is stored.
#[must_use]
pub fn seed_investments() -> Vec<Investment> {
    fn seed(
        id: u64,
        name: &str,
        asset_type: AssetType,
        quantity: f64,
        purchase_price: f64,
        (y, m, d): (i32, u32, u32),
        current_price: f64,
    ) -> Investment {
        Investment {
            id,
            asset_name: name.to_string(),
            asset_type,
            quantity,
            purchase_price,
            purchase_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            current_price: Some(current_price),
        }
    }

    vec![
        seed(1, "Apple Inc. (AAPL)", AssetType::Stock, 10.0, 150.0, (2023, 1, 15), 175.0),
        seed(2, "Vanguard S&P 500 ETF (VOO)", AssetType::Etf, 5.0, 400.0, (2022, 11, 20), 420.0),
        seed(3, "Bitcoin (BTC)", AssetType::Crypto, 0.1, 30000.0, (2023, 5, 1), 40000.0),
        seed(4, "US Treasury Bond", AssetType::Bond, 2.0, 980.0, (2023, 3, 10), 995.0),
    ]
}
