use chrono::NaiveDate;
use portfolio_dashboard_core::models::analytics::{
    AllocationBreakdown, AllocationSlice, PortfolioSummary, ALLOCATION_LABEL, ALLOCATION_PALETTE,
};
use portfolio_dashboard_core::models::chart::{ChartData, PerformanceSeries, PERFORMANCE_LABEL};
use portfolio_dashboard_core::models::investment::{
    seed_investments, AssetType, Investment, NewInvestment,
};
use portfolio_dashboard_core::models::market::{market_snapshot, TrendDirection};
use portfolio_dashboard_core::models::settings::{LatencySettings, Settings, DEFAULT_STORAGE_KEY};
use std::collections::HashSet;
use std::time::Duration;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn apple(current_price: Option<f64>) -> Investment {
    Investment {
        id: 1,
        asset_name: "Apple Inc. (AAPL)".into(),
        asset_type: AssetType::Stock,
        quantity: 10.0,
        purchase_price: 150.0,
        purchase_date: d(2023, 1, 15),
        current_price,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  AssetType
// ═══════════════════════════════════════════════════════════════════

mod asset_type {
    use super::*;

    #[test]
    fn display_matches_wire_names() {
        let names: Vec<String> = AssetType::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(
            names,
            vec!["Stock", "Bond", "Crypto", "ETF", "MutualFund", "RealEstate", "Other"]
        );
    }

    #[test]
    fn serde_uses_display_names() {
        for at in AssetType::ALL {
            let json = serde_json::to_string(&at).unwrap();
            assert_eq!(json, format!("\"{at}\""));
            let back: AssetType = serde_json::from_str(&json).unwrap();
            assert_eq!(at, back);
        }
    }

    #[test]
    fn from_str_parses_every_type() {
        for at in AssetType::ALL {
            assert_eq!(at.to_string().parse::<AssetType>().unwrap(), at);
        }
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("Etf".parse::<AssetType>().is_err());
        assert!("".parse::<AssetType>().is_err());
    }

    #[test]
    fn all_is_unique() {
        let set: HashSet<AssetType> = AssetType::ALL.into_iter().collect();
        assert_eq!(set.len(), 7);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Investment
// ═══════════════════════════════════════════════════════════════════

mod investment {
    use super::*;

    #[test]
    fn valuation_uses_current_price() {
        let inv = apple(Some(175.0));
        assert_eq!(inv.valuation_price(), 175.0);
        assert_eq!(inv.valuation(), 1750.0);
        assert_eq!(inv.cost_basis(), 1500.0);
    }

    #[test]
    fn valuation_falls_back_to_purchase_price() {
        let inv = apple(None);
        assert_eq!(inv.valuation_price(), 150.0);
        assert_eq!(inv.valuation(), 1500.0);
    }

    #[test]
    fn gain_loss_per_holding() {
        assert_eq!(apple(Some(175.0)).gain_loss(), 250.0);
        assert_eq!(apple(Some(120.0)).gain_loss(), -300.0);
        assert_eq!(apple(None).gain_loss(), 0.0);
    }

    #[test]
    fn price_defaulting_keeps_existing_price() {
        assert_eq!(apple(Some(175.0)).with_price_defaulted().current_price, Some(175.0));
        assert_eq!(apple(None).with_price_defaulted().current_price, Some(150.0));
    }

    #[test]
    fn json_uses_camel_case_and_iso_dates() {
        let json = serde_json::to_value(apple(Some(175.0))).unwrap();
        assert_eq!(json["assetName"], "Apple Inc. (AAPL)");
        assert_eq!(json["assetType"], "Stock");
        assert_eq!(json["purchasePrice"], 150.0);
        assert_eq!(json["purchaseDate"], "2023-01-15");
        assert_eq!(json["currentPrice"], 175.0);
    }

    #[test]
    fn absent_current_price_is_omitted() {
        let json = serde_json::to_value(apple(None)).unwrap();
        assert!(json.get("currentPrice").is_none());
    }

    #[test]
    fn parses_frontend_json() {
        let json = r#"{"id":3,"assetName":"Bitcoin (BTC)","assetType":"Crypto",
            "quantity":0.1,"purchasePrice":30000,"purchaseDate":"2023-05-01"}"#;
        let inv: Investment = serde_json::from_str(json).unwrap();
        assert_eq!(inv.id, 3);
        assert_eq!(inv.asset_type, AssetType::Crypto);
        assert_eq!(inv.purchase_date, d(2023, 5, 1));
        assert_eq!(inv.current_price, None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  NewInvestment
// ═══════════════════════════════════════════════════════════════════

mod new_investment {
    use super::*;

    #[test]
    fn into_investment_assigns_id_and_defaults_price() {
        let new = NewInvestment::new("Gold ETF", AssetType::Etf, 3.0, 180.0, d(2024, 2, 1));
        let inv = new.into_investment(9);
        assert_eq!(inv.id, 9);
        assert_eq!(inv.current_price, Some(180.0));
    }

    #[test]
    fn into_investment_keeps_given_price() {
        let new = NewInvestment::new("Gold ETF", AssetType::Etf, 3.0, 180.0, d(2024, 2, 1))
            .with_current_price(190.0);
        assert_eq!(new.into_investment(1).current_price, Some(190.0));
    }

    #[test]
    fn from_investment_drops_id() {
        let new = NewInvestment::from(apple(Some(175.0)));
        assert_eq!(new.asset_name, "Apple Inc. (AAPL)");
        let json = serde_json::to_value(&new).unwrap();
        assert!(json.get("id").is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Seed set
// ═══════════════════════════════════════════════════════════════════

mod seed {
    use super::*;

    #[test]
    fn four_records_with_sequential_ids() {
        let seed = seed_investments();
        let ids: Vec<u64> = seed.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn every_record_has_a_current_price() {
        assert!(seed_investments().iter().all(|i| i.current_price.is_some()));
    }

    #[test]
    fn seed_is_stable() {
        assert_eq!(seed_investments(), seed_investments());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Analytics / chart payloads
// ═══════════════════════════════════════════════════════════════════

mod chart_payloads {
    use super::*;

    fn breakdown() -> AllocationBreakdown {
        AllocationBreakdown {
            slices: vec![
                AllocationSlice {
                    asset_type: AssetType::Stock,
                    value: 300.0,
                    percentage: 75.0,
                    color: ALLOCATION_PALETTE[0].into(),
                },
                AllocationSlice {
                    asset_type: AssetType::Etf,
                    value: 100.0,
                    percentage: 25.0,
                    color: ALLOCATION_PALETTE[1].into(),
                },
            ],
        }
    }

    #[test]
    fn breakdown_helpers() {
        let b = breakdown();
        assert_eq!(b.total_value(), 400.0);
        assert_eq!(b.get(AssetType::Etf).unwrap().value, 100.0);
        assert!(b.get(AssetType::Bond).is_none());
        assert!(!b.is_empty());
        assert!(AllocationBreakdown::default().is_empty());
    }

    #[test]
    fn allocation_chart_data() {
        let chart = ChartData::from(&breakdown());
        assert_eq!(chart.labels, vec!["Stock", "ETF"]);
        assert_eq!(chart.datasets.len(), 1);
        let ds = &chart.datasets[0];
        assert_eq!(ds.data, vec![300.0, 100.0]);
        assert_eq!(ds.label, ALLOCATION_LABEL);
        assert_eq!(ds.background_color.as_ref().unwrap().len(), ALLOCATION_PALETTE.len());
        assert_eq!(ds.border_color, Some(vec!["#fff".to_string()]));
    }

    #[test]
    fn performance_chart_data() {
        let series = PerformanceSeries {
            points: vec![("Jan".into(), 100.0), ("Feb".into(), 101.5)],
        };
        let chart = ChartData::from(&series);
        assert_eq!(chart.labels, vec!["Jan", "Feb"]);
        let ds = &chart.datasets[0];
        assert_eq!(ds.label, PERFORMANCE_LABEL);
        assert_eq!(ds.data, vec![100.0, 101.5]);
        assert_eq!(ds.tension, Some(0.1));
        assert_eq!(ds.fill, Some(true));
    }

    #[test]
    fn chart_json_is_camel_case_and_sparse() {
        let chart = ChartData::from(&breakdown());
        let json = serde_json::to_value(&chart).unwrap();
        let ds = &json["datasets"][0];
        assert!(ds.get("backgroundColor").is_some());
        assert!(ds.get("borderColor").is_some());
        assert!(ds.get("tension").is_none());
        assert!(ds.get("fill").is_none());
    }

    #[test]
    fn summary_json_field_names() {
        let summary = PortfolioSummary {
            total_portfolio_value: 10.0,
            total_cost: 8.0,
            total_gain_loss: 2.0,
            number_of_assets: 1,
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["totalPortfolioValue"], 10.0);
        assert_eq!(json["totalGainLoss"], 2.0);
        assert_eq!(json["numberOfAssets"], 1);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Market trends
// ═══════════════════════════════════════════════════════════════════

mod market {
    use super::*;

    #[test]
    fn snapshot_is_fixed() {
        let trends = market_snapshot();
        assert_eq!(trends.len(), 4);
        assert_eq!(trends[0].name, "S&P 500");
        assert_eq!(trends[1].trend, TrendDirection::Down);
        assert_eq!(trends[3].value, "$1,805.30/oz");
        assert_eq!(market_snapshot(), trends);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TrendDirection::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&TrendDirection::Neutral).unwrap(), "\"neutral\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.latency.list(), Duration::from_millis(300));
        assert_eq!(s.latency.get(), Duration::from_millis(100));
        assert_eq!(s.latency.mutation(), Duration::from_millis(500));
        assert_eq!(s.latency.performance(), Duration::from_millis(200));
        assert_eq!(s.latency.market_trends(), Duration::from_millis(150));
    }

    #[test]
    fn without_latency_zeroes_every_delay() {
        let s = Settings::without_latency();
        assert_eq!(s.latency, LatencySettings::none());
        assert!(s.latency.mutation().is_zero());
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let s = Settings::from_json(r#"{"latency":{"mutation_ms":5}}"#).unwrap();
        assert_eq!(s.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(s.latency.mutation_ms, 5);
        assert_eq!(s.latency.list_ms, 300);
    }

    #[test]
    fn from_json_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn from_json_rejects_blank_key() {
        assert!(Settings::from_json(r#"{"storage_key":"  "}"#).is_err());
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(Settings::from_json("not json").is_err());
    }
}
