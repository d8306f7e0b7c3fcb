//! Replenishment recommendation tests
//!
//! Service-level tests against fakes, plus property-based tests for the
//! pure calculator: EOQ monotonicity, action priority, and bounds.

mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use common::{stock_item, FakeForecastProvider, FakeStockRepository};
use retail_inventory_backend::error::AppError;
use retail_inventory_backend::services::ReplenishmentService;
use shared::{
    compute_recommendation, economic_order_quantity, DemandForecast, ReplenishmentAction,
    ReplenishmentConstants, StockItem,
};

const AT_RISK_MULTIPLIER: f64 = 1.25;
const HORIZON_DAYS: u32 = 30;

fn service(
    stock: Arc<FakeStockRepository>,
    forecasts: Arc<FakeForecastProvider>,
) -> ReplenishmentService {
    ReplenishmentService::new(
        stock,
        forecasts,
        ReplenishmentConstants::default(),
        HORIZON_DAYS,
        AT_RISK_MULTIPLIER,
    )
    .unwrap()
}

#[tokio::test]
async fn recommendation_matches_the_reference_scenario() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());
    let item = stock_item(50, 5);
    stock.upsert(item.clone());
    forecasts.set_forecast(item.id, 300.0);

    let rec = service(stock, forecasts).recommend(item.id).await.unwrap();

    assert_eq!(rec.daily_demand, 10.0);
    assert!((rec.safety_stock - 43.65).abs() < 0.01);
    assert_eq!(rec.reorder_point, 114);
    assert_eq!(rec.projected_inventory, -250);
    // Both the stockout and reorder conditions hold; stockout wins.
    assert_eq!(rec.action, ReplenishmentAction::StockoutRisk);
    assert!(rec.suggested_order_quantity >= rec.reorder_point - 50);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());

    let result = service(stock, forecasts).recommend(Uuid::new_v4()).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn product_without_model_output_degrades_to_healthy() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());
    let item = stock_item(0, 5);
    stock.upsert(item.clone());
    // No forecast registered: the provider returns zero demand.

    let rec = service(stock, forecasts).recommend(item.id).await.unwrap();

    assert_eq!(rec.action, ReplenishmentAction::Healthy);
    assert_eq!(rec.sell_through_rate, 0.0);
    assert_eq!(rec.suggested_order_quantity, 0);
}

#[tokio::test]
async fn at_risk_report_covers_the_band_and_skips_forecast_failures() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());
    let first = stock_item(2, 5);
    let second = stock_item(4, 5);
    let healthy = stock_item(100, 5);
    for item in [&first, &second, &healthy] {
        stock.upsert(item.clone());
    }
    forecasts.set_forecast(first.id, 90.0);
    forecasts.set_forecast(second.id, 60.0);
    forecasts.fail_for(second.id);

    let report = service(stock, forecasts).at_risk_report().await.unwrap();

    // The healthy product is outside the band; the failing forecast is
    // skipped rather than failing the report.
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].product_id, first.id);
}

#[tokio::test]
async fn invalid_constants_are_rejected_at_construction() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());
    let constants = ReplenishmentConstants {
        order_cost: 0.0,
        ..Default::default()
    };

    let result = ReplenishmentService::new(
        stock,
        forecasts,
        constants,
        HORIZON_DAYS,
        AT_RISK_MULTIPLIER,
    );
    assert!(matches!(result, Err(AppError::Configuration(_))));
}

#[tokio::test]
async fn explicit_constants_override_the_configured_ones() {
    let stock = Arc::new(FakeStockRepository::new());
    let forecasts = Arc::new(FakeForecastProvider::new());
    let item = stock_item(50, 5);
    stock.upsert(item.clone());

    let svc = service(stock, forecasts);
    let forecast = DemandForecast {
        product_id: item.id,
        horizon_days: HORIZON_DAYS,
        predicted_quantity: 300.0,
    };

    let defaults = svc.recommend_with(&item, &forecast, None);
    let longer_lead = ReplenishmentConstants {
        lead_time_days: 28,
        ..Default::default()
    };
    let overridden = svc.recommend_with(&item, &forecast, Some(&longer_lead));

    // Four times the lead time doubles the safety stock term.
    assert!(overridden.reorder_point > defaults.reorder_point);
    assert!((overridden.safety_stock - 2.0 * defaults.safety_stock).abs() < 0.01);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn test_item(quantity_on_hand: i32) -> StockItem {
    StockItem {
        id: Uuid::new_v4(),
        description: "Prop item".to_string(),
        category: "general".to_string(),
        quantity_on_hand,
        reorder_threshold: 5,
        unit_cost: Decimal::new(1000, 2),
    }
}

fn test_forecast(product_id: Uuid, predicted: f64) -> DemandForecast {
    DemandForecast {
        product_id,
        horizon_days: 30,
        predicted_quantity: predicted,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// EOQ strictly increases with order cost, all else equal.
    #[test]
    fn prop_eoq_increases_with_order_cost(
        annual_demand in 100.0f64..50_000.0,
        order_cost in 10.0f64..200.0,
        holding_cost in 0.5f64..50.0,
    ) {
        let base = economic_order_quantity(annual_demand, order_cost, holding_cost);
        let pricier = economic_order_quantity(annual_demand, order_cost * 4.0, holding_cost);
        prop_assert!(pricier > base);
    }

    /// EOQ strictly decreases as holding cost rises, all else equal.
    #[test]
    fn prop_eoq_decreases_with_holding_cost(
        annual_demand in 100.0f64..50_000.0,
        order_cost in 10.0f64..200.0,
        holding_cost in 0.5f64..50.0,
    ) {
        let base = economic_order_quantity(annual_demand, order_cost, holding_cost);
        let costlier_storage = economic_order_quantity(annual_demand, order_cost, holding_cost * 4.0);
        prop_assert!(costlier_storage < base);
    }

    /// The action priority order is respected: stockout risk beats reorder
    /// beats excess beats healthy, and zero demand is always healthy.
    #[test]
    fn prop_action_priority(
        quantity in 0i32..1000,
        predicted in 0.0f64..3000.0,
    ) {
        let item = test_item(quantity);
        let forecast = test_forecast(item.id, predicted);
        let constants = ReplenishmentConstants::default();
        let rec = compute_recommendation(&item, &forecast, &constants);

        let expected = if predicted == 0.0 {
            ReplenishmentAction::Healthy
        } else if f64::from(quantity) - predicted < 0.0 {
            ReplenishmentAction::StockoutRisk
        } else if i64::from(quantity) <= rec.reorder_point {
            ReplenishmentAction::Reorder
        } else if f64::from(quantity) > predicted * 3.0 {
            ReplenishmentAction::Excess
        } else {
            ReplenishmentAction::Healthy
        };
        prop_assert_eq!(rec.action, expected);
    }

    /// Only order-worthy actions suggest a positive quantity. Demand stays
    /// at one unit or more: below that, EOQ and the shortfall can both
    /// round to zero even for an order-worthy action.
    #[test]
    fn prop_suggested_quantity_only_for_order_actions(
        quantity in 0i32..1000,
        predicted in 1.0f64..3000.0,
    ) {
        let item = test_item(quantity);
        let forecast = test_forecast(item.id, predicted);
        let rec = compute_recommendation(&item, &forecast, &ReplenishmentConstants::default());

        prop_assert!(rec.suggested_order_quantity >= 0);
        match rec.action {
            ReplenishmentAction::Excess | ReplenishmentAction::Healthy => {
                prop_assert_eq!(rec.suggested_order_quantity, 0);
            }
            ReplenishmentAction::StockoutRisk | ReplenishmentAction::Reorder => {
                prop_assert!(rec.suggested_order_quantity > 0);
            }
        }
    }

    /// Sell-through is a percentage in [0, 100].
    #[test]
    fn prop_sell_through_bounded(
        quantity in 0i32..1000,
        predicted in 0.0f64..3000.0,
    ) {
        let item = test_item(quantity);
        let forecast = test_forecast(item.id, predicted);
        let rec = compute_recommendation(&item, &forecast, &ReplenishmentConstants::default());

        prop_assert!(rec.sell_through_rate >= 0.0);
        prop_assert!(rec.sell_through_rate <= 100.0);
    }
}
