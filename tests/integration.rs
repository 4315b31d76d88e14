//! Comprehensive integration tests for the Hotel Pricing Engine.
//!
//! This test suite drives the HTTP API against the `riviera_resort` fixture
//! catalog and covers:
//! - Per-room and per-occupancy rates
//! - Sequential, additive and mixed offer composition
//! - Offers covering part of a stay, minimum stays and scope flags
//! - Meal plan surcharges and supplements
//! - Stays crossing contract periods and multi-room bookings
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use hotel_pricing_engine::api::{AppState, create_router};
use hotel_pricing_engine::config::CatalogLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let catalog = CatalogLoader::load("./config/riviera_resort").expect("Failed to load catalog");
    AppState::new(catalog)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/pricing/calculate", body).await
}

fn create_request(
    market_id: &str,
    check_in: &str,
    check_out: &str,
    rooms: Vec<Value>,
    offer_ids: Vec<&str>,
    supplements: Vec<Value>,
) -> Value {
    json!({
        "hotel_id": "riviera_resort",
        "market_id": market_id,
        "check_in": check_in,
        "check_out": check_out,
        "rooms": rooms,
        "offer_ids": offer_ids,
        "supplements": supplements
    })
}

fn create_room(room_type_id: &str, num_adults: u32, num_children: u32) -> Value {
    json!({
        "room_type_id": room_type_id,
        "num_adults": num_adults,
        "num_children": num_children
    })
}

fn create_room_with_meal(
    room_type_id: &str,
    num_adults: u32,
    num_children: u32,
    meal_plan_id: &str,
) -> Value {
    json!({
        "room_type_id": room_type_id,
        "num_adults": num_adults,
        "num_children": num_children,
        "meal_plan_id": meal_plan_id
    })
}

fn create_supplement(supplement_id: &str, quantity: u32) -> Value {
    json!({ "supplement_id": supplement_id, "quantity": quantity })
}

fn amount(result: &Value, field: &str) -> Decimal {
    decimal(
        result["pricing"][field]
            .as_str()
            .unwrap_or_else(|| panic!("{} should be a decimal string", field)),
    )
}

fn nightly_finals(result: &Value) -> Vec<Decimal> {
    result["pricing"]["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| decimal(e["final_price_this_night"].as_str().unwrap()))
        .collect()
}

fn assert_totals(result: &Value, rooms_subtotal: &str, discount: &str, total: &str) {
    assert_eq!(amount(result, "rooms_subtotal"), decimal(rooms_subtotal));
    assert_eq!(amount(result, "discount_amount"), decimal(discount));
    assert_eq!(amount(result, "total_amount"), decimal(total));
}

fn assert_error_code(status: StatusCode, result: &Value, expected_status: StatusCode, code: &str) {
    assert_eq!(status, expected_status, "Unexpected status: {}", result);
    assert_eq!(result["code"], code, "Unexpected error: {}", result);
}

// =============================================================================
// Room Rates
// =============================================================================

#[tokio::test]
async fn test_per_room_rate_ignores_occupancy() {
    for (adults, children) in [(1, 0), (2, 0), (2, 1)] {
        let request = create_request(
            "uk",
            "2026-07-10",
            "2026-07-13",
            vec![create_room("double", adults, children)],
            vec![],
            vec![],
        );

        let (status, result) = post_calculate(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_totals(&result, "300.00", "0", "300.00");
    }
}

#[tokio::test]
async fn test_per_occupancy_rate_matches_exact_occupancy() {
    let single = create_request(
        "uk",
        "2026-07-10",
        "2026-07-11",
        vec![create_room("suite", 1, 0)],
        vec![],
        vec![],
    );
    let double = create_request(
        "uk",
        "2026-07-10",
        "2026-07-11",
        vec![create_room("suite", 2, 0)],
        vec![],
        vec![],
    );

    let (_, single_result) = post_calculate(single).await;
    let (_, double_result) = post_calculate(double).await;

    assert_eq!(amount(&single_result, "total_amount"), decimal("120.00"));
    assert_eq!(amount(&double_result, "total_amount"), decimal("180.00"));
}

#[tokio::test]
async fn test_occupancy_breakdown_mismatch_warns_and_uses_total() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-11",
        vec![create_room("suite", 3, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(amount(&result, "total_amount"), decimal("240.00"));
    let warnings = result["pricing"]["audit_trace"]["warnings"].as_array().unwrap();
    assert!(
        warnings
            .iter()
            .any(|w| w["code"] == "OCCUPANCY_TOTAL_MISMATCH"),
        "Expected mismatch warning, got {:?}",
        warnings
    );
}

// =============================================================================
// Offer Composition
// =============================================================================

#[tokio::test]
async fn test_sequential_offers_compound() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-12",
        vec![create_room("standard", 2, 0)],
        vec!["early_bird", "loyalty"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(nightly_finals(&result), vec![decimal("171.00"); 2]);
    assert_totals(&result, "342.00", "58.00", "342.00");
}

#[tokio::test]
async fn test_additive_offers_sum() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-12",
        vec![create_room("standard", 2, 0)],
        vec!["flash_sale", "member_rate"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(nightly_finals(&result), vec![decimal("170.00"); 2]);
    assert_totals(&result, "340.00", "60.00", "340.00");
}

#[tokio::test]
async fn test_mixed_modes_apply_sequential_then_additive() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-11",
        vec![create_room("standard", 2, 0)],
        vec!["flash_sale", "early_bird"],
        vec![],
    );

    let (_, result) = post_calculate(request).await;

    // 200 x 0.90 x (1 - 0.10)
    assert_totals(&result, "162.00", "38.00", "162.00");
}

#[tokio::test]
async fn test_offer_covering_part_of_stay() {
    let request = create_request(
        "uk",
        "2026-07-01",
        "2026-07-06",
        vec![create_room("standard", 2, 0)],
        vec!["opening_nights"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    let expected: Vec<Decimal> = ["160.00", "160.00", "200.00", "200.00", "200.00"]
        .iter()
        .map(|s| decimal(s))
        .collect();
    assert_eq!(nightly_finals(&result), expected);
    assert_totals(&result, "920.00", "80.00", "920.00");
}

#[tokio::test]
async fn test_long_stay_offer_needs_whole_stay_length() {
    let short = create_request(
        "uk",
        "2026-07-01",
        "2026-07-04",
        vec![create_room("standard", 2, 0)],
        vec!["long_stay"],
        vec![],
    );
    let long = create_request(
        "uk",
        "2026-07-01",
        "2026-07-08",
        vec![create_room("standard", 2, 0)],
        vec!["long_stay"],
        vec![],
    );

    let (_, short_result) = post_calculate(short).await;
    let (_, long_result) = post_calculate(long).await;

    assert_totals(&short_result, "600.00", "0", "600.00");
    assert_totals(&long_result, "1190.00", "210.00", "1190.00");
}

// =============================================================================
// Meal Plans and Supplements
// =============================================================================

#[tokio::test]
async fn test_end_to_end_suite_with_meals_offer_and_supplement() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["summer_saver"],
        vec![create_supplement("spa_access", 3)],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_totals(&result, "594.00", "54.00", "729.00");
    assert_eq!(amount(&result, "supplements_total"), decimal("135.00"));
    assert_eq!(result["pricing"]["total_amount"], "729.00");

    let breakdown = result["pricing"]["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 3);
    for entry in breakdown {
        assert_eq!(entry["base_room_price"], "180.00");
        assert_eq!(entry["final_price_this_night"], "162.00");
        assert_eq!(entry["meal_supplement_final"], "36.00");
        assert_eq!(entry["period_id"], "summer_2026");
    }

    let line = &result["pricing"]["supplements"][0];
    assert_eq!(line["supplement_id"], "spa_access");
    assert_eq!(line["unit"], "per_person_per_stay");
    assert_eq!(line["discounted"], true);
}

#[tokio::test]
async fn test_offer_without_meal_flag_leaves_surcharge_undiscounted() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["early_bird"],
        vec![create_supplement("spa_access", 3)],
    );

    let (_, result) = post_calculate(request).await;

    // 162 x 3 rooms + 40 x 3 meals, spa still discounted
    assert_totals(&result, "606.00", "54.00", "741.00");
}

#[tokio::test]
async fn test_meal_offer_extends_every_room_offer_to_surcharge() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["loyalty", "summer_saver"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    // 180 x 0.95 x 0.9 = 153.90 and 40 x 0.855 = 34.20, three nights
    assert_totals(&result, "564.30", "78.30", "564.30");
    for entry in result["pricing"]["breakdown"].as_array().unwrap() {
        assert_eq!(entry["final_price_this_night"], "153.90");
        assert_eq!(entry["meal_supplement_final"], "34.20");
    }
}

#[tokio::test]
async fn test_room_only_offer_skips_meals_and_supplements() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["room_only_deal"],
        vec![create_supplement("spa_access", 3)],
    );

    let (_, result) = post_calculate(request).await;

    // 144 x 3 rooms + 40 x 3 meals + 150 spa
    assert_totals(&result, "552.00", "108.00", "702.00");
    assert_eq!(result["pricing"]["supplements"][0]["discounted"], false);
}

#[tokio::test]
async fn test_supplement_units_and_discount_eligibility() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room("double", 2, 0)],
        vec!["early_bird"],
        vec![
            create_supplement("parking", 1),
            create_supplement("airport_transfer", 1),
        ],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    let lines = result["pricing"]["supplements"].as_array().unwrap();
    // 15 x 1 x 3 nights x 0.9
    assert_eq!(lines[0]["raw_amount"], "45.00");
    assert_eq!(lines[0]["amount"], "40.50");
    // Transfers never take discounts
    assert_eq!(lines[1]["amount"], "40.00");
    assert_eq!(lines[1]["discounted"], false);
    assert_eq!(amount(&result, "supplements_total"), decimal("80.50"));
}

#[tokio::test]
async fn test_base_meal_plan_request_adds_no_surcharge() {
    let request = create_request(
        "de",
        "2026-07-10",
        "2026-07-12",
        vec![create_room_with_meal("double", 2, 0, "HB")],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["pricing"]["contract_id"], "riviera_de_2026");
    assert_totals(&result, "220.00", "0", "220.00");
}

// =============================================================================
// Stay Shape
// =============================================================================

#[tokio::test]
async fn test_stay_crossing_contract_periods() {
    let request = create_request(
        "uk",
        "2026-08-30",
        "2026-09-03",
        vec![create_room("standard", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    let periods: Vec<&str> = result["pricing"]["breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["period_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        periods,
        vec!["summer_2026", "summer_2026", "autumn_2026", "autumn_2026"]
    );
    assert_totals(&result, "700.00", "0", "700.00");
}

#[tokio::test]
async fn test_multi_room_breakdown_is_per_night_per_room() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-12",
        vec![create_room("double", 2, 0), create_room("suite", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    let breakdown = result["pricing"]["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 4);
    let indices: Vec<u64> = breakdown
        .iter()
        .map(|e| e["room_index"].as_u64().unwrap())
        .collect();
    assert_eq!(indices, vec![0, 1, 0, 1]);
    assert_totals(&result, "560.00", "0", "560.00");
}

#[tokio::test]
async fn test_total_nights_derived_when_omitted() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-14",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (_, result) = post_calculate(request).await;

    assert_eq!(result["pricing"]["total_nights"], 4);
}

#[tokio::test]
async fn test_audit_trace_steps_are_numbered() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["summer_saver"],
        vec![create_supplement("spa_access", 3)],
    );

    let (_, result) = post_calculate(request).await;

    let steps = result["pricing"]["audit_trace"]["steps"].as_array().unwrap();
    for (index, step) in steps.iter().enumerate() {
        assert_eq!(step["step_number"].as_u64().unwrap(), index as u64 + 1);
    }
    assert_eq!(steps[0]["rule_id"], "contract_resolution");
    assert_eq!(steps[steps.len() - 1]["rule_id"], "totals");
}

#[tokio::test]
async fn test_quote_envelope_differs_but_pricing_is_identical() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 2, 1, "HB")],
        vec!["summer_saver", "flash_sale"],
        vec![create_supplement("spa_access", 3)],
    );

    let (_, first) = post_calculate(request.clone()).await;
    let (_, second) = post_calculate(request).await;

    assert_ne!(first["quote_id"], second["quote_id"]);
    assert_eq!(first["pricing"], second["pricing"]);
}

// =============================================================================
// Supplement Endpoint
// =============================================================================

#[tokio::test]
async fn test_supplement_endpoint_prices_per_person() {
    let body = json!({ "supplement_id": "spa_access", "quantity": 4, "nights": 7 });

    let (status, result) = post_json(create_router_for_test(), "/supplements/price", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["unit"], "per_person_per_stay");
    assert_eq!(decimal(result["raw_amount"].as_str().unwrap()), decimal("200"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_unknown_market_returns_404() {
    let request = create_request(
        "uk_missing",
        "2026-07-10",
        "2026-07-13",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::NOT_FOUND, "CONTRACT_NOT_FOUND");
}

#[tokio::test]
async fn test_night_outside_all_periods_rejected() {
    let request = create_request(
        "uk",
        "2026-10-30",
        "2026-11-02",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "PERIOD_NOT_FOUND");
    assert!(result["message"].as_str().unwrap().contains("2026-11-01"));
}

#[tokio::test]
async fn test_huge_stay_rejected_on_first_uncovered_night() {
    let request = create_request(
        "uk",
        "0001-01-01",
        "9999-12-31",
        vec![create_room("double", 2, 0); 2000],
        vec!["summer_saver"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "PERIOD_NOT_FOUND");
    assert!(result["message"].as_str().unwrap().contains("0001-01-01"));
}

#[tokio::test]
async fn test_stop_sale_rejects_whole_stay() {
    let request = create_request(
        "uk",
        "2026-08-14",
        "2026-08-17",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "STOP_SALE");
}

#[tokio::test]
async fn test_period_minimum_stay_enforced() {
    let request = create_request(
        "uk",
        "2026-09-10",
        "2026-09-12",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "MINIMUM_STAY_NOT_MET");
}

#[tokio::test]
async fn test_room_type_not_sold_in_period() {
    let request = create_request(
        "uk",
        "2026-09-10",
        "2026-09-13",
        vec![create_room("suite", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "ROOM_TYPE_NOT_PRICED");
}

#[tokio::test]
async fn test_unpriced_occupancy_rejected() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room("suite", 1, 1)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "UNRESOLVED_OCCUPANCY");
}

#[tokio::test]
async fn test_meal_plan_not_sold_rejected() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("double", 2, 0, "FB")],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "MEAL_PLAN_NOT_AVAILABLE");
}

#[tokio::test]
async fn test_meal_plan_without_occupancy_row_rejected() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room_with_meal("suite", 3, 0, "HB")],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(
        status,
        &result,
        StatusCode::BAD_REQUEST,
        "UNRESOLVED_MEAL_PLAN_OCCUPANCY",
    );
}

#[tokio::test]
async fn test_unknown_offer_rejected() {
    let request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room("double", 2, 0)],
        vec!["black_friday"],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "UNKNOWN_OFFER");
}

#[tokio::test]
async fn test_check_out_before_check_in_rejected() {
    let request = create_request(
        "uk",
        "2026-07-13",
        "2026-07-10",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "INVALID_CRITERIA");
    assert!(result["message"].as_str().unwrap().contains("check_out"));
}

#[tokio::test]
async fn test_total_nights_mismatch_rejected() {
    let mut request = create_request(
        "uk",
        "2026-07-10",
        "2026-07-13",
        vec![create_room("double", 2, 0)],
        vec![],
        vec![],
    );
    request["total_nights"] = json!(5);

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "INVALID_CRITERIA");
    assert!(result["message"].as_str().unwrap().contains("total_nights"));
}

#[tokio::test]
async fn test_missing_rooms_field_returns_validation_error() {
    let request = json!({
        "hotel_id": "riviera_resort",
        "market_id": "uk",
        "check_in": "2026-07-10",
        "check_out": "2026-07-13"
    });

    let (status, result) = post_calculate(request).await;

    assert_error_code(status, &result, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
}
