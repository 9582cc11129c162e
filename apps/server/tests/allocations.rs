mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{get, json_body, json_request, send, test_app};

fn balanced_body() -> Value {
    json!({
        "portfolioSetId": "core",
        "au_size": 20,
        "dm_size": 40,
        "usa_size": 30,
        "usa_currency_hedge": true,
        "uk_size": 10
    })
}

fn size(allocation: &Value, key: &str) -> f64 {
    allocation[format!("{}_size", key)].as_f64().unwrap()
}

fn put_allocation(account_id: &str, body: Value) -> axum::http::Request<axum::body::Body> {
    json_request("PUT", &format!("/api/v1/allocations/{}", account_id), body)
}

#[tokio::test]
async fn lists_the_nine_regions() {
    let (app, _tmp) = test_app().await;

    let response = send(&app, get("/api/v1/regions")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let regions = json_body(response).await;
    let regions = regions.as_array().unwrap();
    assert_eq!(regions.len(), 9);
    assert_eq!(regions[0], json!({"key": "au", "title": "Australia"}));
}

#[tokio::test]
async fn saves_and_loads_an_allocation() {
    let (app, _tmp) = test_app().await;

    let response = send(&app, put_allocation("acc-1", balanced_body())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/api/v1/allocations/acc-1")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let saved = json_body(response).await;

    assert_eq!(saved["accountId"], "acc-1");
    assert_eq!(saved["portfolioSetId"], "core");
    assert_eq!(size(&saved, "dm"), 40.0);
    assert_eq!(size(&saved, "japan"), 0.0);
    assert_eq!(saved["usa_currency_hedge"], true);
    assert!(saved["updatedAt"].is_string());
}

#[tokio::test]
async fn rejects_an_allocation_that_does_not_total_100() {
    let (app, _tmp) = test_app().await;
    let mut body = balanced_body();
    body["uk_size"] = json!(7);

    let response = send(&app, put_allocation("acc-1", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error = json_body(response).await;
    assert_eq!(error["code"], 400);
    assert!(error["message"].as_str().unwrap().contains("97"));

    let response = send(&app, get("/api/v1/allocations/acc-1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rejects_mismatched_account_ids() {
    let (app, _tmp) = test_app().await;
    let mut body = balanced_body();
    body["accountId"] = json!("acc-2");

    let response = send(&app, put_allocation("acc-1", body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn redistribute_previews_without_persisting() {
    let (app, _tmp) = test_app().await;
    send(&app, put_allocation("acc-1", balanced_body())).await;

    let request = json_request(
        "POST",
        "/api/v1/allocations/acc-1/redistribute",
        json!({"region": "au", "percentage": 50}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let preview = json_body(response).await;

    assert_eq!(preview["affected"], json!(["au", "dm"]));
    assert_eq!(size(&preview["allocation"], "au"), 50.0);
    assert_eq!(size(&preview["allocation"], "dm"), 10.0);

    let stored = json_body(send(&app, get("/api/v1/allocations/acc-1")).await).await;
    assert_eq!(size(&stored, "dm"), 40.0);
}

#[tokio::test]
async fn redistribute_rejects_unknown_regions() {
    let (app, _tmp) = test_app().await;
    send(&app, put_allocation("acc-1", balanced_body())).await;

    let request = json_request(
        "POST",
        "/api/v1/allocations/acc-1/redistribute",
        json!({"region": "mars", "percentage": 10}),
    );
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn account_portfolio_set_follows_the_saved_allocation() {
    let (app, _tmp) = test_app().await;
    send(&app, put_allocation("acc-1", balanced_body())).await;

    let response = send(&app, get("/api/v1/allocations/acc-1/portfolio-set")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let set = json_body(response).await;

    assert_eq!(set["id"], "goal_acc-1_core");
    assert_eq!(set["baseSetId"], "core");
    assert_eq!(set["name"], "Core Portfolio");
    assert_eq!(set["isCustom"], true);
    let usa = set["regions"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["region"] == "usa")
        .unwrap();
    assert_eq!(usa["weight"].as_f64(), Some(30.0));
    assert_eq!(usa["currencyHedge"], true);
}

#[tokio::test]
async fn base_portfolio_sets_are_served() {
    let (app, _tmp) = test_app().await;

    let response = send(&app, get("/api/v1/portfolio-sets/core")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let set = json_body(response).await;
    assert_eq!(set["isCustom"], false);

    let response = send(&app, get("/api/v1/portfolio-sets")).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 2);

    let response = send(&app, get("/api/v1/portfolio-sets/aggressive")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_portfolio_set_is_a_conflict() {
    let (app, _tmp) = test_app().await;
    let mut body = balanced_body();
    body["portfolioSetId"] = json!("aggressive");

    let response = send(&app, put_allocation("acc-1", body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, get("/api/v1/allocations")).await;
    assert_eq!(json_body(response).await, json!([]));
}
