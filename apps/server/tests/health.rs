mod common;

use common::{get, json_body, send, test_app};

#[tokio::test]
async fn healthz_works() {
    let (app, _tmp) = test_app().await;

    let response = send(&app, get("/api/v1/healthz")).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _tmp) = test_app().await;

    let response = send(&app, get("/api/v1/openapi.json")).await;
    assert_eq!(response.status(), 200);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/v1/allocations/{account_id}"].is_object());
}
