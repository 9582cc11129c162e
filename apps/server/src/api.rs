use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, routing::get, Json, Router};
use regionfolio_core::{regions::RegionInfo, Region as CoreRegion};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    main_lib::AppState,
    models::{PortfolioSet, RedistributeRequest, Region, RegionWeight},
};

pub mod allocations;
pub mod portfolio_sets;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz() -> &'static str {
    "ok"
}

#[utoipa::path(get, path = "/api/v1/regions", responses((status = 200, body = [Region])))]
pub async fn list_regions() -> Json<Vec<Region>> {
    Json(
        CoreRegion::ALL
            .iter()
            .map(|r| Region::from(RegionInfo::from(*r)))
            .collect(),
    )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        list_regions,
        allocations::list_allocations,
        allocations::get_allocation,
        allocations::save_allocation,
        allocations::redistribute,
        allocations::get_allocation_portfolio_set,
        portfolio_sets::list_portfolio_sets,
        portfolio_sets::get_portfolio_set
    ),
    components(schemas(Region, RedistributeRequest, PortfolioSet, RegionWeight)),
    tags((name = "regionfolio"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().with_context(|| format!("Invalid CORS origin '{}'", o)))
            .collect::<anyhow::Result<Vec<HeaderValue>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/regions", get(list_regions))
        .route("/openapi.json", get(openapi_json))
        .merge(allocations::router())
        .merge(portfolio_sets::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
