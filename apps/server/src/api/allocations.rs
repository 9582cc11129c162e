use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use regionfolio_core::{
    allocations::{AccountAllocation, RedistributionPreview},
    Region,
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{AllocationUpdate, PortfolioSet, RedistributeRequest},
};

/// GET /api/v1/allocations
#[utoipa::path(
    get,
    path = "/api/v1/allocations",
    responses((status = 200, description = "Every stored allocation")),
    tag = "Allocations"
)]
pub async fn list_allocations(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountAllocation>>> {
    Ok(Json(state.allocation_service.list_allocations()?))
}

/// GET /api/v1/allocations/{account_id}
#[utoipa::path(
    get,
    path = "/api/v1/allocations/{account_id}",
    params(("account_id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Allocation with flat <key>_size fields"),
        (status = 404, description = "No allocation stored for the account"),
    ),
    tag = "Allocations"
)]
pub async fn get_allocation(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AccountAllocation>> {
    Ok(Json(state.allocation_service.get_allocation(&account_id)?))
}

/// PUT /api/v1/allocations/{account_id}
/// Saves the allocation. The regions must total exactly 100.
#[utoipa::path(
    put,
    path = "/api/v1/allocations/{account_id}",
    params(("account_id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Saved allocation"),
        (status = 400, description = "Total is not 100 or a region is out of range"),
    ),
    tag = "Allocations"
)]
pub async fn save_allocation(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AllocationUpdate>,
) -> ApiResult<Json<AccountAllocation>> {
    if let Some(body_id) = payload.account_id.as_deref() {
        if body_id != account_id {
            return Err(ApiError::BadRequest(format!(
                "Body accountId '{}' does not match path '{}'",
                body_id, account_id
            )));
        }
    }
    let record = AccountAllocation::new(account_id, payload.portfolio_set_id, payload.regions);
    let saved = state.allocation_service.save_allocation(record).await?;
    Ok(Json(saved))
}

/// POST /api/v1/allocations/{account_id}/redistribute
/// Applies one slider move to the stored allocation without saving it.
#[utoipa::path(
    post,
    path = "/api/v1/allocations/{account_id}/redistribute",
    params(("account_id" = String, Path, description = "Account ID")),
    request_body = RedistributeRequest,
    responses(
        (status = 200, description = "Allocation after the move and the regions that changed"),
        (status = 400, description = "Unknown region or percentage outside 0..=100"),
        (status = 404, description = "No allocation stored for the account"),
    ),
    tag = "Allocations"
)]
pub async fn redistribute(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<RedistributeRequest>,
) -> ApiResult<Json<RedistributionPreview>> {
    let region: Region = request.region.parse()?;
    let preview = state
        .allocation_service
        .redistribute(&account_id, region, request.percentage)?;
    Ok(Json(preview))
}

/// GET /api/v1/allocations/{account_id}/portfolio-set
/// Portfolio set derived from the account's allocation.
#[utoipa::path(
    get,
    path = "/api/v1/allocations/{account_id}/portfolio-set",
    params(("account_id" = String, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Custom or base portfolio set", body = PortfolioSet),
        (status = 404, description = "No allocation stored for the account"),
    ),
    tag = "Allocations"
)]
pub async fn get_allocation_portfolio_set(
    Path(account_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSet>> {
    let record = state.allocation_service.get_allocation(&account_id)?;
    let set = state
        .portfolio_set_service
        .load_for_account(&record)
        .await?;
    Ok(Json(PortfolioSet::from((*set).clone())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/allocations", get(list_allocations))
        .route(
            "/allocations/{account_id}",
            get(get_allocation).put(save_allocation),
        )
        .route("/allocations/{account_id}/redistribute", post(redistribute))
        .route(
            "/allocations/{account_id}/portfolio-set",
            get(get_allocation_portfolio_set),
        )
}
