use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::{error::ApiResult, main_lib::AppState, models::PortfolioSet};

#[utoipa::path(
    get,
    path = "/api/v1/portfolio-sets",
    responses((status = 200, description = "Base portfolio sets", body = [PortfolioSet])),
    tag = "Portfolio sets"
)]
pub async fn list_portfolio_sets(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PortfolioSet>>> {
    let sets = state.portfolio_set_service.list_portfolio_sets()?;
    Ok(Json(sets.into_iter().map(PortfolioSet::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolio-sets/{id}",
    params(("id" = String, Path, description = "Portfolio set ID")),
    responses(
        (status = 200, description = "Base portfolio set", body = PortfolioSet),
        (status = 404, description = "Unknown portfolio set"),
    ),
    tag = "Portfolio sets"
)]
pub async fn get_portfolio_set(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSet>> {
    let set = state.portfolio_set_service.load_portfolio_set(&id).await?;
    Ok(Json(PortfolioSet::from((*set).clone())))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio-sets", get(list_portfolio_sets))
        .route("/portfolio-sets/{id}", get(get_portfolio_set))
}
