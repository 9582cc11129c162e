use std::sync::Arc;

use crate::config::{Config, LogFormat};
use regionfolio_core::{
    allocations::{AllocationService, AllocationServiceTrait},
    portfolio_sets::{PortfolioSetService, PortfolioSetServiceTrait},
};
use regionfolio_storage_sqlite::{
    db::{self, write_actor},
    AllocationRepository, PortfolioSetRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub allocation_service: Arc<dyn AllocationServiceTrait>,
    pub portfolio_set_service: Arc<dyn PortfolioSetServiceTrait>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let portfolio_set_repository = Arc::new(PortfolioSetRepository::new(pool.clone()));
    let portfolio_set_service: Arc<dyn PortfolioSetServiceTrait> =
        Arc::new(PortfolioSetService::new(portfolio_set_repository));

    let allocation_repository = Arc::new(AllocationRepository::new(pool.clone(), writer));
    let allocation_service: Arc<dyn AllocationServiceTrait> = Arc::new(AllocationService::new(
        allocation_repository,
        portfolio_set_service.clone(),
    ));

    Ok(Arc::new(AppState {
        allocation_service,
        portfolio_set_service,
    }))
}
